//! Shared geometric and color primitives used across editor and render modules.

use glam::Affine2;

pub type Point = glam::Vec2;

/// Inverse of `matrix`, or `None` when it is singular.
pub fn try_inverse(matrix: &Affine2) -> Option<Affine2> {
    let det = matrix.matrix2.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    Some(matrix.inverse())
}

/// Axis-aligned rectangle stored as edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::ltrb(x, y, x + width, y + height)
    }

    pub fn wh(width: f32, height: f32) -> Self {
        Self::xywh(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) * 0.5
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) * 0.5
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    pub fn is_normalized(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    pub fn normalized(&self) -> Self {
        rect_from_points(
            Point::new(self.left, self.top),
            Point::new(self.right, self.bottom),
        )
    }

    /// Clockwise from the top-left: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }
}

pub fn rect_from_points(p0: Point, p1: Point) -> Rect {
    Rect::ltrb(
        p0.x.min(p1.x),
        p0.y.min(p1.y),
        p0.x.max(p1.x),
        p0.y.max(p1.y),
    )
}

/// Strict interior test; points on an edge are outside.
pub fn contains(rect: &Rect, point: Point) -> bool {
    rect.left < point.x && point.x < rect.right && rect.top < point.y && point.y < rect.bottom
}

pub fn offset_rect(rect: &Rect, dx: f32, dy: f32) -> Rect {
    Rect::ltrb(
        rect.left + dx,
        rect.top + dy,
        rect.right + dx,
        rect.bottom + dy,
    )
}

/// Straight (non-premultiplied) RGBA with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgba(self) -> (f32, f32, f32, f32) {
        (self.r, self.g, self.b, self.a)
    }
}
