use crate::geometry::{contains, rect_from_points, Color, Point, Rect};
use crate::render::{Paint, Surface};

use super::shapes::Shape;

/// Half-size of a corner's square hit target, in model units.
pub const CORNER_SIZE: f32 = 9.0;

/// Discriminants index into [`Rect::corners`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeCorner {
    TopLeft = 0,
    TopRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
}

impl ResizeCorner {
    /// Test order for overlapping hit targets.
    pub const ALL: [ResizeCorner; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];

    pub fn point(self, rect: &Rect) -> Point {
        rect.corners()[self as usize]
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomRight => Self::TopLeft,
            Self::BottomLeft => Self::TopRight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerHit {
    pub corner: ResizeCorner,
    /// Opposite corner; stays fixed while the hit corner is dragged.
    pub anchor: Point,
}

fn near_corner(corner: Point, point: Point) -> bool {
    let dx = (point.x - corner.x).abs();
    let dy = (point.y - corner.y).abs();
    dx.max(dy) <= CORNER_SIZE
}

/// `point` must already be in the rect's own (model) space.
pub fn resize_corner_at(rect: &Rect, point: Point) -> Option<CornerHit> {
    ResizeCorner::ALL
        .into_iter()
        .find(|corner| near_corner(corner.point(rect), point))
        .map(|corner| CornerHit {
            corner,
            anchor: corner.opposite().point(rect),
        })
}

/// Index of the topmost shape whose bounds strictly contain `point`.
pub fn top_shape_index_at(shapes: &[Shape], point: Point) -> Option<usize> {
    shapes
        .iter()
        .rposition(|shape| contains(&shape.rect(), point))
}

/// Corner brackets marking the selected shape, drawn in model space.
pub fn draw_highlight(surface: &mut dyn Surface, rect: &Rect) {
    let paint = Paint::solid(Color::BLACK);
    let size = CORNER_SIZE;
    draw_bracket(surface, &paint, rect.left, rect.top, size, size);
    draw_bracket(surface, &paint, rect.left, rect.bottom, size, -size);
    draw_bracket(surface, &paint, rect.right, rect.top, -size, size);
    draw_bracket(surface, &paint, rect.right, rect.bottom, -size, -size);
}

fn draw_bracket(surface: &mut dyn Surface, paint: &Paint, x: f32, y: f32, dx: f32, dy: f32) {
    surface.draw_rect(
        &rect_from_points(Point::new(x, y - 1.0), Point::new(x + dx, y + 1.0)),
        paint,
    );
    surface.draw_rect(
        &rect_from_points(Point::new(x - 1.0, y), Point::new(x + 1.0, y + dy)),
        paint,
    );
}
