use std::f32::consts::PI;

use glam::Affine2;

use crate::geometry::{try_inverse, Color, Point, Rect};
use crate::render::{Bitmap, Paint, Shader, Surface, TrigShader};

const BITMAP_DEFAULT_BOUNDS: (f32, f32, f32, f32) = (20.0, 20.0, 150.0, 150.0);
const BITMAP_DEFAULT_COLOR: Color = Color::new(1.0, 0.0, 0.0, 0.0);
const POLYGON_DEFAULT_BOUNDS: (f32, f32, f32, f32) = (100.0, 100.0, 150.0, 150.0);
const POLYGON_SHADER_SCALE: f32 = 30.0;
pub const POLYGON_MIN_SIDES: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub id: u64,
    pub rect: Rect,
    pub color: Color,
}

impl RectShape {
    /// Starts empty; a create drag gives it its extent.
    pub fn new(id: u64, color: Color) -> Self {
        Self {
            id,
            rect: Rect::default(),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BitmapShape {
    pub id: u64,
    pub rect: Rect,
    pub color: Color,
    pub bitmap: Bitmap,
}

impl BitmapShape {
    pub fn new(id: u64, bitmap: Bitmap) -> Self {
        let (x, y, width, height) = BITMAP_DEFAULT_BOUNDS;
        Self {
            id,
            rect: Rect::xywh(x, y, width, height),
            color: BITMAP_DEFAULT_COLOR,
            bitmap,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    pub id: u64,
    pub rect: Rect,
    pub color: Color,
    pub sides: u32,
}

impl PolygonShape {
    pub fn new(id: u64, color: Color, sides: u32) -> Self {
        let (x, y, width, height) = POLYGON_DEFAULT_BOUNDS;
        Self {
            id,
            rect: Rect::xywh(x, y, width, height),
            color,
            sides: sides.max(POLYGON_MIN_SIDES),
        }
    }

    /// Vertices of the regular polygon inscribed in the bounding rect.
    pub fn vertices(&self) -> Vec<Point> {
        regular_polygon(
            self.sides,
            self.rect.center_x(),
            self.rect.center_y(),
            self.rect.width() * 0.5,
            self.rect.height() * 0.5,
        )
    }

    pub fn shader(&self) -> TrigShader {
        let center = Point::new(self.rect.center_x(), self.rect.center_y());
        let local = Affine2::from_translation(center)
            * Affine2::from_scale(Point::splat(POLYGON_SHADER_SCALE));
        TrigShader::new(try_inverse(&local).unwrap_or_default(), self.color.a)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle(RectShape),
    Bitmap(BitmapShape),
    Polygon(PolygonShape),
}

impl Shape {
    pub const fn id(&self) -> u64 {
        match self {
            Self::Rectangle(shape) => shape.id,
            Self::Bitmap(shape) => shape.id,
            Self::Polygon(shape) => shape.id,
        }
    }

    pub const fn rect(&self) -> Rect {
        match self {
            Self::Rectangle(shape) => shape.rect,
            Self::Bitmap(shape) => shape.rect,
            Self::Polygon(shape) => shape.rect,
        }
    }

    /// Stores `rect` normalized so left <= right and top <= bottom.
    pub fn set_rect(&mut self, rect: Rect) {
        let rect = rect.normalized();
        match self {
            Self::Rectangle(shape) => shape.rect = rect,
            Self::Bitmap(shape) => shape.rect = rect,
            Self::Polygon(shape) => shape.rect = rect,
        }
    }

    pub const fn color(&self) -> Color {
        match self {
            Self::Rectangle(shape) => shape.color,
            Self::Bitmap(shape) => shape.color,
            Self::Polygon(shape) => shape.color,
        }
    }

    pub fn set_color(&mut self, color: Color) {
        match self {
            Self::Rectangle(shape) => shape.color = color,
            Self::Bitmap(shape) => shape.color = color,
            Self::Polygon(shape) => shape.color = color,
        }
    }

    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Rectangle(_) => "rectangle",
            Self::Bitmap(_) => "bitmap",
            Self::Polygon(_) => "polygon",
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Self::Rectangle(shape) => {
                surface.draw_rect(&shape.rect, &Paint::solid(shape.color));
            }
            Self::Bitmap(shape) => draw_bitmap(surface, shape),
            Self::Polygon(shape) => {
                let paint = Paint::with_shader(shape.color, Shader::Trig(shape.shader()));
                surface.draw_convex_polygon(&shape.vertices(), &paint);
            }
        }
    }
}

fn draw_bitmap(surface: &mut dyn Surface, shape: &BitmapShape) {
    // A zero-sized rect would need a singular scale.
    if shape.bitmap.is_empty() || shape.rect.is_empty() {
        return;
    }
    let width = shape.bitmap.width() as f32;
    let height = shape.bitmap.height() as f32;
    let paint = Paint::with_shader(
        shape.color,
        Shader::Bitmap {
            bitmap: shape.bitmap.clone(),
            local: Affine2::IDENTITY,
        },
    );

    surface.save();
    surface.translate(shape.rect.left, shape.rect.top);
    surface.scale(shape.rect.width() / width, shape.rect.height() / height);
    surface.draw_rect(&Rect::wh(width, height), &paint);
    surface.restore();
}

pub fn regular_polygon(count: u32, cx: f32, cy: f32, rx: f32, ry: f32) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    let delta = PI * 2.0 / count as f32;
    (0..count)
        .map(|i| {
            let angle = delta * i as f32;
            Point::new(cx + angle.cos() * rx, cy + angle.sin() * ry)
        })
        .collect()
}
