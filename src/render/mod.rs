//! Drawing-surface contract the editor renders through.
//!
//! The rasterizer lives behind [`Surface`]; this module only describes what
//! gets drawn and with which paint. [`DisplayList`] records draw calls for
//! headless use and tests.

mod bitmap;
mod display_list;
mod trig;

pub use crate::geometry::{Color, Point, Rect};
pub use glam::Affine2;
pub use bitmap::Bitmap;
pub use display_list::{DisplayList, DrawCommand, DrawOp};
pub use trig::{pack_argb, TrigContext, TrigShader};

#[derive(Debug, Clone, PartialEq)]
pub enum Shader {
    /// Samples `bitmap` through `local`, which maps bitmap space to user space.
    Bitmap { bitmap: Bitmap, local: Affine2 },
    Trig(TrigShader),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub shader: Option<Shader>,
}

impl Paint {
    pub const fn solid(color: Color) -> Self {
        Self {
            color,
            shader: None,
        }
    }

    pub const fn with_shader(color: Color, shader: Shader) -> Self {
        Self {
            color,
            shader: Some(shader),
        }
    }
}

/// A canvas with a save/restore transform stack.
///
/// Geometry passed to the draw calls is in user space and is mapped through
/// the current transform by the implementation.
pub trait Surface {
    fn draw_rect(&mut self, rect: &Rect, paint: &Paint);

    /// `points` must describe a convex polygon; fewer than three points draw nothing.
    fn draw_convex_polygon(&mut self, points: &[Point], paint: &Paint);

    fn save(&mut self);

    fn restore(&mut self);

    /// Pre-concatenates `matrix` onto the current transform.
    fn concat(&mut self, matrix: &Affine2);

    fn translate(&mut self, x: f32, y: f32) {
        self.concat(&Affine2::from_translation(Point::new(x, y)));
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.concat(&Affine2::from_scale(Point::new(x, y)));
    }

    fn rotate(&mut self, radians: f32) {
        self.concat(&Affine2::from_angle(radians));
    }
}
