use glam::Affine2;

use crate::geometry::{try_inverse, Point};

/// Packs premultiplied channels into an `0xAARRGGBB` word.
pub const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Procedural fill built from sines of the local-space coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrigShader {
    local_inverse: Affine2,
    alpha: f32,
}

impl TrigShader {
    pub fn new(local_inverse: Affine2, alpha: f32) -> Self {
        Self {
            local_inverse,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Binds the shader to a device transform. Fails when `ctm` is singular.
    pub fn context(&self, ctm: &Affine2) -> Option<TrigContext> {
        let device_to_local = self.local_inverse * try_inverse(ctm)?;
        Some(TrigContext {
            device_to_local,
            alpha: self.alpha,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrigContext {
    device_to_local: Affine2,
    alpha: f32,
}

impl TrigContext {
    /// Shades `row.len()` pixels starting at device pixel `(x, y)`.
    pub fn shade_row(&self, x: i32, y: i32, row: &mut [u32]) {
        let mut local = self
            .device_to_local
            .transform_point2(Point::new(x as f32 + 0.5, y as f32 + 0.5));
        let step = self.device_to_local.matrix2.x_axis;
        let alpha = self.alpha;
        let ia = channel(alpha);
        for pixel in row.iter_mut() {
            let red = (local.x.sin() * local.y.cos() + 1.0) / 2.0;
            let blue = (local.y.sin() + 1.0) / 2.0;
            let green = ((local.y * local.x * 0.25).sin() + 1.0) / 2.0;
            *pixel = pack_argb(
                ia,
                channel(red * alpha),
                channel(green * alpha),
                channel(blue * alpha),
            );
            local.x += step.x;
            local.y += step.y;
        }
    }
}

fn channel(unit: f32) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}
