use gtk4::cairo;

use crate::geometry::try_inverse;
use crate::render::{Affine2, Bitmap, Paint, Point, Rect, Shader, Surface, TrigShader};

/// Column-major `[xx, yx, xy, yy, x0, y0]`, the layout cairo expects.
pub(super) fn to_cairo_matrix(matrix: &Affine2) -> cairo::Matrix {
    let [xx, yx, xy, yy, x0, y0] = matrix.to_cols_array().map(f64::from);
    cairo::Matrix::new(xx, yx, xy, yy, x0, y0)
}

/// [`Surface`] over a cairo context.
///
/// The editor's transform stack is mirrored onto cairo's so paths are built in
/// user space, and tracked locally so procedural shaders can be evaluated per
/// device pixel. Shader paints ignore `paint.color`.
pub(super) struct CairoSurface<'a> {
    cr: &'a cairo::Context,
    base: cairo::Matrix,
    ctm: Affine2,
    saved: Vec<Affine2>,
}

impl<'a> CairoSurface<'a> {
    pub(super) fn new(cr: &'a cairo::Context) -> Self {
        Self {
            cr,
            base: cr.matrix(),
            ctm: Affine2::IDENTITY,
            saved: Vec::new(),
        }
    }

    fn fill(&self, paint: &Paint) {
        match &paint.shader {
            None => {
                let (r, g, b, a) = paint.color.rgba();
                self.cr
                    .set_source_rgba(f64::from(r), f64::from(g), f64::from(b), f64::from(a));
                log_cairo(self.cr.fill(), "solid fill");
            }
            Some(Shader::Bitmap { bitmap, local }) => self.fill_bitmap(bitmap, local),
            Some(Shader::Trig(shader)) => self.fill_trig(shader),
        }
    }

    fn fill_bitmap(&self, bitmap: &Bitmap, local: &Affine2) {
        let Some(pattern_matrix) = try_inverse(local) else {
            self.cr.new_path();
            return;
        };
        let Some(image) = bitmap_to_cairo_surface(bitmap) else {
            tracing::warn!(
                width = bitmap.width(),
                height = bitmap.height(),
                "failed to upload bitmap"
            );
            self.cr.new_path();
            return;
        };
        let pattern = cairo::SurfacePattern::create(&image);
        pattern.set_matrix(to_cairo_matrix(&pattern_matrix));
        log_cairo(self.cr.set_source(&pattern), "bitmap source");
        log_cairo(self.cr.fill(), "bitmap fill");
    }

    /// Shades the current path's device-space bounding box pixel by pixel.
    fn fill_trig(&self, shader: &TrigShader) {
        let Some(context) = shader.context(&self.ctm) else {
            self.cr.new_path();
            return;
        };

        log_cairo(self.cr.save(), "save");
        self.cr.set_matrix(self.base);
        let bounds = self.cr.fill_extents();
        let painted = bounds.ok().and_then(|(x1, y1, x2, y2)| {
            let x = x1.floor() as i32;
            let y = y1.floor() as i32;
            let width = (x2.ceil() as i32 - x).max(0);
            let height = (y2.ceil() as i32 - y).max(0);
            if width == 0 || height == 0 {
                return None;
            }
            let mut image =
                cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).ok()?;
            let stride = usize::try_from(image.stride()).ok()?;
            {
                let mut data = image.data().ok()?;
                let mut row = vec![0u32; usize::try_from(width).ok()?];
                for dy in 0..height {
                    context.shade_row(x, y + dy, &mut row);
                    let offset = usize::try_from(dy).ok()?.checked_mul(stride)?;
                    let dst = data.get_mut(offset..offset + row.len() * 4)?;
                    for (pixel, chunk) in row.iter().zip(dst.chunks_exact_mut(4)) {
                        chunk.copy_from_slice(&pixel.to_ne_bytes());
                    }
                }
            }
            image.mark_dirty();
            self.cr
                .set_source_surface(&image, f64::from(x), f64::from(y))
                .ok()?;
            self.cr.fill().ok()
        });
        if painted.is_none() {
            self.cr.new_path();
        }
        log_cairo(self.cr.restore(), "restore");
    }
}

impl Surface for CairoSurface<'_> {
    fn draw_rect(&mut self, rect: &Rect, paint: &Paint) {
        self.cr.rectangle(
            f64::from(rect.left),
            f64::from(rect.top),
            f64::from(rect.width()),
            f64::from(rect.height()),
        );
        self.fill(paint);
    }

    fn draw_convex_polygon(&mut self, points: &[Point], paint: &Paint) {
        if points.len() < 3 {
            return;
        }
        self.cr.new_path();
        self.cr
            .move_to(f64::from(points[0].x), f64::from(points[0].y));
        for point in &points[1..] {
            self.cr.line_to(f64::from(point.x), f64::from(point.y));
        }
        self.cr.close_path();
        self.fill(paint);
    }

    fn save(&mut self) {
        log_cairo(self.cr.save(), "save");
        self.saved.push(self.ctm);
    }

    fn restore(&mut self) {
        let Some(ctm) = self.saved.pop() else {
            tracing::warn!("restore without matching save");
            return;
        };
        log_cairo(self.cr.restore(), "restore");
        self.ctm = ctm;
    }

    fn concat(&mut self, matrix: &Affine2) {
        self.cr.transform(to_cairo_matrix(matrix));
        self.ctm = self.ctm * *matrix;
    }
}

fn log_cairo(result: Result<(), cairo::Error>, operation: &str) {
    if let Err(err) = result {
        tracing::warn!(?err, operation, "cairo call failed");
    }
}

fn bitmap_to_cairo_surface(bitmap: &Bitmap) -> Option<cairo::ImageSurface> {
    let width = i32::try_from(bitmap.width()).ok()?;
    let height = i32::try_from(bitmap.height()).ok()?;
    let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).ok()?;
    let stride = usize::try_from(surface.stride()).ok()?;
    let row_len = usize::try_from(bitmap.width()).ok()?;
    let pixels = bitmap.to_premultiplied_argb();
    {
        let mut data = surface.data().ok()?;
        for (row, src) in pixels.chunks_exact(row_len).enumerate() {
            let offset = row.checked_mul(stride)?;
            let dst = data.get_mut(offset..offset + row_len * 4)?;
            for (pixel, chunk) in src.iter().zip(dst.chunks_exact_mut(4)) {
                chunk.copy_from_slice(&pixel.to_ne_bytes());
            }
        }
    }
    surface.mark_dirty();
    Some(surface)
}
