use std::rc::Rc;

use image::RgbaImage;

use super::trig::pack_argb;

/// Decoded RGBA image shared between shapes and paints.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pixels: Rc<RgbaImage>,
}

impl Bitmap {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Rc::new(pixels),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Row-major premultiplied ARGB words, the layout most rasterizers blit from.
    pub fn to_premultiplied_argb(&self) -> Vec<u32> {
        self.pixels
            .pixels()
            .map(|pixel| {
                let [r, g, b, a] = pixel.0;
                pack_argb(
                    a,
                    premultiply(r, a),
                    premultiply(g, a),
                    premultiply(b, a),
                )
            })
            .collect()
    }
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    let scaled = (u32::from(channel) * u32::from(alpha) + 127) / 255;
    u8::try_from(scaled).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn bitmap_reports_dimensions() {
        let bitmap = Bitmap::new(RgbaImage::new(4, 3));
        assert_eq!(bitmap.width(), 4);
        assert_eq!(bitmap.height(), 3);
        assert!(!bitmap.is_empty());
        assert!(Bitmap::new(RgbaImage::new(0, 3)).is_empty());
    }

    #[test]
    fn premultiplied_argb_scales_color_by_alpha() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([255, 128, 0, 255]));
        image.put_pixel(1, 0, Rgba([255, 255, 255, 0]));
        let words = Bitmap::new(image).to_premultiplied_argb();
        assert_eq!(words, vec![0xFF_FF_80_00, 0x00_00_00_00]);
    }

    #[test]
    fn premultiply_rounds_half_alpha() {
        assert_eq!(premultiply(255, 128), 128);
        assert_eq!(premultiply(100, 255), 100);
        assert_eq!(premultiply(100, 0), 0);
    }
}
