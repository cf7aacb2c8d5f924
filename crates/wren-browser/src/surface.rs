//! Software raster surface for headless rendering.
//!
//! ```text
//! Style → Layout → Paint → Surface
//!                    ↓        ↓
//!              DisplayList → Pixels
//! ```
//!
//! The surface knows nothing about CSS, layout or the DOM. It fills
//! rectangles, rasterizes glyphs with fontdue and blits decoded images into
//! an RGBA buffer, then writes it out as PNG.

use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageBuffer, Rgba, RgbaImage};
use wren_common::image::LoadedImage;
use wren_common::warning::warn_once;
use wren_css::{ColorValue, DrawingSurface};

use crate::font_metrics::FontBook;

/// Largest font size glyphs are rasterized at.
const MAX_GLYPH_SIZE: f64 = 4096.0;

/// An RGBA pixel buffer implementing [`DrawingSurface`].
pub struct RasterSurface<'a> {
    buffer: RgbaImage,
    color: ColorValue,
    fonts: &'a FontBook,
}

impl<'a> RasterSurface<'a> {
    /// A white `width`×`height` surface drawing text with `fonts`.
    #[must_use]
    pub fn new(width: u32, height: u32, fonts: &'a FontBook) -> Self {
        Self {
            buffer: ImageBuffer::from_pixel(width, height, Rgba([255, 255, 255, 255])),
            color: ColorValue::BLACK,
            fonts,
        }
    }

    /// The RGBA value at `(x, y)`, or `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.buffer.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// The rendered buffer.
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.buffer
    }

    /// Write the buffer to `path` as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.buffer
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("failed to write '{}'", path.display()))
    }

    /// Blend `fg` with coverage `alpha` over the pixel at `(x, y)`, if it is
    /// on the surface.
    fn blend(&mut self, x: i64, y: i64, fg: [u8; 3], alpha: u8) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        let Some(bg) = self.buffer.get_pixel_mut_checked(x, y) else {
            return;
        };
        *bg = alpha_blend(fg, *bg, alpha);
    }
}

impl DrawingSurface for RasterSurface<'_> {
    fn set_color(&mut self, color: ColorValue) {
        self.color = color;
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let ColorValue { r, g, b, a } = self.color;
        let (Some((x0, x1)), Some((y0, y1))) = (
            visible_span(x.round(), (x + width).round(), self.buffer.width()),
            visible_span(y.round(), (y + height).round(), self.buffer.height()),
        ) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                let bg = self.buffer.get_pixel_mut(px, py);
                *bg = alpha_blend([r, g, b], *bg, a);
            }
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss
    )]
    fn draw_text(&mut self, x: f64, y: f64, font: &str, size: f64, text: &str, color: ColorValue) {
        let Some(font) = self.fonts.get(font) else {
            return;
        };
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let drawable_size = size > 0.0 && size <= MAX_GLYPH_SIZE;
        if !drawable_size {
            warn_once(
                "Font",
                &format!("not drawing text at font size {size}, the limit is {MAX_GLYPH_SIZE}px"),
            );
            return;
        }
        let px = size as f32;
        let baseline = y.round() as i64;
        let mut pen_x = x as f32;
        let right_edge = self.buffer.width() as f32;

        for ch in text.chars().filter(|ch| !ch.is_control()) {
            if pen_x >= right_edge {
                break;
            }
            let (metrics, bitmap) = font.rasterize(ch, px);
            // `ymin` is the bitmap's bottom edge relative to the baseline,
            // positive upwards.
            let left = pen_x.round() as i64 + i64::from(metrics.xmin);
            let top = baseline - i64::from(metrics.ymin) - metrics.height as i64;
            for (row, coverage_row) in bitmap.chunks(metrics.width.max(1)).enumerate() {
                for (col, &coverage) in coverage_row.iter().enumerate() {
                    if coverage == 0 {
                        continue;
                    }
                    let alpha = scale_alpha(coverage, color.a);
                    self.blend(
                        left + col as i64,
                        top + row as i64,
                        [color.r, color.g, color.b],
                        alpha,
                    );
                }
            }
            pen_x += metrics.advance_width;
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn blit_image(&mut self, image: &LoadedImage, x: f64, y: f64) {
        let (left, top) = (x.round(), y.round());
        let (Some((x0, x1)), Some((y0, y1))) = (
            visible_span(left, left + f64::from(image.width()), self.buffer.width()),
            visible_span(top, top + f64::from(image.height()), self.buffer.height()),
        ) else {
            return;
        };
        // Both origins are finite and within one image size of the surface.
        let (left, top) = (left as i64, top as i64);
        for py in y0..y1 {
            for px in x0..x1 {
                let (Ok(sx), Ok(sy)) = (
                    u32::try_from(i64::from(px) - left),
                    u32::try_from(i64::from(py) - top),
                ) else {
                    continue;
                };
                let Some([r, g, b, a]) = image.pixel(sx, sy) else {
                    continue;
                };
                if a > 0 {
                    let bg = self.buffer.get_pixel_mut(px, py);
                    *bg = alpha_blend([r, g, b], *bg, a);
                }
            }
        }
    }

    fn size(&self) -> (f64, f64) {
        (
            f64::from(self.buffer.width()),
            f64::from(self.buffer.height()),
        )
    }
}

/// The pixels `start..end` of an axis `limit` pixels long covered by the
/// rounded span `from..to`, or `None` when nothing is visible. Infinite ends
/// clamp to the surface; NaN draws nothing.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn visible_span(from: f64, to: f64, limit: u32) -> Option<(u32, u32)> {
    if from.is_nan() || to.is_nan() {
        return None;
    }
    let limit = f64::from(limit);
    let (start, end) = (from.clamp(0.0, limit), to.clamp(0.0, limit));
    (start < end).then_some((start as u32, end as u32))
}

/// Combine glyph coverage with the text color's own alpha.
#[allow(clippy::cast_possible_truncation)]
fn scale_alpha(coverage: u8, alpha: u8) -> u8 {
    ((u16::from(coverage) * u16::from(alpha)) / 255) as u8
}

/// Blend `fg` at opacity `alpha` over `bg`; the result is opaque.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_blend(fg: [u8; 3], bg: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let a = f32::from(alpha) / 255.0;
    let inv_a = 1.0 - a;
    let mix = |i: usize| f32::from(fg[i]).mul_add(a, f32::from(bg[i]) * inv_a).round() as u8;
    Rgba([mix(0), mix(1), mix(2), 255])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_clips_to_surface() {
        let fonts = FontBook::new();
        let mut surface = RasterSurface::new(4, 4, &fonts);
        surface.set_color(ColorValue::BLACK);
        surface.fill_rect(-2.0, 2.0, 10.0, 10.0);
        assert_eq!(surface.pixel(0, 1), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(3, 3), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_huge_and_infinite_fills_only_touch_visible_pixels() {
        let fonts = FontBook::new();
        let mut surface = RasterSurface::new(4, 4, &fonts);
        surface.set_color(ColorValue::BLACK);
        surface.fill_rect(0.0, 0.0, 1e12, 1e12);
        assert!(surface.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));

        let mut surface = RasterSurface::new(4, 4, &fonts);
        surface.set_color(ColorValue::BLACK);
        surface.fill_rect(f64::NEG_INFINITY, 1.0, f64::INFINITY, 1.0);
        surface.fill_rect(f64::INFINITY, 0.0, 1.0, 1.0);
        surface.fill_rect(0.0, f64::NAN, 1.0, 1.0);
        assert_eq!(surface.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(3, 2), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_visible_span_clamps_to_axis() {
        assert_eq!(visible_span(-5.0, 2.0, 4), Some((0, 2)));
        assert_eq!(visible_span(1.0, f64::INFINITY, 4), Some((1, 4)));
        assert_eq!(visible_span(f64::INFINITY, f64::INFINITY, 4), None);
        assert_eq!(visible_span(f64::NEG_INFINITY, f64::NAN, 4), None);
        assert_eq!(visible_span(3.0, 3.0, 4), None);
    }

    #[test]
    fn test_image_blit_is_clipped_to_surface() {
        let fonts = FontBook::new();
        let mut surface = RasterSurface::new(4, 4, &fonts);
        let red: [u8; 4] = [255, 0, 0, 255];
        let image = LoadedImage::new(3, 3, red.repeat(9));
        surface.blit_image(&image, -2.0, 2.0);
        assert_eq!(surface.pixel(0, 2), Some(red));
        assert_eq!(surface.pixel(0, 3), Some(red));
        assert_eq!(surface.pixel(1, 2), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(0, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_half_transparent_fill_blends() {
        let fonts = FontBook::new();
        let mut surface = RasterSurface::new(1, 1, &fonts);
        surface.set_color(ColorValue { r: 0, g: 0, b: 0, a: 128 });
        surface.fill_rect(0.0, 0.0, 1.0, 1.0);
        assert_eq!(surface.pixel(0, 0), Some([127, 127, 127, 255]));
    }

    #[test]
    fn test_text_without_fonts_draws_nothing() {
        let fonts = FontBook::new();
        let mut surface = RasterSurface::new(8, 8, &fonts);
        surface.draw_text(0.0, 6.0, "Sans", 8.0, "x", ColorValue::BLACK);
        assert!(surface.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }
}
