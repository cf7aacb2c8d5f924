//! The drawing capability paint output is executed against.

use wren_common::image::LoadedImage;

use crate::values::ColorValue;

/// A 2-D drawing backend: a raster buffer, a vector document, or a recorder
/// in tests. Coordinates are layout units with the origin at the top left.
pub trait DrawingSurface {
    /// Color used by subsequent [`fill_rect`](Self::fill_rect) calls.
    fn set_color(&mut self, color: ColorValue);

    /// Fill a rectangle with the current color.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Draw `text` with its baseline origin at `(x, y)`.
    fn draw_text(&mut self, x: f64, y: f64, font: &str, size: f64, text: &str, color: ColorValue);

    /// Copy `image` at its intrinsic size with its top-left corner at
    /// `(x, y)`.
    fn blit_image(&mut self, image: &LoadedImage, x: f64, y: f64);

    /// Width and height of the drawable area.
    fn size(&self) -> (f64, f64);
}
