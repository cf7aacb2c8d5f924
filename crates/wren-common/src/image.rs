//! Decoded image data shared between decoders, layout and paint.
//!
//! [§ 4.8.3 The img element](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)

/// Decoded image data for a loaded image resource.
///
/// Contains the decoded, non-premultiplied RGBA pixel data and the intrinsic
/// dimensions. Layout only ever reads the dimensions; paint blits the pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    /// Intrinsic width of the image in pixels.
    width: u32,
    /// Intrinsic height of the image in pixels.
    height: u32,
    /// Raw RGBA pixel data (width * height * 4 bytes).
    rgba_data: Vec<u8>,
}

impl LoadedImage {
    /// Create a new `LoadedImage` from decoded RGBA pixel data.
    ///
    /// # Arguments
    ///
    /// * `width` - Intrinsic width of the image in pixels
    /// * `height` - Intrinsic height of the image in pixels
    /// * `rgba_data` - Raw RGBA pixel data (must be `width * height * 4` bytes)
    #[must_use]
    pub const fn new(width: u32, height: u32, rgba_data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba_data,
        }
    }

    /// A fully transparent 1×1 image, substituted for any resource that
    /// could not be loaded or decoded.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(1, 1, vec![0, 0, 0, 0])
    }

    /// Intrinsic width of the image in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Intrinsic height of the image in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Intrinsic dimensions as `(width, height)` in layout units.
    #[must_use]
    pub fn dimensions_f64(&self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }

    /// Raw RGBA pixel data.
    #[must_use]
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }

    /// The RGBA value of the pixel at `(x, y)`, or `None` outside the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = self.rgba_data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_single_transparent_pixel() {
        let img = LoadedImage::placeholder();
        assert_eq!(img.dimensions_f64(), (1.0, 1.0));
        assert_eq!(img.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(img.pixel(1, 0), None);
    }
}
