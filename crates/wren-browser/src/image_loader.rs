//! Image fetching and decoding: the concrete [`ResourceLoader`] and
//! [`ImageDecoder`] a rendering session plugs into its image cache.
//!
//! [§ 4.8.3 The img element](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)
//!
//! 1. **Fetch**: [`FileResourceLoader`] reads `data:` URLs and files
//!    relative to a base directory.
//! 2. **Detect**: [`detect_format`] tells SVG from raster bytes.
//! 3. **Decode**: [`ImageLoaderPipeline`] dispatches to resvg or the
//!    `image` crate.

use std::fs;
use std::path::{Path, PathBuf};

use wren_common::data_url::{DataUrl, is_data_url};
use wren_common::image::LoadedImage;
use wren_common::warning::warn_once;
use wren_css::{ImageDecoder, ResourceError, ResourceLoader};

/// Detected image format.
///
/// The `image` crate tells raster sub-formats (PNG/JPEG/GIF/...) apart by
/// itself, so only the SVG/raster split matters here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// SVG vector image, rasterized at its intrinsic size.
    Svg,
    /// Any raster format the `image` crate can decode.
    Raster,
}

/// Strip the query string and fragment from `path`, leaving something a
/// file extension can be read from.
///
/// [URL Standard § 4.1](https://url.spec.whatwg.org/#concept-url-path)
#[must_use]
pub fn strip_url_decorations(path: &str) -> &str {
    let without_fragment = path.split_once('#').map_or(path, |(b, _)| b);
    without_fragment
        .split_once('?')
        .map_or(without_fragment, |(b, _)| b)
}

/// Decide whether `bytes` fetched from `path` are SVG or raster.
///
/// 1. `.svg` extension
/// 2. `data:image/svg` media type
/// 3. `<?xml` or `<svg` after leading whitespace
/// 4. otherwise raster
#[must_use]
pub fn detect_format(path: &str, bytes: &[u8]) -> ImageFormat {
    if !is_data_url(path)
        && Path::new(strip_url_decorations(path))
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
    {
        return ImageFormat::Svg;
    }

    if path.starts_with("data:image/svg") {
        return ImageFormat::Svg;
    }

    let head: Vec<u8> = bytes
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .take(256)
        .copied()
        .collect();
    if head.starts_with(b"<?xml") || head.starts_with(b"<svg") {
        return ImageFormat::Svg;
    }

    ImageFormat::Raster
}

/// One decoding backend of the pipeline.
trait FormatDecoder {
    fn supports(&self, format: ImageFormat) -> bool;

    fn decode(&self, bytes: &[u8]) -> Result<LoadedImage, String>;
}

/// SVG through usvg, rasterized by resvg onto a tiny-skia pixmap.
struct SvgDecoder;

impl FormatDecoder for SvgDecoder {
    fn supports(&self, format: ImageFormat) -> bool {
        format == ImageFormat::Svg
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn decode(&self, bytes: &[u8]) -> Result<LoadedImage, String> {
        let options = usvg::Options::default();
        let tree = usvg::Tree::from_data(bytes, &options)
            .map_err(|e| format!("invalid SVG: {e}"))?;

        let size = tree.size();
        let (width, height) = (size.width().ceil() as u32, size.height().ceil() as u32);
        if width == 0 || height == 0 {
            return Err("SVG has zero size".to_string());
        }

        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| format!("cannot allocate a {width}x{height} pixmap"))?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        // tiny-skia stores premultiplied alpha; LoadedImage is straight RGBA.
        let rgba = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        Ok(LoadedImage::new(width, height, rgba))
    }
}

/// PNG, JPEG, GIF, WebP and friends through the `image` crate.
struct RasterDecoder;

impl FormatDecoder for RasterDecoder {
    fn supports(&self, format: ImageFormat) -> bool {
        format == ImageFormat::Raster
    }

    fn decode(&self, bytes: &[u8]) -> Result<LoadedImage, String> {
        let rgba = image::load_from_memory(bytes)
            .map_err(|e| e.to_string())?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(LoadedImage::new(width, height, rgba.into_raw()))
    }
}

/// Sniffs the format of fetched bytes and hands them to the matching
/// decoder.
pub struct ImageLoaderPipeline {
    decoders: Vec<Box<dyn FormatDecoder>>,
}

impl ImageLoaderPipeline {
    /// A pipeline with the SVG and raster decoders.
    #[must_use]
    pub fn new() -> Self {
        Self {
            decoders: vec![Box::new(SvgDecoder), Box::new(RasterDecoder)],
        }
    }
}

impl Default for ImageLoaderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ImageLoaderPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoaderPipeline")
            .field("decoders", &self.decoders.len())
            .finish()
    }
}

impl ImageDecoder for ImageLoaderPipeline {
    fn decode(&self, bytes: &[u8], path: &str) -> Result<LoadedImage, ResourceError> {
        let format = detect_format(path, bytes);
        let decode_error = |reason: String| ResourceError::Decode {
            path: path.to_string(),
            reason,
        };
        self.decoders
            .iter()
            .find(|decoder| decoder.supports(format))
            .ok_or_else(|| decode_error(format!("no decoder for {format:?}")))?
            .decode(bytes)
            .map_err(decode_error)
    }
}

/// Loads `data:` URLs and local files. Relative paths are resolved against
/// the directory of the document being rendered.
#[derive(Debug, Clone, Default)]
pub struct FileResourceLoader {
    base_dir: PathBuf,
}

impl FileResourceLoader {
    /// A loader resolving relative paths against `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// A loader for resources referenced by the document at `document`.
    #[must_use]
    pub fn for_document(document: &Path) -> Self {
        Self::new(document.parent().unwrap_or_else(|| Path::new("")))
    }

    /// Where `path` is read from.
    #[must_use]
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(strip_url_decorations(path))
    }
}

impl ResourceLoader for FileResourceLoader {
    fn load(&self, path: &str) -> Result<Vec<u8>, ResourceError> {
        let load_error = |reason: String| ResourceError::Load {
            path: path.to_string(),
            reason,
        };

        if is_data_url(path) {
            return DataUrl::parse(path)
                .and_then(|url| url.decode())
                .map_err(|e| load_error(e.to_string()));
        }

        if path.starts_with("http://") || path.starts_with("https://") {
            return Err(load_error("network resources are not fetched".to_string()));
        }

        if path.contains(['?', '#']) {
            warn_once(
                "Image",
                &format!("ignoring query string or fragment in '{path}'"),
            );
        }

        let resolved = self.resolve(path);
        fs::read(&resolved).map_err(|e| load_error(format!("{}: {e}", resolved.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format("logo.SVG?v=2", b""), ImageFormat::Svg);
        assert_eq!(detect_format("data:image/svg+xml,<svg/>", b""), ImageFormat::Svg);
        assert_eq!(detect_format("blob", b"  \n<svg>"), ImageFormat::Svg);
        assert_eq!(detect_format("photo.png", b"\x89PNG"), ImageFormat::Raster);
    }

    #[test]
    fn test_strip_url_decorations() {
        assert_eq!(strip_url_decorations("a/b.png?x=1#frag"), "a/b.png");
        assert_eq!(strip_url_decorations("plain.png"), "plain.png");
    }
}
