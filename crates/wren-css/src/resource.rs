//! Resource loading capabilities and the per-session image cache.
//!
//! The renderer never touches the filesystem or network itself. The embedder
//! supplies a [`ResourceLoader`] that turns a path into bytes and an
//! [`ImageDecoder`] that turns bytes into pixels; [`ImageCache`] glues the
//! two together and remembers the result per path.

use std::collections::HashMap;
use std::sync::Arc;

use wren_common::image::LoadedImage;
use wren_common::warning::warn_once;

use crate::error::ResourceError;

/// Fetches the raw bytes of a resource referenced by the document.
pub trait ResourceLoader {
    /// Load the resource at `path` (an `src` attribute value).
    ///
    /// # Errors
    ///
    /// [`ResourceError::Load`] when the resource cannot be read.
    fn load(&self, path: &str) -> Result<Vec<u8>, ResourceError>;
}

/// Decodes image bytes into RGBA pixels.
pub trait ImageDecoder {
    /// Decode `bytes`, fetched from `path`.
    ///
    /// # Errors
    ///
    /// [`ResourceError::Decode`] when the bytes are not a supported image.
    fn decode(&self, bytes: &[u8], path: &str) -> Result<LoadedImage, ResourceError>;
}

/// A loader that has nothing to give. Every request fails, so every image
/// becomes a placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResourceLoader;

impl ResourceLoader for NullResourceLoader {
    fn load(&self, path: &str) -> Result<Vec<u8>, ResourceError> {
        Err(ResourceError::Load {
            path: path.to_string(),
            reason: "no resource loader configured".to_string(),
        })
    }
}

/// Decoded images keyed by resource path, populated lazily.
///
/// A failed load or decode is cached as a 1×1 transparent placeholder, so a
/// broken reference is reported once and never retried within the session.
pub struct ImageCache {
    decoder: Box<dyn ImageDecoder>,
    entries: HashMap<String, Arc<LoadedImage>>,
}

impl ImageCache {
    /// Create an empty cache decoding with `decoder`.
    #[must_use]
    pub fn new(decoder: Box<dyn ImageDecoder>) -> Self {
        Self {
            decoder,
            entries: HashMap::new(),
        }
    }

    /// Return the image for `path`, loading and decoding it on first use.
    ///
    /// Never fails: errors yield the cached placeholder.
    pub fn get_or_load(&mut self, path: &str, loader: &dyn ResourceLoader) -> Arc<LoadedImage> {
        if let Some(image) = self.entries.get(path) {
            return Arc::clone(image);
        }

        let decoded = loader
            .load(path)
            .and_then(|bytes| self.decoder.decode(&bytes, path));
        let image = Arc::new(decoded.unwrap_or_else(|err| {
            warn_once("Image", &format!("{err}; using a placeholder"));
            LoadedImage::placeholder()
        }));

        let _ = self.entries.insert(path.to_string(), Arc::clone(&image));
        image
    }

    /// Number of cached paths (including placeholders).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached image.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingLoader {
        calls: Cell<usize>,
    }

    impl ResourceLoader for CountingLoader {
        fn load(&self, path: &str) -> Result<Vec<u8>, ResourceError> {
            self.calls.set(self.calls.get() + 1);
            match path {
                "ok.raw" => Ok(vec![255, 0, 0, 255, 0, 255, 0, 255]),
                _ => Ok(b"not an image".to_vec()),
            }
        }
    }

    /// Accepts exactly 8 bytes as a 2×1 image.
    struct TwoPixelDecoder;

    impl ImageDecoder for TwoPixelDecoder {
        fn decode(&self, bytes: &[u8], path: &str) -> Result<LoadedImage, ResourceError> {
            if bytes.len() == 8 {
                Ok(LoadedImage::new(2, 1, bytes.to_vec()))
            } else {
                Err(ResourceError::Decode {
                    path: path.to_string(),
                    reason: "wrong size".to_string(),
                })
            }
        }
    }

    #[test]
    fn test_decoded_image_is_cached() {
        let loader = CountingLoader {
            calls: Cell::new(0),
        };
        let mut cache = ImageCache::new(Box::new(TwoPixelDecoder));
        let first = cache.get_or_load("ok.raw", &loader);
        let second = cache.get_or_load("ok.raw", &loader);
        assert_eq!(first.width(), 2);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.calls.get(), 1);
    }

    #[test]
    fn test_failure_caches_one_placeholder() {
        let loader = CountingLoader {
            calls: Cell::new(0),
        };
        let mut cache = ImageCache::new(Box::new(TwoPixelDecoder));
        let first = cache.get_or_load("broken.png", &loader);
        let second = cache.get_or_load("broken.png", &loader);
        assert_eq!(*first, LoadedImage::placeholder());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.calls.get(), 1);
        assert!(wren_common::warning::has_warned("Image", "broken.png"));

        let missing = cache.get_or_load("missing.png", &NullResourceLoader);
        assert_eq!((missing.width(), missing.height()), (1, 1));
        assert_eq!(cache.len(), 2);
    }
}
