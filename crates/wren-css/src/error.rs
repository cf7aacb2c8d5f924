//! Error types for style conversion, layout and resource loading.
//!
//! Only two conditions abort a render: asking a [`Value`](crate::Value) for a
//! conversion its variant cannot provide, and a root element whose `display`
//! is `none`. Everything else (unknown keywords, undecodable images, missing
//! styles) falls back to a default and is reported through
//! [`warn_once`](wren_common::warning::warn_once).

use thiserror::Error;

/// A [`Value`](crate::Value) was asked for a conversion its variant does not
/// support, e.g. `to_px` on `bold` or `to_str` on `12px`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// The value cannot be converted to the requested target.
    #[error("cannot convert {value} to {target}")]
    Conversion {
        /// The offending value, serialized as CSS.
        value: String,
        /// What the caller wanted: `"px"`, `"string"` or `"color"`.
        target: &'static str,
    },
}

/// Fatal errors raised while building or laying out the box tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The root element resolved to `display: none`, leaving nothing to render.
    #[error("root element <{tag}> has display: none")]
    RootDisplayNone {
        /// Tag name of the root element.
        tag: String,
    },
    /// The node handed to the box tree builder is not an element.
    #[error("layout root is not an element")]
    RootNotElement,
    /// A style value conversion failed during build or layout.
    #[error(transparent)]
    Style(#[from] StyleError),
}

/// A resource could not be fetched or decoded.
///
/// Never fatal: the [`ImageCache`](crate::resource::ImageCache) substitutes a
/// placeholder and reports the error through
/// [`warn_once`](wren_common::warning::warn_once).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// The loader could not produce the bytes.
    #[error("cannot load '{path}': {reason}")]
    Load {
        /// Path or URL as written in the document.
        path: String,
        /// Loader-specific description.
        reason: String,
    },
    /// The bytes were fetched but are not a decodable image.
    #[error("cannot decode '{path}': {reason}")]
    Decode {
        /// Path or URL as written in the document.
        path: String,
        /// Decoder-specific description.
        reason: String,
    },
}
