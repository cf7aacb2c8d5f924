//! Rendering session for the Wren renderer.
//!
//! # Scope
//!
//! This crate provides:
//! - **Rendering pipeline** - parse → cascade → build → layout → paint in one
//!   call, through [`render`] or a reusable [`Session`]
//! - **Fonts** - system font discovery and fontdue-backed [`FontdueFontMetrics`]
//! - **Images** - file and `data:` URL loading, SVG and raster decoding
//! - **Software rendering** - the [`RasterSurface`] PNG backend
//!
//! # Not Implemented
//!
//! - Fetching network resources (`http://`, `https://`)
//! - External stylesheets (`<link rel="stylesheet">`)
//! - Scripts

pub mod font_metrics;
pub mod image_loader;
pub mod surface;

pub use wren_css as css;
pub use wren_dom as dom;
pub use wren_html as html;

pub use font_metrics::{FontBook, FontError, FontdueFontMetrics};
pub use image_loader::{FileResourceLoader, ImageFormat, ImageLoaderPipeline, detect_format};
pub use surface::RasterSurface;

use thiserror::Error;
use wren_common::warning::clear_warnings;
use wren_css::{
    DrawingSurface, FontMetrics, ImageCache, ImageDecoder, LayoutError, LayoutTree, Painter,
    ResourceLoader, StyleError, Stylesheet, build_layout_tree, compute_style_map,
    compute_style_map_with_defaults, layout_tree, parse_stylesheet, ua_stylesheet,
};
use wren_dom::{DomTree, NodeId, NodeType};
use wren_html::parse_document;

/// Why a render produced no output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Box tree construction or layout failed.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// A style value could not be used while painting.
    #[error(transparent)]
    Style(#[from] StyleError),
}

/// Settings shared by every render of a [`Session`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Width of the initial containing block.
    pub viewport_width: f64,
    /// Height of the output surface. Layout itself is unbounded vertically.
    pub viewport_height: f64,
    /// Cascade the built-in user-agent stylesheet under the author's.
    pub user_agent_stylesheet: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            viewport_width: 1024.0,
            viewport_height: 576.0,
            user_agent_stylesheet: false,
        }
    }
}

/// A rendering session: options plus the image cache that persists across
/// renders, so an image referenced by several documents is decoded once.
#[derive(Debug)]
pub struct Session {
    options: RenderOptions,
    images: ImageCache,
}

impl Session {
    /// A session decoding images with the default [`ImageLoaderPipeline`].
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self::with_decoder(options, Box::new(ImageLoaderPipeline::new()))
    }

    /// A session decoding images with `decoder`.
    #[must_use]
    pub fn with_decoder(options: RenderOptions, decoder: Box<dyn ImageDecoder>) -> Self {
        Self {
            options,
            images: ImageCache::new(decoder),
        }
    }

    /// The options every render uses.
    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The session's image cache.
    #[must_use]
    pub const fn images(&self) -> &ImageCache {
        &self.images
    }

    /// A blank raster surface the size of the viewport.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn raster_surface<'f>(&self, fonts: &'f FontBook) -> RasterSurface<'f> {
        RasterSurface::new(
            self.options.viewport_width.ceil().max(0.0) as u32,
            self.options.viewport_height.ceil().max(0.0) as u32,
            fonts,
        )
    }

    /// Parse `markup`, cascade `stylesheet` over it and lay out the box tree
    /// of its document element.
    ///
    /// # Errors
    ///
    /// [`RenderError::Layout`] when the document has no element, the root is
    /// hidden, or a style value has the wrong kind.
    pub fn layout(
        &mut self,
        markup: &str,
        stylesheet: &str,
        loader: &dyn ResourceLoader,
        metrics: &dyn FontMetrics,
    ) -> Result<LayoutTree, RenderError> {
        clear_warnings();
        let dom = parse_document(markup);
        self.layout_document(&dom, &parse_stylesheet(stylesheet), loader, metrics)
    }

    /// Lay out an already parsed document.
    ///
    /// # Errors
    ///
    /// See [`layout`](Self::layout).
    pub fn layout_document(
        &mut self,
        dom: &DomTree,
        stylesheet: &Stylesheet,
        loader: &dyn ResourceLoader,
        metrics: &dyn FontMetrics,
    ) -> Result<LayoutTree, RenderError> {
        let root = dom.document_element().ok_or(LayoutError::RootNotElement)?;
        let styles = if self.options.user_agent_stylesheet {
            compute_style_map_with_defaults(dom, ua_stylesheet(), stylesheet)
        } else {
            compute_style_map(dom, stylesheet)
        };

        let mut tree = build_layout_tree(dom, root, styles)?;
        layout_tree(
            &mut tree,
            self.options.viewport_width,
            metrics,
            &mut self.images,
            loader,
        )?;
        Ok(tree)
    }

    /// Render `markup` styled by `stylesheet` onto `surface`, returning the
    /// laid-out box tree.
    ///
    /// The surface is only drawn on once layout and paint have both
    /// succeeded, so an error leaves it untouched.
    ///
    /// # Errors
    ///
    /// See [`layout`](Self::layout); additionally [`RenderError::Style`]
    /// when a color or font value has the wrong kind.
    pub fn render(
        &mut self,
        markup: &str,
        stylesheet: &str,
        loader: &dyn ResourceLoader,
        metrics: &dyn FontMetrics,
        surface: &mut dyn DrawingSurface,
    ) -> Result<LayoutTree, RenderError> {
        let tree = self.layout(markup, stylesheet, loader, metrics)?;
        paint_onto(&tree, metrics, surface)?;
        Ok(tree)
    }
}

/// Paint a laid-out tree onto `surface`.
///
/// # Errors
///
/// [`RenderError::Style`] when a color or font value has the wrong kind;
/// nothing is drawn in that case.
pub fn paint_onto(
    tree: &LayoutTree,
    metrics: &dyn FontMetrics,
    surface: &mut dyn DrawingSurface,
) -> Result<(), RenderError> {
    let display_list = Painter::new(tree, metrics).paint()?;
    display_list.execute(surface);
    Ok(())
}

/// Render one document in a fresh session: cascade, build, lay out at
/// `viewport_width` and paint onto `surface`.
///
/// # Errors
///
/// See [`Session::render`].
pub fn render(
    markup: &str,
    stylesheet: &str,
    viewport_width: f64,
    loader: &dyn ResourceLoader,
    metrics: &dyn FontMetrics,
    surface: &mut dyn DrawingSurface,
) -> Result<(), RenderError> {
    let options = RenderOptions {
        viewport_width,
        ..RenderOptions::default()
    };
    let _ = Session::new(options).render(markup, stylesheet, loader, metrics, surface)?;
    Ok(())
}

/// [§ 4.2.6 The style element](https://html.spec.whatwg.org/multipage/semantics.html#the-style-element)
///
/// The text of every `<style>` element in document order, one block per
/// element.
#[must_use]
pub fn extract_style_content(dom: &DomTree) -> String {
    let mut css = String::new();
    let styles = dom.descendants(NodeId::ROOT).filter(|&id| {
        dom.get(id).is_some_and(|node| {
            matches!(&node.node_type, NodeType::Element(data) if data.tag_name == "style")
        })
    });
    for id in styles {
        css.push_str(&dom.child_text(id));
        css.push('\n');
    }
    css
}
