//! CSS parsing, cascade, box-tree layout and paint for the Wren renderer.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - Ident, function, at-keyword, hash, string, number, percentage,
//!     dimension and punctuation tokens; comments are dropped
//!
//! - **CSS Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Style rules; at-rules are skipped
//!   - One [`Value`] per declaration
//!
//! - **CSS Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, universal, class, ID and attribute selectors
//!   - Descendant and child combinators
//!   - Specificity packed into a single priority
//!
//! - **Cascade**: per node and property, the declaration with the strictly
//!   highest priority wins; on a tie the first one applied stays.
//!
//! - **Layout** ([CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html))
//!   - Box tree construction with anonymous boxes
//!   - Block width/height resolution, inline line wrapping with alignment,
//!     replaced images and a simple table model
//!
//! - **Paint** ([CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html))
//!   - A display list executed against a [`DrawingSurface`]
//!
//! # Not Implemented
//!
//! - Floats, positioning, `inline-block`, flex and grid
//! - Relative units (`em`, `%`, ...), which are taken at face value
//! - Multi-token values such as `margin: 0 auto` (only the first token is kept)
//! - `colspan` and `rowspan`

/// Cascade per node and property.
pub mod cascade;
/// Error types.
pub mod error;
/// Box tree construction and layout per [CSS 2.1 § 9–10](https://www.w3.org/TR/CSS2/visuren.html).
pub mod layout;
/// Display list and painting per [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html).
pub mod paint;
/// CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// Resource loading and the image cache.
pub mod resource;
/// CSS selector parsing and matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;
/// User-agent stylesheet per [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html).
pub mod ua_stylesheet;
/// Style values per [CSS Values Level 4](https://www.w3.org/TR/css-values-4/).
pub mod values;

// Re-exports for convenience
pub use cascade::{StyleMap, compute_style_map, compute_style_map_with_defaults};
pub use error::{LayoutError, ResourceError, StyleError};
pub use layout::{
    ApproximateFontMetrics, BoxId, BoxType, Dimensions, EdgeSizes, FontExtents, FontMetrics,
    LayoutBox, LayoutTree, Rect, TextExtents, build_layout_tree, layout_tree,
};
pub use paint::{DisplayCommand, DisplayList, DrawingSurface, Painter};
pub use parser::{CSSParser, Declaration, StyleRule, Stylesheet, parse_stylesheet};
pub use resource::{ImageCache, ImageDecoder, NullResourceLoader, ResourceLoader};
pub use selector::{Selector, Specificity, parse_selector};
pub use tokenizer::{CSSToken, CSSTokenizer};
pub use ua_stylesheet::ua_stylesheet;
pub use values::{ColorValue, Unit, Value};
