//! CSS Layout Engine
//!
//! Builds the box tree from a styled document and computes the position and
//! size of every box.
//!
//! # Relevant Specifications
//!
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS 2.1 Visual Formatting Model Details](https://www.w3.org/TR/CSS2/visudet.html)
//! - [CSS 2.1 Tables](https://www.w3.org/TR/CSS2/tables.html)
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//!
//! # Module Structure
//!
//! - [`box_model`] - Box dimensions, rectangles, and edge sizes
//! - [`layout_box`] - Box types and the box tree arena
//! - [`builder`] - Box tree construction with anonymous boxes
//! - [`context`] - Per-sibling-set layout state, line and table bookkeeping
//! - [`text`] - Font metrics interface
//! - `engine`, `inline`, `table` - The layout algorithms

pub mod box_model;
pub mod builder;
pub mod context;
mod engine;
mod inline;
pub mod layout_box;
mod table;
pub mod text;

pub use box_model::{Dimensions, EdgeSizes, Rect};
pub use builder::{box_type_for_display, build_layout_tree, split_text};
pub use context::{LayoutContext, TableState, TextAlign};
pub use engine::layout_tree;
pub use layout_box::{
    BoxId, BoxSnapshot, BoxType, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, LayoutBox, LayoutTree,
};
pub use text::{ApproximateFontMetrics, FontExtents, FontMetrics, TextExtents};
