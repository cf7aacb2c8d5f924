//! CSS parser module.

#[allow(clippy::module_inception)]
mod parser;

pub use parser::{CSSParser, Declaration, StyleRule, Stylesheet, parse_stylesheet};
