//! HTML tokenizer and tree builder for the Wren renderer.
//!
//! # Scope
//!
//! This crate turns markup into a [`wren_dom::DomTree`]:
//! - **Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RAWTEXT (`style`, `script`) and tag states
//!   - Comments, DOCTYPE and a small table of character references
//!   - Quoted and unquoted attributes
//! - **Tree builder**: a stack of open elements with void elements,
//!   end tags that close the nearest matching open element, and an implied
//!   `tbody` around rows placed directly in a `table`.
//!
//! # Not Implemented
//!
//! - Insertion modes and implied `html`/`head`/`body`
//! - Foster parenting and the adoption agency algorithm
//!
//! The renderer lays out exactly the tree it is given, so markup is expected
//! to be reasonably well-formed.

/// Tree construction from a token stream.
pub mod parser;
/// Tokenizer converting markup into tokens.
pub mod tokenizer;

pub use parser::{HTMLParser, ParseIssue, format_tree, print_tree};
pub use tokenizer::{Attribute, HTMLTokenizer, Token};

use wren_dom::DomTree;

/// Tokenize and tree-build `markup` in one step.
#[must_use]
pub fn parse_document(markup: &str) -> DomTree {
    let mut tokenizer = HTMLTokenizer::new(markup);
    tokenizer.run();
    HTMLParser::new(tokenizer.into_tokens()).run()
}
