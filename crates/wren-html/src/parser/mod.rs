mod tree_builder;

pub use tree_builder::{HTMLParser, ParseIssue, format_tree, print_tree};
