use std::fmt::Write;

use wren_common::warning::warn_once;
use wren_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

use crate::tokenizer::Token;

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// [§ 13.1.2.4 Optional tags](https://html.spec.whatwg.org/multipage/syntax.html#optional-tags)
///
/// Elements whose end tag may be omitted; closing them implicitly is not
/// reported as an issue.
const OPTIONAL_END_TAGS: &[&str] = &[
    "li", "p", "option", "tbody", "thead", "tfoot", "tr", "td", "th",
];

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// A recoverable problem found while building the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What went wrong.
    pub message: String,
    /// Index into the token stream where this was encountered.
    pub token_index: usize,
}

/// Builds a [`DomTree`] from a token stream using a stack of open elements.
///
/// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
pub struct HTMLParser {
    tokens: Vec<Token>,
    tree: DomTree,
    stack_of_open_elements: Vec<NodeId>,
    issues: Vec<ParseIssue>,
}

impl HTMLParser {
    /// Create a parser over a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            tree: DomTree::new(),
            stack_of_open_elements: vec![NodeId::ROOT],
            issues: Vec::new(),
        }
    }

    /// Build the tree, discarding parse issues.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Build the tree and return it together with every parse issue.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        let tokens = std::mem::take(&mut self.tokens);
        for (index, token) in tokens.into_iter().enumerate() {
            match token {
                Token::Doctype { .. } | Token::EndOfFile => {}
                Token::StartTag {
                    name,
                    self_closing,
                    attributes,
                } => {
                    let mut attrs = AttributesMap::new();
                    for attr in attributes {
                        // "If there is already an attribute on the token with the
                        // exact same name, then this is a duplicate-attribute
                        // parse error and the new attribute must be removed"
                        let _ = attrs.entry(attr.name).or_insert(attr.value);
                    }
                    if name == "tr" && self.current_tag() == Some("table") {
                        self.insert_implied_table_body();
                    }
                    let is_void = VOID_ELEMENTS.contains(&name.as_str());
                    if self_closing && !is_void {
                        self.issue(index, &format!("self-closing non-void element <{name}/>"));
                    }
                    let id = self
                        .tree
                        .alloc(NodeType::Element(ElementData { tag_name: name, attrs }));
                    self.tree.append_child(self.current_node(), id);
                    if !is_void && !self_closing {
                        self.stack_of_open_elements.push(id);
                    }
                }
                Token::EndTag { name } => self.close_element(index, &name),
                Token::Comment { data } => {
                    let id = self.tree.alloc(NodeType::Comment(data));
                    self.tree.append_child(self.current_node(), id);
                }
                Token::Character { data } => self.insert_character(data),
            }
        }
        if self.stack_of_open_elements.len() > 1 {
            warn_once("HTML", "document ended with unclosed elements");
        }
        (self.tree, self.issues)
    }

    fn current_tag(&self) -> Option<&str> {
        self.tree
            .as_element(self.current_node())
            .map(|e| e.tag_name.as_str())
    }

    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    ///
    /// "A start tag whose tag name is "tr": Insert an HTML element for a
    /// "tbody" start tag token with no attributes, then switch the insertion
    /// mode to "in table body"."
    fn insert_implied_table_body(&mut self) {
        let id = self
            .tree
            .alloc(NodeType::Element(ElementData::new("tbody")));
        self.tree.append_child(self.current_node(), id);
        self.stack_of_open_elements.push(id);
    }

    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    /// Pop the stack up to and including the nearest open element named
    /// `name`. A stray end tag is a parse issue and is otherwise ignored.
    fn close_element(&mut self, index: usize, name: &str) {
        let position = self
            .stack_of_open_elements
            .iter()
            .rposition(|&id| {
                self.tree
                    .as_element(id)
                    .is_some_and(|e| e.tag_name == name)
            });
        match position {
            Some(pos) => {
                let closes_required = self.stack_of_open_elements[pos + 1..].iter().any(|&id| {
                    self.tree
                        .as_element(id)
                        .is_some_and(|e| !OPTIONAL_END_TAGS.contains(&e.tag_name.as_str()))
                });
                if closes_required {
                    self.issue(index, &format!("end tag </{name}> closes unclosed children"));
                }
                self.stack_of_open_elements.truncate(pos);
            }
            None => self.issue(index, &format!("stray end tag </{name}>")),
        }
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "If there is a Text node immediately before the adjusted insertion
    /// location, then append data to that Text node's data. Otherwise, create
    /// a new Text node"
    ///
    /// Text outside the document element is dropped.
    fn insert_character(&mut self, c: char) {
        let parent = self.current_node();
        if parent == NodeId::ROOT {
            return;
        }
        if let Some(data) = self
            .tree
            .last_child(parent)
            .and_then(|last| self.tree.text_mut(last))
        {
            data.push(c);
            return;
        }
        let id = self.tree.alloc(NodeType::Text(c.to_string()));
        self.tree.append_child(parent, id);
    }

    fn issue(&mut self, token_index: usize, message: &str) {
        self.issues.push(ParseIssue {
            message: message.to_string(),
            token_index,
        });
    }
}

/// Render the subtree rooted at `id` as an indented outline.
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    format_node(tree, id, 0, &mut out);
    out
}

/// Print the subtree rooted at `id` to stdout.
pub fn print_tree(tree: &DomTree, id: NodeId) {
    print!("{}", format_tree(tree, id));
}

fn format_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return;
    };
    let _ = match &node.node_type {
        NodeType::Document => writeln!(out, "{prefix}Document"),
        NodeType::Element(data) => {
            let mut attrs: Vec<String> = data
                .attrs
                .iter()
                .map(|(k, v)| {
                    if v.is_empty() {
                        k.clone()
                    } else {
                        format!("{k}=\"{v}\"")
                    }
                })
                .collect();
            attrs.sort();
            if attrs.is_empty() {
                writeln!(out, "{prefix}<{}>", data.tag_name)
            } else {
                writeln!(out, "{prefix}<{} {}>", data.tag_name, attrs.join(" "))
            }
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            writeln!(out, "{prefix}\"{display}\"")
        }
        NodeType::Comment(data) => writeln!(out, "{prefix}<!-- {data} -->"),
    };
    for &child in tree.children(id) {
        format_node(tree, child, indent + 1, out);
    }
}
