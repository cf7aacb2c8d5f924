//! Box tree construction.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! Turns the document tree plus its cascaded styles into a [`LayoutTree`].
//! No geometry is computed here; every box starts with zero dimensions.

use wren_common::warning::warn_once;
use wren_dom::{DomTree, NodeId, NodeType};

use crate::cascade::StyleMap;
use crate::error::LayoutError;

use super::layout_box::{BoxId, BoxType, LayoutBox, LayoutTree};

/// Map a `display` keyword to the box it generates. `None` for
/// `display: none`.
///
/// [§ 9.2.4 The 'display' property](https://www.w3.org/TR/CSS2/visuren.html#display-prop)
#[must_use]
pub fn box_type_for_display(display: &str) -> Option<BoxType> {
    match display.to_ascii_lowercase().as_str() {
        "none" => None,
        "block" => Some(BoxType::Block),
        "inline" => Some(BoxType::Inline),
        "img" => Some(BoxType::Image),
        "table" => Some(BoxType::Table),
        "tr" | "table-row" => Some(BoxType::TableRow),
        "td" | "table-cell" => Some(BoxType::TableCell),
        other => {
            warn_once("CSS", &format!("unsupported display '{other}', using block"));
            Some(BoxType::Block)
        }
    }
}

/// [§ 16.6.1 The 'white-space' processing model](https://www.w3.org/TR/CSS2/text.html#white-space-model)
///
/// Collapse whitespace runs to single spaces, trim both ends and split into
/// words, each followed by one space. Blank input yields no words.
///
/// ```
/// use wren_css::layout::split_text;
///
/// assert_eq!(split_text("  hello   world  "), vec!["hello ", "world "]);
/// assert!(split_text(" \n\t ").is_empty());
/// ```
#[must_use]
pub fn split_text(text: &str) -> Vec<String> {
    text.split_whitespace().map(|word| format!("{word} ")).collect()
}

/// Build the box tree rooted at `root`.
///
/// `root` must be an element; its `display` defaults to `block`.
///
/// # Errors
///
/// - [`LayoutError::RootNotElement`] when `root` is not an element.
/// - [`LayoutError::RootDisplayNone`] when the root is hidden.
/// - [`LayoutError::Style`] when a `display` value is not a keyword.
pub fn build_layout_tree(
    dom: &DomTree,
    root: NodeId,
    styles: StyleMap,
) -> Result<LayoutTree, LayoutError> {
    let Some(element) = dom.as_element(root) else {
        return Err(LayoutError::RootNotElement);
    };
    let Some(box_type) = resolve_box_type(&styles, root)? else {
        return Err(LayoutError::RootDisplayNone {
            tag: element.tag_name.clone(),
        });
    };

    let mut tree = LayoutTree::new(styles);
    let root_box = tree.alloc(LayoutBox::new(box_type, Some(root), None));
    BoxBuilder { dom, tree: &mut tree }.build_children(root_box, root)?;
    Ok(tree)
}

fn resolve_box_type(styles: &StyleMap, node: NodeId) -> Result<Option<BoxType>, LayoutError> {
    let display = match styles.value(node, "display") {
        Some(value) => value.to_str()?,
        None => "block",
    };
    Ok(box_type_for_display(display))
}

struct BoxBuilder<'a> {
    dom: &'a DomTree,
    tree: &'a mut LayoutTree,
}

impl BoxBuilder<'_> {
    /// Fill in the element facts of `id` and build the boxes for the
    /// children of `node` beneath it.
    fn build_children(&mut self, id: BoxId, node: NodeId) -> Result<(), LayoutError> {
        if let Some(element) = self.dom.as_element(node) {
            let layout_box = &mut self.tree[id];
            layout_box.tag = Some(element.tag_name.clone());
            if layout_box.box_type == BoxType::Image {
                layout_box.image_source = element.get_attribute("src").map(str::to_string);
            }
        }

        let dom = self.dom;
        for &child in dom.children(node) {
            let Some(child_node) = dom.get(child) else {
                continue;
            };
            match &child_node.node_type {
                NodeType::Text(text) => self.build_text_boxes(id, text),
                NodeType::Element(_) => self.build_element(id, child)?,
                NodeType::Document | NodeType::Comment(_) => {}
            }
        }
        Ok(())
    }

    fn build_element(&mut self, parent: BoxId, node: NodeId) -> Result<(), LayoutError> {
        // [§ 9.2.4](https://www.w3.org/TR/CSS2/visuren.html#display-prop)
        //
        // "This value causes an element to not appear in the formatting
        // structure (i.e., in visual media the element generates no boxes
        // and has no effect on layout)."
        let Some(box_type) = resolve_box_type(self.tree.styles(), node)? else {
            return Ok(());
        };

        let container = match box_type {
            BoxType::Inline | BoxType::Image => self.tree.inline_container(parent),
            _ => parent,
        };
        let id = self
            .tree
            .alloc(LayoutBox::new(box_type, Some(node), Some(container)));
        self.tree.append_child(container, id);
        self.build_children(id, node)
    }

    fn build_text_boxes(&mut self, parent: BoxId, text: &str) {
        let words = split_text(text);
        if words.is_empty() {
            return;
        }
        let container = self.tree.inline_container(parent);
        for word in words {
            let mut text_box = LayoutBox::new(BoxType::Inline, None, Some(container));
            text_box.text = Some(word);
            let id = self.tree.alloc(text_box);
            self.tree.append_child(container, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keywords() {
        assert_eq!(box_type_for_display("none"), None);
        assert_eq!(box_type_for_display("INLINE"), Some(BoxType::Inline));
        assert_eq!(box_type_for_display("tr"), Some(BoxType::TableRow));
        assert_eq!(box_type_for_display("table-cell"), Some(BoxType::TableCell));
        assert_eq!(box_type_for_display("img"), Some(BoxType::Image));
        assert_eq!(box_type_for_display("flex"), Some(BoxType::Block));
        assert!(wren_common::warning::has_warned("CSS", "'flex'"));
    }

    #[test]
    fn test_split_text_collapses_whitespace() {
        assert_eq!(split_text("a\n\tb"), vec!["a ", "b "]);
        assert_eq!(split_text("word"), vec!["word "]);
        assert!(split_text("").is_empty());
    }
}
