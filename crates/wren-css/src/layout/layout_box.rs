//! Layout box types and the box tree arena.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! Boxes live in a flat arena owned by [`LayoutTree`] and refer to each
//! other by [`BoxId`]. Children are owned in order; the parent link is a
//! plain index used for inherited-style lookups and never for mutation.

use std::fmt::Write;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

use serde::Serialize;
use strum_macros::Display;
use wren_common::image::LoadedImage;
use wren_dom::NodeId;

use crate::cascade::StyleMap;
use crate::error::StyleError;
use crate::values::{ColorValue, Value};

use super::box_model::Dimensions;

/// Used when no `font-family` is set anywhere up the tree.
pub const DEFAULT_FONT_FAMILY: &str = "Monospace";

/// Used when no `font-size` is set anywhere up the tree.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Index of a box in its [`LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BoxId(pub usize);

/// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
///
/// The seven box kinds this renderer lays out. Each maps to exactly one
/// layout routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum BoxType {
    /// `display: block` and unknown display values.
    Block,
    /// `display: inline`, and every word of text.
    Inline,
    /// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    /// wrapping a run of inline-level boxes among block-level siblings.
    Anonymous,
    /// `display: table`
    Table,
    /// `display: table-row` (or `tr`)
    TableRow,
    /// `display: table-cell` (or `td`)
    TableCell,
    /// `display: img`, a replaced element sized by its decoded image.
    Image,
}

/// A node of the box tree.
#[derive(Debug, Clone)]
pub struct LayoutBox {
    /// Which layout routine applies.
    pub box_type: BoxType,
    /// The element this box was generated for; `None` for anonymous and
    /// text boxes.
    pub node: Option<NodeId>,
    /// Tag name of `node`, kept for dumps.
    pub tag: Option<String>,
    /// One word of text followed by a single space, for text boxes.
    pub text: Option<String>,
    /// The `src` attribute of an image box.
    pub image_source: Option<String>,
    /// The decoded image, filled in by layout.
    pub image: Option<Arc<LoadedImage>>,
    /// Position and size, filled in by layout.
    pub dimensions: Dimensions,
    /// Child boxes in order.
    pub children: Vec<BoxId>,
    /// The box this one is a child of.
    pub parent: Option<BoxId>,
}

impl LayoutBox {
    /// A fresh box with zero dimensions and no children.
    #[must_use]
    pub fn new(box_type: BoxType, node: Option<NodeId>, parent: Option<BoxId>) -> Self {
        Self {
            box_type,
            node,
            tag: None,
            text: None,
            image_source: None,
            image: None,
            dimensions: Dimensions::default(),
            children: Vec::new(),
            parent,
        }
    }
}

/// The box tree of one document together with the cascaded styles its
/// boxes read from.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    boxes: Vec<LayoutBox>,
    styles: StyleMap,
}

impl LayoutTree {
    /// The root box, always the first allocated.
    pub const ROOT: BoxId = BoxId(0);

    /// Create an empty tree over `styles`.
    #[must_use]
    pub const fn new(styles: StyleMap) -> Self {
        Self {
            boxes: Vec::new(),
            styles,
        }
    }

    /// Add a detached box and return its id.
    pub fn alloc(&mut self, layout_box: LayoutBox) -> BoxId {
        let id = BoxId(self.boxes.len());
        self.boxes.push(layout_box);
        id
    }

    /// Append `child` to the children of `parent`.
    pub fn append_child(&mut self, parent: BoxId, child: BoxId) {
        self[child].parent = Some(parent);
        self[parent].children.push(child);
    }

    /// Number of boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether the tree has no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// The root box, if the tree is not empty.
    #[must_use]
    pub fn root(&self) -> Option<&LayoutBox> {
        self.boxes.first()
    }

    /// The cascaded styles.
    #[must_use]
    pub const fn styles(&self) -> &StyleMap {
        &self.styles
    }

    /// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    ///
    /// Where a new inline-level child of `id` goes. An inline or anonymous
    /// box holds its own inline children. Any other box reuses its last
    /// child if that is an anonymous box, or appends a new one.
    pub fn inline_container(&mut self, id: BoxId) -> BoxId {
        match self[id].box_type {
            BoxType::Inline | BoxType::Anonymous => id,
            _ => {
                let trailing = self[id]
                    .children
                    .last()
                    .copied()
                    .filter(|&last| self[last].box_type == BoxType::Anonymous);
                if let Some(anonymous) = trailing {
                    return anonymous;
                }
                let anonymous = self.alloc(LayoutBox::new(BoxType::Anonymous, None, Some(id)));
                self.append_child(id, anonymous);
                anonymous
            }
        }
    }

    /// The value `id`'s own element declares for `key`, ignoring shorthands
    /// and inheritance.
    #[must_use]
    pub fn own_style(&self, id: BoxId, key: &str) -> Option<&Value> {
        self[id]
            .node
            .and_then(|node| self.styles.value(node, key))
    }

    /// Look up a property for box `id`.
    ///
    /// Tries `key`, then the shorthand `fallback`, on the box's own element.
    /// When neither is set and `inherit` is true, repeats the lookup on the
    /// parent box. Boxes without an element (anonymous and text boxes) have
    /// no declarations of their own.
    #[must_use]
    pub fn lookup(
        &self,
        id: BoxId,
        key: &str,
        fallback: Option<&str>,
        inherit: bool,
    ) -> Option<&Value> {
        let own = self
            .own_style(id, key)
            .or_else(|| fallback.and_then(|f| self.own_style(id, f)));
        match (own, self[id].parent) {
            (Some(value), _) => Some(value),
            (None, Some(parent)) if inherit => self.lookup(parent, key, fallback, inherit),
            (None, _) => None,
        }
    }

    /// [`lookup`](Self::lookup) with a default for when nothing is found.
    #[must_use]
    pub fn get_style<'a>(
        &'a self,
        id: BoxId,
        key: &str,
        fallback: Option<&str>,
        default: &'a Value,
        inherit: bool,
    ) -> &'a Value {
        self.lookup(id, key, fallback, inherit).unwrap_or(default)
    }

    /// Resolve a color property of `id`. `Ok(None)` when the property is not
    /// set or does not name a color.
    ///
    /// # Errors
    ///
    /// [`StyleError::Conversion`] when the property holds a non-color value
    /// such as a length.
    pub fn color(
        &self,
        id: BoxId,
        key: &str,
        fallback: Option<&str>,
        inherit: bool,
    ) -> Result<Option<ColorValue>, StyleError> {
        self.lookup(id, key, fallback, inherit)
            .map_or(Ok(None), Value::to_rgb)
    }

    /// The inherited font family and size of `id`.
    ///
    /// # Errors
    ///
    /// [`StyleError::Conversion`] when `font-family` is not a keyword or
    /// string, or `font-size` is not a length.
    pub fn font(&self, id: BoxId) -> Result<(&str, f64), StyleError> {
        let family = match self.lookup(id, "font-family", None, true) {
            Some(value) => value.to_str()?,
            None => DEFAULT_FONT_FAMILY,
        };
        let size = match self.lookup(id, "font-size", None, true) {
            Some(value) => value.to_px()?,
            None => DEFAULT_FONT_SIZE,
        };
        Ok((family, size))
    }

    /// Translate `id` and its whole subtree by `(dx, dy)`.
    pub fn move_box(&mut self, id: BoxId, dx: f64, dy: f64) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let content = &mut self[current].dimensions.content;
            content.x += dx;
            content.y += dy;
            stack.extend_from_slice(&self[current].children);
        }
    }

    /// The proper ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: BoxId) -> impl Iterator<Item = BoxId> + '_ {
        std::iter::successors(self[id].parent, |&parent| self[parent].parent)
    }

    /// Whether `ancestor` is a proper ancestor of `id`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: BoxId, id: BoxId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// A one-line description of box `id`: type, tag, text and content
    /// rectangle.
    #[must_use]
    pub fn describe(&self, id: BoxId) -> String {
        let b = &self[id];
        let content = b.dimensions.content;
        let mut line = b.box_type.to_string();
        if let Some(tag) = &b.tag {
            let _ = write!(line, " <{tag}>");
        }
        if let Some(text) = &b.text {
            let _ = write!(line, " {text:?}");
        }
        let _ = write!(
            line,
            " {:.1}x{:.1} @ {:.1},{:.1}",
            content.width, content.height, content.x, content.y
        );
        line
    }

    /// Pretty-print the tree as an indented outline, one box per line.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        if self.is_empty() {
            return out;
        }
        let mut stack = vec![(Self::ROOT, 0_usize)];
        while let Some((id, depth)) = stack.pop() {
            let _ = writeln!(out, "{}{}", "  ".repeat(depth), self.describe(id));
            stack.extend(self[id].children.iter().rev().map(|&c| (c, depth + 1)));
        }
        out
    }

    /// A nested, serializable view of the subtree at `id`.
    #[must_use]
    pub fn snapshot(&self, id: BoxId) -> BoxSnapshot<'_> {
        let b = &self[id];
        BoxSnapshot {
            box_type: b.box_type,
            tag: b.tag.as_deref(),
            text: b.text.as_deref(),
            dimensions: b.dimensions,
            children: b.children.iter().map(|&c| self.snapshot(c)).collect(),
        }
    }
}

impl Index<BoxId> for LayoutTree {
    type Output = LayoutBox;

    fn index(&self, id: BoxId) -> &LayoutBox {
        &self.boxes[id.0]
    }
}

impl IndexMut<BoxId> for LayoutTree {
    fn index_mut(&mut self, id: BoxId) -> &mut LayoutBox {
        &mut self.boxes[id.0]
    }
}

/// Serializable nested form of a laid-out box, for JSON dumps.
#[derive(Debug, Clone, Serialize)]
pub struct BoxSnapshot<'a> {
    /// Box kind.
    pub box_type: BoxType,
    /// Element tag, if any.
    pub tag: Option<&'a str>,
    /// Text payload, if any.
    pub text: Option<&'a str>,
    /// Laid-out geometry.
    pub dimensions: Dimensions,
    /// Child boxes in order.
    pub children: Vec<BoxSnapshot<'a>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled_tree() -> LayoutTree {
        let mut styles = StyleMap::new();
        let _ = styles.apply(NodeId(1), "margin", 0, &Value::px(4.0));
        let _ = styles.apply(NodeId(1), "color", 0, &Value::keyword("red"));
        let _ = styles.apply(NodeId(2), "margin-left", 0, &Value::px(9.0));
        let mut tree = LayoutTree::new(styles);
        let root = tree.alloc(LayoutBox::new(BoxType::Block, Some(NodeId(1)), None));
        let child = tree.alloc(LayoutBox::new(BoxType::Block, Some(NodeId(2)), None));
        tree.append_child(root, child);
        tree
    }

    #[test]
    fn test_lookup_fallback_and_inherit() {
        let tree = styled_tree();
        let child = BoxId(1);
        assert_eq!(
            tree.lookup(child, "margin-left", Some("margin"), false),
            Some(&Value::px(9.0))
        );
        assert_eq!(tree.lookup(child, "margin-top", Some("margin"), false), None);
        assert_eq!(
            tree.lookup(child, "margin-top", Some("margin"), true),
            Some(&Value::px(4.0))
        );
        assert_eq!(
            tree.color(child, "color", None, true),
            Ok(Some(ColorValue::opaque(0xFF0000)))
        );
        assert_eq!(tree.color(child, "color", None, false), Ok(None));
    }

    #[test]
    fn test_inline_container_reuses_trailing_anonymous_box() {
        let mut tree = styled_tree();
        let first = tree.inline_container(LayoutTree::ROOT);
        let second = tree.inline_container(LayoutTree::ROOT);
        assert_eq!(first, second);
        assert_eq!(tree[first].box_type, BoxType::Anonymous);
        assert_eq!(tree.inline_container(first), first);
        assert_eq!(tree[LayoutTree::ROOT].children.len(), 2);
    }

    #[test]
    fn test_move_box_translates_subtree() {
        let mut tree = styled_tree();
        tree.move_box(LayoutTree::ROOT, 5.0, -2.0);
        let moved = tree[BoxId(1)].dimensions.content;
        assert_eq!((moved.x, moved.y), (5.0, -2.0));
        assert!(tree.is_ancestor(LayoutTree::ROOT, BoxId(1)));
        assert!(!tree.is_ancestor(BoxId(1), LayoutTree::ROOT));
    }
}
