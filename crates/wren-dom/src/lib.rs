//! Arena DOM tree for the Wren renderer.
//!
//! The renderer needs only a small slice of the
//! [DOM Living Standard](https://dom.spec.whatwg.org/): elements with
//! attributes, text and comments, a parent link for descendant selectors and
//! an ordered child list for box generation.
//!
//! # Design
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`]. Nodes are
//! never removed, so an id stays valid for the life of the tree and the
//! cascade can key computed styles by it.
//!
//! Text that follows an element in source order (its "tail") is the run of
//! [`NodeType::Text`] siblings after it.

use std::collections::HashMap;

/// Attribute name → value. Names are lower-cased by the parser.
pub type AttributesMap = HashMap<String, String>;

/// Index of a node in its [`DomTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The Document node every tree starts with.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
#[derive(Debug, Clone)]
pub struct Node {
    /// What the node is, with its payload.
    pub node_type: NodeType,
    /// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// `None` for the Document and for detached nodes.
    pub parent: Option<NodeId>,
    /// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-child)
    /// Children in tree order.
    pub children: Vec<NodeId>,
}

impl Node {
    /// A detached node with no children.
    #[must_use]
    pub const fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// The kinds of node the renderer keeps. Doctypes and processing
/// instructions are dropped by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.11 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// Kept so the tree round-trips through `format_tree`; never styled.
    Comment(String),
}

/// Tag name and attributes of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lower-case local name, e.g. `"div"`.
    pub tag_name: String,
    /// [§ 4.9](https://dom.spec.whatwg.org/#concept-element-attribute)
    /// "An element has an associated ordered set of attributes". Order is not
    /// observable to selectors, so a map is enough.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// An element called `tag_name` with no attributes.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            attrs: AttributesMap::new(),
        }
    }

    /// The `id` attribute, matched by `#id` selectors.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    /// Whitespace-separated tokens of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attribute("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    /// Whether `name` is one of [`classes`](Self::classes).
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.classes().any(|c| c == name)
    }

    /// Attribute value by lower-case name.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// The node arena. Index 0 is always the Document ([`NodeId::ROOT`]).
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// A tree holding only the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeType::Document)],
        }
    }

    /// The node at `id`, if `id` belongs to this tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Mutable access to the node at `id`.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes, the Document included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree holds at least its Document node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a detached node and return its id.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        self.nodes.push(Node::new(node_type));
        NodeId(self.nodes.len() - 1)
    }

    /// [§ 4.2.3 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Make `child` the last child of `parent`. `child` must be detached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Parent of `id`, `None` for the Document.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of `id` in tree order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Last child of `id`.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// [§ 4.2.1 Ancestor](https://dom.spec.whatwg.org/#concept-tree-ancestor)
    ///
    /// Proper ancestors of `id`, nearest first, ending at the Document.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&a| self.parent(a))
    }

    /// [§ 4.2.1 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Descendants of `id` in tree order, not including `id` itself.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.children(next).iter().rev());
            Some(next)
        })
    }

    /// Element data of `id`, if it is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.get(id)?.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Character data of `id`, if it is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.node_type {
            NodeType::Text(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable character data of `id`, if it is a text node. The parser
    /// grows the last text node instead of adding one node per character.
    pub fn text_mut(&mut self, id: NodeId) -> Option<&mut String> {
        match &mut self.get_mut(id)?.node_type {
            NodeType::Text(data) => Some(data),
            _ => None,
        }
    }

    /// [§ 4.5](https://dom.spec.whatwg.org/#document-element)
    ///
    /// "The document element of a document is the element whose parent is
    /// that document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&id| self.as_element(id).is_some())
    }

    /// Text of the text-node children of `id`, concatenated. Used for
    /// `<style>` contents.
    #[must_use]
    pub fn child_text(&self, id: NodeId) -> String {
        self.children(id)
            .iter()
            .filter_map(|&c| self.as_text(c))
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
