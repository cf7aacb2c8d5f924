//! Cascade resolution
//!
//! Resolves, per element and property, which declaration applies. The
//! ordering follows [CSS Cascading Level 4 § 6.4.3 Specificity](https://www.w3.org/TR/css-cascade-4/#cascade-specificity)
//! with one deliberate difference: among declarations of *equal* priority
//! the first one applied is kept. A later rule only replaces a stored value
//! when its priority is strictly greater.
//!
//! Rules are applied in stylesheet order, selector by selector, so "first
//! applied" means "earliest in the stylesheet".

use std::collections::HashMap;

use wren_dom::{DomTree, NodeId};

use crate::parser::Stylesheet;
use crate::values::Value;

/// Property name → `(priority, value)` for one element.
pub type PropertyMap = HashMap<String, (u32, Value)>;

/// Cascaded declarations for every styled element of a document, keyed by
/// [`NodeId`]. Elements no rule matched have no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    nodes: HashMap<NodeId, PropertyMap>,
}

impl StyleMap {
    /// Create an empty style map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one declaration into the map.
    ///
    /// The value is stored when the node has no value for `name` yet, or when
    /// `priority` is strictly greater than the stored priority. Returns
    /// whether the value was stored.
    pub fn apply(&mut self, node: NodeId, name: &str, priority: u32, value: &Value) -> bool {
        let properties = self.nodes.entry(node).or_default();
        match properties.get(name) {
            Some((stored, _)) if priority <= *stored => false,
            _ => {
                let _ = properties.insert(name.to_string(), (priority, value.clone()));
                true
            }
        }
    }

    /// All cascaded properties of `node`.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&PropertyMap> {
        self.nodes.get(&node)
    }

    /// The cascaded value of one property of `node`.
    #[must_use]
    pub fn value(&self, node: NodeId, name: &str) -> Option<&Value> {
        self.get(node)
            .and_then(|properties| properties.get(name))
            .map(|(_, value)| value)
    }

    /// Copy every `(node, property)` from `defaults` that this map does not
    /// already set. Used to layer the user-agent stylesheet underneath the
    /// author stylesheet: author declarations win regardless of priority.
    pub fn fill_from(&mut self, defaults: Self) {
        for (node, properties) in defaults.nodes {
            let target = self.nodes.entry(node).or_default();
            for (name, entry) in properties {
                let _ = target.entry(name).or_insert(entry);
            }
        }
    }

    /// Number of styled nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has any cascaded property.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
///
/// Build the [`StyleMap`] for `tree`: for each rule, for each of its
/// selectors, every matched element receives every declaration of the rule
/// at the selector's packed priority.
///
/// ```
/// use wren_css::{compute_style_map, parse_stylesheet, Value};
///
/// let tree = wren_html::parse_document("<p class=x>hi</p>");
/// let sheet = parse_stylesheet(".x { color: red } p { color: blue }");
/// let styles = compute_style_map(&tree, &sheet);
/// let p = tree.document_element().unwrap();
/// assert_eq!(styles.value(p, "color"), Some(&Value::keyword("red")));
/// ```
#[must_use]
pub fn compute_style_map(tree: &DomTree, stylesheet: &Stylesheet) -> StyleMap {
    let mut styles = StyleMap::new();
    for rule in &stylesheet.rules {
        for selector in &rule.selectors {
            let priority = selector.specificity.priority();
            for node in selector.select(tree) {
                for declaration in &rule.declarations {
                    let _ = styles.apply(node, &declaration.name, priority, &declaration.value);
                }
            }
        }
    }
    styles
}

/// Cascade an author stylesheet over a user-agent stylesheet.
///
/// Each sheet is resolved on its own with [`compute_style_map`]; user-agent
/// values then fill only the properties the author left unset.
#[must_use]
pub fn compute_style_map_with_defaults(
    tree: &DomTree,
    user_agent: &Stylesheet,
    author: &Stylesheet,
) -> StyleMap {
    let mut styles = compute_style_map(tree, author);
    styles.fill_from(compute_style_map(tree, user_agent));
    styles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Specificity;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn priority_is_monotonic_below_one_hundred(x: (u8, u8, u8), y: (u8, u8, u8)) -> bool {
        let x = Specificity(u32::from(x.0 % 100), u32::from(x.1 % 100), u32::from(x.2 % 100));
        let y = Specificity(u32::from(y.0 % 100), u32::from(y.1 % 100), u32::from(y.2 % 100));
        x.cmp(&y) == x.priority().cmp(&y.priority())
    }

    #[quickcheck]
    fn higher_priority_wins_in_either_order(p1: u16, p2: u16, high_first: bool) -> bool {
        let (p1, p2) = (u32::from(p1), u32::from(p2));
        let node = NodeId(1);
        let first = Value::keyword("first");
        let second = Value::keyword("second");

        let mut styles = StyleMap::new();
        let order = if high_first { [(p1, &first), (p2, &second)] } else { [(p2, &second), (p1, &first)] };
        for (priority, value) in order {
            let _ = styles.apply(node, "color", priority, value);
        }

        let stored = styles.value(node, "color");
        if p1 > p2 {
            stored == Some(&first)
        } else if p2 > p1 {
            stored == Some(&second)
        } else if high_first {
            stored == Some(&first)
        } else {
            stored == Some(&second)
        }
    }

    #[test]
    fn test_overflowing_components_collide() {
        // 100 classes pack to the same priority as one ID.
        assert_eq!(
            Specificity(0, 100, 0).priority(),
            Specificity(1, 0, 0).priority()
        );
        assert!(Specificity(0, 0, 150).priority() > Specificity(0, 1, 0).priority());
    }

    #[test]
    fn test_fill_from_keeps_author_values() {
        let node = NodeId(3);
        let mut author = StyleMap::new();
        let _ = author.apply(node, "display", 0, &Value::keyword("inline"));
        let mut defaults = StyleMap::new();
        let _ = defaults.apply(node, "display", 1, &Value::keyword("block"));
        let _ = defaults.apply(node, "color", 1, &Value::keyword("red"));

        author.fill_from(defaults);
        assert_eq!(author.value(node, "display"), Some(&Value::keyword("inline")));
        assert_eq!(author.value(node, "color"), Some(&Value::keyword("red")));
    }
}
