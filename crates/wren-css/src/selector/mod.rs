//! CSS Selector parsing and matching
//!
//! This module implements the subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/) the cascade needs:
//! type, universal, class, ID and attribute selectors, compound selectors,
//! and the descendant and child combinators. Pseudo-classes and
//! pseudo-elements are parsed so they count toward specificity, but they
//! never match in a static render.

use wren_common::warning::warn_once;
use wren_dom::{DomTree, ElementData, NodeId};

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    Type(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    /// "The universal selector is a single asterisk (*) and represents the
    /// qualified name of any element type."
    Universal,

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the
    /// ID value, which is an identifier."
    Id(String),

    /// [§ 6.1 Attribute presence and value selectors](https://www.w3.org/TR/selectors-4/#attribute-representation)
    ///
    /// `[att]` when the value is `None`, `[att=val]` otherwise.
    Attribute(String, Option<String>),

    /// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    /// (`:hover`, `:first-child`, ...). Never matches.
    PseudoClass(String),

    /// [§ 3.6 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
    /// (`::before`, ...). Never matches.
    PseudoElement(String),
}

impl SimpleSelector {
    /// Check if this simple selector matches the given element.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            // "A type selector written in the style sheet as an identifier represents
            // an element in the document tree with the same qualified name as the identifier."
            Self::Type(name) => element.tag_name.eq_ignore_ascii_case(name),
            Self::Universal => true,
            Self::Class(class) => element.has_class(class),
            // "An ID selector represents an element instance that has an identifier
            // that matches the identifier in the ID selector."
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Attribute(name, None) => element.get_attribute(name).is_some(),
            Self::Attribute(name, Some(value)) => {
                element.get_attribute(name) == Some(value.as_str())
            }
            Self::PseudoClass(_) | Self::PseudoElement(_) => false,
        }
    }
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    /// The simple selectors that make up this compound selector.
    pub simple_selectors: Vec<SimpleSelector>,
}

impl CompoundSelector {
    fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        tree.as_element(node)
            .is_some_and(|element| self.simple_selectors.iter().all(|s| s.matches(element)))
    }
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A selector of the form 'A B' represents an element B that is an
    /// arbitrary descendant of some ancestor element A."
    Descendant,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A selector of the form 'A > B' represents an element B that is a
    /// direct child of element A."
    Child,
}

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
///
/// "count the number of ID selectors in the selector (= A); count the number
/// of class selectors, attributes selectors, and pseudo-classes in the
/// selector (= B); count the number of type selectors and pseudo-elements in
/// the selector (= C)"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Pack the triple into one cascade priority: `a * 10000 + b * 100 + c`.
    ///
    /// The packing only preserves ordering while `b` and `c` stay below 100.
    /// Larger components bleed into the next digit group; that boundary is
    /// not guarded.
    ///
    /// ```
    /// use wren_css::selector::Specificity;
    ///
    /// assert_eq!(Specificity(1, 2, 3).priority(), 10_203);
    /// assert!(Specificity(0, 1, 0).priority() > Specificity(0, 0, 99).priority());
    /// ```
    #[must_use]
    pub const fn priority(self) -> u32 {
        self.0 * 10_000 + self.1 * 100 + self.2
    }
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// A chain of compound selectors stored right to left: `subject` is the
/// rightmost compound, `combinators[0]` links it to the compound on its left.
///
/// For `ul > li a`:
/// ```text
/// subject: [a]  combinators: [(Descendant, [li]), (Child, [ul])]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// "The elements represented by a complex selector are the elements
    /// matched by the last compound selector in the complex selector."
    pub subject: CompoundSelector,
    /// (combinator, compound) pairs walking leftwards from the subject.
    pub combinators: Vec<(Combinator, CompoundSelector)>,
    /// Specificity summed over every compound.
    pub specificity: Specificity,
}

impl Selector {
    /// [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    ///
    /// Whether `node` is matched by this selector. Descendant combinators
    /// backtrack: if the nearest matching ancestor fails the rest of the
    /// chain, farther ancestors are tried.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.subject.matches(tree, node) && self.matches_from(tree, node, 0)
    }

    fn matches_from(&self, tree: &DomTree, node: NodeId, index: usize) -> bool {
        let Some((combinator, compound)) = self.combinators.get(index) else {
            return true;
        };
        match combinator {
            Combinator::Child => tree.parent(node).is_some_and(|parent| {
                compound.matches(tree, parent) && self.matches_from(tree, parent, index + 1)
            }),
            Combinator::Descendant => tree.ancestors(node).any(|ancestor| {
                compound.matches(tree, ancestor) && self.matches_from(tree, ancestor, index + 1)
            }),
        }
    }

    /// Every element of `tree` this selector matches, in document order.
    #[must_use]
    pub fn select(&self, tree: &DomTree) -> Vec<NodeId> {
        tree.descendants(NodeId::ROOT)
            .filter(|&node| self.matches(tree, node))
            .collect()
    }
}

/// [§ 4.3.9 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

fn take_ident(chars: &mut Chars<'_>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        let _ = chars.next();
    }
    ident
}

fn skip_whitespace(chars: &mut Chars<'_>) {
    while chars.peek().is_some_and(char::is_ascii_whitespace) {
        let _ = chars.next();
    }
}

/// Parse the inside of `[...]`, after the `[`.
fn parse_attribute(chars: &mut Chars<'_>) -> Option<SimpleSelector> {
    skip_whitespace(chars);
    let name = take_ident(chars).to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }
    skip_whitespace(chars);
    match chars.next()? {
        ']' => Some(SimpleSelector::Attribute(name, None)),
        '=' => {
            skip_whitespace(chars);
            let value = match chars.peek() {
                Some(&quote @ ('"' | '\'')) => {
                    let _ = chars.next();
                    let mut value = String::new();
                    loop {
                        match chars.next()? {
                            c if c == quote => break value,
                            c => value.push(c),
                        }
                    }
                }
                _ => take_ident(chars),
            };
            skip_whitespace(chars);
            (chars.next()? == ']').then_some(SimpleSelector::Attribute(name, Some(value)))
        }
        _ => None,
    }
}

/// Parse a pseudo-class or pseudo-element after the first `:`. A functional
/// argument (`:nth-child(2n)`) is skipped.
fn parse_pseudo(chars: &mut Chars<'_>) -> Option<SimpleSelector> {
    let element = chars.peek() == Some(&':');
    if element {
        let _ = chars.next();
    }
    let name = take_ident(chars).to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }
    if chars.peek() == Some(&'(') {
        let mut depth = 0_u32;
        for c in chars.by_ref() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        if depth != 0 {
            return None;
        }
    }
    warn_once(
        "CSS",
        &format!("pseudo selector ':{name}' never matches in a static render"),
    );
    Some(if element {
        SimpleSelector::PseudoElement(name)
    } else {
        SimpleSelector::PseudoClass(name)
    })
}

fn compound_specificity(compound: &CompoundSelector) -> Specificity {
    compound
        .simple_selectors
        .iter()
        .fold(Specificity::default(), |Specificity(a, b, c), simple| match simple {
            SimpleSelector::Id(_) => Specificity(a + 1, b, c),
            SimpleSelector::Class(_)
            | SimpleSelector::Attribute(..)
            | SimpleSelector::PseudoClass(_) => Specificity(a, b + 1, c),
            SimpleSelector::Type(_) | SimpleSelector::PseudoElement(_) => {
                Specificity(a, b, c + 1)
            }
            // "ignore the universal selector"
            SimpleSelector::Universal => Specificity(a, b, c),
        })
}

/// Parse a single complex selector such as `div.note > p a[href]`.
///
/// [§ 4 Selector syntax](https://www.w3.org/TR/selectors-4/#syntax)
///
/// Returns `None` for syntax outside the supported subset (sibling
/// combinators, namespaces, dangling combinators).
///
/// ```
/// use wren_css::selector::{parse_selector, Specificity};
///
/// let selector = parse_selector("ul#nav > li.item a").unwrap();
/// assert_eq!(selector.specificity, Specificity(1, 1, 3));
/// assert!(parse_selector("h1 + p").is_none());
/// ```
#[must_use]
pub fn parse_selector(raw: &str) -> Option<Selector> {
    let mut chars = raw.trim().chars().peekable();

    // Left to right; reversed into subject-first order at the end.
    let mut compounds: Vec<CompoundSelector> = Vec::new();
    let mut combinators: Vec<Combinator> = Vec::new();
    let mut current = CompoundSelector::default();
    let mut pending: Option<Combinator> = None;

    while let Some(&c) = chars.peek() {
        let simple = match c {
            ' ' | '\t' | '\n' | '\r' | '\u{c}' | '>' => {
                skip_whitespace(&mut chars);
                let explicit = chars.peek() == Some(&'>');
                if explicit {
                    let _ = chars.next();
                    skip_whitespace(&mut chars);
                }
                if current.simple_selectors.is_empty() {
                    return None;
                }
                compounds.push(std::mem::take(&mut current));
                pending = Some(if explicit {
                    Combinator::Child
                } else {
                    Combinator::Descendant
                });
                continue;
            }
            '*' => {
                let _ = chars.next();
                SimpleSelector::Universal
            }
            '.' => {
                let _ = chars.next();
                let class = take_ident(&mut chars);
                if class.is_empty() {
                    return None;
                }
                SimpleSelector::Class(class)
            }
            '#' => {
                let _ = chars.next();
                let id = take_ident(&mut chars);
                if id.is_empty() {
                    return None;
                }
                SimpleSelector::Id(id)
            }
            '[' => {
                let _ = chars.next();
                parse_attribute(&mut chars)?
            }
            ':' => {
                let _ = chars.next();
                parse_pseudo(&mut chars)?
            }
            c if is_ident_char(c) => {
                SimpleSelector::Type(take_ident(&mut chars).to_ascii_lowercase())
            }
            _ => return None,
        };
        if let Some(combinator) = pending.take() {
            combinators.push(combinator);
        }
        current.simple_selectors.push(simple);
    }

    if current.simple_selectors.is_empty() {
        return None;
    }
    compounds.push(current);

    let specificity = compounds
        .iter()
        .map(compound_specificity)
        .fold(Specificity::default(), |acc, s| {
            Specificity(acc.0 + s.0, acc.1 + s.1, acc.2 + s.2)
        });

    let subject = compounds.pop()?;
    let combinators = combinators.into_iter().rev().zip(compounds.into_iter().rev()).collect();

    Some(Selector {
        subject,
        combinators,
        specificity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound_and_chain() {
        let selector = parse_selector("div.a#b > p  span").unwrap();
        assert_eq!(
            selector.subject.simple_selectors,
            vec![SimpleSelector::Type("span".to_string())]
        );
        assert_eq!(selector.combinators.len(), 2);
        assert_eq!(selector.combinators[0].0, Combinator::Descendant);
        assert_eq!(selector.combinators[1].0, Combinator::Child);
        assert_eq!(selector.specificity, Specificity(1, 1, 3));
    }

    #[test]
    fn test_pseudo_counts_but_never_matches() {
        let selector = parse_selector("a:hover::before").unwrap();
        assert_eq!(selector.specificity, Specificity(0, 1, 2));
        let mut tree = DomTree::new();
        let a = tree.alloc(wren_dom::NodeType::Element(ElementData::new("a")));
        tree.append_child(NodeId::ROOT, a);
        assert!(!selector.matches(&tree, a));
    }

    #[test]
    fn test_attribute_selectors() {
        let exists = parse_selector("[href]").unwrap();
        let equals = parse_selector("input[type=\"text\"]").unwrap();
        assert_eq!(exists.specificity, Specificity(0, 1, 0));
        assert_eq!(equals.specificity, Specificity(0, 1, 1));
        assert_eq!(
            equals.subject.simple_selectors[1],
            SimpleSelector::Attribute("type".to_string(), Some("text".to_string()))
        );
    }

    #[test]
    fn test_rejects_unsupported_syntax() {
        assert!(parse_selector("h1 ~ p").is_none());
        assert!(parse_selector("> p").is_none());
        assert!(parse_selector("p >").is_none());
        assert!(parse_selector("[href").is_none());
        assert!(parse_selector("").is_none());
    }
}
