//! Integration tests for the cascade over parsed documents.

use wren_css::{Value, compute_style_map, compute_style_map_with_defaults, parse_stylesheet};
use wren_dom::{DomTree, NodeId};
use wren_html::parse_document;

fn element(tree: &DomTree, tag: &str) -> NodeId {
    tree.descendants(tree.document_element().expect("document has an element"))
        .find(|&id| tree.as_element(id).is_some_and(|e| e.tag_name == tag))
        .expect("element exists")
}

#[test]
fn test_more_specific_rule_wins_regardless_of_order() {
    let tree = parse_document(r#"<div><p id="intro" class="lead">x</p></div>"#);
    let sheet = parse_stylesheet(
        "#intro { color: red }
         p.lead { color: green }
         div p { color: blue }",
    );
    let styles = compute_style_map(&tree, &sheet);
    let p = element(&tree, "p");
    assert_eq!(styles.value(p, "color"), Some(&Value::keyword("red")));
}

#[test]
fn test_equal_priority_keeps_first_declaration() {
    let tree = parse_document("<p class=a>x</p>");
    let sheet = parse_stylesheet(".a { color: red } .a { color: blue }");
    let styles = compute_style_map(&tree, &sheet);
    let p = tree.document_element().expect("document has an element");
    assert_eq!(styles.value(p, "color"), Some(&Value::keyword("red")));
}

#[test]
fn test_selector_list_members_use_their_own_priority() {
    let tree = parse_document("<p class=a>x</p>");
    let sheet = parse_stylesheet("p { width: 1px } .a, p { width: 2px }");
    let styles = compute_style_map(&tree, &sheet);
    let p = tree.document_element().expect("document has an element");
    // `.a` outranks `p`; the later `p` ties and loses to the first.
    assert_eq!(styles.value(p, "width"), Some(&Value::px(2.0)));
}

#[test]
fn test_author_rules_beat_user_agent_rules() {
    let tree = parse_document("<div><span>x</span><img></div>");
    let user_agent = parse_stylesheet("span { display: inline } img { display: img }");
    let author = parse_stylesheet("* { display: block }");
    let styles = compute_style_map_with_defaults(&tree, &user_agent, &author);
    let span = element(&tree, "span");
    assert_eq!(styles.value(span, "display"), Some(&Value::keyword("block")));

    let only_ua = compute_style_map_with_defaults(&tree, &user_agent, &parse_stylesheet(""));
    let img = element(&tree, "img");
    assert_eq!(only_ua.value(img, "display"), Some(&Value::keyword("img")));
}
