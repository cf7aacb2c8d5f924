//! Integration tests for HTML tokenizing and tree building.

use wren_dom::{DomTree, NodeId, NodeType};
use wren_html::{HTMLParser, HTMLTokenizer, Token, parse_document};

fn tokens(markup: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(markup);
    tokenizer.run();
    tokenizer.into_tokens()
}

fn element_children(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .filter_map(|&c| tree.as_element(c).map(|e| e.tag_name.clone()))
        .collect()
}

#[test]
fn test_start_tag_with_attributes() {
    let toks = tokens(r#"<IMG SRC="a.png" alt='x y' width=10 hidden>"#);
    let Token::StartTag {
        name, attributes, ..
    } = &toks[0]
    else {
        panic!("expected a start tag, got {:?}", toks[0]);
    };
    assert_eq!(name, "img");
    let pairs: Vec<(&str, &str)> = attributes
        .iter()
        .map(|a| (a.name.as_str(), a.value.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("src", "a.png"), ("alt", "x y"), ("width", "10"), ("hidden", "")]
    );
}

#[test]
fn test_character_references() {
    let tree = parse_document("<p>a &amp; b &lt;&#65;&#x42;&bogus; &</p>");
    let p = tree.document_element().unwrap();
    assert_eq!(tree.child_text(p), "a & b <AB&bogus; &");
}

#[test]
fn test_style_content_is_raw_text() {
    let tree = parse_document("<html><style>p > a { color: red }</style></html>");
    let html = tree.document_element().unwrap();
    let style = tree.children(html)[0];
    assert_eq!(tree.child_text(style), "p > a { color: red }");
}

#[test]
fn test_void_elements_do_not_nest() {
    let tree = parse_document("<div><img src=a.png><br><span>x</span></div>");
    let div = tree.document_element().unwrap();
    assert_eq!(element_children(&tree, div), vec!["img", "br", "span"]);
}

#[test]
fn test_text_and_tail_text_are_sibling_nodes() {
    let tree = parse_document("<div>lead <b>bold</b> tail</div>");
    let div = tree.document_element().unwrap();
    let kinds: Vec<&NodeType> = tree
        .children(div)
        .iter()
        .map(|&c| &tree.get(c).unwrap().node_type)
        .collect();
    assert!(matches!(kinds[0], NodeType::Text(t) if t == "lead "));
    assert!(matches!(kinds[1], NodeType::Element(e) if e.tag_name == "b"));
    assert!(matches!(kinds[2], NodeType::Text(t) if t == " tail"));
}

#[test]
fn test_doctype_dropped_comments_kept() {
    let tree = parse_document("<!DOCTYPE html>\n<!-- top --><html><!-- inner --></html>");
    let html = tree.document_element().unwrap();
    assert_eq!(tree.get(html).unwrap().node_type, NodeType::Element(wren_dom::ElementData::new("html")));
    assert!(matches!(
        &tree.get(tree.children(html)[0]).unwrap().node_type,
        NodeType::Comment(c) if c == " inner "
    ));
}

#[test]
fn test_stray_and_misnested_end_tags() {
    let mut tokenizer = HTMLTokenizer::new("<div><em>one</div><p>two</span></p>");
    tokenizer.run();
    let (tree, issues) = HTMLParser::new(tokenizer.into_tokens()).run_with_issues();
    let roots = element_children(&tree, NodeId::ROOT);
    assert_eq!(roots, vec!["div", "p"]);
    assert!(issues.iter().any(|i| i.message.contains("</span>")));
    assert!(issues.iter().any(|i| i.message.contains("</div>")));
}

#[test]
fn test_table_rows_get_implied_body() {
    let tree = parse_document("<table><tr><td>a</td></tr></table>");
    let table = tree.document_element().unwrap();
    assert_eq!(element_children(&tree, table), vec!["tbody"]);
    let body = tree.children(table)[0];
    assert_eq!(element_children(&tree, body), vec!["tr"]);
}
