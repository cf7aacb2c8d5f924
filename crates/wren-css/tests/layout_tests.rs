//! Integration tests for box tree construction and layout.

use wren_common::image::LoadedImage;
use wren_css::{
    BoxId, BoxType, FontExtents, FontMetrics, ImageCache, ImageDecoder, LayoutError, LayoutTree,
    ResourceError, ResourceLoader, StyleError, TextExtents, build_layout_tree,
    compute_style_map_with_defaults, layout_tree, parse_stylesheet, ua_stylesheet,
};
use wren_html::parse_document;

const EPSILON: f64 = 1e-9;

/// Every character is 10 units wide; every line is 20 units tall.
struct FixedMetrics;

impl FontMetrics for FixedMetrics {
    fn text_extents(&self, _family: &str, _size: f64, text: &str) -> TextExtents {
        #[allow(clippy::cast_precision_loss)]
        let width = text.chars().count() as f64 * 10.0;
        TextExtents {
            width,
            height: 20.0,
            x_advance: width,
            ..TextExtents::default()
        }
    }

    fn font_extents(&self, _family: &str, _size: f64) -> FontExtents {
        FontExtents {
            ascent: 15.0,
            descent: 5.0,
            height: 20.0,
            ..FontExtents::default()
        }
    }
}

/// Serves `cat.raw` as the two bytes `[width, height]`.
struct TestLoader;

impl ResourceLoader for TestLoader {
    fn load(&self, path: &str) -> Result<Vec<u8>, ResourceError> {
        match path {
            "cat.raw" => Ok(vec![4, 3]),
            _ => Err(ResourceError::Load {
                path: path.to_string(),
                reason: "not found".to_string(),
            }),
        }
    }
}

/// Decodes `[width, height]` into a transparent image of that size.
struct SizeDecoder;

impl ImageDecoder for SizeDecoder {
    fn decode(&self, bytes: &[u8], path: &str) -> Result<LoadedImage, ResourceError> {
        let &[width, height] = bytes else {
            return Err(ResourceError::Decode {
                path: path.to_string(),
                reason: "expected two bytes".to_string(),
            });
        };
        let (width, height) = (u32::from(width), u32::from(height));
        Ok(LoadedImage::new(
            width,
            height,
            vec![0; (width * height * 4) as usize],
        ))
    }
}

fn try_layout(html: &str, css: &str, viewport_width: f64) -> Result<LayoutTree, LayoutError> {
    let dom = parse_document(html);
    let root = dom.document_element().expect("document has an element");
    let styles = compute_style_map_with_defaults(&dom, ua_stylesheet(), &parse_stylesheet(css));
    let mut tree = build_layout_tree(&dom, root, styles)?;
    let mut images = ImageCache::new(Box::new(SizeDecoder));
    layout_tree(
        &mut tree,
        viewport_width,
        &FixedMetrics,
        &mut images,
        &TestLoader,
    )?;
    Ok(tree)
}

fn layout(html: &str, css: &str, viewport_width: f64) -> LayoutTree {
    try_layout(html, css, viewport_width).expect("layout succeeds")
}

fn boxes_with_tag(tree: &LayoutTree, tag: &str) -> Vec<BoxId> {
    (0..tree.len())
        .map(BoxId)
        .filter(|&id| tree[id].tag.as_deref() == Some(tag))
        .collect()
}

fn text_boxes(tree: &LayoutTree) -> Vec<BoxId> {
    (0..tree.len())
        .map(BoxId)
        .filter(|&id| tree[id].text.is_some())
        .collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

// ---------------------------------------------------------------------------
// Box tree construction
//
// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
// ---------------------------------------------------------------------------

#[test]
fn test_display_none_removes_subtree() {
    let tree = layout(
        "<div><p class=hidden>x<span>y</span></p><p>z</p></div>",
        ".hidden { display: none }",
        200.0,
    );
    let words: Vec<&str> = text_boxes(&tree)
        .into_iter()
        .filter_map(|id| tree[id].text.as_deref())
        .collect();
    assert_eq!(words, vec!["z "]);
    assert_eq!(boxes_with_tag(&tree, "p").len(), 1);
    assert!(boxes_with_tag(&tree, "span").is_empty());
}

#[test]
fn test_adjacent_inlines_share_one_anonymous_box() {
    let tree = layout(
        "<div><p>a</p><span>b</span><em>c</em><p>d</p></div>",
        "",
        200.0,
    );
    let root = &tree[LayoutTree::ROOT];
    let kinds: Vec<BoxType> = root.children.iter().map(|&c| tree[c].box_type).collect();
    assert_eq!(
        kinds,
        vec![BoxType::Block, BoxType::Anonymous, BoxType::Block]
    );

    let anonymous = &tree[root.children[1]];
    let tags: Vec<&str> = anonymous
        .children
        .iter()
        .filter_map(|&c| tree[c].tag.as_deref())
        .collect();
    assert_eq!(tags, vec!["span", "em"]);
}

#[test]
fn test_text_is_split_into_word_boxes() {
    let tree = layout("<div>  hello   world  </div>", "", 200.0);
    let words: Vec<&str> = text_boxes(&tree)
        .into_iter()
        .filter_map(|id| tree[id].text.as_deref())
        .collect();
    assert_eq!(words, vec!["hello ", "world "]);
    for id in text_boxes(&tree) {
        assert_eq!(tree[id].box_type, BoxType::Inline);
        assert!(tree[id].node.is_none());
    }
}

#[test]
fn test_hidden_root_is_fatal() {
    let err = try_layout("<div>x</div>", "div { display: none }", 200.0)
        .expect_err("hidden root must not render");
    assert_eq!(
        err,
        LayoutError::RootDisplayNone {
            tag: "div".to_string()
        }
    );
}

#[test]
fn test_wrong_value_kind_is_fatal() {
    let err = try_layout("<div></div>", "div { width: bold }", 200.0)
        .expect_err("width: bold cannot be a length");
    assert!(matches!(
        err,
        LayoutError::Style(StyleError::Conversion { target: "px", .. })
    ));
}

// ---------------------------------------------------------------------------
// Block width
//
// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
// ---------------------------------------------------------------------------

#[test]
fn test_auto_width_takes_underflow_and_zeroes_auto_margins() {
    let tree = layout(
        "<div></div>",
        "div { margin-left: auto; margin-right: auto }",
        200.0,
    );
    let d = tree[LayoutTree::ROOT].dimensions;
    assert_close(d.content.width, 200.0);
    assert_close(d.margin.left, 0.0);
    assert_close(d.margin.right, 0.0);
}

#[test]
fn test_auto_margins_split_underflow_evenly() {
    let tree = layout(
        "<div></div>",
        "div { width: 100px; margin-left: auto; margin-right: auto }",
        200.0,
    );
    let d = tree[LayoutTree::ROOT].dimensions;
    assert_close(d.content.width, 100.0);
    assert_close(d.margin.left, 50.0);
    assert_close(d.margin.right, 50.0);
    assert_close(d.content.x, 50.0);
}

#[test]
fn test_single_auto_margin_takes_underflow() {
    let tree = layout(
        "<div></div>",
        "div { width: 100px; margin-left: auto; margin-right: 30px }",
        200.0,
    );
    let d = tree[LayoutTree::ROOT].dimensions;
    assert_close(d.margin.left, 70.0);
    assert_close(d.margin.right, 30.0);
}

#[test]
fn test_over_constrained_width_pushes_margin_right_negative() {
    let tree = layout(
        "<div></div>",
        "div { width: 300px; margin-left: auto; margin-right: auto }",
        200.0,
    );
    let d = tree[LayoutTree::ROOT].dimensions;
    assert_close(d.content.width, 300.0);
    assert_close(d.margin.left, 0.0);
    assert_close(d.margin.right, -100.0);
}

#[test]
fn test_padding_and_border_shrink_auto_width() {
    let tree = layout(
        "<div></div>",
        "div { padding: 10px; border-width: 5px }",
        200.0,
    );
    let d = tree[LayoutTree::ROOT].dimensions;
    assert_close(d.content.width, 170.0);
    assert_close(d.content.x, 15.0);
    assert_close(d.content.y, 15.0);
    assert_close(d.margin_box().width, 200.0);
}

// ---------------------------------------------------------------------------
// Block height and position
//
// [§ 10.6.3 Block-level non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#normal-block)
// ---------------------------------------------------------------------------

#[test]
fn test_blocks_stack_vertically() {
    let tree = layout(
        "<div><p></p><p></p></div>",
        "p { height: 30px; margin-bottom: 5px }",
        200.0,
    );
    let ps = boxes_with_tag(&tree, "p");
    assert_close(tree[ps[0]].dimensions.content.y, 0.0);
    assert_close(tree[ps[1]].dimensions.content.y, 35.0);
    assert_close(tree[LayoutTree::ROOT].dimensions.content.height, 70.0);
}

#[test]
fn test_explicit_height_overrides_content() {
    let tree = layout("<div>a b c</div>", "div { height: 7px }", 200.0);
    assert_close(tree[LayoutTree::ROOT].dimensions.content.height, 7.0);
}

// ---------------------------------------------------------------------------
// Line wrapping
//
// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
// ---------------------------------------------------------------------------

fn word_positions(tree: &LayoutTree) -> Vec<(f64, f64)> {
    text_boxes(tree)
        .into_iter()
        .map(|id| {
            let content = tree[id].dimensions.content;
            (content.x, content.y)
        })
        .collect()
}

fn assert_positions(actual: &[(f64, f64)], expected: &[(f64, f64)]) {
    assert_eq!(actual.len(), expected.len());
    for (&(ax, ay), &(ex, ey)) in actual.iter().zip(expected) {
        assert_close(ax, ex);
        assert_close(ay, ey);
    }
}

#[test]
fn test_third_word_wraps_to_second_line() {
    // Each "abc " is 40 units wide.
    let tree = layout("<div>abc abc abc</div>", "", 100.0);
    assert_positions(
        &word_positions(&tree),
        &[(0.0, 0.0), (40.0, 0.0), (0.0, 20.0)],
    );
    assert_close(tree[LayoutTree::ROOT].dimensions.content.height, 40.0);
}

#[test]
fn test_right_alignment_shifts_each_line() {
    let tree = layout("<div>abc abc abc</div>", "div { text-align: right }", 100.0);
    assert_positions(
        &word_positions(&tree),
        &[(20.0, 0.0), (60.0, 0.0), (60.0, 20.0)],
    );
}

#[test]
fn test_center_alignment_splits_leftover() {
    let tree = layout("<div>abc abc abc</div>", "div { text-align: center }", 100.0);
    assert_positions(
        &word_positions(&tree),
        &[(10.0, 0.0), (50.0, 0.0), (30.0, 20.0)],
    );
}

#[test]
fn test_span_shrinks_to_widest_word_and_moves_once_with_its_words() {
    // The span is as wide as one word, then its words follow it on the line:
    // 30 + 30 + 30 leaves 10 over.
    let tree = layout(
        "<div><span>ab cd</span></div>",
        "div { text-align: right }",
        100.0,
    );
    let span = boxes_with_tag(&tree, "span")[0];
    assert_close(tree[span].dimensions.content.width, 30.0);
    assert_close(tree[span].dimensions.content.x, 10.0);
    assert_positions(
        &word_positions(&tree),
        &[(40.0, 0.0), (70.0, 0.0)],
    );
}

#[test]
fn test_span_words_on_a_later_line_align_on_their_own() {
    let tree = layout(
        "<div><span>ab cd ef gh</span></div>",
        "div { text-align: right }",
        100.0,
    );
    let span = boxes_with_tag(&tree, "span")[0];
    assert_close(tree[span].dimensions.content.x, 10.0);
    // First line: span, ab, cd (90 wide). Second line: ef, gh (60 wide).
    assert_positions(
        &word_positions(&tree),
        &[(40.0, 0.0), (70.0, 0.0), (40.0, 20.0), (70.0, 20.0)],
    );
    assert_close(tree[LayoutTree::ROOT].dimensions.content.height, 40.0);
}

#[test]
fn test_unknown_alignment_falls_back_to_left() {
    let tree = layout("<div>abc abc</div>", "div { text-align: justify }", 100.0);
    assert_positions(&word_positions(&tree), &[(0.0, 0.0), (40.0, 0.0)]);
    assert!(wren_common::warning::has_warned("Layout", "justify"));
}

// ---------------------------------------------------------------------------
// Images
//
// [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
// ---------------------------------------------------------------------------

#[test]
fn test_images_use_intrinsic_size_or_placeholder() {
    let tree = layout(
        r#"<div><img src="cat.raw"><img src="missing.png"><img></div>"#,
        "",
        200.0,
    );
    let images = boxes_with_tag(&tree, "img");
    assert_eq!(images.len(), 3);

    let sizes: Vec<(f64, f64)> = images
        .iter()
        .map(|&id| {
            let content = tree[id].dimensions.content;
            (content.width, content.height)
        })
        .collect();
    assert_positions(&sizes, &[(4.0, 3.0), (1.0, 1.0), (1.0, 1.0)]);

    let xs: Vec<f64> = images
        .iter()
        .map(|&id| tree[id].dimensions.content.x)
        .collect();
    assert_close(xs[1], 4.0);
    assert_close(xs[2], 5.0);
    assert!(images.iter().all(|&id| tree[id].image.is_some()));
    assert_close(tree[LayoutTree::ROOT].dimensions.content.height, 3.0);
}

// ---------------------------------------------------------------------------
// Tables
//
// [§ 17 Tables](https://www.w3.org/TR/CSS2/tables.html)
// ---------------------------------------------------------------------------

#[test]
fn test_columns_scale_to_row_width() {
    // Natural column widths are 30 ("ab ") and 50 ("abcd "); the row is 160
    // wide, so every column doubles.
    let tree = layout(
        "<table><tr><td class=tall>ab</td><td>abcd</td></tr>\
         <tr><td>a</td><td>b</td></tr></table>",
        ".tall { padding-top: 10px }",
        160.0,
    );
    let cells = boxes_with_tag(&tree, "td");
    assert_eq!(cells.len(), 4);

    let first = tree[cells[0]].dimensions;
    let second = tree[cells[1]].dimensions;
    assert_close(first.content.width, 60.0);
    assert_close(second.content.width, 100.0);
    assert_close(first.content.x, 0.0);
    assert_close(second.content.x, 60.0);

    // The padded cell is 30 tall; its neighbour is stretched to match.
    let rows = boxes_with_tag(&tree, "tr");
    assert_close(tree[rows[0]].dimensions.content.height, 30.0);
    assert_close(first.margin_box().height, 30.0);
    assert_close(second.content.height, 30.0);

    assert_close(tree[rows[1]].dimensions.content.y, 30.0);
    assert_close(tree[cells[2]].dimensions.content.y, 30.0);
    assert_close(tree[cells[3]].dimensions.content.x, 60.0);
    assert_close(tree[LayoutTree::ROOT].dimensions.content.height, 50.0);
}

#[test]
fn test_row_outside_table_is_laid_out_as_block() {
    let tree = layout("<div><tr><td>a</td></tr></div>", "", 100.0);
    let rows = boxes_with_tag(&tree, "tr");
    assert_eq!(rows.len(), 1);
    assert_close(tree[rows[0]].dimensions.content.width, 100.0);
    assert!(wren_common::warning::has_warned("Layout", "outside of a table"));
}
