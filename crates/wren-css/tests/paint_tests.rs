//! Integration tests for display list generation and execution.

use wren_common::image::LoadedImage;
use wren_css::{
    ApproximateFontMetrics, ColorValue, DisplayCommand, DisplayList, DrawingSurface, ImageCache,
    ImageDecoder, LayoutTree, NullResourceLoader, Painter, ResourceError, build_layout_tree,
    compute_style_map_with_defaults, layout_tree, parse_stylesheet, ua_stylesheet,
};
use wren_html::parse_document;

struct NoDecoder;

impl ImageDecoder for NoDecoder {
    fn decode(&self, _bytes: &[u8], path: &str) -> Result<LoadedImage, ResourceError> {
        Err(ResourceError::Decode {
            path: path.to_string(),
            reason: "no decoder".to_string(),
        })
    }
}

fn laid_out(html: &str, css: &str, viewport_width: f64) -> LayoutTree {
    let dom = parse_document(html);
    let root = dom.document_element().expect("document has an element");
    let styles = compute_style_map_with_defaults(&dom, ua_stylesheet(), &parse_stylesheet(css));
    let mut tree = build_layout_tree(&dom, root, styles).expect("box tree builds");
    let mut images = ImageCache::new(Box::new(NoDecoder));
    layout_tree(
        &mut tree,
        viewport_width,
        &ApproximateFontMetrics,
        &mut images,
        &NullResourceLoader,
    )
    .expect("layout succeeds");
    tree
}

fn paint(html: &str, css: &str, viewport_width: f64) -> DisplayList {
    let tree = laid_out(html, css, viewport_width);
    Painter::new(&tree, &ApproximateFontMetrics)
        .paint()
        .expect("paint succeeds")
}

/// Records every surface call as a line of text.
#[derive(Default)]
struct RecordingSurface {
    calls: Vec<String>,
}

impl DrawingSurface for RecordingSurface {
    fn set_color(&mut self, color: ColorValue) {
        self.calls
            .push(format!("color {},{},{},{}", color.r, color.g, color.b, color.a));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(format!("rect {x} {y} {width} {height}"));
    }

    fn draw_text(&mut self, x: f64, y: f64, font: &str, size: f64, text: &str, _color: ColorValue) {
        self.calls.push(format!("text {x} {y} {font} {size} {text:?}"));
    }

    fn blit_image(&mut self, image: &LoadedImage, x: f64, y: f64) {
        self.calls
            .push(format!("image {x} {y} {}x{}", image.width(), image.height()));
    }

    fn size(&self) -> (f64, f64) {
        (320.0, 240.0)
    }
}

const RED: ColorValue = ColorValue::opaque(0xFF_0000);

#[test]
fn test_background_then_borders_then_text() {
    let list = paint(
        "<div><p>hi</p></div>",
        "div { background: white }
         p { background-color: #f00; border-width: 2px; border-color: black;
             color: black; height: 20px }",
        200.0,
    );
    let commands = list.commands();

    assert_eq!(
        commands[0],
        DisplayCommand::FillCanvas {
            color: ColorValue::WHITE
        }
    );
    assert_eq!(
        commands[1],
        DisplayCommand::FillRect {
            x: 0.0,
            y: 0.0,
            width: 200.0,
            height: 24.0,
            color: ColorValue::WHITE
        }
    );
    assert_eq!(
        commands[2],
        DisplayCommand::FillRect {
            x: 0.0,
            y: 0.0,
            width: 200.0,
            height: 24.0,
            color: RED
        }
    );

    // Left, right, top, bottom.
    let borders: Vec<(f64, f64, f64, f64)> = commands[3..7]
        .iter()
        .map(|command| match command {
            DisplayCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                assert_eq!(*color, ColorValue::BLACK);
                (*x, *y, *width, *height)
            }
            other => panic!("expected a border rectangle, got {other:?}"),
        })
        .collect();
    assert_eq!(
        borders,
        vec![
            (0.0, 0.0, 2.0, 24.0),
            (198.0, 0.0, 2.0, 24.0),
            (0.0, 0.0, 200.0, 2.0),
            (0.0, 22.0, 200.0, 2.0),
        ]
    );

    let DisplayCommand::DrawText {
        x,
        y,
        text,
        font_family,
        font_size,
        color,
    } = &commands[7]
    else {
        panic!("expected text, got {:?}", commands[7]);
    };
    assert_eq!(text, "hi ");
    assert_eq!(font_family, "Monospace");
    assert!((font_size - 16.0).abs() < 1e-9);
    // Baseline sits one ascent (0.8 × 16) below the content top.
    assert!((x - 2.0).abs() < 1e-9);
    assert!((y - (2.0 + 12.8)).abs() < 1e-9);
    assert_eq!(*color, ColorValue::BLACK);
    assert_eq!(commands.len(), 8);
}

#[test]
fn test_text_without_color_is_not_painted() {
    let list = paint("<div>plain words</div>", "", 200.0);
    assert!(list.is_empty());
}

#[test]
fn test_unknown_color_keyword_is_skipped() {
    let list = paint("<div>x</div>", "div { background: sparkly }", 200.0);
    assert!(list.is_empty());
}

#[test]
fn test_inherited_font_reaches_text() {
    let list = paint(
        "<div><span>x</span></div>",
        "div { color: red; font-family: Serif; font-size: 10px }",
        200.0,
    );
    let fonts: Vec<(&str, f64)> = list
        .commands()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::DrawText {
                font_family,
                font_size,
                ..
            } => Some((font_family.as_str(), *font_size)),
            _ => None,
        })
        .collect();
    assert_eq!(fonts, vec![("Serif", 10.0)]);
}

#[test]
fn test_failed_image_paints_placeholder() {
    let list = paint(r#"<div><img src="gone.png"></div>"#, "", 200.0);
    let DisplayCommand::DrawImage { x, y, image } = &list.commands()[0] else {
        panic!("expected an image, got {:?}", list.commands());
    };
    assert_eq!(**image, LoadedImage::placeholder());
    assert!(x.abs() < 1e-9 && y.abs() < 1e-9);
}

#[test]
fn test_execute_replays_commands_on_surface() {
    let list = paint(
        r#"<div><img src="gone.png"></div>"#,
        "div { background: red }",
        100.0,
    );
    let mut surface = RecordingSurface::default();
    list.execute(&mut surface);
    assert_eq!(
        surface.calls,
        vec![
            "color 255,0,0,255",
            "rect 0 0 320 240",
            "color 255,0,0,255",
            "rect 0 0 100 1",
            "image 0 0 1x1",
        ]
    );
}
