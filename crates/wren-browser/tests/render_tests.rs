//! Integration tests for the rendering session and its collaborators.

use std::io::Cursor;

use wren_browser::{
    FileResourceLoader, FontBook, ImageLoaderPipeline, RasterSurface, RenderError,
    RenderOptions, Session, extract_style_content, render,
};
use wren_css::{
    ApproximateFontMetrics, ImageDecoder, LayoutError, LayoutTree, ResourceError, ResourceLoader,
};

const WHITE: [u8; 4] = [255, 255, 255, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

const RED_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2"><rect width="4" height="2" fill="red"/></svg>"#;

fn red_svg_img() -> String {
    format!("<div><img src='data:image/svg+xml,{RED_SVG}'></div>")
}

fn session(width: f64, height: f64) -> Session {
    Session::new(RenderOptions {
        viewport_width: width,
        viewport_height: height,
        user_agent_stylesheet: true,
    })
}

#[test]
fn test_render_paints_canvas_and_image() {
    let fonts = FontBook::new();
    let mut session = session(20.0, 10.0);
    let mut surface = session.raster_surface(&fonts);
    let tree = session
        .render(
            &red_svg_img(),
            "div { background: blue }",
            &FileResourceLoader::default(),
            &ApproximateFontMetrics,
            &mut surface,
        )
        .expect("render succeeds");

    assert!((tree[LayoutTree::ROOT].dimensions.content.height - 2.0).abs() < 1e-9);
    assert_eq!(surface.pixel(0, 0), Some(RED));
    assert_eq!(surface.pixel(3, 1), Some(RED));
    assert_eq!(surface.pixel(4, 1), Some(BLUE));
    // The root background covers the whole canvas, not just the root box.
    assert_eq!(surface.pixel(19, 9), Some(BLUE));
}

#[test]
fn test_session_reuses_decoded_images() {
    let fonts = FontBook::new();
    let mut session = session(20.0, 10.0);
    for _ in 0..2 {
        let mut surface = RasterSurface::new(20, 10, &fonts);
        let _ = session
            .render(
                &red_svg_img(),
                "",
                &FileResourceLoader::default(),
                &ApproximateFontMetrics,
                &mut surface,
            )
            .expect("render succeeds");
    }
    assert_eq!(session.images().len(), 1);
}

#[test]
fn test_fatal_error_leaves_surface_untouched() {
    let fonts = FontBook::new();
    let mut surface = RasterSurface::new(4, 4, &fonts);
    let err = render(
        "<div>x</div>",
        "div { display: none; background: red }",
        4.0,
        &FileResourceLoader::default(),
        &ApproximateFontMetrics,
        &mut surface,
    )
    .expect_err("hidden root aborts the render");
    assert_eq!(
        err,
        RenderError::Layout(LayoutError::RootDisplayNone {
            tag: "div".to_string()
        })
    );
    assert!(surface.image().pixels().all(|p| p.0 == WHITE));
}

#[test]
fn test_bad_color_kind_aborts_before_drawing() {
    let fonts = FontBook::new();
    let mut surface = RasterSurface::new(4, 4, &fonts);
    let err = render(
        "<div><p>x</p></div>",
        "div { background: blue } p { color: 12px }",
        4.0,
        &FileResourceLoader::default(),
        &ApproximateFontMetrics,
        &mut surface,
    )
    .expect_err("a length is not a color");
    assert!(matches!(err, RenderError::Style(_)));
    assert!(surface.image().pixels().all(|p| p.0 == WHITE));
}

#[test]
fn test_infinitely_wide_background_is_clipped_to_surface() {
    let fonts = FontBook::new();
    let mut surface = RasterSurface::new(64, 64, &fonts);
    render(
        "<div><p></p></div>",
        "p { width: 1e400px; height: 10px; background: red }",
        64.0,
        &FileResourceLoader::default(),
        &ApproximateFontMetrics,
        &mut surface,
    )
    .expect("render succeeds");
    assert_eq!(surface.pixel(0, 0), Some(RED));
    assert_eq!(surface.pixel(63, 9), Some(RED));
    assert_eq!(surface.pixel(63, 10), Some(WHITE));
}

#[test]
fn test_empty_document_has_no_root() {
    let fonts = FontBook::new();
    let mut surface = RasterSurface::new(4, 4, &fonts);
    let err = render(
        "",
        "",
        4.0,
        &FileResourceLoader::default(),
        &ApproximateFontMetrics,
        &mut surface,
    )
    .expect_err("nothing to render");
    assert_eq!(err, RenderError::Layout(LayoutError::RootNotElement));
}

#[test]
fn test_pipeline_decodes_png_and_svg() {
    let mut png = Vec::new();
    let source = image::RgbaImage::from_pixel(3, 2, image::Rgba(BLUE));
    source
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .expect("encode png");

    let pipeline = ImageLoaderPipeline::new();
    let decoded = pipeline.decode(&png, "dot.png").expect("png decodes");
    assert_eq!((decoded.width(), decoded.height()), (3, 2));
    assert_eq!(decoded.pixel(2, 1), Some(BLUE));

    let svg = pipeline
        .decode(RED_SVG.as_bytes(), "shape.svg")
        .expect("svg decodes");
    assert_eq!((svg.width(), svg.height()), (4, 2));
    assert_eq!(svg.pixel(0, 0), Some(RED));
}

#[test]
fn test_pipeline_rejects_garbage() {
    let err = ImageLoaderPipeline::new()
        .decode(b"definitely not pixels", "broken.png")
        .expect_err("garbage does not decode");
    assert!(matches!(err, ResourceError::Decode { path, .. } if path == "broken.png"));
}

#[test]
fn test_file_loader_reads_data_urls_and_relative_files() {
    let dir = std::env::temp_dir().join(format!("wren-loader-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    std::fs::write(dir.join("bytes.bin"), b"abc").expect("write fixture");

    let loader = FileResourceLoader::new(&dir);
    assert_eq!(loader.load("bytes.bin?v=1").expect("file loads"), b"abc");
    assert_eq!(
        loader.load("data:,a%20b").expect("data URL loads"),
        b"a b"
    );
    assert!(matches!(
        loader.load("missing.png"),
        Err(ResourceError::Load { .. })
    ));
    assert!(matches!(
        loader.load("https://example.com/a.png"),
        Err(ResourceError::Load { .. })
    ));

    std::fs::remove_dir_all(&dir).expect("remove temp dir");
}

#[test]
fn test_style_elements_are_collected_in_order() {
    let dom = wren_html::parse_document(
        "<html><head><style>p { color: red }</style></head>\
         <body><style>div { color: blue }</style></body></html>",
    );
    let css = extract_style_content(&dom);
    assert_eq!(css, "p { color: red }\ndiv { color: blue }\n");
}

#[test]
fn test_default_options() {
    let options = RenderOptions::default();
    assert!((options.viewport_width - 1024.0).abs() < f64::EPSILON);
    assert!((options.viewport_height - 576.0).abs() < f64::EPSILON);
    assert!(!options.user_agent_stylesheet);
}
