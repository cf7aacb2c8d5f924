//! Wren CLI
//!
//! Renders an HTML document styled by a CSS stylesheet to a PNG, and
//! optionally dumps the intermediate trees.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use wren_browser::{
    FileResourceLoader, FontBook, FontdueFontMetrics, RenderOptions, Session,
    extract_style_content, paint_onto,
};
use wren_css::{LayoutTree, parse_stylesheet};
use wren_dom::NodeId;
use wren_html::{parse_document, print_tree};

/// Family a `--font` file is registered under. The book falls back to its
/// first font, so every family renders with it.
const FONT_FAMILY: &str = "Monospace";

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "wren")]
#[command(author, version, about = "Render HTML and CSS to a PNG", long_about = None)]
#[command(after_help = r#"EXAMPLES:
    wren page.html --css style.css
    wren page.html --css style.css -o page.png --width 800 --height 600
    wren page.html --ua --dump-boxes
    wren page.html --json > boxes.json
"#)]
struct Cli {
    /// HTML document to render
    #[arg(value_name = "HTML")]
    html: PathBuf,

    /// Stylesheet to apply (defaults to the document's <style> elements)
    #[arg(long, value_name = "CSS")]
    css: Option<PathBuf>,

    /// Where to write the PNG
    #[arg(short, long, value_name = "FILE", default_value = "out.png")]
    output: PathBuf,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 576)]
    height: u32,

    /// Cascade the built-in user-agent stylesheet under the author's
    #[arg(long)]
    ua: bool,

    /// Font file to draw all text with instead of the system fonts
    #[arg(long, value_name = "TTF")]
    font: Option<PathBuf>,

    /// Print the DOM tree
    #[arg(long)]
    dump_dom: bool,

    /// Print the laid-out box tree
    #[arg(long)]
    dump_boxes: bool,

    /// Print the laid-out box tree as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let markup = read(&cli.html)?;
    let dom = parse_document(&markup);
    if cli.dump_dom {
        println!("{}", "=== DOM Tree ===".bold());
        print_tree(&dom, NodeId::ROOT);
    }

    let css = match &cli.css {
        Some(path) => read(path)?,
        None => extract_style_content(&dom),
    };
    let stylesheet = parse_stylesheet(&css);

    let fonts = load_fonts(cli.font.as_deref())?;
    let metrics = FontdueFontMetrics::new(&fonts);
    let loader = FileResourceLoader::for_document(&cli.html);
    let mut session = Session::new(RenderOptions {
        viewport_width: f64::from(cli.width),
        viewport_height: f64::from(cli.height),
        user_agent_stylesheet: cli.ua,
    });

    let tree = session.layout_document(&dom, &stylesheet, &loader, &metrics)?;
    if cli.dump_boxes {
        println!("{}", "=== Layout Tree ===".bold());
        print!("{}", tree.dump());
    }
    if cli.json {
        let json = serde_json::to_string_pretty(&tree.snapshot(LayoutTree::ROOT))
            .context("failed to serialize the box tree")?;
        println!("{json}");
    }

    let mut surface = session.raster_surface(&fonts);
    paint_onto(&tree, &metrics, &mut surface)?;
    surface.save(&cli.output)?;
    eprintln!("{} {}", "Saved".green(), cli.output.display());
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

fn load_fonts(font: Option<&Path>) -> Result<FontBook> {
    let Some(path) = font else {
        return Ok(FontBook::system());
    };
    let mut fonts = FontBook::new();
    fonts.load_file(FONT_FAMILY, &path.to_string_lossy())?;
    Ok(fonts)
}
