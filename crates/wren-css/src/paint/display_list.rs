//! Display List - a sequence of drawing commands
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! The display list is the output of the painting phase. It contains all the
//! drawing commands needed to render a page, back to front.

use std::sync::Arc;

use wren_common::image::LoadedImage;

use crate::values::ColorValue;

use super::surface::DrawingSurface;

/// A single drawing command.
///
/// [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
///
/// Commands are added to the display list in painting order (back to front).
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    /// [§ 2.11.2 The Canvas Background](https://www.w3.org/TR/css-backgrounds-3/#special-backgrounds)
    ///
    /// "The background of the root element becomes the canvas background and
    /// its background painting area extends to cover the entire canvas."
    FillCanvas {
        /// Fill color.
        color: ColorValue,
    },

    /// Fill a rectangle with a solid color.
    ///
    /// Used for backgrounds and borders.
    FillRect {
        /// X coordinate of the rectangle's top-left corner.
        x: f64,
        /// Y coordinate of the rectangle's top-left corner.
        y: f64,
        /// Width of the rectangle.
        width: f64,
        /// Height of the rectangle.
        height: f64,
        /// Fill color.
        color: ColorValue,
    },

    /// Draw text at a position.
    ///
    /// [CSS 2.1 Appendix E.2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
    /// Step 7: "the element's text"
    DrawText {
        /// X coordinate of the text baseline origin.
        x: f64,
        /// Y coordinate of the text baseline origin.
        y: f64,
        /// The text content to draw.
        text: String,
        /// Font family name.
        font_family: String,
        /// Font size in layout units.
        font_size: f64,
        /// Text color.
        color: ColorValue,
    },

    /// Draw an image at its intrinsic size.
    ///
    /// [CSS 2.1 Appendix E.2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
    /// Step 5: "the replaced content of replaced inline-level elements"
    DrawImage {
        /// X coordinate of the image's top-left corner.
        x: f64,
        /// Y coordinate of the image's top-left corner.
        y: f64,
        /// The decoded image.
        image: Arc<LoadedImage>,
    },
}

/// A list of drawing commands in painting order.
///
/// [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
///
/// Commands are stored in back-to-front order, so a surface can simply
/// iterate and execute each command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay every command against `surface`, in order.
    pub fn execute(&self, surface: &mut dyn DrawingSurface) {
        for command in &self.commands {
            match command {
                DisplayCommand::FillCanvas { color } => {
                    let (width, height) = surface.size();
                    surface.set_color(*color);
                    surface.fill_rect(0.0, 0.0, width, height);
                }
                DisplayCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => {
                    surface.set_color(*color);
                    surface.fill_rect(*x, *y, *width, *height);
                }
                DisplayCommand::DrawText {
                    x,
                    y,
                    text,
                    font_family,
                    font_size,
                    color,
                } => surface.draw_text(*x, *y, font_family, *font_size, text, *color),
                DisplayCommand::DrawImage { x, y, image } => surface.blit_image(image, *x, *y),
            }
        }
    }
}
