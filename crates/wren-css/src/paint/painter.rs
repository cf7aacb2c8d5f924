//! Painter - generates a display list from a laid-out box tree
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! The painter walks the box tree depth first and emits drawing commands
//! back to front. It reads colors and fonts from the cascaded styles but
//! never touches pixels.

use crate::error::StyleError;
use crate::layout::{BoxId, FontMetrics, LayoutTree, Rect};
use crate::values::ColorValue;

use super::{DisplayCommand, DisplayList};

/// Painter that generates a display list from a layout tree.
pub struct Painter<'a> {
    tree: &'a LayoutTree,
    metrics: &'a dyn FontMetrics,
}

impl<'a> Painter<'a> {
    /// Create a painter over a laid-out tree. `metrics` supplies the font
    /// ascent used to find each text baseline.
    #[must_use]
    pub fn new(tree: &'a LayoutTree, metrics: &'a dyn FontMetrics) -> Self {
        Self { tree, metrics }
    }

    /// Paint the whole tree and return the display list.
    ///
    /// # Errors
    ///
    /// [`StyleError::Conversion`] when a color or font property holds a
    /// value of the wrong kind. Nothing is drawn in that case, since the
    /// list is only executed once complete.
    pub fn paint(&self) -> Result<DisplayList, StyleError> {
        let mut display_list = DisplayList::new();
        if self.tree.is_empty() {
            return Ok(display_list);
        }

        // [§ 2.11.2 The Canvas Background](https://www.w3.org/TR/css-backgrounds-3/#special-backgrounds)
        //
        // "The background of the root element becomes the canvas background
        // and its background painting area extends to cover the entire
        // canvas."
        if let Some(color) = self.background(LayoutTree::ROOT)? {
            display_list.push(DisplayCommand::FillCanvas { color });
        }

        self.paint_box(LayoutTree::ROOT, &mut display_list)?;
        Ok(display_list)
    }

    /// Paint a single box, then its descendants in tree order:
    /// 1. Background color
    /// 2. Border
    /// 3. Text
    /// 4. Replaced content
    fn paint_box(&self, id: BoxId, display_list: &mut DisplayList) -> Result<(), StyleError> {
        let layout_box = &self.tree[id];
        let dims = &layout_box.dimensions;
        let border_box = dims.border_box();

        // [CSS Backgrounds § 3.7](https://www.w3.org/TR/css-backgrounds-3/#background-painting-area)
        //
        // "The initial value of 'background-clip' is 'border-box', meaning
        // the background is painted within the border box."
        if let Some(color) = self.background(id)? {
            push_rect(display_list, border_box, color);
        }

        if let Some(color) = self.tree.color(id, "border-color", None, false)? {
            self.paint_borders(id, border_box, color, display_list);
        }

        // [CSS 2.1 Appendix E.2 Step 7](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
        // "the element's text"
        //
        // Text without a color anywhere up the tree is not painted.
        if let Some(text) = &layout_box.text
            && let Some(color) = self.tree.color(id, "color", None, true)?
        {
            let (family, size) = self.tree.font(id)?;
            let ascent = self.metrics.font_extents(family, size).ascent;
            display_list.push(DisplayCommand::DrawText {
                x: dims.content.x,
                y: dims.content.y + ascent,
                text: text.clone(),
                font_family: family.to_string(),
                font_size: size,
                color,
            });
        }

        // [CSS 2.1 Appendix E.2 Step 5](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
        // "the replaced content of replaced inline-level elements"
        if let Some(image) = &layout_box.image {
            display_list.push(DisplayCommand::DrawImage {
                x: dims.content.x,
                y: dims.content.y,
                image: image.clone(),
            });
        }

        for &child in &layout_box.children {
            self.paint_box(child, display_list)?;
        }
        Ok(())
    }

    /// [CSS Backgrounds and Borders § 4](https://www.w3.org/TR/css-backgrounds-3/#borders)
    ///
    /// Each side is a solid rectangle inside the border box; `border-style`
    /// is ignored. The top and bottom sides span the corners.
    fn paint_borders(
        &self,
        id: BoxId,
        border_box: Rect,
        color: ColorValue,
        display_list: &mut DisplayList,
    ) {
        let border = self.tree[id].dimensions.border;
        let sides = [
            Rect {
                width: border.left,
                ..border_box
            },
            Rect {
                x: border_box.x + border_box.width - border.right,
                width: border.right,
                ..border_box
            },
            Rect {
                height: border.top,
                ..border_box
            },
            Rect {
                y: border_box.y + border_box.height - border.bottom,
                height: border.bottom,
                ..border_box
            },
        ];
        for side in sides {
            if side.width > 0.0 && side.height > 0.0 {
                push_rect(display_list, side, color);
            }
        }
    }

    fn background(&self, id: BoxId) -> Result<Option<ColorValue>, StyleError> {
        self.tree
            .color(id, "background-color", Some("background"), false)
    }
}

fn push_rect(display_list: &mut DisplayList, rect: Rect, color: ColorValue) {
    display_list.push(DisplayCommand::FillRect {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        color,
    });
}
