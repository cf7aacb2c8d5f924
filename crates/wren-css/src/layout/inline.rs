//! Inline and replaced-element layout, and line wrapping.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block. Horizontal
//! margins, borders, and padding are respected between these boxes."
//!
//! Every inline box, text word or image is placed at the cursor of the open
//! line of its context. When the next box would overflow the containing
//! block, the line is closed: its boxes are shifted for `text-align` and the
//! cursor moves down by the tallest box on the line.

use std::sync::Arc;

use wren_common::image::LoadedImage;
use wren_common::warning::warn_once;

use crate::error::LayoutError;

use super::context::ContextId;
use super::engine::LayoutEngine;
use super::layout_box::{BoxId, BoxType};

impl LayoutEngine<'_> {
    /// Lay out an inline box: size it, place it on the open line, then
    /// place its children on the same line.
    pub(super) fn layout_inline(&mut self, id: BoxId, ctx: ContextId) -> Result<(), LayoutError> {
        self.calculate_inline_size(id)?;
        self.calculate_inline_position(id, ctx);

        // Inline children share the parent's line.
        let children = self.tree[id].children.clone();
        for child in children {
            self.layout(child, ctx)?;
        }

        self.grow_line_height(id, ctx);
        Ok(())
    }

    /// [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
    ///
    /// Like an inline box with no children, sized by its image.
    pub(super) fn layout_image(&mut self, id: BoxId, ctx: ContextId) -> Result<(), LayoutError> {
        self.calculate_image_size(id)?;
        self.calculate_inline_position(id, ctx);
        self.grow_line_height(id, ctx);
        Ok(())
    }

    /// [§ 10.3.1 Inline, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-width)
    ///
    /// Shrink-to-fit size of `id`: its own text, or the largest margin box
    /// among its children, whichever is bigger in each axis. Edges never
    /// take part in the auto-margin algorithm; `auto` resolves to 0.
    pub(super) fn calculate_inline_size(&mut self, id: BoxId) -> Result<(), LayoutError> {
        let edges = self.edges(id)?;

        let (mut width, mut height) = (0.0_f64, 0.0_f64);
        if let Some(text) = self.tree[id].text.as_deref() {
            let (family, size) = self.tree.font(id)?;
            width = self.metrics.text_extents(family, size, text).x_advance;
            height = self.metrics.font_extents(family, size).height;
        }

        let children = self.tree[id].children.clone();
        for child in children {
            if self.tree[child].box_type == BoxType::Image {
                self.calculate_image_size(child)?;
            } else {
                self.calculate_inline_size(child)?;
            }
            let child_box = self.tree[child].dimensions.margin_box();
            width = width.max(child_box.width);
            height = height.max(child_box.height);
        }

        let d = &mut self.tree[id].dimensions;
        *d = edges;
        d.content.width = width;
        d.content.height = height;
        Ok(())
    }

    /// [§ 10.3.2](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
    ///
    /// "If 'height' and 'width' both have computed values of 'auto' and the
    /// element also has an intrinsic width, then that intrinsic width is the
    /// used value of 'width'."
    pub(super) fn calculate_image_size(&mut self, id: BoxId) -> Result<(), LayoutError> {
        let edges = self.edges(id)?;

        let image = match self.tree[id].image_source.as_deref() {
            Some(source) => self.images.get_or_load(source, self.loader),
            None => {
                warn_once("Image", "<img> without src; using a placeholder");
                Arc::new(LoadedImage::placeholder())
            }
        };
        let (width, height) = image.dimensions_f64();

        let layout_box = &mut self.tree[id];
        layout_box.dimensions = edges;
        layout_box.dimensions.content.width = width;
        layout_box.dimensions.content.height = height;
        layout_box.image = Some(image);
        Ok(())
    }

    /// Place `id` at the cursor of the open line, wrapping first if it
    /// would not fit.
    pub(super) fn calculate_inline_position(&mut self, id: BoxId, ctx: ContextId) {
        let advance = self.tree[id].dimensions.margin_box().width;
        let context = &self.contexts[ctx];
        if context.line_width + advance > context.containing_block.content.width {
            self.line_wrap(ctx);
        }

        let context = &mut self.contexts[ctx];
        let container = context.containing_block.content;
        let d = &mut self.tree[id].dimensions;
        d.content.x = container.x + context.line_width + d.left_edges();
        d.content.y = container.y + context.height + d.top_edges();

        context.line_width += advance;
        context.line.push(id);
    }

    /// Close the open line of `ctx`: align its boxes, move the cursor below
    /// it and start an empty line.
    pub(super) fn line_wrap(&mut self, ctx: ContextId) {
        let offset = self.contexts[ctx].line_offset();
        let context = &mut self.contexts[ctx];
        let line = std::mem::take(&mut context.line);
        context.height += context.line_height;
        context.line_width = 0.0;
        context.line_height = 0.0;

        if offset > 0.0 {
            // Inline children sit on the same line as their parent and are
            // moved along with it.
            for &id in &line {
                if !line.iter().any(|&other| self.tree.is_ancestor(other, id)) {
                    self.tree.move_box(id, offset, 0.0);
                }
            }
        }
    }

    fn grow_line_height(&mut self, id: BoxId, ctx: ContextId) {
        let height = self.tree[id].dimensions.margin_box().height;
        let context = &mut self.contexts[ctx];
        context.line_height = context.line_height.max(height);
    }
}
