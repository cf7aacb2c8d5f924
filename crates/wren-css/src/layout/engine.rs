//! Layout dispatch and block layout.
//!
//! [§ 10 Visual formatting model details](https://www.w3.org/TR/CSS2/visudet.html)
//!
//! [`LayoutEngine`] walks the box tree once, depth first, dispatching on
//! [`BoxType`]. Inline, image and table layout live in the sibling
//! `inline` and `table` modules as further `impl` blocks on the engine.

use std::str::FromStr;

use wren_common::warning::warn_once;

use crate::error::{LayoutError, StyleError};
use crate::resource::{ImageCache, ResourceLoader};
use crate::values::Value;

use super::box_model::{Dimensions, EdgeSizes, Rect};
use super::context::{ContextId, ContextStack, LayoutContext, TableState, TextAlign};
use super::layout_box::{BoxId, BoxType, LayoutTree};
use super::text::FontMetrics;

/// Lay out every box of `tree` inside a viewport `viewport_width` units wide.
///
/// Images are fetched through `images`, which falls back to placeholders, so
/// `loader` failures never abort layout.
///
/// # Errors
///
/// [`LayoutError::Style`] when a property holds a value of the wrong kind
/// for how it is used, e.g. `width: bold`.
pub fn layout_tree(
    tree: &mut LayoutTree,
    viewport_width: f64,
    metrics: &dyn FontMetrics,
    images: &mut ImageCache,
    loader: &dyn ResourceLoader,
) -> Result<(), LayoutError> {
    if tree.is_empty() {
        return Ok(());
    }
    let viewport = Dimensions {
        content: Rect {
            width: viewport_width,
            ..Rect::default()
        },
        ..Dimensions::default()
    };

    let mut engine = LayoutEngine {
        tree,
        contexts: ContextStack::new(),
        metrics,
        images,
        loader,
    };
    let root_ctx = engine
        .contexts
        .push(LayoutContext::new(None, viewport, TextAlign::Left));
    engine.layout(LayoutTree::ROOT, root_ctx)
}

/// Per-call layout state: the tree being laid out, the live contexts and
/// the collaborators used for measuring.
pub(super) struct LayoutEngine<'a> {
    pub(super) tree: &'a mut LayoutTree,
    pub(super) contexts: ContextStack,
    pub(super) metrics: &'a dyn FontMetrics,
    pub(super) images: &'a mut ImageCache,
    pub(super) loader: &'a dyn ResourceLoader,
}

impl LayoutEngine<'_> {
    /// Lay out box `id` and its descendants in context `ctx`.
    pub(super) fn layout(&mut self, id: BoxId, ctx: ContextId) -> Result<(), LayoutError> {
        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[LAYOUT] {} ctx={} height={:.1} line_width={:.1}",
            self.tree.describe(id),
            ctx.0,
            self.contexts[ctx].height,
            self.contexts[ctx].line_width
        );

        match self.tree[id].box_type {
            BoxType::Block | BoxType::Anonymous => self.layout_block(id, ctx),
            BoxType::Inline => self.layout_inline(id, ctx),
            BoxType::Image => self.layout_image(id, ctx),
            BoxType::Table => self.layout_table(id, ctx),
            BoxType::TableRow => self.layout_table_row(id, ctx),
            BoxType::TableCell => self.layout_table_cell(id, ctx),
        }
    }

    /// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    ///
    /// Layout algorithm for block-level boxes in normal flow.
    pub(super) fn layout_block(&mut self, id: BoxId, ctx: ContextId) -> Result<(), LayoutError> {
        self.layout_block_with(id, ctx, None)
    }

    /// Block layout whose child context carries `table` state.
    pub(super) fn layout_block_with(
        &mut self,
        id: BoxId,
        ctx: ContextId,
        table: Option<TableState>,
    ) -> Result<(), LayoutError> {
        // Child width can depend on parent width, so this box's width is
        // calculated before its children are laid out.
        self.calculate_block_width(id, ctx)?;
        self.calculate_block_position(id, ctx)?;
        let children_height = self.layout_block_children(id, ctx, table)?;

        // Parent height can depend on child height, so the height is
        // calculated after the children are laid out.
        self.calculate_block_height(id, children_height)?;

        self.contexts[ctx].height += self.tree[id].dimensions.margin_box().height;
        Ok(())
    }

    /// [§ 10.3.3](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    ///
    /// "The following constraints must hold among the used values of the
    /// other properties:
    ///
    ///   'margin-left' + 'border-left-width' + 'padding-left' + 'width' +
    ///   'padding-right' + 'border-right-width' + 'margin-right'
    ///   = width of containing block"
    pub(super) fn calculate_block_width(
        &mut self,
        id: BoxId,
        ctx: ContextId,
    ) -> Result<(), LayoutError> {
        let container_width = self.contexts[ctx].containing_block.content.width;

        // STEP 1: Read the computed values. `None` means 'auto'.
        //
        // `width` has initial value `auto`; margins, borders and padding
        // have initial value 0.
        let auto = Value::keyword("auto");
        let zero = Value::px(0.0);
        let width = self.auto_or_px(id, "width", None, &auto)?;
        let mut margin_left = self.auto_or_px(id, "margin-left", Some("margin"), &zero)?;
        let mut margin_right = self.auto_or_px(id, "margin-right", Some("margin"), &zero)?;
        let border_left = self.px(id, "border-left-width", Some("border-width"))?;
        let border_right = self.px(id, "border-right-width", Some("border-width"))?;
        let padding_left = self.px(id, "padding-left", Some("padding"))?;
        let padding_right = self.px(id, "padding-right", Some("padding"))?;

        let total = margin_left.unwrap_or(0.0)
            + margin_right.unwrap_or(0.0)
            + border_left
            + border_right
            + padding_left
            + padding_right
            + width.unwrap_or(0.0);

        // STEP 2: Handle the over-constrained case.
        //
        // "If 'width' is not 'auto' and 'border-left-width' + 'padding-left' +
        // 'width' + 'padding-right' + 'border-right-width' (plus any of
        // 'margin-left' or 'margin-right' that are not 'auto') is larger than
        // the width of the containing block, then any 'auto' values for
        // 'margin-left' or 'margin-right' are, for the following rules,
        // treated as zero."
        if width.is_some() && total > container_width {
            margin_left = margin_left.or(Some(0.0));
            margin_right = margin_right.or(Some(0.0));
        }

        // STEP 3: Each rule grows the total by exactly `underflow`.
        let underflow = container_width - total;
        let (used_width, used_margin_left, used_margin_right) =
            match (width, margin_left, margin_right) {
                // RULE A: "If all of the above have a computed value other than
                // 'auto', the values are said to be 'over-constrained' [...]
                // the specified value of 'margin-right' is ignored and the
                // value is calculated so as to make the equality true."
                (Some(w), Some(left), Some(right)) => (w, left, right + underflow),

                // RULE B: "If there is exactly one value specified as 'auto',
                // its used value follows from the equality."
                (Some(w), Some(left), None) => (w, left, underflow),
                (Some(w), None, Some(right)) => (w, underflow, right),

                // RULE C: "If 'width' is set to 'auto', any other 'auto' values
                // become '0' and 'width' follows from the resulting equality."
                //
                // Width cannot be negative; the right margin takes the rest.
                (None, left, right) => {
                    let left = left.unwrap_or(0.0);
                    let right = right.unwrap_or(0.0);
                    if underflow >= 0.0 {
                        (underflow, left, right)
                    } else {
                        (0.0, left, right + underflow)
                    }
                }

                // RULE D: "If both 'margin-left' and 'margin-right' are 'auto',
                // their used values are equal."
                (Some(w), None, None) => (w, underflow / 2.0, underflow / 2.0),
            };

        let d = &mut self.tree[id].dimensions;
        d.content.width = used_width;
        d.margin.left = used_margin_left;
        d.margin.right = used_margin_right;
        d.border.left = border_left;
        d.border.right = border_right;
        d.padding.left = padding_left;
        d.padding.right = padding_right;
        Ok(())
    }

    /// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
    ///
    /// "In a block formatting context, boxes are laid out one after the
    /// other, vertically, beginning at the top of a containing block."
    ///
    /// Resolves the vertical edges and places the content box below
    /// everything the context already holds.
    pub(super) fn calculate_block_position(
        &mut self,
        id: BoxId,
        ctx: ContextId,
    ) -> Result<(), LayoutError> {
        // "If 'margin-top', or 'margin-bottom' are 'auto', their used value
        // is 0."
        let margin_top = self.px(id, "margin-top", Some("margin"))?;
        let margin_bottom = self.px(id, "margin-bottom", Some("margin"))?;
        let border_top = self.px(id, "border-top-width", Some("border-width"))?;
        let border_bottom = self.px(id, "border-bottom-width", Some("border-width"))?;
        let padding_top = self.px(id, "padding-top", Some("padding"))?;
        let padding_bottom = self.px(id, "padding-bottom", Some("padding"))?;

        let context = &self.contexts[ctx];
        let container = context.containing_block.content;
        let d = &mut self.tree[id].dimensions;
        d.margin.top = margin_top;
        d.margin.bottom = margin_bottom;
        d.border.top = border_top;
        d.border.bottom = border_bottom;
        d.padding.top = padding_top;
        d.padding.bottom = padding_bottom;

        d.content.x = container.x + d.left_edges();
        d.content.y = context.height + container.y + d.top_edges();
        Ok(())
    }

    /// Lay out the children of `id` in a fresh context whose containing
    /// block is `id` itself, then close the open line. Returns the height
    /// the children use.
    pub(super) fn layout_block_children(
        &mut self,
        id: BoxId,
        ctx: ContextId,
        table: Option<TableState>,
    ) -> Result<f64, LayoutError> {
        let align = self.text_align(id)?;
        let mut context = LayoutContext::new(Some(ctx), self.tree[id].dimensions, align);
        context.table = table;
        let child_ctx = self.contexts.push(context);

        let children = self.tree[id].children.clone();
        for child in children {
            self.layout(child, child_ctx)?;
        }

        // finish and align the last line
        self.line_wrap(child_ctx);
        let finished = &self.contexts[child_ctx];
        let height = finished.height + finished.line_height;
        let _ = self.contexts.pop();
        Ok(height)
    }

    /// [§ 10.6.3 Block-level non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#normal-block)
    ///
    /// An explicit `height` wins; otherwise the box is as tall as its
    /// children.
    fn calculate_block_height(
        &mut self,
        id: BoxId,
        children_height: f64,
    ) -> Result<(), LayoutError> {
        let explicit = self
            .tree
            .own_style(id, "height")
            .filter(|value| !value.is_auto())
            .map(Value::to_px)
            .transpose()?;
        self.tree[id].dimensions.content.height =
            explicit.unwrap_or(children_height);
        Ok(())
    }

    /// Resolve a length property that defaults to zero.
    pub(super) fn px(
        &self,
        id: BoxId,
        key: &str,
        fallback: Option<&str>,
    ) -> Result<f64, StyleError> {
        self.tree
            .lookup(id, key, fallback, false)
            .map_or(Ok(0.0), Value::to_px)
    }

    /// Resolve a length property that may be `auto`; `None` for `auto`.
    fn auto_or_px(
        &self,
        id: BoxId,
        key: &str,
        fallback: Option<&str>,
        default: &Value,
    ) -> Result<Option<f64>, StyleError> {
        let value = self.tree.get_style(id, key, fallback, default, false);
        if value.is_auto() {
            Ok(None)
        } else {
            value.to_px().map(Some)
        }
    }

    /// Margin, border and padding of `id` on all four sides, as used by
    /// inline and replaced boxes.
    pub(super) fn edges(&self, id: BoxId) -> Result<Dimensions, StyleError> {
        let sides = |prefix: &str, suffix: &str, shorthand: &str| -> Result<EdgeSizes, StyleError> {
            let side = |name: &str| {
                self.px(id, &format!("{prefix}-{name}{suffix}"), Some(shorthand))
            };
            Ok(EdgeSizes {
                left: side("left")?,
                right: side("right")?,
                top: side("top")?,
                bottom: side("bottom")?,
            })
        };
        Ok(Dimensions {
            content: Rect::default(),
            padding: sides("padding", "", "padding")?,
            border: sides("border", "-width", "border-width")?,
            margin: sides("margin", "", "margin")?,
        })
    }

    /// [§ 16.2 Alignment](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
    ///
    /// The inherited `text-align` of `id`; `left` when unset or unsupported.
    pub(super) fn text_align(&self, id: BoxId) -> Result<TextAlign, StyleError> {
        let Some(value) = self.tree.lookup(id, "text-align", None, true) else {
            return Ok(TextAlign::Left);
        };
        let keyword = value.to_str()?;
        Ok(TextAlign::from_str(keyword).unwrap_or_else(|_| {
            warn_once(
                "Layout",
                &format!("unsupported text-align '{keyword}', using left"),
            );
            TextAlign::Left
        }))
    }
}
