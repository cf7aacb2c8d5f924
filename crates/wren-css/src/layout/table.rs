//! Table layout.
//!
//! [§ 17 Tables](https://www.w3.org/TR/CSS2/tables.html)
//!
//! A simple automatic layout over a fixed table, row group, row, cell
//! nesting:
//! - column widths are the widest natural cell width seen in each column
//! - every row scales those widths to its own content width
//! - cells of a row are stretched to the tallest cell
//!
//! Not implemented: `colspan`, `rowspan`, `border-spacing`, captions.

use wren_common::warning::warn_once;

use crate::error::LayoutError;

use super::box_model::{Dimensions, Rect};
use super::context::{ContextId, LayoutContext, TableState};
use super::engine::LayoutEngine;
use super::layout_box::BoxId;

impl LayoutEngine<'_> {
    /// [§ 17.5.2.2 Automatic table layout](https://www.w3.org/TR/CSS2/tables.html#auto-table-layout)
    ///
    /// "Calculate the minimum content width (MCW) of each cell [...] For each
    /// column, determine a maximum and minimum column width from the cells
    /// that span only that column."
    ///
    /// Pass 1 measures every cell with inline sizing, since the final column
    /// widths are not known yet. Pass 2 is block layout, with the column
    /// widths available to the rows through the table's child context.
    pub(super) fn layout_table(&mut self, id: BoxId, ctx: ContextId) -> Result<(), LayoutError> {
        let mut column_widths: Vec<f64> = Vec::new();
        for part in self.tree[id].children.clone() {
            for row in self.tree[part].children.clone() {
                for (column, cell) in self.tree[row].children.clone().into_iter().enumerate() {
                    self.calculate_inline_size(cell)?;
                    let width = self.tree[cell].dimensions.margin_box().width;
                    if column_widths.len() <= column {
                        column_widths.push(0.0);
                    }
                    column_widths[column] = column_widths[column].max(width);
                }
            }
        }

        #[cfg(feature = "layout-trace")]
        eprintln!("[LAYOUT] table column widths {column_widths:?}");

        self.layout_block_with(id, ctx, Some(TableState::new(column_widths)))
    }

    /// [§ 17.2 The CSS table model](https://www.w3.org/TR/CSS2/tables.html#table-display)
    ///
    /// Block layout, except that the row also sets the column scale factor
    /// for its cells and ends as tall as its tallest cell.
    pub(super) fn layout_table_row(
        &mut self,
        id: BoxId,
        ctx: ContextId,
    ) -> Result<(), LayoutError> {
        let Some(table_ctx) = self.contexts.table_context(ctx) else {
            warn_once("Layout", "table row outside of a table, laid out as a block");
            return self.layout_block(id, ctx);
        };
        let table_context = &mut self.contexts[table_ctx];
        table_context.line_width = 0.0;
        if let Some(state) = table_context.table.as_mut() {
            state.column_index = 0;
        }

        self.calculate_block_width(id, ctx)?;

        let row_width = self.tree[id].dimensions.content.width;
        if let Some(state) = self.contexts[table_ctx].table.as_mut() {
            state.column_scale_factor = state.scale_for(row_width);
        }

        self.calculate_block_position(id, ctx)?;
        let _ = self.layout_block_children(id, ctx, None)?;

        // [§ 17.5.3 Table height algorithms](https://www.w3.org/TR/CSS2/tables.html#height-layout)
        //
        // "The height of a 'table-row' element's box is calculated once the
        // user agent has all the cells in the row available: it is the
        // maximum of the row's computed 'height', the computed 'height' of
        // each cell in the row, and the minimum height (MIN) required by the
        // cells."
        let children = self.tree[id].children.clone();
        let row_height = children
            .iter()
            .map(|&cell| self.tree[cell].dimensions.margin_box().height)
            .fold(0.0_f64, f64::max);
        self.tree[id].dimensions.content.height = row_height;
        for cell in children {
            let padding = row_height - self.tree[cell].dimensions.margin_box().height;
            self.tree[cell].dimensions.content.height += padding;
        }

        self.contexts[ctx].height += self.tree[id].dimensions.margin_box().height;
        Ok(())
    }

    /// Block layout against a synthetic containing block covering the
    /// cell's column: placed at the table's column cursor, as wide as the
    /// scaled column.
    pub(super) fn layout_table_cell(
        &mut self,
        id: BoxId,
        ctx: ContextId,
    ) -> Result<(), LayoutError> {
        let Some(table_ctx) = self.contexts.table_context(ctx) else {
            warn_once("Layout", "table cell outside of a table, laid out as a block");
            return self.layout_block(id, ctx);
        };
        let align = self.text_align(id)?;

        let width = self.contexts[table_ctx]
            .table
            .as_ref()
            .map_or(0.0, |state| {
                state.column_widths.get(state.column_index).map_or_else(
                    || {
                        let column = state.column_index;
                        warn_once(
                            "Layout",
                            &format!("no column {column} in table, cell gets zero width"),
                        );
                        0.0
                    },
                    |natural| natural * state.column_scale_factor,
                )
            });

        let row = &self.contexts[ctx];
        let synthetic = Dimensions {
            content: Rect {
                x: row.containing_block.content.x + self.contexts[table_ctx].line_width,
                y: row.containing_block.content.y + row.height,
                width,
                height: 0.0,
            },
            ..Dimensions::default()
        };

        let cell_ctx = self
            .contexts
            .push(LayoutContext::new(Some(ctx), synthetic, align));
        self.layout_block(id, cell_ctx)?;
        let _ = self.contexts.pop();

        let table_context = &mut self.contexts[table_ctx];
        table_context.line_width += width;
        if let Some(state) = table_context.table.as_mut() {
            state.column_index += 1;
        }
        Ok(())
    }
}
