//! Layout contexts: scratch state shared by one set of sibling boxes.
//!
//! A context records the containing block its boxes are placed in, how much
//! vertical space the finished lines and blocks already use, the line
//! currently being filled, and (for tables) the discovered column widths.
//! Contexts are stacked per layout call and discarded when the call returns;
//! the box tree keeps the lasting results.

use serde::Serialize;
use strum_macros::{Display, EnumString};

use super::box_model::Dimensions;
use super::layout_box::BoxId;

/// Index of a context on the [`ContextStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextId(pub usize);

/// [§ 16.2 Alignment: the 'text-align' property](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
///
/// "This property describes how inline-level content of a block container
/// is aligned."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TextAlign {
    /// Lines start at the left content edge.
    #[default]
    Left,
    /// Leftover space is split evenly on both sides of each line.
    Center,
    /// Lines end at the right content edge.
    Right,
}

/// Column bookkeeping for the nearest enclosing table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableState {
    /// Natural (widest cell margin-box) width of each column.
    pub column_widths: Vec<f64>,
    /// Sum of `column_widths`.
    pub column_sum: f64,
    /// Column the next cell of the current row goes into.
    pub column_index: usize,
    /// Current row width divided by `column_sum`.
    pub column_scale_factor: f64,
}

impl TableState {
    /// State for a table whose columns measured `column_widths`.
    #[must_use]
    pub fn new(column_widths: Vec<f64>) -> Self {
        let column_sum = column_widths.iter().sum();
        Self {
            column_widths,
            column_sum,
            column_index: 0,
            column_scale_factor: 1.0,
        }
    }

    /// Scale factor mapping natural column widths onto a row of
    /// `row_width`. An empty table keeps a factor of 1.
    #[must_use]
    pub fn scale_for(&self, row_width: f64) -> f64 {
        if self.column_sum > 0.0 {
            row_width / self.column_sum
        } else {
            1.0
        }
    }
}

/// Layout state for one set of siblings.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    /// The context of the enclosing set of siblings.
    pub parent: Option<ContextId>,
    /// Dimensions of the box the siblings are placed in.
    pub containing_block: Dimensions,
    /// Height used by completed lines and blocks so far.
    pub height: f64,
    /// Boxes placed on the open line.
    pub line: Vec<BoxId>,
    /// Width used on the open line (also the column offset inside a table
    /// row).
    pub line_width: f64,
    /// Tallest margin box on the open line.
    pub line_height: f64,
    /// How completed lines are aligned.
    pub text_align: TextAlign,
    /// Set on the context a table lays its rows out in.
    pub table: Option<TableState>,
}

impl LayoutContext {
    /// A fresh context with an empty line.
    #[must_use]
    pub const fn new(
        parent: Option<ContextId>,
        containing_block: Dimensions,
        text_align: TextAlign,
    ) -> Self {
        Self {
            parent,
            containing_block,
            height: 0.0,
            line: Vec::new(),
            line_width: 0.0,
            line_height: 0.0,
            text_align,
            table: None,
        }
    }

    /// Horizontal shift for the open line under this context's alignment.
    #[must_use]
    pub fn line_offset(&self) -> f64 {
        let leftover = self.containing_block.content.width - self.line_width;
        match self.text_align {
            TextAlign::Left => 0.0,
            TextAlign::Center => leftover / 2.0,
            TextAlign::Right => leftover,
        }
    }
}

/// The chain of live contexts of one layout pass.
///
/// Contexts are pushed when a box starts laying out its children and popped
/// when it is done, so parents always outlive their children.
#[derive(Debug, Clone, Default)]
pub struct ContextStack {
    contexts: Vec<LayoutContext>,
}

impl ContextStack {
    /// Create an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            contexts: Vec::new(),
        }
    }

    /// Push a context and return its id.
    pub fn push(&mut self, context: LayoutContext) -> ContextId {
        self.contexts.push(context);
        ContextId(self.contexts.len() - 1)
    }

    /// Pop the innermost context.
    pub fn pop(&mut self) -> Option<LayoutContext> {
        self.contexts.pop()
    }

    /// The nearest context, starting at `id` and walking parent links, that
    /// carries table state.
    #[must_use]
    pub fn table_context(&self, id: ContextId) -> Option<ContextId> {
        let mut current = Some(id);
        while let Some(ctx) = current {
            if self[ctx].table.is_some() {
                return Some(ctx);
            }
            current = self[ctx].parent;
        }
        None
    }
}

impl std::ops::Index<ContextId> for ContextStack {
    type Output = LayoutContext;

    fn index(&self, id: ContextId) -> &LayoutContext {
        &self.contexts[id.0]
    }
}

impl std::ops::IndexMut<ContextId> for ContextStack {
    fn index_mut(&mut self, id: ContextId) -> &mut LayoutContext {
        &mut self.contexts[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_text_align_parses_case_insensitively() {
        assert_eq!(TextAlign::from_str("CENTER"), Ok(TextAlign::Center));
        assert_eq!(TextAlign::from_str("right"), Ok(TextAlign::Right));
        assert!(TextAlign::from_str("justify").is_err());
        assert_eq!(TextAlign::Left.to_string(), "left");
    }

    #[test]
    fn test_table_context_walks_parents() {
        let mut stack = ContextStack::new();
        let outer = stack.push(LayoutContext::new(None, Dimensions::default(), TextAlign::Left));
        stack[outer].table = Some(TableState::new(vec![30.0, 50.0]));
        let middle = stack.push(LayoutContext::new(
            Some(outer),
            Dimensions::default(),
            TextAlign::Left,
        ));
        let inner = stack.push(LayoutContext::new(
            Some(middle),
            Dimensions::default(),
            TextAlign::Left,
        ));
        assert_eq!(stack.table_context(inner), Some(outer));
        assert_eq!(stack.table_context(outer), Some(outer));

        let state = stack[outer].table.as_ref().unwrap();
        assert!((state.column_sum - 80.0).abs() < f64::EPSILON);
        assert!((state.scale_for(160.0) - 2.0).abs() < f64::EPSILON);
        assert!((TableState::new(Vec::new()).scale_for(100.0) - 1.0).abs() < f64::EPSILON);
    }
}
