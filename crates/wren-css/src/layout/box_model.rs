//! CSS Box Model types.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)

use serde::Serialize;

/// A rectangle positioned in 2D space.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f64,
    /// Vertical position of the top-left corner.
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rect {
    /// Grow the rectangle outward by `edge` on every side.
    #[must_use]
    pub fn expanded_by(self, edge: EdgeSizes) -> Self {
        Self {
            x: self.x - edge.left,
            y: self.y - edge.top,
            width: self.width + edge.left + edge.right,
            height: self.height + edge.top + edge.bottom,
        }
    }
}

/// Edge sizes for padding, border, or margin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EdgeSizes {
    /// Left edge size.
    pub left: f64,
    /// Right edge size.
    pub right: f64,
    /// Top edge size.
    pub top: f64,
    /// Bottom edge size.
    pub bottom: f64,
}

/// [§ 3. The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
///
/// "Each box has a content area and optional surrounding padding, border,
/// and margin areas."
///
/// Only the content rectangle and the three edge sets are stored; the
/// padding, border and margin boxes are always derived from them.
///
/// ```text
/// ┌──────────────── margin box ────────────────┐
/// │   ┌──────────── border box ────────────┐   │
/// │   │   ┌──────── padding box ───────┐   │   │
/// │   │   │   ┌──── content ───────┐   │   │   │
/// │   │   │   └────────────────────┘   │   │   │
/// │   │   └────────────────────────────┘   │   │
/// │   └────────────────────────────────────┘   │
/// └────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Dimensions {
    /// Position and size of the content area.
    pub content: Rect,
    /// Padding edges.
    pub padding: EdgeSizes,
    /// Border edges.
    pub border: EdgeSizes,
    /// Margin edges.
    pub margin: EdgeSizes,
}

impl Dimensions {
    /// [§ 3.2 Padding](https://www.w3.org/TR/css-box-3/#paddings)
    ///
    /// "The padding box contains both the content and padding areas."
    #[must_use]
    pub fn padding_box(&self) -> Rect {
        self.content.expanded_by(self.padding)
    }

    /// [§ 3.3 Borders](https://www.w3.org/TR/css-box-3/#borders)
    ///
    /// "The border box contains content, padding, and border areas."
    #[must_use]
    pub fn border_box(&self) -> Rect {
        self.padding_box().expanded_by(self.border)
    }

    /// [§ 3.1 Margins](https://www.w3.org/TR/css-box-3/#margins)
    ///
    /// "The margin box is the outermost box, and contains all four areas."
    #[must_use]
    pub fn margin_box(&self) -> Rect {
        self.border_box().expanded_by(self.margin)
    }

    /// Sum of the left margin, border and padding.
    #[must_use]
    pub fn left_edges(&self) -> f64 {
        self.margin.left + self.border.left + self.padding.left
    }

    /// Sum of the top margin, border and padding.
    #[must_use]
    pub fn top_edges(&self) -> f64 {
        self.margin.top + self.border.top + self.padding.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_boxes() {
        let d = Dimensions {
            content: Rect {
                x: 20.0,
                y: 30.0,
                width: 100.0,
                height: 50.0,
            },
            padding: EdgeSizes {
                left: 1.0,
                right: 2.0,
                top: 3.0,
                bottom: 4.0,
            },
            border: EdgeSizes {
                left: 5.0,
                right: 5.0,
                top: 5.0,
                bottom: 5.0,
            },
            margin: EdgeSizes {
                left: 10.0,
                right: 0.0,
                top: 2.0,
                bottom: 0.0,
            },
        };
        assert_eq!(
            d.border_box(),
            Rect {
                x: 14.0,
                y: 22.0,
                width: 113.0,
                height: 67.0
            }
        );
        let mb = d.margin_box();
        assert_eq!((mb.x, mb.y, mb.width, mb.height), (4.0, 20.0, 123.0, 69.0));
        assert!((d.left_edges() - 16.0).abs() < f64::EPSILON);
    }
}
