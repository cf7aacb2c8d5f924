//! Font metrics interface used by inline layout.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

/// Extents of one run of text, in layout units.
///
/// Layout only reads `x_advance`, the distance the pen moves after drawing
/// the run, which already includes the trailing space of a word box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextExtents {
    /// Horizontal offset from the origin to the left edge of the ink.
    pub x_bearing: f64,
    /// Vertical offset from the origin to the top edge of the ink.
    pub y_bearing: f64,
    /// Width of the ink.
    pub width: f64,
    /// Height of the ink.
    pub height: f64,
    /// Horizontal pen advance.
    pub x_advance: f64,
    /// Vertical pen advance.
    pub y_advance: f64,
}

/// Vertical metrics of a font at one size.
///
/// Layout reads `height` as the line height of a text box; paint reads
/// `ascent` to find the baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FontExtents {
    /// Distance from the baseline to the top of the tallest glyph.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the lowest glyph.
    pub descent: f64,
    /// Recommended baseline-to-baseline distance
    /// (ascent + descent + line gap).
    pub height: f64,
    /// Largest horizontal advance of any glyph.
    pub max_x_advance: f64,
    /// Largest vertical advance of any glyph.
    pub max_y_advance: f64,
}

/// Text measurement capability supplied by the embedder.
///
/// Implementors measure with the same font selection the drawing surface
/// uses, so that measured widths match painted text.
pub trait FontMetrics {
    /// Measure `text` set in `family` at `size` layout units.
    fn text_extents(&self, family: &str, size: f64, text: &str) -> TextExtents;

    /// Vertical metrics of `family` at `size` layout units.
    fn font_extents(&self, family: &str, size: f64) -> FontExtents;
}

/// Approximate font metrics using fixed ratios.
///
/// The average advance width of Latin glyphs is approximately 0.6× the font
/// size; line height uses 1.2×, the upper end of the recommended range for
/// `line-height: normal`. Used when no font file is available, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl ApproximateFontMetrics {
    const CHAR_WIDTH_RATIO: f64 = 0.6;
    const ASCENT_RATIO: f64 = 0.8;
    const DESCENT_RATIO: f64 = 0.2;
    const LINE_HEIGHT_RATIO: f64 = 1.2;
}

impl FontMetrics for ApproximateFontMetrics {
    fn text_extents(&self, _family: &str, size: f64, text: &str) -> TextExtents {
        #[allow(clippy::cast_precision_loss)]
        let width = text.chars().count() as f64 * size * Self::CHAR_WIDTH_RATIO;
        TextExtents {
            x_bearing: 0.0,
            y_bearing: -size * Self::ASCENT_RATIO,
            width,
            height: size,
            x_advance: width,
            y_advance: 0.0,
        }
    }

    fn font_extents(&self, _family: &str, size: f64) -> FontExtents {
        FontExtents {
            ascent: size * Self::ASCENT_RATIO,
            descent: size * Self::DESCENT_RATIO,
            height: size * Self::LINE_HEIGHT_RATIO,
            max_x_advance: size * Self::CHAR_WIDTH_RATIO,
            max_y_advance: 0.0,
        }
    }
}
