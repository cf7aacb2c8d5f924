//! System fonts and fontdue-backed text measurement.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."
//!
//! A [`FontBook`] maps `font-family` names to loaded fonts. Layout measures
//! through [`FontdueFontMetrics`] and the raster surface draws with the same
//! book, so measured widths match painted glyphs.

use std::fs;
use std::path::Path;

use fontdue::{Font, FontSettings};
use thiserror::Error;
use wren_common::warning::warn_once;
use wren_css::{ApproximateFontMetrics, FontExtents, FontMetrics, TextExtents};

/// Generic family name → candidate files, searched in order until one loads.
const SYSTEM_FONTS: &[(&str, &[&str])] = &[
    (
        "Monospace",
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
            "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
            "/System/Library/Fonts/Menlo.ttc",
            "C:\\Windows\\Fonts\\consola.ttf",
        ],
    ),
    (
        "Sans",
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
            "/Library/Fonts/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ],
    ),
    (
        "Serif",
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
            "/usr/share/fonts/TTF/DejaVuSerif.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
            "/System/Library/Fonts/Supplemental/Times New Roman.ttf",
            "C:\\Windows\\Fonts\\times.ttf",
        ],
    ),
];

/// A font file could not be used.
#[derive(Debug, Error)]
pub enum FontError {
    /// The file could not be read.
    #[error("cannot read font '{path}': {source}")]
    Io {
        /// Path of the font file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// fontdue rejected the data.
    #[error("cannot parse font '{path}': {reason}")]
    Parse {
        /// Path of the font file.
        path: String,
        /// fontdue's description.
        reason: &'static str,
    },
}

/// Fonts keyed by family name. Lookups are case-insensitive and fall back to
/// the first font added, so any family renders with something.
#[derive(Default)]
pub struct FontBook {
    families: Vec<(String, Font)>,
}

impl FontBook {
    /// An empty book. Measuring with it falls back to
    /// [`ApproximateFontMetrics`] and drawing text is skipped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A book holding the first available system font of each generic
    /// family (`Monospace`, `Sans`, `Serif`).
    #[must_use]
    pub fn system() -> Self {
        let mut book = Self::new();
        for (family, paths) in SYSTEM_FONTS {
            if let Some(path) = paths.iter().find(|path| Path::new(path).exists())
                && let Err(err) = book.load_file(family, path)
            {
                warn_once("Font", &err.to_string());
            }
        }
        if book.is_empty() {
            warn_once("Font", "no system font found; text will not be drawn");
        }
        book
    }

    /// Load the font file at `path` under `family`. The first font loaded
    /// becomes the fallback for unknown families.
    ///
    /// # Errors
    ///
    /// [`FontError`] when the file cannot be read or parsed.
    pub fn load_file(&mut self, family: &str, path: &str) -> Result<(), FontError> {
        let data = fs::read(path).map_err(|source| FontError::Io {
            path: path.to_string(),
            source,
        })?;
        let font = Font::from_bytes(data, FontSettings::default()).map_err(|reason| {
            FontError::Parse {
                path: path.to_string(),
                reason,
            }
        })?;
        self.add(family, font);
        Ok(())
    }

    /// Add an already parsed font under `family`, replacing any font of the
    /// same name.
    pub fn add(&mut self, family: &str, font: Font) {
        match self
            .families
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(family))
        {
            Some(entry) => entry.1 = font,
            None => self.families.push((family.to_string(), font)),
        }
    }

    /// The font for `family`, or the fallback font.
    #[must_use]
    pub fn get(&self, family: &str) -> Option<&Font> {
        self.families
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(family))
            .or_else(|| self.families.first())
            .map(|(_, font)| font)
    }

    /// Loaded family names, fallback first.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(|(name, _)| name.as_str())
    }

    /// Whether no font is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.families()).finish()
    }
}

/// [`FontMetrics`] backed by fontdue's per-glyph metrics.
///
/// Uses `Font::metrics()` rather than `Font::rasterize()`, so measuring
/// never builds glyph bitmaps. Families the book cannot serve are measured
/// with [`ApproximateFontMetrics`].
#[derive(Debug, Clone, Copy)]
pub struct FontdueFontMetrics<'a> {
    book: &'a FontBook,
}

impl<'a> FontdueFontMetrics<'a> {
    /// Measure with the fonts of `book`.
    #[must_use]
    pub const fn new(book: &'a FontBook) -> Self {
        Self { book }
    }
}

impl FontMetrics for FontdueFontMetrics<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn text_extents(&self, family: &str, size: f64, text: &str) -> TextExtents {
        let Some(font) = self.book.get(family) else {
            return ApproximateFontMetrics.text_extents(family, size, text);
        };
        let px = size as f32;
        // Must match the pen advance in RasterSurface::draw_text.
        let advance: f32 = text
            .chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| font.metrics(ch, px).advance_width)
            .sum();
        let extents = self.font_extents(family, size);
        TextExtents {
            x_bearing: 0.0,
            y_bearing: -extents.ascent,
            width: f64::from(advance),
            height: extents.ascent + extents.descent,
            x_advance: f64::from(advance),
            y_advance: 0.0,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn font_extents(&self, family: &str, size: f64) -> FontExtents {
        let line = self
            .book
            .get(family)
            .and_then(|font| font.horizontal_line_metrics(size as f32));
        let Some(line) = line else {
            return ApproximateFontMetrics.font_extents(family, size);
        };
        FontExtents {
            ascent: f64::from(line.ascent),
            // fontdue reports descent as a negative offset below the baseline
            descent: f64::from(-line.descent),
            height: f64::from(line.new_line_size),
            max_x_advance: size,
            max_y_advance: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_book_measures_approximately() {
        let book = FontBook::new();
        let metrics = FontdueFontMetrics::new(&book);
        let approx = ApproximateFontMetrics;
        assert_eq!(
            metrics.text_extents("Serif", 10.0, "abc "),
            approx.text_extents("Serif", 10.0, "abc ")
        );
        assert_eq!(
            metrics.font_extents("Serif", 10.0),
            approx.font_extents("Serif", 10.0)
        );
        assert!(book.get("Serif").is_none());
    }

    #[test]
    fn test_missing_font_file_is_an_error() {
        let mut book = FontBook::new();
        let err = book
            .load_file("Sans", "/nonexistent/font.ttf")
            .unwrap_err();
        assert!(matches!(err, FontError::Io { .. }));
        assert!(book.is_empty());
    }
}
