//! Style values: one CSS component value with its conversions.
//!
//! [CSS Values and Units Level 3](https://www.w3.org/TR/css-values-3/)
//!
//! Every declaration in a stylesheet keeps exactly one [`Value`]. Consumers
//! pick the conversion that fits the property they are reading:
//!
//! | Conversion | Accepted variants |
//! |---|---|
//! | [`Value::to_px`] | `Number`, `Dimension`, the keyword `auto` (as 0) |
//! | [`Value::to_str`] | `Keyword`, `String` |
//! | [`Value::to_rgb`] | `Keyword` (named color), `Hash` |
//!
//! Anything else is a [`StyleError::Conversion`].

mod color;

pub use color::ColorValue;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use strum_macros::EnumString;
use wren_common::warning::warn_once;

use crate::error::StyleError;
use crate::tokenizer::CSSToken;

/// [§ 5 Distance Units](https://www.w3.org/TR/css-values-3/#lengths)
///
/// Units are recorded but not converted: layout treats every length as
/// pixels.
#[derive(Debug, Clone, PartialEq, Eq, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum Unit {
    /// "px: 1px = 1/96th of 1in"
    #[strum(serialize = "px")]
    Px,
    /// "pt: 1pt = 1/72nd of 1in"
    #[strum(serialize = "pt")]
    Pt,
    /// "pc: 1pc = 1/6th of 1in"
    #[strum(serialize = "pc")]
    Pc,
    /// "in: 1in = 2.54cm = 96px"
    #[strum(serialize = "in")]
    In,
    /// "cm: 1cm = 96px/2.54"
    #[strum(serialize = "cm")]
    Cm,
    /// "mm: 1mm = 1/10th of 1cm"
    #[strum(serialize = "mm")]
    Mm,
    /// "em: equal to the computed value of the font-size property"
    #[strum(serialize = "em")]
    Em,
    /// "rem: equal to the computed value of font-size on the root element"
    #[strum(serialize = "rem")]
    Rem,
    /// "ex: equal to the used x-height of the first available font"
    #[strum(serialize = "ex")]
    Ex,
    /// "vw: equal to 1% of the width of the initial containing block"
    #[strum(serialize = "vw")]
    Vw,
    /// "vh: equal to 1% of the height of the initial containing block"
    #[strum(serialize = "vh")]
    Vh,
    /// `<percentage>`
    #[strum(serialize = "%")]
    Percent,
    /// Any other unit, kept verbatim.
    #[strum(default)]
    Other(String),
}

impl Unit {
    /// The unit as written in CSS.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Px => "px",
            Self::Pt => "pt",
            Self::Pc => "pc",
            Self::In => "in",
            Self::Cm => "cm",
            Self::Mm => "mm",
            Self::Em => "em",
            Self::Rem => "rem",
            Self::Ex => "ex",
            Self::Vw => "vw",
            Self::Vh => "vh",
            Self::Percent => "%",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single CSS component value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// An identifier such as `auto`, `block` or `red`.
    Keyword(String),
    /// A quoted string.
    String(String),
    /// A unitless number.
    Number(f64),
    /// A number with a unit (percentages use [`Unit::Percent`]).
    Dimension(f64, Unit),
    /// A hash token (`#rgb`), stored without the `#`.
    Hash(String),
}

impl Value {
    /// Build a value from the first significant token of a declaration.
    /// Returns `None` for tokens that have no [`Value`] form (functions,
    /// punctuation).
    #[must_use]
    pub fn from_token(token: &CSSToken) -> Option<Self> {
        match token {
            CSSToken::Ident(s) => Some(Self::Keyword(s.clone())),
            CSSToken::String(s) => Some(Self::String(s.clone())),
            CSSToken::Number(n) => Some(Self::Number(*n)),
            CSSToken::Percentage(n) => Some(Self::Dimension(*n, Unit::Percent)),
            CSSToken::Dimension { value, unit } => Some(Self::Dimension(
                *value,
                Unit::from_str(unit).unwrap_or_else(|_| Unit::Other(unit.clone())),
            )),
            CSSToken::Hash(h) => Some(Self::Hash(h.clone())),
            _ => None,
        }
    }

    /// A length in pixels.
    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self::Dimension(value, Unit::Px)
    }

    /// Shorthand for `Keyword(name)`.
    #[must_use]
    pub fn keyword(name: &str) -> Self {
        Self::Keyword(name.to_string())
    }

    /// Whether this is the keyword `auto`.
    #[must_use]
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Keyword(k) if k.eq_ignore_ascii_case("auto"))
    }

    /// Resolve to a length in layout units.
    ///
    /// `auto` yields 0. Units other than `px` are taken at face value.
    ///
    /// # Errors
    ///
    /// [`StyleError::Conversion`] for any keyword other than `auto`, strings
    /// and hashes.
    pub fn to_px(&self) -> Result<f64, StyleError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Dimension(n, unit) => {
                if *unit != Unit::Px {
                    warn_once(
                        "CSS",
                        &format!("unit '{unit}' is treated as px (in {self})"),
                    );
                }
                Ok(*n)
            }
            v if v.is_auto() => Ok(0.0),
            _ => Err(self.conversion_error("px")),
        }
    }

    /// The text of a keyword or string.
    ///
    /// # Errors
    ///
    /// [`StyleError::Conversion`] for numeric values and hashes.
    pub fn to_str(&self) -> Result<&str, StyleError> {
        match self {
            Self::Keyword(s) | Self::String(s) => Ok(s),
            _ => Err(self.conversion_error("string")),
        }
    }

    /// Resolve a named or hex color.
    ///
    /// Returns `Ok(None)` for a keyword that names no color or a malformed
    /// hash; callers treat that like an absent color.
    ///
    /// # Errors
    ///
    /// [`StyleError::Conversion`] for numbers, dimensions and strings.
    pub fn to_rgb(&self) -> Result<Option<ColorValue>, StyleError> {
        match self {
            Self::Keyword(name) => Ok(ColorValue::from_named(name)),
            Self::Hash(hex) => Ok(ColorValue::from_hex(hex)),
            _ => Err(self.conversion_error("color")),
        }
    }

    fn conversion_error(&self, target: &'static str) -> StyleError {
        StyleError::Conversion {
            value: self.to_string(),
            target,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(k) => f.write_str(k),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Number(n) => write!(f, "{n}"),
            Self::Dimension(n, unit) => write!(f, "{n}{unit}"),
            Self::Hash(h) => write!(f, "#{h}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_px() {
        assert_eq!(Value::px(12.5).to_px(), Ok(12.5));
        assert_eq!(Value::Number(3.0).to_px(), Ok(3.0));
        assert_eq!(Value::keyword("auto").to_px(), Ok(0.0));
        assert_eq!(Value::Dimension(2.0, Unit::Em).to_px(), Ok(2.0));
        assert_eq!(
            Value::keyword("bold").to_px(),
            Err(StyleError::Conversion {
                value: "bold".to_string(),
                target: "px"
            })
        );
        assert!(Value::String("x".to_string()).to_px().is_err());
    }

    #[test]
    fn test_to_str() {
        assert_eq!(Value::keyword("center").to_str(), Ok("center"));
        assert_eq!(Value::String("Sans".to_string()).to_str(), Ok("Sans"));
        assert!(Value::px(1.0).to_str().is_err());
        assert!(Value::Hash("fff".to_string()).to_str().is_err());
    }

    #[test]
    fn test_to_rgb() {
        assert_eq!(
            Value::keyword("red").to_rgb(),
            Ok(Some(ColorValue::opaque(0xFF0000)))
        );
        assert_eq!(
            Value::Hash("00ff00".to_string()).to_rgb(),
            Ok(Some(ColorValue::opaque(0x00FF00)))
        );
        assert_eq!(Value::keyword("none").to_rgb(), Ok(None));
        assert!(Value::Number(1.0).to_rgb().is_err());
        assert!(Value::String("red".to_string()).to_rgb().is_err());
    }

    #[test]
    fn test_from_token_units() {
        let token = CSSToken::Dimension {
            value: 4.0,
            unit: "vmin".to_string(),
        };
        assert_eq!(
            Value::from_token(&token),
            Some(Value::Dimension(4.0, Unit::Other("vmin".to_string())))
        );
        assert_eq!(
            Value::from_token(&CSSToken::Percentage(50.0)),
            Some(Value::Dimension(50.0, Unit::Percent))
        );
        assert_eq!(Value::from_token(&CSSToken::Comma), None);
    }
}
