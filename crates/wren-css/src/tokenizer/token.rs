//! CSS token types per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
//!
//! The token set is the one from CSS Syntax Level 3 minus `<url-token>`,
//! `<bad-url-token>` and `<unicode-range-token>`: `url(` is tokenized as a
//! function, which is all the declaration values in this renderer need.

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
#[derive(Debug, Clone, PartialEq)]
pub enum CSSToken {
    /// "`<ident-token>`"
    Ident(String),
    /// "`<function-token>`", the name without the `(`.
    Function(String),
    /// "`<at-keyword-token>`", the name without the `@`.
    AtKeyword(String),
    /// "`<hash-token>`", the value without the `#`.
    Hash(String),
    /// "`<string-token>`"
    String(String),
    /// "`<bad-string-token>`"
    BadString,
    /// "`<delim-token>`"
    Delim(char),
    /// "`<number-token>`"
    Number(f64),
    /// "`<percentage-token>`"
    Percentage(f64),
    /// "`<dimension-token>`"
    Dimension {
        /// "a numeric value"
        value: f64,
        /// "a unit", lower-cased
        unit: String,
    },
    /// "`<whitespace-token>`"
    Whitespace,
    /// "`<CDO-token>`" (`<!--`)
    CDO,
    /// "`<CDC-token>`" (`-->`)
    CDC,
    /// "`<colon-token>`"
    Colon,
    /// "`<semicolon-token>`"
    Semicolon,
    /// "`<comma-token>`"
    Comma,
    /// "`<[-token>`"
    LeftBracket,
    /// "`<]-token>`"
    RightBracket,
    /// "`<(-token>`"
    LeftParen,
    /// "`<)-token>`"
    RightParen,
    /// "`<{-token>`"
    LeftBrace,
    /// "`<}-token>`"
    RightBrace,
    /// End of input.
    EOF,
}

impl CSSToken {
    /// Whether this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EOF)
    }

    /// Whether this is a `<whitespace-token>`.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace)
    }

    /// Serialize the token back to CSS source text. Used to rebuild selector
    /// preludes and for diagnostics.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Ident(s) => s.clone(),
            Self::Function(s) => format!("{s}("),
            Self::AtKeyword(s) => format!("@{s}"),
            Self::Hash(s) => format!("#{s}"),
            Self::String(s) => format!("\"{s}\""),
            Self::BadString | Self::EOF => String::new(),
            Self::Delim(c) => c.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Percentage(n) => format!("{n}%"),
            Self::Dimension { value, unit } => format!("{value}{unit}"),
            Self::Whitespace => " ".to_string(),
            Self::CDO => "<!--".to_string(),
            Self::CDC => "-->".to_string(),
            Self::Colon => ":".to_string(),
            Self::Semicolon => ";".to_string(),
            Self::Comma => ",".to_string(),
            Self::LeftBracket => "[".to_string(),
            Self::RightBracket => "]".to_string(),
            Self::LeftParen => "(".to_string(),
            Self::RightParen => ")".to_string(),
            Self::LeftBrace => "{".to_string(),
            Self::RightBrace => "}".to_string(),
        }
    }
}
