use super::token::CSSToken;

/// [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
///
/// ```
/// use wren_css::tokenizer::{CSSToken, CSSTokenizer};
///
/// let mut tokenizer = CSSTokenizer::new("p { margin: 10px }");
/// tokenizer.run();
/// assert_eq!(tokenizer.tokens()[0], CSSToken::Ident("p".to_string()));
/// ```
pub struct CSSTokenizer {
    input: Vec<char>,
    position: usize,
    tokens: Vec<CSSToken>,
}

impl CSSTokenizer {
    /// Create a new CSS tokenizer over `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the whole input. The last token is always [`CSSToken::EOF`].
    pub fn run(&mut self) {
        loop {
            let token = self.consume_token();
            let is_eof = token.is_eof();
            self.tokens.push(token);
            if is_eof {
                break;
            }
        }
    }

    /// Return the collected tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<CSSToken> {
        self.tokens
    }

    /// Return a reference to the collected tokens.
    #[must_use]
    pub fn tokens(&self) -> &[CSSToken] {
        &self.tokens
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> CSSToken {
        // "Consume comments."
        self.consume_comments();

        // "Consume the next input code point."
        let Some(c) = self.consume() else {
            return CSSToken::EOF;
        };

        match c {
            // "Consume as much whitespace as possible. Return a <whitespace-token>."
            c if is_whitespace(c) => {
                while self.peek().is_some_and(is_whitespace) {
                    let _ = self.consume();
                }
                CSSToken::Whitespace
            }
            '"' | '\'' => self.consume_string_token(c),
            // "If the next input code point is an ident code point or the next
            // two input code points are a valid escape ... Create a <hash-token>."
            '#' => {
                if self.peek().is_some_and(is_ident_code_point)
                    || is_valid_escape(self.peek(), self.peek_at(1))
                {
                    CSSToken::Hash(self.consume_ident_sequence())
                } else {
                    CSSToken::Delim('#')
                }
            }
            '(' => CSSToken::LeftParen,
            ')' => CSSToken::RightParen,
            '[' => CSSToken::LeftBracket,
            ']' => CSSToken::RightBracket,
            '{' => CSSToken::LeftBrace,
            '}' => CSSToken::RightBrace,
            ',' => CSSToken::Comma,
            ':' => CSSToken::Colon,
            ';' => CSSToken::Semicolon,
            '+' | '.' if self.would_start_number_from(c) => {
                self.reconsume();
                self.consume_numeric_token()
            }
            '-' => {
                if self.would_start_number_from('-') {
                    self.reconsume();
                    self.consume_numeric_token()
                } else if self.peek() == Some('-') && self.peek_at(1) == Some('>') {
                    let _ = self.consume();
                    let _ = self.consume();
                    CSSToken::CDC
                } else if would_start_ident(Some('-'), self.peek(), self.peek_at(1)) {
                    self.reconsume();
                    self.consume_ident_like_token()
                } else {
                    CSSToken::Delim('-')
                }
            }
            '<' if self.peek() == Some('!')
                && self.peek_at(1) == Some('-')
                && self.peek_at(2) == Some('-') =>
            {
                self.position += 3;
                CSSToken::CDO
            }
            // "If the next 3 input code points would start an ident sequence,
            // consume an ident sequence, create an <at-keyword-token>"
            '@' if would_start_ident(self.peek(), self.peek_at(1), self.peek_at(2)) => {
                CSSToken::AtKeyword(self.consume_ident_sequence())
            }
            '\\' if is_valid_escape(Some('\\'), self.peek()) => {
                self.reconsume();
                self.consume_ident_like_token()
            }
            c if c.is_ascii_digit() => {
                self.reconsume();
                self.consume_numeric_token()
            }
            c if is_ident_start_code_point(c) => {
                self.reconsume();
                self.consume_ident_like_token()
            }
            // "anything else: Return a <delim-token> with its value set to the
            // current input code point."
            c => CSSToken::Delim(c),
        }
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    fn consume_comments(&mut self) {
        while self.peek() == Some('/') && self.peek_at(1) == Some('*') {
            self.position += 2;
            loop {
                match self.consume() {
                    Some('*') if self.peek() == Some('/') => {
                        let _ = self.consume();
                        break;
                    }
                    Some(_) => {}
                    None => break,
                }
            }
        }
    }

    /// [§ 4.3.4 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    fn consume_string_token(&mut self, ending_code_point: char) -> CSSToken {
        let mut value = String::new();
        loop {
            match self.consume() {
                // "EOF: This is a parse error. Return the <string-token>."
                None => return CSSToken::String(value),
                Some(c) if c == ending_code_point => return CSSToken::String(value),
                // "newline: This is a parse error. Reconsume the current input
                // code point, create a <bad-string-token>, and return it."
                Some('\n') => {
                    self.reconsume();
                    return CSSToken::BadString;
                }
                Some('\\') => match self.peek() {
                    None => {}
                    Some('\n') => {
                        let _ = self.consume();
                    }
                    Some(_) => value.push(self.consume_escaped_code_point()),
                },
                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.3 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    fn consume_numeric_token(&mut self) -> CSSToken {
        let value = self.consume_number();

        if would_start_ident(self.peek(), self.peek_at(1), self.peek_at(2)) {
            let unit = self.consume_ident_sequence().to_ascii_lowercase();
            CSSToken::Dimension { value, unit }
        } else if self.peek() == Some('%') {
            let _ = self.consume();
            CSSToken::Percentage(value)
        } else {
            CSSToken::Number(value)
        }
    }

    /// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    ///
    /// Collects the textual representation and lets `str::parse` do the
    /// conversion ("convert a string to a number").
    fn consume_number(&mut self) -> f64 {
        let mut repr = String::new();

        // "If the next input code point is U+002B PLUS SIGN (+) or U+002D
        // HYPHEN-MINUS (-), consume it and append it to repr."
        if let Some(sign @ ('+' | '-')) = self.peek() {
            let _ = self.consume();
            repr.push(sign);
        }
        self.consume_digits(&mut repr);

        // "If the next 2 input code points are U+002E FULL STOP (.) followed by
        // a digit"
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            let _ = self.consume();
            repr.push('.');
            self.consume_digits(&mut repr);
        }

        // "If the next 2 or 3 input code points are U+0045 (E) or U+0065 (e),
        // optionally followed by U+002D (-) or U+002B (+), followed by a digit"
        if matches!(self.peek(), Some('e' | 'E')) {
            let signed = matches!(self.peek_at(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    if let Some(c) = self.consume() {
                        repr.push(c);
                    }
                }
                self.consume_digits(&mut repr);
            }
        }

        repr.parse().unwrap_or(0.0)
    }

    fn consume_digits(&mut self, repr: &mut String) {
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            let _ = self.consume();
            repr.push(c);
        }
    }

    /// [§ 4.3.4 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    fn consume_ident_like_token(&mut self) -> CSSToken {
        let string = self.consume_ident_sequence();
        // "Otherwise, if the next input code point is U+0028 LEFT PARENTHESIS
        // ((), consume it. Create a <function-token> with its value set to
        // string and return it."
        if self.peek() == Some('(') {
            let _ = self.consume();
            CSSToken::Function(string)
        } else {
            CSSToken::Ident(string)
        }
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident_sequence(&mut self) -> String {
        let mut result = String::new();
        loop {
            match self.peek() {
                Some(c) if is_ident_code_point(c) => {
                    let _ = self.consume();
                    result.push(c);
                }
                Some('\\') if is_valid_escape(Some('\\'), self.peek_at(1)) => {
                    let _ = self.consume();
                    result.push(self.consume_escaped_code_point());
                }
                _ => return result,
            }
        }
    }

    /// [§ 4.3.7 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// Called with the backslash already consumed.
    fn consume_escaped_code_point(&mut self) -> char {
        match self.consume() {
            Some(c) if c.is_ascii_hexdigit() => {
                let mut hex = c.to_string();
                while hex.len() < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                    if let Some(c) = self.consume() {
                        hex.push(c);
                    }
                }
                // "If the next input code point is whitespace, consume it as well."
                if self.peek().is_some_and(is_whitespace) {
                    let _ = self.consume();
                }
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|&n| n != 0)
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            // "EOF: This is a parse error. Return U+FFFD REPLACEMENT CHARACTER."
            None => char::REPLACEMENT_CHARACTER,
            Some(c) => c,
        }
    }

    /// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    ///
    /// `first` has just been consumed; the lookahead starts after it.
    fn would_start_number_from(&self, first: char) -> bool {
        let second = self.peek();
        let third = self.peek_at(1);
        match first {
            '+' | '-' => {
                second.is_some_and(|c| c.is_ascii_digit())
                    || (second == Some('.') && third.is_some_and(|c| c.is_ascii_digit()))
            }
            '.' => second.is_some_and(|c| c.is_ascii_digit()),
            c => c.is_ascii_digit(),
        }
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.position).copied();
        if c.is_some() {
            self.position += 1;
        }
        c
    }

    const fn reconsume(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#whitespace)
const fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ' | '\r' | '\x0C')
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
///
/// "A letter, a non-ASCII code point, or U+005F LOW LINE (_)."
const fn is_ident_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || !c.is_ascii() || c == '_'
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
///
/// "An ident-start code point, a digit, or U+002D HYPHEN-MINUS (-)."
const fn is_ident_code_point(c: char) -> bool {
    is_ident_start_code_point(c) || c.is_ascii_digit() || c == '-'
}

/// [§ 4.3.8 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
fn is_valid_escape(first: Option<char>, second: Option<char>) -> bool {
    first == Some('\\') && second.is_some_and(|c| c != '\n')
}

/// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
fn would_start_ident(first: Option<char>, second: Option<char>, third: Option<char>) -> bool {
    match first {
        Some('-') => {
            second.is_some_and(|c| is_ident_start_code_point(c) || c == '-')
                || is_valid_escape(second, third)
        }
        Some('\\') => is_valid_escape(first, second),
        Some(c) => is_ident_start_code_point(c),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<CSSToken> {
        let mut tokenizer = CSSTokenizer::new(input);
        tokenizer.run();
        tokenizer
            .into_tokens()
            .into_iter()
            .filter(|t| !t.is_whitespace())
            .collect()
    }

    #[test]
    fn test_numeric_tokens() {
        assert_eq!(
            tokenize("10px -2.5 50% +.5em 1e2"),
            vec![
                CSSToken::Dimension {
                    value: 10.0,
                    unit: "px".to_string()
                },
                CSSToken::Number(-2.5),
                CSSToken::Percentage(50.0),
                CSSToken::Dimension {
                    value: 0.5,
                    unit: "em".to_string()
                },
                CSSToken::Number(100.0),
                CSSToken::EOF,
            ]
        );
    }

    #[test]
    fn test_comments_and_hash() {
        assert_eq!(
            tokenize("/* x */#fff /* unterminated"),
            vec![CSSToken::Hash("fff".to_string()), CSSToken::EOF]
        );
    }

    #[test]
    fn test_idents_and_escapes() {
        assert_eq!(
            tokenize(r"-moz-thing \31 0 url("),
            vec![
                CSSToken::Ident("-moz-thing".to_string()),
                CSSToken::Ident("10".to_string()),
                CSSToken::Function("url".to_string()),
                CSSToken::EOF,
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            tokenize("'a\\'b' \"unterminated\nx"),
            vec![
                CSSToken::String("a'b".to_string()),
                CSSToken::BadString,
                CSSToken::Ident("x".to_string()),
                CSSToken::EOF,
            ]
        );
    }
}
