//! CSS Parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! "The input to the parsing stage is a stream of tokens from the tokenization stage."
//!
//! Only style rules survive parsing. At-rules are consumed and dropped, and
//! every declaration is reduced to a single [`Value`]: the first
//! non-whitespace component of its value.

use wren_common::warning::warn_once;

use crate::selector::{Selector, parse_selector};
use crate::tokenizer::{CSSToken, CSSTokenizer};
use crate::values::Value;

/// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
///
/// A CSS declaration (e.g., `color: red`).
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name, lower-cased.
    pub name: String,
    /// The property value.
    pub value: Value,
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
///
/// A CSS style rule (selector list + declarations).
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    /// The selectors of this rule that parsed successfully.
    pub selectors: Vec<Selector>,
    /// The declarations in this rule block, in source order.
    pub declarations: Vec<Declaration>,
}

/// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
///
/// A parsed CSS stylesheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stylesheet {
    /// The style rules in source order.
    pub rules: Vec<StyleRule>,
}

/// [§ 5.4.8 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
#[derive(Debug, Clone, PartialEq)]
enum ComponentValue {
    Token(CSSToken),
    Function,
    Block,
}

/// CSS parser
pub struct CSSParser {
    tokens: Vec<CSSToken>,
    position: usize,
}

/// Tokenize and parse `css` in one step.
///
/// ```
/// let sheet = wren_css::parse_stylesheet("h1, .title { font-size: 32px }");
/// assert_eq!(sheet.rules[0].selectors.len(), 2);
/// assert_eq!(sheet.rules[0].declarations[0].name, "font-size");
/// ```
#[must_use]
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    let mut tokenizer = CSSTokenizer::new(css);
    tokenizer.run();
    CSSParser::new(tokenizer.into_tokens()).parse_stylesheet()
}

impl CSSParser {
    /// Create a new parser from a list of tokens.
    #[must_use]
    pub const fn new(tokens: Vec<CSSToken>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    ///
    /// "To parse a stylesheet from input..."
    pub fn parse_stylesheet(&mut self) -> Stylesheet {
        // "Consume a list of rules from input, with the top-level flag set."
        let rules = self.consume_list_of_rules();
        Stylesheet { rules }
    }

    /// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    fn consume_list_of_rules(&mut self) -> Vec<StyleRule> {
        let mut rules = Vec::new();

        loop {
            match self.peek() {
                // "<whitespace-token>", "<CDO-token>", "<CDC-token>"
                // "Do nothing." (top-level flag is set)
                Some(CSSToken::Whitespace | CSSToken::CDO | CSSToken::CDC) => {
                    let _ = self.consume();
                }

                // "<EOF-token>"
                // "Return the list of rules."
                None | Some(CSSToken::EOF) => return rules,

                // "<at-keyword-token>"
                // "Reconsume the current input token. Consume an at-rule."
                Some(CSSToken::AtKeyword(name)) => {
                    warn_once("CSS", &format!("skipping unsupported at-rule @{name}"));
                    self.consume_at_rule();
                }

                // "anything else"
                // "Reconsume the current input token. Consume a qualified rule. If
                // anything is returned, append it to the list of rules."
                Some(_) => {
                    if let Some(rule) = self.consume_qualified_rule() {
                        rules.push(rule);
                    }
                }
            }
        }
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    ///
    /// The rule is consumed up to its `;` or through its block and discarded.
    fn consume_at_rule(&mut self) {
        let _ = self.consume();

        loop {
            match self.peek() {
                // "<semicolon-token>"
                // "Return the at-rule."
                Some(CSSToken::Semicolon) => {
                    let _ = self.consume();
                    return;
                }

                // "<EOF-token>"
                // "This is a parse error. Return the at-rule."
                None | Some(CSSToken::EOF) => return,

                // "<{-token>"
                // "Consume a simple block and assign it to the at-rule's block."
                Some(CSSToken::LeftBrace) => {
                    self.consume_simple_block();
                    return;
                }

                // "anything else"
                Some(_) => {
                    let _ = self.consume_component_value();
                }
            }
        }
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    fn consume_qualified_rule(&mut self) -> Option<StyleRule> {
        let mut prelude = Vec::new();

        loop {
            match self.peek() {
                // "<EOF-token>"
                // "This is a parse error. Return nothing."
                None | Some(CSSToken::EOF) => return None,

                // "<{-token>"
                // "Consume a simple block and assign it to the qualified rule's block.
                // Return the qualified rule."
                Some(CSSToken::LeftBrace) => {
                    let _ = self.consume();
                    let declarations = self.consume_list_of_declarations();
                    if self.peek() == Some(&CSSToken::RightBrace) {
                        let _ = self.consume();
                    }

                    let selectors = split_selector_list(&prelude);
                    if selectors.is_empty() {
                        return None;
                    }
                    return Some(StyleRule {
                        selectors,
                        declarations,
                    });
                }

                // "anything else"
                // "Reconsume the current input token. Consume a component value.
                // Append the returned value to the qualified rule's prelude."
                Some(_) => {
                    if let Some(token) = self.consume().cloned() {
                        prelude.push(token);
                    }
                }
            }
        }
    }

    /// [§ 5.4.7 Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block)
    ///
    /// The contents are consumed and dropped; nothing in this renderer reads
    /// nested blocks.
    fn consume_simple_block(&mut self) {
        let ending_token = match self.consume() {
            Some(CSSToken::LeftBrace) => CSSToken::RightBrace,
            Some(CSSToken::LeftBracket) => CSSToken::RightBracket,
            Some(CSSToken::LeftParen) => CSSToken::RightParen,
            _ => return,
        };

        loop {
            match self.peek() {
                Some(token) if *token == ending_token => {
                    let _ = self.consume();
                    return;
                }
                None | Some(CSSToken::EOF) => return,
                Some(_) => {
                    let _ = self.consume_component_value();
                }
            }
        }
    }

    /// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    fn consume_list_of_declarations(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        loop {
            match self.peek() {
                // "<whitespace-token>" or "<semicolon-token>"
                // "Do nothing."
                Some(CSSToken::Whitespace | CSSToken::Semicolon) => {
                    let _ = self.consume();
                }

                // "<EOF-token>" or "<}-token>"
                // "Return the list of declarations."
                None | Some(CSSToken::EOF | CSSToken::RightBrace) => return declarations,

                // "<at-keyword-token>"
                Some(CSSToken::AtKeyword(_)) => self.consume_at_rule(),

                // "<ident-token>"
                // "Consume a declaration. If anything was returned, append it to
                // the list of declarations."
                Some(CSSToken::Ident(_)) => {
                    if let Some(decl) = self.consume_declaration() {
                        declarations.push(decl);
                    }
                }

                // "anything else"
                // "This is a parse error. Reconsume the current input token. As long as
                // the next input token is anything other than a <semicolon-token> or
                // <EOF-token>, consume a component value and throw away the returned value."
                Some(_) => {
                    let _ = self.consume_component_value();
                    self.skip_to_declaration_end();
                }
            }
        }
    }

    /// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
    fn consume_declaration(&mut self) -> Option<Declaration> {
        // "Consume the next input token."
        let name = match self.consume() {
            Some(CSSToken::Ident(name)) => name.to_ascii_lowercase(),
            _ => return None,
        };

        // "While the next input token is a <whitespace-token>, consume the next input token."
        self.skip_whitespace();

        // "If the next input token is anything other than a <colon-token>, this is a parse error.
        // Return nothing."
        if self.peek() != Some(&CSSToken::Colon) {
            self.skip_to_declaration_end();
            return None;
        }
        let _ = self.consume();
        self.skip_whitespace();

        // "As long as the next input token is anything other than an <EOF-token>, consume a
        // component value and append it to the declaration's value."
        let mut components = Vec::new();
        while !matches!(
            self.peek(),
            None | Some(CSSToken::EOF | CSSToken::Semicolon | CSSToken::RightBrace)
        ) {
            if let Some(v) = self.consume_component_value() {
                components.push(v);
            }
        }

        // [§ 6.4.2 Important declarations](https://www.w3.org/TR/css-cascade-4/#importance)
        // The annotation is accepted; importance does not take part in this cascade.
        trim_important(&mut components);

        let mut significant = components
            .iter()
            .filter(|c| !matches!(c, ComponentValue::Token(CSSToken::Whitespace)));

        let value = match significant.next() {
            Some(ComponentValue::Token(token)) => Value::from_token(token),
            Some(ComponentValue::Function | ComponentValue::Block) | None => None,
        };
        let Some(value) = value else {
            warn_once(
                "CSS",
                &format!("dropping declaration '{name}': unsupported value"),
            );
            return None;
        };

        if significant.next().is_some() {
            warn_once(
                "CSS",
                &format!("'{name}' has a multi-part value, keeping only '{value}'"),
            );
        }

        Some(Declaration { name, value })
    }

    /// [§ 5.4.8 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
    fn consume_component_value(&mut self) -> Option<ComponentValue> {
        match self.peek()? {
            // "<{-token>", "<[-token>", "<(-token>"
            // "Consume a simple block and return it."
            CSSToken::LeftBrace | CSSToken::LeftBracket | CSSToken::LeftParen => {
                self.consume_simple_block();
                Some(ComponentValue::Block)
            }

            // "<function-token>"
            // "Consume a function and return it."
            CSSToken::Function(_) => {
                let _ = self.consume();
                loop {
                    match self.peek() {
                        Some(CSSToken::RightParen) => {
                            let _ = self.consume();
                            break;
                        }
                        None | Some(CSSToken::EOF) => break,
                        Some(_) => {
                            let _ = self.consume_component_value();
                        }
                    }
                }
                Some(ComponentValue::Function)
            }

            // "anything else"
            // "Return the current input token."
            _ => self.consume().cloned().map(ComponentValue::Token),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek() == Some(&CSSToken::Whitespace) {
            let _ = self.consume();
        }
    }

    fn skip_to_declaration_end(&mut self) {
        while !matches!(
            self.peek(),
            None | Some(CSSToken::Semicolon | CSSToken::RightBrace | CSSToken::EOF)
        ) {
            let _ = self.consume_component_value();
        }
    }

    fn consume(&mut self) -> Option<&CSSToken> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    fn peek(&self) -> Option<&CSSToken> {
        self.tokens.get(self.position)
    }
}

/// [§ 5.1 Selector Lists](https://www.w3.org/TR/selectors-4/#selector-list)
///
/// "A selector list is a comma-separated list of selectors."
///
/// Each entry is serialized back to text and handed to [`parse_selector`].
/// Entries that fail to parse are dropped with a warning; the rest of the
/// list still applies.
fn split_selector_list(tokens: &[CSSToken]) -> Vec<Selector> {
    tokens
        .split(|token| matches!(token, CSSToken::Comma))
        .filter_map(|part| {
            let text: String = part.iter().map(CSSToken::to_css).collect();
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            let selector = parse_selector(text);
            if selector.is_none() {
                warn_once("CSS", &format!("skipping unsupported selector '{text}'"));
            }
            selector
        })
        .collect()
}

/// Remove a trailing `!important` annotation (and surrounding whitespace).
///
/// [§ 6.4.2 Important declarations](https://www.w3.org/TR/css-cascade-4/#importance)
///
/// "A declaration is important if it has a !important annotation, i.e.
/// if the last two (non-whitespace, non-comment) tokens in its value are
/// a <delim-token> with the value "!" followed by an <ident-token> with
/// a value that is an ASCII case-insensitive match for "important"."
fn trim_important(value: &mut Vec<ComponentValue>) {
    fn trim_whitespace(value: &mut Vec<ComponentValue>) {
        while matches!(
            value.last(),
            Some(ComponentValue::Token(CSSToken::Whitespace))
        ) {
            let _ = value.pop();
        }
    }

    trim_whitespace(value);
    if !matches!(
        value.last(),
        Some(ComponentValue::Token(CSSToken::Ident(s))) if s.eq_ignore_ascii_case("important")
    ) {
        return;
    }

    let mut bang = value.len() - 1;
    while bang > 0 && value[bang - 1] == ComponentValue::Token(CSSToken::Whitespace) {
        bang -= 1;
    }
    if bang > 0 && value[bang - 1] == ComponentValue::Token(CSSToken::Delim('!')) {
        value.truncate(bang - 1);
        trim_whitespace(value);
    }
}
