use strum_macros::Display;

use super::character_reference;
use super::token::{Attribute, Token};

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The subset of tokenizer states this renderer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    RAWTEXT,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    ///
    /// Collapsed: everything up to the next `-->` is comment data.
    Comment,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    ///
    /// Collapsed: the first word is the name, the rest up to `>` is skipped.
    DOCTYPE,
}

/// A lenient HTML tokenizer.
///
/// ```
/// use wren_html::{HTMLTokenizer, Token};
///
/// let mut tokenizer = HTMLTokenizer::new("<p class=a>x</p>");
/// tokenizer.run();
/// let tokens = tokenizer.into_tokens();
/// assert!(matches!(tokens[0], Token::StartTag { .. }));
/// ```
pub struct HTMLTokenizer {
    input: Vec<char>,
    position: usize,
    state: TokenizerState,
    current_input_character: Option<char>,
    reconsume: bool,
    current_token: Option<Token>,
    last_start_tag_name: Option<String>,
    token_stream: Vec<Token>,
    issues: Vec<String>,
}

impl HTMLTokenizer {
    /// Create a tokenizer over `input`. Carriage returns are normalized to
    /// line feeds up front.
    ///
    /// [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.replace("\r\n", "\n").replace('\r', "\n").chars().collect(),
            position: 0,
            state: TokenizerState::Data,
            current_input_character: None,
            reconsume: false,
            current_token: None,
            last_start_tag_name: None,
            token_stream: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Consume the tokenizer and return its tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// Parse errors encountered so far.
    #[must_use]
    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    /// Run the state machine to the end of input.
    pub fn run(&mut self) {
        loop {
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.consume();
            }

            let done = match self.state {
                TokenizerState::Data => self.handle_data_state(),
                TokenizerState::RAWTEXT => self.handle_rawtext_state(),
                TokenizerState::TagOpen => self.handle_tag_open_state(),
                TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
                TokenizerState::TagName => self.handle_tag_name_state(),
                TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
                TokenizerState::AttributeName => self.handle_attribute_name_state(),
                TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
                TokenizerState::BeforeAttributeValue => {
                    self.handle_before_attribute_value_state()
                }
                TokenizerState::AttributeValueDoubleQuoted => {
                    self.handle_attribute_value_quoted_state('"')
                }
                TokenizerState::AttributeValueSingleQuoted => {
                    self.handle_attribute_value_quoted_state('\'')
                }
                TokenizerState::AttributeValueUnquoted => {
                    self.handle_attribute_value_unquoted_state()
                }
                TokenizerState::AfterAttributeValueQuoted => {
                    self.handle_after_attribute_value_quoted_state()
                }
                TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
                TokenizerState::BogusComment => self.handle_bogus_comment_state(),
                TokenizerState::MarkupDeclarationOpen => {
                    self.handle_markup_declaration_open_state()
                }
                TokenizerState::Comment => self.handle_comment_state(),
                TokenizerState::DOCTYPE => self.handle_doctype_state(),
            };

            if done {
                self.token_stream.push(Token::EndOfFile);
                break;
            }
        }
    }

    // -------------------------------------------------------------------------
    // State handlers. Each returns true once end of input has been reached.
    // -------------------------------------------------------------------------

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) -> bool {
        match self.current_input_character {
            // "U+0026 AMPERSAND (&)"
            Some('&') => {
                let text = self.consume_character_reference();
                for c in text.chars() {
                    self.emit_character(c);
                }
            }
            // "U+003C LESS-THAN SIGN (<)" "Switch to the tag open state."
            Some('<') => self.switch_to(TokenizerState::TagOpen),
            Some(c) => self.emit_character(c),
            None => return true,
        }
        false
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Only an "appropriate end tag" (`</` + the last start tag name) leaves
    /// this state; everything else is text.
    fn handle_rawtext_state(&mut self) -> bool {
        match self.current_input_character {
            Some('<') if self.at_appropriate_end_tag() => {
                self.position += 1;
                self.switch_to(TokenizerState::EndTagOpen);
            }
            Some(c) => self.emit_character(c),
            None => return true,
        }
        false
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) -> bool {
        match self.current_input_character {
            Some('!') => self.switch_to(TokenizerState::MarkupDeclarationOpen),
            Some('/') => self.switch_to(TokenizerState::EndTagOpen),
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_start_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            // "unexpected-question-mark-instead-of-tag-name parse error"
            Some('?') => {
                self.parse_error("unexpected-question-mark-instead-of-tag-name");
                self.current_token = Some(Token::new_comment());
                self.reconsume_in(TokenizerState::BogusComment);
            }
            Some(_) => {
                self.parse_error("invalid-first-character-of-tag-name");
                self.emit_character('<');
                self.reconsume_in(TokenizerState::Data);
            }
            None => {
                self.emit_character('<');
                return true;
            }
        }
        false
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) -> bool {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            Some('>') => {
                self.parse_error("missing-end-tag-name");
                self.switch_to(TokenizerState::Data);
            }
            Some(_) => {
                self.parse_error("invalid-first-character-of-tag-name");
                self.current_token = Some(Token::new_comment());
                self.reconsume_in(TokenizerState::BogusComment);
            }
            None => {
                self.emit_character('<');
                self.emit_character('/');
                return true;
            }
        }
        false
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) -> bool {
        match self.current_input_character {
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "ASCII upper alpha: Append the lowercase version of the current
            // input character to the current tag token's tag name."
            Some(c) => {
                if let Some(Token::StartTag { name, .. } | Token::EndTag { name }) =
                    &mut self.current_token
                {
                    name.push(c.to_ascii_lowercase());
                }
            }
            None => {
                self.parse_error("eof-in-tag");
                return true;
            }
        }
        false
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) -> bool {
        match self.current_input_character {
            Some(c) if is_whitespace_char(c) => {}
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            // "unexpected-equals-sign-before-attribute-name parse error. Start a
            // new attribute ... Set that attribute's name to the current input
            // character"
            Some('=') => {
                self.parse_error("unexpected-equals-sign-before-attribute-name");
                self.start_new_attribute();
                self.push_to_attribute_name('=');
                self.switch_to(TokenizerState::AttributeName);
            }
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
        false
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) -> bool {
        match self.current_input_character {
            Some(c) if is_whitespace_char(c) => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some(c) => self.push_to_attribute_name(c.to_ascii_lowercase()),
        }
        false
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) -> bool {
        match self.current_input_character {
            Some(c) if is_whitespace_char(c) => {}
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
            None => {
                self.parse_error("eof-in-tag");
                return true;
            }
        }
        false
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) -> bool {
        match self.current_input_character {
            Some(c) if is_whitespace_char(c) => {}
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            Some('>') => {
                self.parse_error("missing-attribute-value");
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            _ => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
        false
    }

    /// [§ 13.2.5.36](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// and [§ 13.2.5.37](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_quoted_state(&mut self, quote: char) -> bool {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            Some('&') => {
                let text = self.consume_character_reference();
                for c in text.chars() {
                    self.push_to_attribute_value(c);
                }
            }
            Some(c) => self.push_to_attribute_value(c),
            None => {
                self.parse_error("eof-in-tag");
                return true;
            }
        }
        false
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) -> bool {
        match self.current_input_character {
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('&') => {
                let text = self.consume_character_reference();
                for c in text.chars() {
                    self.push_to_attribute_value(c);
                }
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(c) => self.push_to_attribute_value(c),
            None => {
                self.parse_error("eof-in-tag");
                return true;
            }
        }
        false
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) -> bool {
        match self.current_input_character {
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(_) => {
                self.parse_error("missing-whitespace-between-attributes");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
            None => {
                self.parse_error("eof-in-tag");
                return true;
            }
        }
        false
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) -> bool {
        match self.current_input_character {
            Some('>') => {
                if let Some(Token::StartTag { self_closing, .. }) = &mut self.current_token {
                    *self_closing = true;
                }
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(_) => {
                self.parse_error("unexpected-solidus-in-tag");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
            None => {
                self.parse_error("eof-in-tag");
                return true;
            }
        }
        false
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    fn handle_bogus_comment_state(&mut self) -> bool {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(c) => self.push_to_comment(c),
            None => {
                self.emit_token();
                return true;
            }
        }
        false
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// The character that brought us here has already been consumed, so the
    /// lookahead starts at `current_input_character`.
    fn handle_markup_declaration_open_state(&mut self) -> bool {
        self.position -= usize::from(self.current_input_character.is_some());
        if self.next_few_characters_are("--", false) {
            self.position += 2;
            self.current_token = Some(Token::new_comment());
            self.switch_to(TokenizerState::Comment);
        } else if self.next_few_characters_are("DOCTYPE", true) {
            self.position += "DOCTYPE".len();
            self.switch_to(TokenizerState::DOCTYPE);
        } else {
            self.parse_error("incorrectly-opened-comment");
            self.current_token = Some(Token::new_comment());
            self.switch_to(TokenizerState::BogusComment);
        }
        false
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    fn handle_comment_state(&mut self) -> bool {
        match self.current_input_character {
            Some('-') if self.next_few_characters_are("->", false) => {
                self.position += 2;
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(c) => self.push_to_comment(c),
            None => {
                self.parse_error("eof-in-comment");
                self.emit_token();
                return true;
            }
        }
        false
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    fn handle_doctype_state(&mut self) -> bool {
        let mut body = String::new();
        let mut current = self.current_input_character;
        while let Some(c) = current {
            if c == '>' {
                break;
            }
            body.push(c);
            current = self.consume();
        }
        let name = body
            .split_ascii_whitespace()
            .next()
            .map(str::to_ascii_lowercase);
        self.token_stream.push(Token::Doctype { name });
        self.switch_to(TokenizerState::Data);
        current.is_none()
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    /// "Consume the next input character"
    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.position).copied();
        if c.is_some() {
            self.position += 1;
        }
        c
    }

    /// "Switch to the X state"
    const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// "If the next few characters are..."
    fn next_few_characters_are(&self, target: &str, case_insensitive: bool) -> bool {
        let mut i = self.position;
        for t in target.chars() {
            match self.input.get(i) {
                Some(c) if *c == t || (case_insensitive && c.eq_ignore_ascii_case(&t)) => i += 1,
                _ => return false,
            }
        }
        true
    }

    /// Whether the input after the current `<` reads `/name` followed by
    /// whitespace, `/` or `>`, where `name` is the last start tag name.
    fn at_appropriate_end_tag(&self) -> bool {
        let Some(name) = &self.last_start_tag_name else {
            return false;
        };
        if self.input.get(self.position) != Some(&'/') {
            return false;
        }
        let start = self.position + 1;
        let matches_name = name.chars().enumerate().all(|(i, n)| {
            self.input
                .get(start + i)
                .is_some_and(|c| c.eq_ignore_ascii_case(&n))
        });
        matches_name
            && self
                .input
                .get(start + name.chars().count())
                .is_none_or(|&c| c == '>' || c == '/' || is_whitespace_char(c))
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// Called after the `&` has been consumed. Returns the replacement text,
    /// or the literal source text when nothing is recognised.
    fn consume_character_reference(&mut self) -> String {
        let start = self.position;

        if self.input.get(start) == Some(&'#') {
            let hex = matches!(self.input.get(start + 1), Some('x' | 'X'));
            let digits_start = start + 1 + usize::from(hex);
            let radix = if hex { 16 } else { 10 };
            let mut end = digits_start;
            while self.input.get(end).is_some_and(|c| c.is_digit(radix)) {
                end += 1;
            }
            if end == digits_start {
                self.parse_error("absence-of-digits-in-numeric-character-reference");
                return "&".to_string();
            }
            let digits: String = self.input[digits_start..end].iter().collect();
            let code = u32::from_str_radix(&digits, radix).unwrap_or(u32::MAX);
            self.position = end;
            if self.input.get(self.position) == Some(&';') {
                self.position += 1;
            } else {
                self.parse_error("missing-semicolon-after-character-reference");
            }
            return character_reference::numeric(code).to_string();
        }

        let mut end = start;
        while self
            .input
            .get(end)
            .is_some_and(char::is_ascii_alphanumeric)
            && end - start < 32
        {
            end += 1;
        }
        if self.input.get(end) == Some(&';') {
            let name: String = self.input[start..end].iter().collect();
            if let Some(c) = character_reference::lookup_named(&name) {
                self.position = end + 1;
                return c.to_string();
            }
        }
        "&".to_string()
    }

    fn emit_character(&mut self, c: char) {
        self.token_stream.push(Token::Character { data: c });
    }

    /// "Emit the current token"
    ///
    /// Start tags of `style` and `script` switch the tokenizer to RAWTEXT, a
    /// decision the tree builder would make in a full parser.
    fn emit_token(&mut self) {
        let Some(token) = self.current_token.take() else {
            return;
        };
        if let Token::StartTag {
            name, self_closing, ..
        } = &token
        {
            self.last_start_tag_name = Some(name.clone());
            if !self_closing && matches!(name.as_str(), "style" | "script") {
                self.switch_to(TokenizerState::RAWTEXT);
            }
        }
        self.token_stream.push(token);
    }

    fn start_new_attribute(&mut self) {
        if let Some(Token::StartTag { attributes, .. }) = &mut self.current_token {
            attributes.push(Attribute {
                name: String::new(),
                value: String::new(),
            });
        }
    }

    fn current_attribute(&mut self) -> Option<&mut Attribute> {
        match &mut self.current_token {
            Some(Token::StartTag { attributes, .. }) => attributes.last_mut(),
            _ => None,
        }
    }

    fn push_to_attribute_name(&mut self, c: char) {
        if let Some(attr) = self.current_attribute() {
            attr.name.push(c);
        }
    }

    fn push_to_attribute_value(&mut self, c: char) {
        if let Some(attr) = self.current_attribute() {
            attr.value.push(c);
        }
    }

    fn push_to_comment(&mut self, c: char) {
        if let Some(Token::Comment { data }) = &mut self.current_token {
            data.push(c);
        }
    }

    fn parse_error(&mut self, message: &str) {
        self.issues
            .push(format!("{message} at character {}", self.position));
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM
/// FEED (FF), U+0020 SPACE"
const fn is_whitespace_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C')
}
