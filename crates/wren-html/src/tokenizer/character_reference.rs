//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
//!
//! Only the references that commonly appear in hand-written documents are
//! recognised. Anything else is passed through literally.

/// `(name, replacement)` pairs, names without the leading `&` and trailing `;`.
const NAMED_CHARACTER_REFERENCES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{00A0}'),
    ("copy", '\u{00A9}'),
    ("reg", '\u{00AE}'),
    ("trade", '\u{2122}'),
    ("times", '\u{00D7}'),
    ("middot", '\u{00B7}'),
    ("laquo", '\u{00AB}'),
    ("raquo", '\u{00BB}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("hellip", '\u{2026}'),
    ("euro", '\u{20AC}'),
];

/// Look up a named character reference.
pub(super) fn lookup_named(name: &str) -> Option<char> {
    NAMED_CHARACTER_REFERENCES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, c)| c)
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is 0x00, then this is a null-character-reference parse
/// error. Set the character reference code to 0xFFFD."
/// "If the number is greater than 0x10FFFF ... or is a surrogate ... set the
/// character reference code to 0xFFFD."
pub(super) fn numeric(code: u32) -> char {
    if code == 0 {
        return char::REPLACEMENT_CHARACTER;
    }
    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
}
