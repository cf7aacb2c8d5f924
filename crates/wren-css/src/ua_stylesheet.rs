//! User-Agent Stylesheet
//!
//! [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
//!
//! "User agents are expected to have a default style sheet that presents elements
//! of HTML documents in ways consistent with general user expectations."
//!
//! UA rules only fill properties the author stylesheet leaves unset; see
//! [`compute_style_map_with_defaults`](crate::cascade::compute_style_map_with_defaults).

use std::sync::OnceLock;

use crate::parser::{Stylesheet, parse_stylesheet};

/// [WHATWG HTML § 15.3 Rendering: Suggested default style sheet](https://html.spec.whatwg.org/multipage/rendering.html#the-css-user-agent-style-sheet-and-presentational-hints)
///
/// Default display values, mapped onto the box kinds this renderer lays out.
const UA_CSS: &str = r"
/* [§ 15.3.1 Hidden elements](https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements) */
/* 'The following elements must have their display property set to none.' */
head, link, meta, script, style, title, template {
    display: none;
}

/* [§ 15.3.8 Text-level semantics](https://html.spec.whatwg.org/multipage/rendering.html#text-level-semantics) */
a, abbr, b, cite, code, em, i, kbd, q, s, small, span, strong, sub, sup, u, var {
    display: inline;
}

/* [§ 15.4.3 Embedded content](https://html.spec.whatwg.org/multipage/rendering.html#embedded-content-rendering-rules) */
img {
    display: img;
}

/* [§ 15.3.10 Tables](https://html.spec.whatwg.org/multipage/rendering.html#tables-2) */
table {
    display: table;
}

tr {
    display: table-row;
}

td, th {
    display: table-cell;
}
";

/// Return the parsed UA stylesheet, parsing only once.
pub fn ua_stylesheet() -> &'static Stylesheet {
    static STYLESHEET: OnceLock<Stylesheet> = OnceLock::new();
    STYLESHEET.get_or_init(|| parse_stylesheet(UA_CSS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::Value;

    #[test]
    fn test_ua_stylesheet_parses_every_rule() {
        let sheet = ua_stylesheet();
        assert_eq!(sheet.rules.len(), 6);
        let img = &sheet.rules[2];
        assert_eq!(img.declarations[0].value, Value::keyword("img"));
    }
}
