//! Text escaping collaborator
//!
//! The legacy dialect stores element text HTML-escaped once, and decoded
//! attribute values are unescaped once more on top of XML attribute
//! unescaping. Both directions go through an injected [`Escaper`].

use std::borrow::Cow;

/// Escapes element text on encode, unescapes values on decode
pub trait Escaper: Send + Sync {
    /// Escape text for use as element content
    ///
    /// The result is written verbatim and must be valid XML character data.
    fn escape<'a>(&self, text: &'a str) -> Cow<'a, str>;

    /// Reverse [`Escaper::escape`]
    ///
    /// Never fails: text that is not a valid escape sequence comes back
    /// unchanged.
    fn unescape<'a>(&self, text: &'a str) -> Cow<'a, str>;
}

/// HTML special-character escaping (`& < > " '`)
///
/// Unescaping only recognises the special-character entities. Any other `&`
/// sequence, numeric references included, is kept as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscaper;

const SPECIAL_ENTITIES: [(&str, char); 7] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#039;", '\''),
    ("&#39;", '\''),
    ("&apos;", '\''),
];

fn special_entity(text: &str) -> Option<(&'static str, char)> {
    SPECIAL_ENTITIES
        .iter()
        .copied()
        .find(|(entity, _)| text.starts_with(entity))
}

impl Escaper for HtmlEscaper {
    fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        quick_xml::escape::escape(text)
    }

    fn unescape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut unescaped = String::new();
        let mut copied = 0;
        let mut rest = text;

        while let Some(at) = rest.find('&') {
            let offset = text.len() - rest.len() + at;
            match special_entity(&text[offset..]) {
                Some((entity, ch)) => {
                    unescaped.push_str(&text[copied..offset]);
                    unescaped.push(ch);
                    copied = offset + entity.len();
                    rest = &text[copied..];
                }
                None => rest = &text[offset + 1..],
            }
        }

        if copied == 0 {
            return Cow::Borrowed(text);
        }
        unescaped.push_str(&text[copied..]);
        Cow::Owned(unescaped)
    }
}
