//! Markup escaping.

use std::borrow::Cow;

const ENTITIES: &[(char, &str)] = &[
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#39;"),
];

fn entity(ch: char) -> Option<&'static str> {
    ENTITIES
        .iter()
        .find(|(special, _)| *special == ch)
        .map(|(_, escaped)| *escaped)
}

/// Appends `text` to `out` with markup-special characters escaped.
pub fn push_escaped(out: &mut String, text: &str) {
    let mut last = 0;
    for (idx, ch) in text.char_indices() {
        if let Some(escaped) = entity(ch) {
            out.push_str(&text[last..idx]);
            out.push_str(escaped);
            last = idx + ch.len_utf8();
        }
    }
    out.push_str(&text[last..]);
}

/// Escapes `&`, `<`, `>`, `"` and `'`, borrowing when nothing needs escaping.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|ch| entity(ch).is_some()) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    push_escaped(&mut out, text);
    Cow::Owned(out)
}

/// Reverses [`escape_html`]. Unknown entities are left untouched.
pub fn unescape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match ENTITIES
            .iter()
            .find(|(_, escaped)| rest.starts_with(escaped))
        {
            Some((ch, escaped)) => {
                out.push(*ch);
                rest = &rest[escaped.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Removes span wrappers from highlighted markup and unescapes the rest,
/// recovering the original source text.
///
/// Every literal `<` is escaped in highlighted output, so any `<` seen here
/// opens a tag.
pub fn strip_markup(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        rest = match rest[open..].find('>') {
            Some(close) => &rest[open + close + 1..],
            None => "",
        };
    }
    text.push_str(rest);
    unescape_html(&text)
}
