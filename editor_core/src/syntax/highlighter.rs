//! Line-based syntax highlighter.
//!
//! Every physical line is scanned independently: the first `//` starts a
//! comment that runs to the end of the line, and the code before it is split
//! into tokens by a fixed precedence (whitespace, string, number, word, single
//! character). No state is carried from one line to the next, so a string
//! containing `//` is cut at the marker.

use super::escape::push_escaped;
use super::reserved::classify_word;
use super::theme::TokenKind;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+").expect("whitespace pattern is valid"));
static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?").expect("number pattern is valid"));
static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").expect("word pattern is valid"));

const COMMENT_MARKER: &str = "//";

/// A classified run of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    /// Classification.
    pub kind: TokenKind,
    /// The exact source text, unescaped.
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// Creates a new token.
    pub fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

/// The tokens of one physical line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LineTokens<'a> {
    /// Tokens of the code part, in order, covering it without gaps.
    pub tokens: Vec<Token<'a>>,
    /// Trailing comment including the `//` marker.
    pub comment: Option<&'a str>,
}

impl<'a> LineTokens<'a> {
    /// Iterates over all tokens, the comment last.
    pub fn iter(&self) -> impl Iterator<Item = Token<'a>> + '_ {
        self.tokens
            .iter()
            .copied()
            .chain(self.comment.map(|c| Token::new(TokenKind::Comment, c)))
    }

    /// Reassembles the original line.
    pub fn text(&self) -> String {
        self.iter().map(|t| t.text).collect()
    }
}

/// Tokenizes a single line. `line` must not contain `\n`.
pub fn tokenize_line(line: &str) -> LineTokens<'_> {
    let (code, comment) = match line.find(COMMENT_MARKER) {
        Some(idx) => (&line[..idx], Some(&line[idx..])),
        None => (line, None),
    };
    LineTokens {
        tokens: scan_code(code),
        comment,
    }
}

/// Tokenizes text, one entry per line.
pub fn tokenize(text: &str) -> Vec<LineTokens<'_>> {
    text.split('\n').map(tokenize_line).collect()
}

fn scan_code(code: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < code.len() {
        let rest = &code[pos..];
        let Some(first) = rest.chars().next() else {
            break;
        };

        let (len, kind) = if let Some(m) = WHITESPACE.find(rest) {
            (m.end(), TokenKind::PlainText)
        } else if first == '"' || first == '\'' {
            (string_len(rest, first), TokenKind::String)
        } else if let Some(m) = NUMBER.find(rest) {
            (m.end(), TokenKind::Number)
        } else if let Some(m) = WORD.find(rest) {
            (m.end(), classify_word(m.as_str()))
        } else {
            (first.len_utf8(), TokenKind::Symbol)
        };

        tokens.push(Token::new(kind, &rest[..len]));
        pos += len;
    }

    tokens
}

/// Length of a string literal at the start of `rest`, through the closing
/// quote or to the end when unterminated.
fn string_len(rest: &str, quote: char) -> usize {
    let body = quote.len_utf8();
    rest[body..]
        .find(quote)
        .map(|idx| body + idx + quote.len_utf8())
        .unwrap_or(rest.len())
}

/// Markup settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupStyle {
    class_prefix: Cow<'static, str>,
}

impl MarkupStyle {
    /// Creates a style with a custom class prefix.
    ///
    /// Returns `None` unless the prefix is empty or made only of ASCII
    /// letters, digits, `-` and `_`, since it lands unescaped in both the
    /// `class` attribute and stylesheet selectors.
    pub fn with_prefix(prefix: impl Into<Cow<'static, str>>) -> Option<Self> {
        let class_prefix = prefix.into();
        if !Self::is_valid_prefix(&class_prefix) {
            return None;
        }
        Some(Self { class_prefix })
    }

    /// Returns true if `prefix` can be used as a class prefix.
    pub fn is_valid_prefix(prefix: &str) -> bool {
        prefix
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    }

    /// Class emitted before the kind class on every span.
    pub fn class_prefix(&self) -> &str {
        &self.class_prefix
    }
}

impl Default for MarkupStyle {
    fn default() -> Self {
        Self {
            class_prefix: Cow::Borrowed("token"),
        }
    }
}

/// Column spans of the classified tokens on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHighlights {
    /// Each entry is (start_col, end_col, kind), columns in characters.
    spans: Vec<(usize, usize, TokenKind)>,
}

impl LineHighlights {
    /// Creates empty line highlights.
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// Builds the spans for a tokenized line. Unwrapped kinds get no span.
    pub fn from_tokens(line: &LineTokens<'_>) -> Self {
        let mut highlights = Self::new();
        let mut col = 0;
        for token in line.iter() {
            let width = token.text.chars().count();
            if token.kind.class_name().is_some() {
                highlights.add_span(col, col + width, token.kind);
            }
            col += width;
        }
        highlights
    }

    /// Adds a span to the line.
    pub fn add_span(&mut self, start_col: usize, end_col: usize, kind: TokenKind) {
        self.spans.push((start_col, end_col, kind));
    }

    /// Returns the kind at a given column, or None if unclassified.
    pub fn style_at(&self, col: usize) -> Option<TokenKind> {
        self.spans
            .iter()
            .find(|&&(start, end, _)| col >= start && col < end)
            .map(|&(_, _, kind)| kind)
    }

    /// Returns all spans for this line.
    pub fn spans(&self) -> &[(usize, usize, TokenKind)] {
        &self.spans
    }
}

impl Default for LineHighlights {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders source text as classified, escaped markup.
#[derive(Debug, Clone, Default)]
pub struct SyntaxHighlighter {
    style: MarkupStyle,
}

impl SyntaxHighlighter {
    /// Creates a highlighter with the default `token` class prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a highlighter with a custom markup style.
    pub fn with_style(style: MarkupStyle) -> Self {
        Self { style }
    }

    /// Highlights the whole text. Line breaks are preserved one for one.
    pub fn highlight(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() * 2);
        self.highlight_into(text, &mut out);
        out
    }

    /// Appends the highlighted text to `out`.
    pub fn highlight_into(&self, text: &str, out: &mut String) {
        for (idx, line) in text.split('\n').enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            self.push_line(&tokenize_line(line), out);
        }
    }

    /// Highlights a single line. `line` must not contain `\n`.
    pub fn highlight_line(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len() * 2);
        self.push_line(&tokenize_line(line), &mut out);
        out
    }

    /// Returns column spans for every line of `text`.
    pub fn line_highlights(&self, text: &str) -> Vec<LineHighlights> {
        tokenize(text).iter().map(LineHighlights::from_tokens).collect()
    }

    fn push_line(&self, line: &LineTokens<'_>, out: &mut String) {
        for token in line.iter() {
            self.push_token(token, out);
        }
    }

    fn push_token(&self, token: Token<'_>, out: &mut String) {
        let Some(class) = token.kind.class_name() else {
            push_escaped(out, token.text);
            return;
        };
        out.push_str("<span class=\"");
        let prefix = self.style.class_prefix();
        if !prefix.is_empty() {
            out.push_str(prefix);
            out.push(' ');
        }
        out.push_str(class);
        out.push_str("\">");
        push_escaped(out, token.text);
        out.push_str("</span>");
    }
}

/// Highlights `text` with the default markup style.
pub fn highlight(text: &str) -> String {
    SyntaxHighlighter::new().highlight(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::escape::strip_markup;

    fn kinds(line: &str) -> Vec<(TokenKind, &str)> {
        tokenize_line(line).iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_keyword_line() {
        assert_eq!(
            kinds("let x = 10;"),
            vec![
                (TokenKind::Keyword, "let"),
                (TokenKind::PlainText, " "),
                (TokenKind::PlainText, "x"),
                (TokenKind::PlainText, " "),
                (TokenKind::Symbol, "="),
                (TokenKind::PlainText, " "),
                (TokenKind::Number, "10"),
                (TokenKind::Symbol, ";"),
            ]
        );
        assert_eq!(
            highlight("let x = 10;"),
            "<span class=\"token keyword\">let</span> x = <span class=\"token number\">10</span>;"
        );
    }

    #[test]
    fn test_boolean_not_keyword() {
        assert_eq!(highlight("true"), "<span class=\"token boolean\">true</span>");
        assert_eq!(highlight("false"), "<span class=\"token boolean\">false</span>");
    }

    #[test]
    fn test_comment_rest_of_line() {
        let line = tokenize_line("print(x); // compute");
        assert_eq!(line.comment, Some("// compute"));
        assert_eq!(
            highlight("print(x); // compute"),
            "<span class=\"token keyword\">print</span>(x); <span class=\"token comment\">// compute</span>"
        );
    }

    #[test]
    fn test_comment_only_line() {
        let line = tokenize_line("//");
        assert!(line.tokens.is_empty());
        assert_eq!(line.comment, Some("//"));
    }

    #[test]
    fn test_comment_inside_string_truncates() {
        let line = tokenize_line(r#"let url = "http://x";"#);
        assert_eq!(line.comment, Some(r#"//x";"#));
        assert_eq!(line.tokens.last(), Some(&Token::new(TokenKind::String, "\"http:")));
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            kinds("let s = \"abc"),
            vec![
                (TokenKind::Keyword, "let"),
                (TokenKind::PlainText, " "),
                (TokenKind::PlainText, "s"),
                (TokenKind::PlainText, " "),
                (TokenKind::Symbol, "="),
                (TokenKind::PlainText, " "),
                (TokenKind::String, "\"abc"),
            ]
        );
        assert_eq!(
            highlight("let s = \"abc"),
            "<span class=\"token keyword\">let</span> s = <span class=\"token string\">&quot;abc</span>"
        );
    }

    #[test]
    fn test_lone_quote_at_end() {
        assert_eq!(kinds("x'"), vec![(TokenKind::PlainText, "x"), (TokenKind::String, "'")]);
    }

    #[test]
    fn test_strings_match_same_quote() {
        assert_eq!(
            kinds(r#"'a"b' "c'd""#),
            vec![
                (TokenKind::String, r#"'a"b'"#),
                (TokenKind::PlainText, " "),
                (TokenKind::String, r#""c'd""#),
            ]
        );
    }

    #[test]
    fn test_escapes_not_interpreted() {
        assert_eq!(
            kinds(r#""a\"b""#),
            vec![(TokenKind::String, r#""a\""#), (TokenKind::PlainText, "b"), (TokenKind::String, "\"")]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("3.14"), vec![(TokenKind::Number, "3.14")]);
        assert_eq!(
            kinds("1.2.3"),
            vec![(TokenKind::Number, "1.2"), (TokenKind::Symbol, "."), (TokenKind::Number, "3")]
        );
        assert_eq!(kinds("12."), vec![(TokenKind::Number, "12"), (TokenKind::Symbol, ".")]);
        assert_eq!(kinds("x1"), vec![(TokenKind::PlainText, "x1")]);
        assert_eq!(kinds("1x"), vec![(TokenKind::Number, "1"), (TokenKind::PlainText, "x")]);
    }

    #[test]
    fn test_exact_word_match() {
        assert_eq!(kinds("letter"), vec![(TokenKind::PlainText, "letter")]);
        assert_eq!(kinds("_if"), vec![(TokenKind::PlainText, "_if")]);
        assert_eq!(kinds("trueish"), vec![(TokenKind::PlainText, "trueish")]);
    }

    #[test]
    fn test_escaping() {
        assert_eq!(highlight("a < b"), "a &lt; b");
        assert_eq!(
            highlight("'<&>'"),
            "<span class=\"token string\">&#39;&lt;&amp;&gt;&#39;</span>"
        );
        assert_eq!(
            highlight("// <b>"),
            "<span class=\"token comment\">// &lt;b&gt;</span>"
        );
    }

    #[test]
    fn test_non_ascii_fallback() {
        assert_eq!(
            kinds("é+ñ"),
            vec![(TokenKind::Symbol, "é"), (TokenKind::Symbol, "+"), (TokenKind::Symbol, "ñ")]
        );
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(highlight(""), "");
        assert_eq!(highlight("\n"), "\n");
        assert_eq!(highlight("   \t"), "   \t");
        assert_eq!(highlight("a\n\nb\n"), "a\n\nb\n");
    }

    #[test]
    fn test_multiline_independent() {
        assert_eq!(
            highlight("if (true) // a\nreturn 0;"),
            "<span class=\"token keyword\">if</span> (<span class=\"token boolean\">true</span>) <span class=\"token comment\">// a</span>\n<span class=\"token keyword\">return</span> <span class=\"token number\">0</span>;"
        );
    }

    #[test]
    fn test_custom_prefix() {
        let style = MarkupStyle::with_prefix("hl").unwrap();
        let highlighter = SyntaxHighlighter::with_style(style);
        assert_eq!(highlighter.highlight("void"), "<span class=\"hl keyword\">void</span>");

        let bare = SyntaxHighlighter::with_style(MarkupStyle::with_prefix("").unwrap());
        assert_eq!(bare.highlight_line("7"), "<span class=\"number\">7</span>");
    }

    #[test]
    fn test_prefix_cannot_break_markup() {
        assert!(MarkupStyle::with_prefix("a\" onmouseover=\"x").is_none());
        assert!(MarkupStyle::with_prefix("a>b").is_none());
        assert!(MarkupStyle::with_prefix("two words").is_none());
        assert!(MarkupStyle::with_prefix(String::from("&amp;")).is_none());

        let style = MarkupStyle::with_prefix(String::from("cs-tok_2")).unwrap();
        assert_eq!(style.class_prefix(), "cs-tok_2");
        let markup = SyntaxHighlighter::with_style(style).highlight("let");
        assert_eq!(markup, "<span class=\"cs-tok_2 keyword\">let</span>");
        assert_eq!(strip_markup(&markup), "let");
    }

    #[test]
    fn test_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyntaxHighlighter>();
    }

    #[test]
    fn test_highlight_into_appends() {
        let mut out = String::from(">");
        SyntaxHighlighter::new().highlight_into("x", &mut out);
        assert_eq!(out, ">x");
    }

    #[test]
    fn test_line_text_roundtrip() {
        for line in ["let s = 'a // b' + 1.5;", "", "  \"open", "α β // γ"] {
            assert_eq!(tokenize_line(line).text(), line);
        }
    }

    #[test]
    fn test_line_highlights() {
        let lines = SyntaxHighlighter::new().line_highlights("é let x = 'ab'; // c\n");
        assert_eq!(lines.len(), 2);
        let first = &lines[0];
        assert_eq!(
            first.spans(),
            &[
                (2, 5, TokenKind::Keyword),
                (10, 14, TokenKind::String),
                (16, 20, TokenKind::Comment),
            ]
        );
        assert_eq!(first.style_at(0), None);
        assert_eq!(first.style_at(3), Some(TokenKind::Keyword));
        assert_eq!(first.style_at(19), Some(TokenKind::Comment));
        assert!(lines[1].spans().is_empty());
    }
}
