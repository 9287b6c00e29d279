//! Theme system for syntax highlighting.
//!
//! Defines token kinds, their markup class names, and the stylesheets that
//! colour them.

use super::escape::escape_html;
use super::highlighter::MarkupStyle;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write;

/// Token classification categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Reserved words (let, if, function, etc.)
    Keyword,
    /// Boolean literals (true, false)
    Boolean,
    /// Numeric literals (integers, decimals)
    Number,
    /// String literals, single or double quoted
    String,
    /// Line comments, marker included
    Comment,
    /// Identifiers and whitespace
    PlainText,
    /// Any other single character
    Symbol,
}

impl TokenKind {
    /// Every kind that is wrapped in a span.
    pub const WRAPPED: [TokenKind; 5] = [
        TokenKind::Keyword,
        TokenKind::Boolean,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Comment,
    ];

    /// Returns the markup class for this kind, or `None` if it is emitted
    /// unwrapped.
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            Self::Keyword => Some("keyword"),
            Self::Boolean => Some("boolean"),
            Self::Number => Some("number"),
            Self::String => Some("string"),
            Self::Comment => Some("comment"),
            Self::PlainText | Self::Symbol => None,
        }
    }
}

/// RGB color.
pub type Color = [u8; 3];

fn css_hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// A syntax highlighting theme.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme name.
    pub name: String,
    /// Editor background color.
    pub background: Color,
    /// Default text color.
    pub foreground: Color,
    /// Colors for each token kind.
    colors: HashMap<TokenKind, Color>,
}

impl Theme {
    /// Creates a new theme with the given name and default colors.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            background: [0x1a, 0x1a, 0x1f],
            foreground: [0xe6, 0xe6, 0xe6],
            colors: HashMap::new(),
        }
    }

    /// Sets the color for a token kind.
    pub fn set_color(&mut self, kind: TokenKind, color: Color) {
        self.colors.insert(kind, color);
    }

    /// Gets the color for a token kind, falling back to foreground.
    pub fn color(&self, kind: TokenKind) -> Color {
        self.colors.get(&kind).copied().unwrap_or(self.foreground)
    }

    /// Creates the default dark theme (similar to One Dark).
    pub fn dark() -> Self {
        let mut theme = Self::new("dark");

        theme.background = [0x1a, 0x1a, 0x1f];
        theme.foreground = [0xab, 0xb2, 0xbf];

        theme.set_color(TokenKind::Keyword, [0xc4, 0x77, 0xd6]);
        theme.set_color(TokenKind::String, [0x98, 0xc3, 0x79]);
        theme.set_color(TokenKind::Number, [0xd2, 0x9b, 0x77]);
        theme.set_color(TokenKind::Boolean, [0xd2, 0x9b, 0x77]);
        theme.set_color(TokenKind::Comment, [0x74, 0x81, 0x8e]);

        theme
    }

    /// Creates a light theme.
    pub fn light() -> Self {
        let mut theme = Self::new("light");

        theme.background = [0xfb, 0xfb, 0xfb];
        theme.foreground = [0x3b, 0x42, 0x52];

        theme.set_color(TokenKind::Keyword, [0xa0, 0x50, 0xb4]);
        theme.set_color(TokenKind::String, [0x4e, 0x9a, 0x06]);
        theme.set_color(TokenKind::Number, [0x1d, 0x67, 0xcd]);
        theme.set_color(TokenKind::Boolean, [0x1d, 0x67, 0xcd]);
        theme.set_color(TokenKind::Comment, [0x80, 0x8c, 0x98]);

        theme
    }

    /// Looks up a built-in theme by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Renders a stylesheet for highlighted markup.
    ///
    /// `style` must match the style the markup was rendered with; an empty
    /// prefix selects on the kind class alone.
    pub fn stylesheet(&self, style: &MarkupStyle) -> String {
        let class_prefix = style.class_prefix();
        let mut css = String::new();
        let _ = writeln!(
            css,
            ".editor {{ background: {}; color: {}; }}",
            css_hex(self.background),
            css_hex(self.foreground)
        );
        for kind in TokenKind::WRAPPED {
            let Some(class) = kind.class_name() else {
                continue;
            };
            let selector = if class_prefix.is_empty() {
                format!(".{class}")
            } else {
                format!(".{class_prefix}.{class}")
            };
            let _ = writeln!(css, "{selector} {{ color: {}; }}", css_hex(self.color(kind)));
        }
        css
    }

    /// Renders a standalone page showing `markup` in a preformatted block.
    pub fn render_page(&self, title: &str, markup: &str, style: &MarkupStyle) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n<pre class=\"editor\">{}</pre>\n</body>\n</html>\n",
            escape_html(title),
            self.stylesheet(style),
            markup
        )
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
