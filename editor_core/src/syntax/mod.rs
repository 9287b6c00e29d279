//! Syntax highlighting module.
//!
//! Line-oriented highlighting for Compiscript source. Each physical line is
//! scanned on its own and rendered as escaped markup with classified spans.

mod escape;
mod highlighter;
mod reserved;
mod theme;

pub use escape::{escape_html, push_escaped, strip_markup, unescape_html};
pub use highlighter::{
    highlight, tokenize, tokenize_line, LineHighlights, LineTokens, MarkupStyle,
    SyntaxHighlighter, Token,
};
pub use reserved::{classify_word, is_boolean, is_keyword, BOOLEANS, KEYWORDS};
pub use theme::{Color, Theme, TokenKind};
