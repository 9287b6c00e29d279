//! Editor Core - Compiscript source highlighting.
//!
//! This crate contains the highlighter and the editor document state without
//! any dependencies on windowing or rendering systems.

pub mod buffer;
pub mod editor;
pub mod perf;
pub mod syntax;

pub use buffer::TextBuffer;
pub use editor::Editor;
pub use perf::RollingStats;
pub use syntax::{highlight, LineTokens, MarkupStyle, SyntaxHighlighter, Theme, Token, TokenKind};
