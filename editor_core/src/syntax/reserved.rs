//! Reserved words of the Compiscript language.
//!
//! Both tables are kept sorted so membership is a binary search. Words are
//! matched exactly and case-sensitively; the scanner has already isolated a
//! whole word before it gets here.

use super::theme::TokenKind;

/// Keywords, sorted.
pub const KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "default", "else", "extends", "for",
    "function", "if", "let", "new", "print", "return", "switch", "try", "var", "void", "while",
];

/// Boolean literals, sorted.
pub const BOOLEANS: &[&str] = &["false", "true"];

/// Returns true if `word` is a keyword.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.binary_search(&word).is_ok()
}

/// Returns true if `word` is a boolean literal.
pub fn is_boolean(word: &str) -> bool {
    BOOLEANS.binary_search(&word).is_ok()
}

/// Classifies an identifier-shaped word.
///
/// Booleans are checked before keywords; anything else is plain text.
pub fn classify_word(word: &str) -> TokenKind {
    if is_boolean(word) {
        TokenKind::Boolean
    } else if is_keyword(word) {
        TokenKind::Keyword
    } else {
        TokenKind::PlainText
    }
}
