//! Text buffer implementation using ropey.

use ropey::Rope;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

/// The raw source buffer behind the editor surface.
/// Stored as a rope so edits stay cheap on large files.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Creates a text buffer from a string.
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Loads a text buffer from a UTF-8 file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = fs::File::open(path)?;
        let reader = BufReader::new(file);
        let rope = Rope::from_reader(reader)?;
        Ok(Self { rope })
    }

    /// Saves the buffer to a file as plain text.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.rope.write_to(&mut writer)?;
        Ok(())
    }

    /// Returns the total number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Counts `\n` characters only.
    ///
    /// Ropey's own line count also breaks on `\r` and Unicode separators; the
    /// highlighter splits on `\n` alone.
    pub fn newline_count(&self) -> usize {
        self.rope.chars().filter(|&ch| ch == '\n').count()
    }

    /// Inserts a string at the given character index.
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        let idx = char_idx.min(self.len_chars());
        self.rope.insert(idx, text);
    }

    /// Removes text in the given character range.
    pub fn remove(&mut self, start: usize, end: usize) {
        let start = start.min(self.len_chars());
        let end = end.min(self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Returns the character at the given index, if it exists.
    pub fn char_at(&self, char_idx: usize) -> Option<char> {
        if char_idx < self.len_chars() {
            Some(self.rope.char(char_idx))
        } else {
            None
        }
    }

    /// Returns true if the last character is `\n`.
    pub fn ends_with_newline(&self) -> bool {
        self.len_chars()
            .checked_sub(1)
            .and_then(|last| self.char_at(last))
            == Some('\n')
    }

    /// Returns the entire buffer as a string.
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buf = TextBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len_chars(), 0);
        assert_eq!(buf.newline_count(), 0);
        assert!(!buf.ends_with_newline());
    }

    #[test]
    fn test_from_str() {
        let buf = TextBuffer::from_str("hello\nworld");
        assert_eq!(buf.len_chars(), 11);
        assert_eq!(buf.newline_count(), 1);
    }

    #[test]
    fn test_insert_string() {
        let mut buf = TextBuffer::new();
        buf.insert(0, "hello");
        buf.insert(5, " world");
        buf.insert(100, "!");
        assert_eq!(buf.to_string(), "hello world!");
    }

    #[test]
    fn test_remove() {
        let mut buf = TextBuffer::from_str("hello world");
        buf.remove(5, 11);
        assert_eq!(buf.to_string(), "hello");
        buf.remove(3, 1);
        assert_eq!(buf.to_string(), "hello");
    }

    #[test]
    fn test_newline_count_ignores_carriage_return() {
        let buf = TextBuffer::from_str("a\r\nb\rc\n");
        assert_eq!(buf.newline_count(), 2);
        assert!(buf.ends_with_newline());
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("cs-buffer-{}.cps", std::process::id()));
        let buf = TextBuffer::from_str("let x = 1;\nprint(x);\n");
        buf.save_to_file(&path).unwrap();
        let loaded = TextBuffer::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.to_string(), "let x = 1;\nprint(x);\n");
    }
}
