//! Editor document: the source buffer plus its highlighted rendering.

use crate::buffer::TextBuffer;
use crate::perf::{as_ms, RollingStats};
use crate::syntax::SyntaxHighlighter;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Editor state behind a highlighted overlay.
///
/// Every change re-highlights the whole buffer, so `markup` always matches
/// `text`.
#[derive(Debug, Clone)]
pub struct Editor {
    /// The text buffer.
    buffer: TextBuffer,
    /// Syntax highlighter.
    highlighter: SyntaxHighlighter,
    /// Markup of the current buffer contents.
    markup: String,
    /// Current file path, if any.
    file_path: Option<PathBuf>,
    /// Whether the buffer has unsaved changes.
    modified: bool,
    /// Time spent in each highlight pass.
    highlight_stats: RollingStats,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Creates a new empty editor.
    pub fn new() -> Self {
        Self::with_highlighter(SyntaxHighlighter::new())
    }

    /// Creates an empty editor rendering with the given highlighter.
    pub fn with_highlighter(highlighter: SyntaxHighlighter) -> Self {
        Self::from_parts(TextBuffer::new(), highlighter)
    }

    /// Creates an editor holding `text`, not marked as modified.
    pub fn with_text(text: &str) -> Self {
        Self::from_parts(TextBuffer::from_str(text), SyntaxHighlighter::new())
    }

    fn from_parts(buffer: TextBuffer, highlighter: SyntaxHighlighter) -> Self {
        let mut editor = Self {
            buffer,
            highlighter,
            markup: String::new(),
            file_path: None,
            modified: false,
            highlight_stats: RollingStats::new(),
        };
        editor.rehighlight();
        editor
    }

    /// Opens a file in the editor.
    pub fn open_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        self.buffer = TextBuffer::from_file(path)?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        self.rehighlight();
        log::info!("Opened {} ({} chars)", path.display(), self.buffer.len_chars());
        Ok(())
    }

    /// Saves the buffer to the current file path.
    pub fn save(&mut self) -> io::Result<()> {
        if let Some(path) = &self.file_path {
            self.buffer.save_to_file(path)?;
            self.modified = false;
            Ok(())
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "No file path set"))
        }
    }

    /// Saves the buffer to a new file path.
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        self.buffer.save_to_file(path)?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Replaces the whole buffer.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = TextBuffer::from_str(text);
        self.modified = true;
        self.rehighlight();
    }

    /// Inserts text at a character index.
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        self.buffer.insert(char_idx, text);
        self.modified = true;
        self.rehighlight();
    }

    /// Removes the characters in `start..end`.
    pub fn remove(&mut self, start: usize, end: usize) {
        let len = self.buffer.len_chars();
        if start.min(len) >= end.min(len) {
            return;
        }
        self.buffer.remove(start, end);
        self.modified = true;
        self.rehighlight();
    }

    /// Returns the buffer contents.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Returns the highlighted markup of the current contents.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Returns markup sized for an overlay behind a text input.
    ///
    /// A text input shows an empty last line after a trailing newline; the
    /// extra `\n` gives the overlay the same height.
    pub fn overlay_markup(&self) -> String {
        let mut overlay = self.markup.clone();
        if self.buffer.ends_with_newline() {
            overlay.push('\n');
        }
        overlay
    }

    /// Returns the 1-based gutter numbers, one per line.
    pub fn line_numbers(&self) -> Vec<usize> {
        (1..=self.buffer.newline_count() + 1).collect()
    }

    /// Returns the current file path.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns whether the buffer has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Returns timing of recent highlight passes.
    pub fn highlight_stats(&self) -> &RollingStats {
        &self.highlight_stats
    }

    fn rehighlight(&mut self) {
        let start = Instant::now();
        let text = self.buffer.to_string();
        self.markup.clear();
        self.highlighter.highlight_into(&text, &mut self.markup);
        self.highlight_stats.record(start.elapsed());
        log::trace!(
            "Highlighted {} lines in {:.3}ms",
            self.buffer.newline_count() + 1,
            as_ms(self.highlight_stats.last())
        );
    }
}
