//! Document model - the text buffer the region parser reads from

use ropey::Rope;
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use super::position::Position;

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

impl DocumentId {
    /// Allocate a process-unique id
    pub fn next() -> Self {
        Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Identity plus revision of a document's content.
///
/// Two equal versions are guaranteed to describe the same text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentVersion {
    pub id: DocumentId,
    pub revision: u64,
}

/// Line-oriented read access to a document
pub trait TextSource {
    /// Number of lines, including a trailing empty line after a final newline
    fn line_count(&self) -> usize;

    /// Line text without its terminator. Out-of-range lines are empty.
    fn line(&self, line_idx: usize) -> Cow<'_, str>;

    /// Content version used to decide whether a re-parse is needed
    fn version(&self) -> DocumentVersion;
}

/// Document state - the text buffer and associated file metadata
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocumentId,
    /// The text buffer
    pub buffer: Rope,
    /// Path to the file on disk (None for unsaved text)
    pub file_path: Option<PathBuf>,
    /// Document revision counter (incremented on each edit)
    pub revision: u64,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            id: DocumentId::next(),
            buffer: Rope::from(text),
            file_path: None,
            revision: 0,
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: PathBuf) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(&path)?;
        let mut doc = Self::with_text(&content);
        doc.file_path = Some(path);
        Ok(doc)
    }

    /// Replace the whole buffer
    pub fn set_text(&mut self, text: &str) {
        self.buffer = Rope::from(text);
        self.bump_revision();
    }

    /// Insert text at a line/column position
    pub fn insert(&mut self, pos: Position, text: &str) {
        let offset = self.position_to_offset(pos);
        self.buffer.insert(offset, text);
        self.bump_revision();
    }

    /// Replace the text between two positions
    pub fn replace(&mut self, start: Position, end: Position, text: &str) {
        let start = self.position_to_offset(start);
        let end = self.position_to_offset(end).max(start);
        self.buffer.remove(start..end);
        self.buffer.insert(start, text);
        self.bump_revision();
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Get the length of a line (excluding the line terminator)
    pub fn line_length(&self, line_idx: usize) -> usize {
        if line_idx >= self.buffer.len_lines() {
            return 0;
        }
        let line = self.buffer.line(line_idx);
        let len = line.len_chars();
        let trim = if len > 0 && line.char(len - 1) == '\n' {
            if len > 1 && line.char(len - 2) == '\r' {
                2
            } else {
                1
            }
        } else {
            0
        };
        len - trim
    }

    /// Convert a (line, column) position to a char offset, clamping to the line
    pub fn position_to_offset(&self, pos: Position) -> usize {
        if pos.line >= self.buffer.len_lines() {
            return self.buffer.len_chars();
        }
        let line_start = self.buffer.line_to_char(pos.line);
        line_start + pos.column.min(self.line_length(pos.line))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for Document {
    fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    fn line(&self, line_idx: usize) -> Cow<'_, str> {
        if line_idx >= self.buffer.len_lines() {
            return Cow::Borrowed("");
        }
        let line = self.buffer.line(line_idx);
        let trimmed = line.slice(..self.line_length(line_idx));
        match trimmed.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(trimmed.to_string()),
        }
    }

    fn version(&self) -> DocumentVersion {
        DocumentVersion {
            id: self.id,
            revision: self.revision,
        }
    }
}
