use std::path::{Path, PathBuf};

use super::{LineBuffer, Position};
use crate::error::{Error, Result};

/// In-memory note buffer backed by an optional file on disk
#[derive(Debug, Clone)]
pub struct DocumentBuffer {
    /// Path to the file (if loaded from disk)
    file_path: Option<PathBuf>,
    /// Current cursor position
    cursor: Position,
    /// Content as lines, never empty
    lines: Vec<String>,
    /// Whether the buffer has been modified
    modified: bool,
    /// Whether the file used CRLF line endings
    crlf: bool,
}

impl DocumentBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            file_path: None,
            cursor: Position::default(),
            lines: vec![String::new()],
            modified: false,
            crlf: false,
        }
    }

    /// Create buffer from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut buffer = Self::from_string(&content);
        buffer.file_path = Some(path.to_path_buf());
        Ok(buffer)
    }

    /// Create buffer from string
    pub fn from_string(content: &str) -> Self {
        Self {
            file_path: None,
            cursor: Position::default(),
            lines: Self::extract_lines(content),
            modified: false,
            crlf: content.contains("\r\n"),
        }
    }

    /// Extract lines from content
    ///
    /// A trailing newline yields a trailing empty line, so the buffer mirrors
    /// what an editor shows and saving round-trips the file unchanged.
    fn extract_lines(content: &str) -> Vec<String> {
        content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect()
    }

    /// Get the file path
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Check if buffer has been modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Get all lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Convert character position to byte position for a given line
    fn char_to_byte_idx(&self, line_idx: usize, char_pos: usize) -> usize {
        if let Some(line) = self.lines.get(line_idx) {
            line.char_indices()
                .nth(char_pos)
                .map(|(byte_idx, _)| byte_idx)
                .unwrap_or(line.len())
        } else {
            0
        }
    }

    /// Clip a position into the document
    ///
    /// Lines past the end map to the end of the last line.
    fn clamp_position(&self, position: Position) -> Position {
        let last_line = self.lines.len() - 1;
        if position.line > last_line {
            Position::new(last_line, self.line_len(last_line))
        } else {
            Position::new(position.line, position.column.min(self.line_len(position.line)))
        }
    }

    /// Move the cursor to the end of the last line
    pub fn move_to_end(&mut self) {
        let last_line = self.lines.len() - 1;
        self.cursor = Position::new(last_line, self.line_len(last_line));
    }

    /// Save buffer to file
    pub fn save(&mut self) -> Result<()> {
        let path = self.file_path.clone().ok_or(Error::NoFilePath)?;
        self.write_to(&path)?;
        self.modified = false;
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.content()).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get buffer content as string
    pub fn content(&self) -> String {
        let separator = if self.crlf { "\r\n" } else { "\n" };
        self.lines.join(separator)
    }
}

impl LineBuffer for DocumentBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|s| s.as_str())
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>) {
        let from = self.clamp_position(from);
        let to = to.map(|p| self.clamp_position(p)).unwrap_or(from);
        let (from, to) = if to < from { (to, from) } else { (from, to) };

        let start_byte = self.char_to_byte_idx(from.line, from.column);
        let end_byte = self.char_to_byte_idx(to.line, to.column);
        let head = self.lines[from.line][..start_byte].to_string();
        let tail = self.lines[to.line][end_byte..].to_string();

        // `split` always yields at least one piece
        let mut replacement: Vec<String> = text.split('\n').map(str::to_string).collect();
        if let Some(first) = replacement.first_mut() {
            first.insert_str(0, &head);
        }
        if let Some(last) = replacement.last_mut() {
            last.push_str(&tail);
        }

        self.lines.splice(from.line..=to.line, replacement);
        self.cursor = self.clamp_position(self.cursor);
        self.modified = true;
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, position: Position) {
        self.cursor = self.clamp_position(position);
    }
}

impl Default for DocumentBuffer {
    fn default() -> Self {
        Self::new()
    }
}
