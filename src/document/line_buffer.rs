use super::Position;

/// Line-addressable text surface supplied by the host editor
///
/// The insertion core only ever reads lines, applies one range replacement and
/// moves the cursor, so this is all it asks of an editor.
pub trait LineBuffer {
    /// Number of lines (always at least one)
    fn line_count(&self) -> usize;

    /// Text of a line, `None` when `index >= line_count()`
    fn line(&self, index: usize) -> Option<&str>;

    /// Replace the text between `from` and `to` with `text`
    ///
    /// Without `to` the text is inserted at `from`. Positions past the end of
    /// the document are clamped to the document end.
    fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>);

    /// Current cursor position
    fn cursor(&self) -> Position;

    /// Move the cursor, clamping it into the document
    fn set_cursor(&mut self, position: Position);

    /// Character count of a line, 0 for a missing line
    fn line_len(&self, index: usize) -> usize {
        self.line(index).map(|s| s.chars().count()).unwrap_or(0)
    }
}

/// True when the line is empty or whitespace only
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
