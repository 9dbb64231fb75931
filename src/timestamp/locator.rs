use regex::Regex;

use super::separator::is_separator_line;
use crate::document::{LineBuffer, is_blank};

/// Index of the last line whose trimmed text starts with a timestamp
///
/// Later entries win, so a note can hold any number of timestamps.
pub fn find_last_timestamp_line<B: LineBuffer + ?Sized>(
    buffer: &B,
    pattern: &Regex,
) -> Option<usize> {
    (0..buffer.line_count()).rev().find(|&index| {
        buffer
            .line(index)
            .is_some_and(|line| pattern.is_match(line.trim()))
    })
}

/// Last non-blank line of the content block following a timestamp
///
/// The scan stops before the first separator line. Returns `timestamp_line`
/// when the block is empty.
pub fn find_content_end<B: LineBuffer + ?Sized>(
    buffer: &B,
    timestamp_line: usize,
    separators: &[String],
) -> usize {
    let mut last_content_line = timestamp_line;

    for index in (timestamp_line + 1)..buffer.line_count() {
        let Some(line) = buffer.line(index) else {
            break;
        };
        if is_separator_line(line, separators) {
            break;
        }
        if !is_blank(line) {
            last_content_line = index;
        }
    }

    last_content_line
}

/// First blank line at or after `from_line`, or `line_count()` if there is none
pub fn find_next_empty_line<B: LineBuffer + ?Sized>(buffer: &B, from_line: usize) -> usize {
    let total_lines = buffer.line_count();
    (from_line..total_lines)
        .find(|&index| buffer.line(index).is_some_and(is_blank))
        .unwrap_or(total_lines)
}
