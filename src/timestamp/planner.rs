use chrono::Timelike;
use serde::Serialize;

use super::format::TimestampFormat;
use super::locator::{find_content_end, find_last_timestamp_line, find_next_empty_line};
use crate::document::{LineBuffer, Position, is_blank};

/// Where a new timestamp goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertMode {
    /// After the last line of the document
    End,
    /// At the first blank line at or below the cursor
    Cursor,
    /// After the content block of the last timestamp
    Chain,
}

/// Settings for a single insertion, fixed for the duration of the call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InsertSettings {
    pub insert_at_end: bool,
    pub chain_mode: bool,
    pub timestamp_format: TimestampFormat,
    pub separators: Vec<String>,
}

impl InsertSettings {
    /// Strategy selected by the toggles; chain wins over insert-at-end
    pub fn mode(&self) -> InsertMode {
        if self.chain_mode {
            InsertMode::Chain
        } else if self.insert_at_end {
            InsertMode::End
        } else {
            InsertMode::Cursor
        }
    }
}

/// A single text replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
    pub text: String,
    pub from: Position,
    /// End of the replaced range; `None` for a plain insertion
    pub to: Option<Position>,
}

impl Edit {
    fn insert(text: String, at: Position) -> Self {
        Self {
            text,
            from: at,
            to: None,
        }
    }

    fn replace(text: String, from: Position, to: Position) -> Self {
        Self {
            text,
            from,
            to: Some(to),
        }
    }
}

/// Result of planning: the edit to apply and where the cursor lands afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertionPlan {
    /// Strategy that produced the plan (chain falls back to end without an anchor)
    pub mode: InsertMode,
    pub edit: Edit,
    pub cursor: Position,
}

impl InsertionPlan {
    /// Apply the edit and move the cursor
    pub fn apply<B: LineBuffer + ?Sized>(&self, buffer: &mut B) {
        buffer.replace_range(&self.edit.text, self.edit.from, self.edit.to);
        buffer.set_cursor(self.cursor);
    }
}

/// Compute where a timestamp for `now` goes and where the cursor ends up
pub fn plan_insertion<B: LineBuffer + ?Sized>(
    buffer: &B,
    cursor: Position,
    settings: &InsertSettings,
    now: &impl Timelike,
) -> InsertionPlan {
    let timestamp = settings.timestamp_format.render_time(now);

    let plan = match settings.mode() {
        InsertMode::Chain => plan_chain(buffer, settings, timestamp),
        InsertMode::End => plan_document_end(buffer, timestamp),
        InsertMode::Cursor => plan_at_cursor(buffer, cursor, timestamp),
    };
    log::debug!(
        "planned {:?} insertion at {} (cursor -> {})",
        plan.mode,
        plan.edit.from,
        plan.cursor
    );
    plan
}

/// Plan against the buffer's own cursor and apply the result
pub fn insert_timestamp<B: LineBuffer + ?Sized>(
    buffer: &mut B,
    settings: &InsertSettings,
    now: &impl Timelike,
) -> InsertionPlan {
    let plan = plan_insertion(&*buffer, buffer.cursor(), settings, now);
    plan.apply(buffer);
    plan
}

fn plan_chain<B: LineBuffer + ?Sized>(
    buffer: &B,
    settings: &InsertSettings,
    timestamp: String,
) -> InsertionPlan {
    let anchor = match settings.timestamp_format.match_pattern() {
        Ok(pattern) => find_last_timestamp_line(buffer, &pattern),
        Err(e) => {
            log::warn!(
                "cannot match timestamps for format {:?}: {}",
                settings.timestamp_format.template(),
                e
            );
            None
        }
    };

    let Some(timestamp_line) = anchor else {
        log::debug!("no timestamp to chain from, inserting at document end");
        return plan_document_end(buffer, timestamp);
    };

    let content_end = find_content_end(buffer, timestamp_line, &settings.separators);
    let end_column = buffer.line_len(content_end);

    InsertionPlan {
        mode: InsertMode::Chain,
        edit: Edit::insert(
            format!("\n\n{timestamp}\n"),
            Position::new(content_end, end_column),
        ),
        cursor: Position::line_start(content_end + 3),
    }
}

fn plan_document_end<B: LineBuffer + ?Sized>(buffer: &B, timestamp: String) -> InsertionPlan {
    let last_line = buffer.line_count().saturating_sub(1);
    let last_content = buffer.line(last_line).unwrap_or_default();
    let document_end = Position::new(last_line, last_content.chars().count());

    if is_blank(last_content) {
        InsertionPlan {
            mode: InsertMode::End,
            edit: Edit::replace(
                format!("{timestamp}\n"),
                Position::line_start(last_line),
                document_end,
            ),
            cursor: Position::line_start(last_line + 1),
        }
    } else {
        InsertionPlan {
            mode: InsertMode::End,
            edit: Edit::insert(format!("\n\n{timestamp}\n"), document_end),
            cursor: Position::line_start(last_line + 3),
        }
    }
}

fn plan_at_cursor<B: LineBuffer + ?Sized>(
    buffer: &B,
    cursor: Position,
    timestamp: String,
) -> InsertionPlan {
    let empty_line = find_next_empty_line(buffer, cursor.line);

    match buffer.line(empty_line) {
        Some(content) if is_blank(content) => InsertionPlan {
            mode: InsertMode::Cursor,
            edit: Edit::replace(
                format!("{timestamp}\n"),
                Position::line_start(empty_line),
                Position::new(empty_line, content.chars().count()),
            ),
            cursor: Position::line_start(empty_line + 1),
        },
        _ => InsertionPlan {
            mode: InsertMode::Cursor,
            edit: Edit::insert(format!("\n{timestamp}\n"), Position::line_start(empty_line)),
            cursor: Position::line_start(empty_line + 2),
        },
    }
}
