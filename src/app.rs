use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::Config;
use crate::daily_note::DailyNoteResolver;
use crate::document::{DocumentBuffer, LineBuffer, Position};
use crate::error::Result;
use crate::timestamp::{InsertionPlan, plan_insertion};

/// Runs the "insert timestamp" command against the active note
///
/// Failures to find or create the target note are logged and turn the command
/// into a no-op; they never reach the caller.
pub struct App<R: DailyNoteResolver> {
    config: Config,
    resolver: R,
    /// Note currently open, if any
    buffer: Option<DocumentBuffer>,
    /// Cursor requested for the next insertion, placed once the target note is known
    pending_cursor: Option<Position>,
}

impl<R: DailyNoteResolver> App<R> {
    pub fn new(config: Config, resolver: R) -> Self {
        Self {
            config,
            resolver,
            buffer: None,
            pending_cursor: None,
        }
    }

    /// Make `buffer` the active note
    pub fn with_buffer(mut self, buffer: DocumentBuffer) -> Self {
        self.buffer = Some(buffer);
        self
    }

    /// Open a file as the active note
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.buffer = Some(DocumentBuffer::from_file(path)?);
        Ok(())
    }

    pub fn buffer(&self) -> Option<&DocumentBuffer> {
        self.buffer.as_ref()
    }

    /// Place the cursor of the note the next insertion targets
    ///
    /// The position survives a switch to today's note.
    pub fn set_cursor(&mut self, position: Position) {
        self.pending_cursor = Some(position);
    }

    /// Insert a timestamp for `now`
    ///
    /// Returns the applied plan, or `None` when there was nothing to insert into.
    pub fn insert_timestamp(&mut self, now: NaiveDateTime) -> Option<InsertionPlan> {
        let settings = self.config.insert_settings();
        let scroll = self.config.scroll_to_bottom && !self.config.chain_mode;

        let buffer = self.target_buffer(now.date())?;
        let plan = plan_insertion(&*buffer, buffer.cursor(), &settings, &now.time());
        plan.apply(buffer);
        if scroll {
            buffer.move_to_end();
        }
        Some(plan)
    }

    /// Compute the plan for `now` without touching the note's contents
    ///
    /// Today's note is still opened (and created) when auto-open applies.
    pub fn plan_timestamp(&mut self, now: NaiveDateTime) -> Option<InsertionPlan> {
        let settings = self.config.insert_settings();
        let buffer = self.target_buffer(now.date())?;
        Some(plan_insertion(&*buffer, buffer.cursor(), &settings, &now.time()))
    }

    /// Write the active note back to disk if it changed
    pub fn save(&mut self) -> Result<()> {
        match self.buffer.as_mut() {
            Some(buffer) if buffer.is_modified() => buffer.save(),
            _ => Ok(()),
        }
    }

    fn is_todays_note(&self, date: NaiveDate) -> bool {
        let Some(current) = self.buffer.as_ref().and_then(|b| b.file_path()) else {
            return false;
        };
        match self.resolver.note_path(date) {
            Ok(today) => same_file(current, &today),
            Err(e) => {
                log::warn!("cannot resolve today's note: {}", e);
                false
            }
        }
    }

    /// The note to insert into, switching to today's note when auto-open applies
    fn target_buffer(&mut self, date: NaiveDate) -> Option<&mut DocumentBuffer> {
        if self.config.auto_open_daily_note && !self.is_todays_note(date) {
            match self.resolver.open(date) {
                Ok(buffer) => {
                    log::debug!("switched to daily note {:?}", buffer.file_path());
                    self.buffer = Some(buffer);
                }
                Err(e) => {
                    log::warn!("cannot open daily note for {}: {}", date, e);
                    return None;
                }
            }
        }

        let pending_cursor = self.pending_cursor.take();
        let Some(buffer) = self.buffer.as_mut() else {
            log::debug!("no active note, skipping timestamp");
            return None;
        };
        if let Some(position) = pending_cursor {
            buffer.set_cursor(position);
        }
        Some(buffer)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
