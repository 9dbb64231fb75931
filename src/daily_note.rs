//! Locating, creating and opening the note for a given day.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::DailyNoteConfig;
use crate::document::DocumentBuffer;
use crate::error::{Error, Result};

/// Host capability that hands out the daily note for a date
pub trait DailyNoteResolver {
    /// Path of the note for `date`, whether or not it exists yet
    fn note_path(&self, date: NaiveDate) -> Result<PathBuf>;

    /// Open the note for `date`, creating it first if needed
    fn open(&self, date: NaiveDate) -> Result<DocumentBuffer>;
}

/// Daily notes stored as Markdown files under a vault directory
#[derive(Debug, Clone)]
pub struct FsDailyNoteResolver {
    vault: PathBuf,
    config: DailyNoteConfig,
}

impl FsDailyNoteResolver {
    pub fn new(vault: impl Into<PathBuf>, config: DailyNoteConfig) -> Self {
        Self {
            vault: vault.into(),
            config,
        }
    }

    /// Directory holding the notes; an empty folder or "/" is the vault root
    fn folder(&self) -> PathBuf {
        let folder = self.config.folder.trim().trim_matches('/');
        if folder.is_empty() {
            self.vault.clone()
        } else {
            self.vault.join(folder)
        }
    }

    /// Contents used to seed a new note
    ///
    /// A template given without an extension is also looked up as `.md`.
    /// A missing template seeds an empty note.
    fn template_content(&self) -> Result<String> {
        let Some(template) = self
            .config
            .template
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        else {
            return Ok(String::new());
        };

        let path = self.vault.join(template);
        let candidates = if path.extension().is_none() {
            vec![path.with_extension("md"), path]
        } else {
            vec![path]
        };

        for candidate in candidates {
            match std::fs::read_to_string(&candidate) {
                Ok(content) => return Ok(content),
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(Error::Read {
                        path: candidate,
                        source,
                    });
                }
            }
        }

        log::debug!("template {template:?} not found, creating an empty note");
        Ok(String::new())
    }
}

impl DailyNoteResolver for FsDailyNoteResolver {
    fn note_path(&self, date: NaiveDate) -> Result<PathBuf> {
        let file_name = format_date(date, &self.config.format)?;
        Ok(self.folder().join(format!("{file_name}.md")))
    }

    fn open(&self, date: NaiveDate) -> Result<DocumentBuffer> {
        let path = self.note_path(date)?;

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            let content = self.template_content()?;
            create_note(&path, &content)?;
        }

        DocumentBuffer::from_file(&path)
    }
}

/// Render a strftime date format, rejecting formats chrono cannot render for a date
pub fn format_date(date: NaiveDate, format: &str) -> Result<String> {
    let mut name = String::new();
    write!(name, "{}", date.format(format))
        .map_err(|_| Error::InvalidDateFormat(format.to_string()))?;

    if name.trim().is_empty() {
        return Err(Error::InvalidDateFormat(format.to_string()));
    }
    Ok(name)
}

/// Create a note file without clobbering one that appeared in the meantime
fn create_note(path: &Path, content: &str) -> Result<()> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            log::info!("created daily note {}", path.display());
            file.write_all(content.as_bytes())
                .map_err(|source| Error::Write {
                    path: path.to_path_buf(),
                    source,
                })
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            log::debug!("{} was created concurrently, reusing it", path.display());
            if path.exists() {
                Ok(())
            } else {
                Err(Error::Unresolvable(path.to_path_buf()))
            }
        }
        Err(source) => Err(Error::Write {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::LineBuffer;
    use tempfile::tempdir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn config(folder: &str, template: Option<&str>) -> DailyNoteConfig {
        DailyNoteConfig {
            folder: folder.to_string(),
            template: template.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_note_path_in_folder() {
        let resolver = FsDailyNoteResolver::new("/vault", config("Journal/Daily", None));
        assert_eq!(
            resolver.note_path(date()).unwrap(),
            PathBuf::from("/vault/Journal/Daily/2024-03-09.md")
        );
    }

    #[test]
    fn test_note_path_at_root() {
        for folder in ["", "/", "  "] {
            let resolver = FsDailyNoteResolver::new("/vault", config(folder, None));
            assert_eq!(
                resolver.note_path(date()).unwrap(),
                PathBuf::from("/vault/2024-03-09.md")
            );
        }
    }

    #[test]
    fn test_note_path_custom_format() {
        let resolver = FsDailyNoteResolver::new(
            "/vault",
            DailyNoteConfig {
                format: "%d.%m.%Y %A".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(
            resolver.note_path(date()).unwrap(),
            PathBuf::from("/vault/09.03.2024 Saturday.md")
        );
    }

    #[test]
    fn test_invalid_date_format() {
        assert!(matches!(
            format_date(date(), "%Y-%Q"),
            Err(Error::InvalidDateFormat(_))
        ));
        // time fields are not available on a date
        assert!(matches!(
            format_date(date(), "%H:%M"),
            Err(Error::InvalidDateFormat(_))
        ));
        assert!(matches!(
            format_date(date(), ""),
            Err(Error::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_open_creates_folder_and_note() {
        let dir = tempdir().unwrap();
        let resolver = FsDailyNoteResolver::new(dir.path(), config("Daily", None));

        let buffer = resolver.open(date()).unwrap();
        let path = dir.path().join("Daily").join("2024-03-09.md");
        assert!(path.exists());
        assert_eq!(buffer.file_path(), Some(path.as_path()));
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.line(0), Some(""));
    }

    #[test]
    fn test_open_seeds_from_template() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Templates")).unwrap();
        std::fs::write(dir.path().join("Templates/Daily.md"), "# Today\n\n").unwrap();

        let resolver = FsDailyNoteResolver::new(dir.path(), config("", Some("Templates/Daily")));
        let buffer = resolver.open(date()).unwrap();
        assert_eq!(buffer.lines(), &["# Today", "", ""]);
    }

    #[test]
    fn test_open_with_missing_template() {
        let dir = tempdir().unwrap();
        let resolver = FsDailyNoteResolver::new(dir.path(), config("", Some("Nope.md")));
        let buffer = resolver.open(date()).unwrap();
        assert_eq!(buffer.content(), "");
    }

    #[test]
    fn test_open_existing_note_is_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("2024-03-09.md");
        std::fs::write(&path, "existing").unwrap();
        std::fs::write(dir.path().join("T.md"), "template").unwrap();

        let resolver = FsDailyNoteResolver::new(dir.path(), config("/", Some("T.md")));
        let buffer = resolver.open(date()).unwrap();
        assert_eq!(buffer.content(), "existing");
    }

    #[test]
    fn test_create_note_tolerates_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.md");
        std::fs::write(&path, "first").unwrap();

        create_note(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");
    }
}
