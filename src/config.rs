use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::timestamp::format::{DEFAULT_TIMESTAMP_FORMAT, TimestampFormat};
use crate::timestamp::{InsertSettings, parse_separators};

fn default_true() -> bool {
    true
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

/// Where daily notes live and how they are named
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyNoteConfig {
    /// Folder relative to the vault root; empty or "/" means the root itself
    #[serde(default)]
    pub folder: String,

    /// File name date format (chrono strftime syntax)
    #[serde(default = "default_date_format")]
    pub format: String,

    /// Note used to seed new daily notes, relative to the vault root
    #[serde(default)]
    pub template: Option<String>,
}

impl Default for DailyNoteConfig {
    fn default() -> Self {
        Self {
            folder: String::new(),
            format: default_date_format(),
            template: None,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Open (or create) today's daily note when the active note is another one
    #[serde(default = "default_true")]
    pub auto_open_daily_note: bool,

    /// Move the cursor to the end of the note after inserting
    #[serde(default = "default_true")]
    pub scroll_to_bottom: bool,

    /// Insert at the end of the document instead of below the cursor
    #[serde(default = "default_true")]
    pub insert_at_end: bool,

    /// Insert after the last timestamp and its content, before separators
    #[serde(default)]
    pub chain_mode: bool,

    /// Timestamp template; `HH` and `MM` are replaced by hour and minute
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Comma-separated line prefixes that end a timestamp's content
    #[serde(default)]
    pub separators: String,

    /// Vault root; daily note folders and templates are resolved against it
    #[serde(default)]
    pub vault: Option<PathBuf>,

    #[serde(default)]
    pub daily_note: DailyNoteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_open_daily_note: true,
            scroll_to_bottom: true,
            insert_at_end: true,
            chain_mode: false,
            timestamp_format: default_timestamp_format(),
            separators: String::new(),
            vault: None,
            daily_note: DailyNoteConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self = toml::from_str(&content)?;
        config.normalize();
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from default location or use defaults
    pub fn load_or_default() -> Self {
        let config_path = Self::default_config_path();

        if config_path.exists() {
            Self::load_from_file(&config_path).unwrap_or_else(|e| {
                log::warn!("ignoring {}: {}", config_path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Get default config file path
    pub fn default_config_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("timestamper").join("config.toml")
        } else {
            PathBuf::from(".timestamper.toml")
        }
    }

    /// Re-apply the toggle rules to values read from disk
    ///
    /// Chain mode excludes both insert-at-end and scroll-to-bottom; an empty
    /// timestamp format means the default one.
    pub fn normalize(&mut self) {
        if self.chain_mode {
            self.insert_at_end = false;
            self.scroll_to_bottom = false;
        }
        if self.timestamp_format.is_empty() {
            self.timestamp_format = default_timestamp_format();
        }
    }

    /// Toggle chain mode; turning it on switches off insert-at-end and scrolling
    pub fn set_chain_mode(&mut self, enabled: bool) {
        if enabled {
            self.insert_at_end = false;
            self.scroll_to_bottom = false;
        }
        self.chain_mode = enabled;
    }

    /// Toggle insert-at-end; turning it on switches off chain mode
    pub fn set_insert_at_end(&mut self, enabled: bool) {
        if enabled {
            self.chain_mode = false;
        }
        self.insert_at_end = enabled;
    }

    /// Set the timestamp template, falling back to the default when empty
    pub fn set_timestamp_format(&mut self, format: &str) {
        self.timestamp_format = if format.is_empty() {
            default_timestamp_format()
        } else {
            format.to_string()
        };
    }

    /// Snapshot of the values the planner needs for one insertion
    pub fn insert_settings(&self) -> InsertSettings {
        InsertSettings {
            insert_at_end: self.insert_at_end,
            chain_mode: self.chain_mode,
            timestamp_format: TimestampFormat::new(self.timestamp_format.as_str()),
            separators: parse_separators(&self.separators),
        }
    }
}
