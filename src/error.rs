use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised outside the insertion core (file access, configuration, note resolution)
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Failed to read {}: {source}", path.display())]
    #[diagnostic(code(timestamper::io::read))]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    #[diagnostic(code(timestamper::io::write))]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create directory {}: {source}", path.display())]
    #[diagnostic(code(timestamper::io::create_dir))]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    #[diagnostic(code(timestamper::config::parse))]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    #[diagnostic(code(timestamper::config::serialize))]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid daily note date format `{0}`")]
    #[diagnostic(
        code(timestamper::daily_note::format),
        help("use chrono strftime specifiers, e.g. %Y-%m-%d")
    )]
    InvalidDateFormat(String),

    #[error("Daily note {} could not be created", .0.display())]
    #[diagnostic(code(timestamper::daily_note::unresolvable))]
    Unresolvable(PathBuf),

    #[error("No document path set")]
    #[diagnostic(code(timestamper::document::no_path))]
    NoFilePath,
}

pub type Result<T> = std::result::Result<T, Error>;
