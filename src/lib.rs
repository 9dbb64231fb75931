pub mod app;
pub mod config;
pub mod daily_note;
pub mod document;
pub mod error;
pub mod timestamp;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
