pub mod format;
pub mod locator;
pub mod planner;
pub mod separator;

pub use format::{TimestampFormat, render, to_match_pattern};
pub use locator::{find_content_end, find_last_timestamp_line, find_next_empty_line};
pub use planner::{Edit, InsertMode, InsertSettings, InsertionPlan, insert_timestamp, plan_insertion};
pub use separator::{is_separator_line, parse_separators};
