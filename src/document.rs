pub mod buffer;
pub mod cursor;
pub mod line_buffer;

pub use buffer::DocumentBuffer;
pub use cursor::Position;
pub use line_buffer::{LineBuffer, is_blank};
