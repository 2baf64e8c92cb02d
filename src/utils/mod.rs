pub mod text;

pub use text::{clip_chars, first_line, truncate_to_width};
