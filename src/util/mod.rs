//! Utility modules

pub mod text;
pub mod throttle;

pub use text::{byte_to_char_col, char_len, has_regex_metachars, is_blank};
pub use throttle::Throttle;
