//! Shared utility functions.
//!
//! - `text`: normalization of extracted text

mod text;

pub use text::{is_stripped_control, normalize_text};
