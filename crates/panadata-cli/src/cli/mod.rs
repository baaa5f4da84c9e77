//! Command-line interface for panadata.

mod commands;
pub mod icons;

pub use commands::{is_verbose, run};
