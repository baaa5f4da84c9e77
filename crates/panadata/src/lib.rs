//! panadata - raw document extraction for the PanamaLLM dataset.
//!
//! Core library exposing domain modules for workspace crates.

// Model types use `from_str` methods that return Option<Self>,
// not Result<Self, Error> as std::str::FromStr requires.
#![allow(clippy::should_implement_trait)]

pub mod config;
pub mod metadata;
pub mod models;
pub mod utils;
