//! Data models shared across the workspace.

mod record;

pub use record::{DocumentFormat, DocumentRecord, DocumentType, FileMetadata};
