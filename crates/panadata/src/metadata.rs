//! Filename-based metadata inference.
//!
//! Source files are named by whoever collected them, so the only metadata
//! we can rely on is what the name itself carries:
//! - a publication year (first `19xx`/`20xx` anywhere in the name)
//! - a document type, from keywords checked in priority order

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{DocumentType, FileMetadata};

/// Four-digit years in 1900-2099. No word boundaries: names like
/// `gaceta29345_2019` must still yield 2019.
static YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:19|20)\d{2}").unwrap());

/// Keyword rules, first match wins.
const TYPE_RULES: &[(&[&str], DocumentType)] = &[
    (&["gaceta"], DocumentType::GacetaOficial),
    (&["ley", "decreto"], DocumentType::Legislacion),
    (&["resolucion"], DocumentType::Resolucion),
];

/// Infer metadata from a file name.
pub fn infer_metadata(filename: &str) -> FileMetadata {
    FileMetadata {
        original_filename: filename.to_string(),
        year: infer_year(filename),
        doc_type: infer_type(filename),
    }
}

/// First year in 1900-2099 appearing anywhere in the name.
pub fn infer_year(filename: &str) -> Option<i32> {
    YEAR_PATTERN
        .find(filename)
        .and_then(|m| m.as_str().parse().ok())
}

/// Document type from case-insensitive keyword rules.
pub fn infer_type(filename: &str) -> DocumentType {
    let lower = filename.to_lowercase();
    TYPE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(_, ty)| *ty)
        .unwrap_or_default()
}
