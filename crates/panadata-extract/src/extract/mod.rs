//! Format-specific text extraction.
//!
//! Extracts text from raw files using:
//! - lopdf for PDF page text, with a marker before every page
//! - scraper for HTML visible text (script and style dropped)
//! - csv for tabular files, one record per row
//!
//! Every extractor returns a per-file result; the caller decides whether to
//! log and continue.

mod html;
mod pdf;
mod tabular;

use std::path::Path;

use thiserror::Error;

use panadata::config::{Settings, DEFAULT_CSV_SEPARATOR};
use panadata::models::{DocumentFormat, DocumentRecord};

pub use html::{extract_html, html_visible_text};
pub use pdf::{extract_pdf, page_marker, pdf_document_text};
pub use tabular::{csv_row_texts, extract_csv, is_missing_value};

/// Errors that can occur while extracting one file.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("CSV parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("No usable text")]
    Empty,
}

/// File name used as `source` and for metadata inference.
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Text extractor dispatching on source format.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    /// Separator between `column: value` pairs of a CSV row.
    csv_separator: String,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self {
            csv_separator: DEFAULT_CSV_SEPARATOR.to_string(),
        }
    }
}

impl TextExtractor {
    /// Create a new text extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor configured from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new().with_csv_separator(&settings.csv_separator)
    }

    /// Set the CSV cell separator.
    pub fn with_csv_separator(mut self, separator: &str) -> Self {
        self.csv_separator = separator.to_string();
        self
    }

    pub fn csv_separator(&self) -> &str {
        &self.csv_separator
    }

    /// Extract records from a file in the given format.
    ///
    /// On success the result holds at least one record; a readable file with
    /// no usable text yields [`ExtractError::Empty`].
    pub fn extract(
        &self,
        path: &Path,
        format: DocumentFormat,
    ) -> Result<Vec<DocumentRecord>, ExtractError> {
        match format {
            DocumentFormat::Pdf => extract_pdf(path).map(|record| vec![record]),
            DocumentFormat::Html => extract_html(path).map(|record| vec![record]),
            DocumentFormat::Csv => extract_csv(path, &self.csv_separator),
        }
    }
}
