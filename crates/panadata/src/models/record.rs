//! Document record model for extracted text.
//!
//! A record is one unit of normalized text plus the metadata inferred from
//! its source file. PDF and HTML files yield one record each; CSV files
//! yield one record per row.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Source format a record was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Html,
    Csv,
}

impl DocumentFormat {
    /// All formats in processing order.
    pub const ALL: [DocumentFormat; 3] = [Self::Pdf, Self::Html, Self::Csv];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Html => "html",
            Self::Csv => "csv",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pdf" => Some(Self::Pdf),
            "html" => Some(Self::Html),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// File extensions (lowercase, without dot) handled by this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Pdf => &["pdf"],
            Self::Html => &["html", "htm"],
            Self::Csv => &["csv"],
        }
    }

    /// Detect the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document category inferred from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    GacetaOficial,
    Legislacion,
    Resolucion,
    #[default]
    Unknown,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GacetaOficial => "gaceta_oficial",
            Self::Legislacion => "legislacion",
            Self::Resolucion => "resolucion",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "gaceta_oficial" => Some(Self::GacetaOficial),
            "legislacion" => Some(Self::Legislacion),
            "resolucion" => Some(Self::Resolucion),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata inferred from a file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// The file name the metadata was inferred from.
    pub original_filename: String,
    /// First year (1900-2099) found in the file name.
    pub year: Option<i32>,
    /// Keyword-based document type.
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
}

/// One extracted unit of text with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Normalized text. Never empty for emitted records.
    pub text: String,
    /// Source file name (not guaranteed unique across directories).
    pub source: String,
    /// Format the text was extracted from.
    pub format: DocumentFormat,
    #[serde(flatten)]
    pub metadata: FileMetadata,
    /// Page count, for PDF records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    /// Zero-based data row position, for CSV records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u64>,
}

impl DocumentRecord {
    /// Create a record with no format-specific fields set.
    pub fn new(
        text: String,
        source: impl Into<String>,
        format: DocumentFormat,
        metadata: FileMetadata,
    ) -> Self {
        Self {
            text,
            source: source.into(),
            format,
            metadata,
            pages: None,
            row_index: None,
        }
    }

    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = Some(pages);
        self
    }

    pub fn with_row_index(mut self, row_index: u64) -> Self {
        self.row_index = Some(row_index);
        self
    }

    pub fn year(&self) -> Option<i32> {
        self.metadata.year
    }

    pub fn doc_type(&self) -> DocumentType {
        self.metadata.doc_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_path_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("raw/gov/ley.PDF")),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("index.htm")),
            Some(DocumentFormat::Html)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("datos.Csv")),
            Some(DocumentFormat::Csv)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("notes.txt")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn type_strings_round_trip() {
        for ty in [
            DocumentType::GacetaOficial,
            DocumentType::Legislacion,
            DocumentType::Resolucion,
            DocumentType::Unknown,
        ] {
            assert_eq!(DocumentType::from_str(ty.as_str()), Some(ty));
        }
        assert_eq!(DocumentType::from_str("document"), None);
    }

    #[test]
    fn record_serializes_with_flat_metadata() {
        let record = DocumentRecord::new(
            "Hola".to_string(),
            "ley_2021.pdf",
            DocumentFormat::Pdf,
            FileMetadata {
                original_filename: "ley_2021.pdf".to_string(),
                year: Some(2021),
                doc_type: DocumentType::Legislacion,
            },
        )
        .with_pages(2);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["format"], "pdf");
        assert_eq!(json["type"], "legislacion");
        assert_eq!(json["year"], 2021);
        assert_eq!(json["pages"], 2);
        assert!(json.get("row_index").is_none());
    }
}
