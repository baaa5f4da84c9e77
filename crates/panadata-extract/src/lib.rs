//! Extraction of raw documents into interim tables.
//!
//! This crate turns a directory of heterogeneous source files (PDF, HTML,
//! CSV) into normalized [`DocumentRecord`]s and writes them as one Parquet
//! table per directory. Failures are isolated per file: a corrupt or empty
//! file is counted and skipped, never aborting its siblings.

pub mod extract;
pub mod output;
mod processor;
mod runner;

pub use extract::{ExtractError, TextExtractor};
pub use output::{
    find_interim_files, interim_file_name, read_interim, write_interim, OutputError,
};
pub use processor::{
    directory_name, DirectoryProcessor, DirectoryReport, ProcessError, SourceFile,
};
pub use runner::PipelineRunner;

use std::collections::BTreeMap;

use panadata::models::{DocumentFormat, DocumentRecord};

/// Statistics collected while extracting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Files discovered and attempted.
    pub files_seen: usize,
    /// Files that produced at least one record.
    pub files_extracted: usize,
    /// Files that were readable but had no usable text.
    pub files_empty: usize,
    /// Files that failed to read or parse.
    pub files_failed: usize,
    /// Records produced.
    pub records: usize,
    /// Records produced per source format.
    pub records_by_format: BTreeMap<DocumentFormat, usize>,
}

impl ExtractStats {
    /// Count the outcome of extracting one file.
    pub fn record_outcome(
        &mut self,
        format: DocumentFormat,
        outcome: &Result<Vec<DocumentRecord>, ExtractError>,
    ) {
        self.files_seen += 1;
        match outcome {
            Ok(records) if !records.is_empty() => {
                self.files_extracted += 1;
                self.records += records.len();
                *self.records_by_format.entry(format).or_default() += records.len();
            }
            Ok(_) | Err(ExtractError::Empty) => self.files_empty += 1,
            Err(_) => self.files_failed += 1,
        }
    }

    /// Merge stats from another instance.
    pub fn merge(&mut self, other: &ExtractStats) {
        self.files_seen += other.files_seen;
        self.files_extracted += other.files_extracted;
        self.files_empty += other.files_empty;
        self.files_failed += other.files_failed;
        self.records += other.records;
        for (format, count) in &other.records_by_format {
            *self.records_by_format.entry(*format).or_default() += count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panadata::metadata::infer_metadata;

    fn record(format: DocumentFormat) -> DocumentRecord {
        DocumentRecord::new("texto".to_string(), "a", format, infer_metadata("a"))
    }

    #[test]
    fn test_record_outcome_counts_each_kind() {
        let mut stats = ExtractStats::default();
        stats.record_outcome(DocumentFormat::Csv, &Ok(vec![record(DocumentFormat::Csv); 3]));
        stats.record_outcome(DocumentFormat::Pdf, &Err(ExtractError::Empty));
        stats.record_outcome(
            DocumentFormat::Pdf,
            &Err(ExtractError::Pdf("bad xref".to_string())),
        );

        assert_eq!(stats.files_seen, 3);
        assert_eq!(stats.files_extracted, 1);
        assert_eq!(stats.files_empty, 1);
        assert_eq!(stats.files_failed, 1);
        assert_eq!(stats.records, 3);
        assert_eq!(stats.records_by_format.get(&DocumentFormat::Csv), Some(&3));
        assert_eq!(stats.records_by_format.get(&DocumentFormat::Pdf), None);
    }

    #[test]
    fn test_stats_merge() {
        let mut a = ExtractStats::default();
        a.record_outcome(DocumentFormat::Pdf, &Ok(vec![record(DocumentFormat::Pdf)]));

        let mut b = ExtractStats::default();
        b.record_outcome(DocumentFormat::Pdf, &Ok(vec![record(DocumentFormat::Pdf)]));
        b.record_outcome(DocumentFormat::Html, &Err(ExtractError::Empty));

        a.merge(&b);
        assert_eq!(a.files_seen, 3);
        assert_eq!(a.files_extracted, 2);
        assert_eq!(a.files_empty, 1);
        assert_eq!(a.records, 2);
        assert_eq!(a.records_by_format.get(&DocumentFormat::Pdf), Some(&2));
    }
}
