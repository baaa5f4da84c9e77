//! Directory processing: discovery, per-file extraction, interim output.

use std::path::{Path, PathBuf};

use thiserror::Error;

use panadata::config::Settings;
use panadata::models::{DocumentFormat, DocumentRecord};

use crate::extract::{ExtractError, TextExtractor};
use crate::output::{interim_file_name, write_interim, OutputError};
use crate::ExtractStats;

/// Directory-level failures. Per-file failures never surface here.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write interim table {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: OutputError,
        /// Counts for the files extracted before the write failed.
        stats: ExtractStats,
    },
}

impl ProcessError {
    /// Stats gathered before the failure, if extraction ran.
    pub fn stats(&self) -> Option<&ExtractStats> {
        match self {
            Self::ReadDir { .. } => None,
            Self::Output { stats, .. } => Some(stats),
        }
    }
}

/// A discovered input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub format: DocumentFormat,
}

/// Result of processing one directory.
#[derive(Debug, Clone, Default)]
pub struct DirectoryReport {
    /// Directory that was scanned.
    pub directory: PathBuf,
    /// Every record produced, in discovery order.
    pub records: Vec<DocumentRecord>,
    /// Per-file counts.
    pub stats: ExtractStats,
    /// Interim file written, if any records were produced.
    pub output_path: Option<PathBuf>,
}

/// Name a directory's interim output is keyed by.
pub fn directory_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            dir.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| "interim".to_string())
}

/// Extracts every supported file in a directory into one interim table.
#[derive(Debug, Clone, Default)]
pub struct DirectoryProcessor {
    extractor: TextExtractor,
}

impl DirectoryProcessor {
    pub fn new(extractor: TextExtractor) -> Self {
        Self { extractor }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(TextExtractor::from_settings(settings))
    }

    /// Discover supported files in a directory (non-recursive).
    ///
    /// Files are grouped PDF, then HTML, then CSV, and sorted by name within
    /// each group. Hidden files are ignored. A missing directory is empty.
    pub fn discover(&self, dir: &Path) -> Result<Vec<SourceFile>, ProcessError> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Directory not found, nothing to process: {}", dir.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(ProcessError::ReadDir {
                    path: dir.to_path_buf(),
                    source,
                })
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| ProcessError::ReadDir {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();

            let hidden = path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'));
            if hidden || !path.is_file() {
                continue;
            }
            if let Some(format) = DocumentFormat::from_path(&path) {
                files.push(SourceFile { path, format });
            }
        }

        files.sort_by(|a, b| {
            a.format
                .cmp(&b.format)
                .then_with(|| a.path.file_name().cmp(&b.path.file_name()))
        });
        Ok(files)
    }

    /// Extract a single file.
    pub fn process_file(&self, file: &SourceFile) -> Result<Vec<DocumentRecord>, ExtractError> {
        self.extractor.extract(&file.path, file.format)
    }

    /// Process a directory, writing `<dirname>_processed.parquet` into
    /// `output_dir` if any records were produced.
    pub fn process_directory(
        &self,
        dir: &Path,
        output_dir: &Path,
    ) -> Result<DirectoryReport, ProcessError> {
        self.process_directory_with(dir, output_dir, |file, outcome| {
            if let Err(e) = outcome {
                tracing::warn!("Skipping {}: {}", file.path.display(), e);
            }
        })
    }

    /// Process a directory, reporting every file outcome to `on_file`.
    pub fn process_directory_with<F>(
        &self,
        dir: &Path,
        output_dir: &Path,
        on_file: F,
    ) -> Result<DirectoryReport, ProcessError>
    where
        F: FnMut(&SourceFile, &Result<Vec<DocumentRecord>, ExtractError>),
    {
        let files = self.discover(dir)?;
        tracing::debug!("Discovered {} files in {}", files.len(), dir.display());
        self.process_files_with(dir, &files, output_dir, on_file)
    }

    /// Process already-discovered files of `dir`, in the given order.
    pub fn process_files_with<F>(
        &self,
        dir: &Path,
        files: &[SourceFile],
        output_dir: &Path,
        mut on_file: F,
    ) -> Result<DirectoryReport, ProcessError>
    where
        F: FnMut(&SourceFile, &Result<Vec<DocumentRecord>, ExtractError>),
    {
        let mut report = DirectoryReport {
            directory: dir.to_path_buf(),
            ..DirectoryReport::default()
        };

        for file in files {
            let outcome = self.process_file(file);
            report.stats.record_outcome(file.format, &outcome);
            on_file(file, &outcome);
            if let Ok(records) = outcome {
                report.records.extend(records);
            }
        }

        if !report.records.is_empty() {
            let path = output_dir.join(interim_file_name(&directory_name(dir)));
            if let Err(source) = write_interim(&path, &report.records) {
                return Err(ProcessError::Output {
                    path,
                    source,
                    stats: report.stats,
                });
            }
            tracing::info!(
                "Wrote {} records from {} to {}",
                report.records.len(),
                dir.display(),
                path.display()
            );
            report.output_path = Some(path);
        }

        Ok(report)
    }
}
