//! Interim table storage in Parquet.
//!
//! Each processed directory becomes one file, `<dir>_processed.parquet`,
//! holding one row per record in emission order.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow_array::{Array, ArrayRef, Int32Array, RecordBatch, StringArray, UInt32Array, UInt64Array};
use arrow_schema::{ArrowError, DataType, Field, Schema, SchemaRef};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::errors::ParquetError;
use thiserror::Error;

use panadata::models::{DocumentFormat, DocumentRecord, DocumentType, FileMetadata};

/// Extension of interim files.
pub const INTERIM_EXTENSION: &str = "parquet";

/// Errors from writing or reading interim tables.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    #[error("Invalid interim table: {0}")]
    Schema(String),
}

/// Interim file name for a directory name.
pub fn interim_file_name(dir_name: &str) -> String {
    format!("{}_processed.{}", dir_name, INTERIM_EXTENSION)
}

/// Arrow schema of the interim table.
pub fn interim_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("text", DataType::Utf8, false),
        Field::new("source", DataType::Utf8, false),
        Field::new("format", DataType::Utf8, false),
        Field::new("original_filename", DataType::Utf8, false),
        Field::new("year", DataType::Int32, true),
        Field::new("type", DataType::Utf8, false),
        Field::new("pages", DataType::UInt32, true),
        Field::new("row_index", DataType::UInt64, true),
    ]))
}

fn string_column<'a>(
    records: &'a [DocumentRecord],
    value: impl Fn(&'a DocumentRecord) -> &'a str,
) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(records.iter().map(value)))
}

/// Build a columnar batch from records.
pub fn records_to_batch(records: &[DocumentRecord]) -> Result<RecordBatch, OutputError> {
    let years: Vec<Option<i32>> = records.iter().map(|r| r.metadata.year).collect();
    let pages: Vec<Option<u32>> = records.iter().map(|r| r.pages).collect();
    let row_indexes: Vec<Option<u64>> = records.iter().map(|r| r.row_index).collect();

    let columns: Vec<ArrayRef> = vec![
        string_column(records, |r| &r.text),
        string_column(records, |r| &r.source),
        string_column(records, |r| r.format.as_str()),
        string_column(records, |r| &r.metadata.original_filename),
        Arc::new(Int32Array::from(years)),
        string_column(records, |r| r.metadata.doc_type.as_str()),
        Arc::new(UInt32Array::from(pages)),
        Arc::new(UInt64Array::from(row_indexes)),
    ];

    Ok(RecordBatch::try_new(interim_schema(), columns)?)
}

/// Write records to a Parquet file, creating parent directories.
pub fn write_interim(path: &Path, records: &[DocumentRecord]) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let batch = records_to_batch(records)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    tracing::debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

fn column<'a, T: 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T, OutputError> {
    batch
        .column_by_name(name)
        .and_then(|col| col.as_any().downcast_ref::<T>())
        .ok_or_else(|| OutputError::Schema(format!("missing or mistyped column '{}'", name)))
}

fn batch_to_records(batch: &RecordBatch) -> Result<Vec<DocumentRecord>, OutputError> {
    let text = column::<StringArray>(batch, "text")?;
    let source = column::<StringArray>(batch, "source")?;
    let format_col = column::<StringArray>(batch, "format")?;
    let original_filename = column::<StringArray>(batch, "original_filename")?;
    let year = column::<Int32Array>(batch, "year")?;
    let type_col = column::<StringArray>(batch, "type")?;
    let pages = column::<UInt32Array>(batch, "pages")?;
    let row_index = column::<UInt64Array>(batch, "row_index")?;

    (0..batch.num_rows())
        .map(|i| {
            let format = DocumentFormat::from_str(format_col.value(i)).ok_or_else(|| {
                OutputError::Schema(format!("unknown format '{}'", format_col.value(i)))
            })?;
            let doc_type = DocumentType::from_str(type_col.value(i)).ok_or_else(|| {
                OutputError::Schema(format!("unknown type '{}'", type_col.value(i)))
            })?;

            Ok(DocumentRecord {
                text: text.value(i).to_string(),
                source: source.value(i).to_string(),
                format,
                metadata: FileMetadata {
                    original_filename: original_filename.value(i).to_string(),
                    year: (!year.is_null(i)).then(|| year.value(i)),
                    doc_type,
                },
                pages: (!pages.is_null(i)).then(|| pages.value(i)),
                row_index: (!row_index.is_null(i)).then(|| row_index.value(i)),
            })
        })
        .collect()
}

/// Read records back from an interim Parquet file.
pub fn read_interim(path: &Path) -> Result<Vec<DocumentRecord>, OutputError> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        records.extend(batch_to_records(&batch?)?);
    }
    Ok(records)
}

/// Recursively find interim files under a directory, sorted by path.
pub fn find_interim_files(dir: &Path) -> Result<Vec<PathBuf>, OutputError> {
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        for entry in std::fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(INTERIM_EXTENSION))
            {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}
