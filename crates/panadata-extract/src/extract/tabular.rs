//! CSV extraction: one record per data row.

use std::io::Read;
use std::path::Path;

use panadata::metadata::infer_metadata;
use panadata::models::{DocumentFormat, DocumentRecord};
use panadata::utils::normalize_text;

use super::{file_name_of, ExtractError};

/// Cell values read as missing, in addition to blank cells.
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a cell counts as missing.
pub fn is_missing_value(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || NA_MARKERS.contains(&value)
}

fn column_label(headers: &[String], position: usize) -> String {
    match headers.get(position) {
        Some(header) if !header.is_empty() => header.clone(),
        _ => format!("Unnamed: {}", position),
    }
}

/// Normalized text of each data row, keyed by its zero-based row index.
///
/// Rows whose text normalizes to empty are skipped but still consume an
/// index. Cells beyond the header row are labelled by position.
pub fn csv_row_texts<R: Read>(
    reader: R,
    separator: &str,
) -> Result<Vec<(u64, String)>, ExtractError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| {
            String::from_utf8_lossy(h)
                .trim_start_matches('\u{feff}')
                .trim()
                .to_string()
        })
        .collect();

    let mut rows = Vec::new();
    for (index, result) in rdr.byte_records().enumerate() {
        let record = result?;
        let pairs: Vec<String> = record
            .iter()
            .enumerate()
            .filter_map(|(position, cell)| {
                let value = String::from_utf8_lossy(cell);
                if is_missing_value(&value) {
                    return None;
                }
                Some(format!("{}: {}", column_label(&headers, position), value))
            })
            .collect();

        let text = normalize_text(&pairs.join(separator));
        if !text.is_empty() {
            rows.push((index as u64, text));
        }
    }

    Ok(rows)
}

/// Extract one record per non-empty row of a CSV file.
pub fn extract_csv(path: &Path, separator: &str) -> Result<Vec<DocumentRecord>, ExtractError> {
    let file = std::fs::File::open(path)?;
    let rows = csv_row_texts(file, separator)?;
    if rows.is_empty() {
        return Err(ExtractError::Empty);
    }

    let filename = file_name_of(path);
    let metadata = infer_metadata(&filename);
    tracing::debug!("Extracted {} rows from {}", rows.len(), path.display());

    Ok(rows
        .into_iter()
        .map(|(row_index, text)| {
            DocumentRecord::new(text, filename.clone(), DocumentFormat::Csv, metadata.clone())
                .with_row_index(row_index)
        })
        .collect())
}
