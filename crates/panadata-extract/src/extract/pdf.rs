//! PDF text extraction with lopdf.

use std::path::Path;

use lopdf::Document;

use panadata::metadata::infer_metadata;
use panadata::models::{DocumentFormat, DocumentRecord};
use panadata::utils::normalize_text;

use super::{file_name_of, ExtractError};

/// Separator placed before the text of each page (1-based).
pub fn page_marker(page_number: usize) -> String {
    format!("--- Página {} ---", page_number)
}

/// Concatenate the text of every page, in order, each preceded by its
/// page marker. Returns the raw (unnormalized) text and the page count.
pub fn pdf_document_text(doc: &Document) -> Result<(String, u32), ExtractError> {
    let pages = doc.get_pages();
    let mut text = String::new();

    for (index, page_number) in pages.keys().enumerate() {
        let page_text = doc
            .extract_text(&[*page_number])
            .map_err(|e| ExtractError::Pdf(format!("page {}: {}", page_number, e)))?;
        text.push('\n');
        text.push_str(&page_marker(index + 1));
        text.push('\n');
        text.push_str(&page_text);
    }

    Ok((text, pages.len() as u32))
}

/// Extract one record from a PDF file.
pub fn extract_pdf(path: &Path) -> Result<DocumentRecord, ExtractError> {
    let bytes = std::fs::read(path)?;
    let doc = Document::load_mem(&bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;

    let (raw, page_count) = pdf_document_text(&doc)?;
    let text = normalize_text(&raw);
    if text.is_empty() {
        return Err(ExtractError::Empty);
    }

    tracing::debug!(
        "Extracted {} chars from {} pages of {}",
        text.len(),
        page_count,
        path.display()
    );

    let filename = file_name_of(path);
    let metadata = infer_metadata(&filename);
    Ok(DocumentRecord::new(text, filename, DocumentFormat::Pdf, metadata).with_pages(page_count))
}
