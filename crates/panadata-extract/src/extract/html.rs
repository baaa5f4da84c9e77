//! HTML visible-text extraction with scraper.

use std::path::Path;

use scraper::Html;

use panadata::metadata::infer_metadata;
use panadata::models::{DocumentFormat, DocumentRecord};
use panadata::utils::normalize_text;

use super::{file_name_of, ExtractError};

/// Elements whose text is never prose.
const NON_PROSE_ELEMENTS: &[&str] = &["script", "style"];

/// Visible text of an HTML document, text nodes joined by spaces.
///
/// Text inside `script` and `style` elements is dropped. The result is not
/// normalized.
pub fn html_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| NON_PROSE_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        text.push_str(fragment);
        text.push(' ');
    }

    text
}

/// Extract one record from an HTML file.
pub fn extract_html(path: &Path) -> Result<DocumentRecord, ExtractError> {
    let bytes = std::fs::read(path)?;
    let html = String::from_utf8_lossy(&bytes);

    let text = normalize_text(&html_visible_text(&html));
    if text.is_empty() {
        return Err(ExtractError::Empty);
    }

    let filename = file_name_of(path);
    let metadata = infer_metadata(&filename);
    Ok(DocumentRecord::new(
        text,
        filename,
        DocumentFormat::Html,
        metadata,
    ))
}
