//! Text Extractor: turns uploaded PDF bytes into plain resume text.
//!
//! Extraction faults are never fatal: they are logged and reported as
//! "no text", which the caller turns into an empty-input error.
//! Layout analysis is out of scope; only raw page text is used.

use lopdf::Document;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to load PDF: {0}")]
    Load(#[from] lopdf::Error),

    #[error("PDF is encrypted")]
    Encrypted,

    #[error("Fallback extraction failed: {0}")]
    Fallback(String),
}

/// Extracts the text of every page, in page order.
///
/// Returns `None` for unreadable documents and for documents with no
/// extractable text (scanned or image-only PDFs).
pub fn extract_text(pdf_bytes: &[u8]) -> Option<String> {
    if pdf_bytes.is_empty() {
        return None;
    }

    let text = extract_with(page_texts(pdf_bytes), || whole_document_text(pdf_bytes));
    if text.is_none() {
        warn!("PDF contained no extractable text");
    }
    text
}

/// Uses the per-page text when there is any, otherwise the whole-document
/// fallback. The fallback only runs when the primary path came up empty.
fn extract_with<F>(
    primary: Result<Vec<Option<String>>, ExtractionError>,
    fallback: F,
) -> Option<String>
where
    F: FnOnce() -> Result<String, ExtractionError>,
{
    match primary {
        Ok(pages) => {
            if let Some(text) = join_pages(pages) {
                return Some(text);
            }
            debug!("No page text found, trying pdf-extract");
        }
        Err(primary) => warn!("Primary PDF extraction failed ({primary}), trying pdf-extract"),
    }

    match fallback() {
        Ok(text) => join_pages([Some(text)]),
        Err(e) => {
            warn!("Error reading PDF: {e}");
            None
        }
    }
}

/// Joins page texts with a single line break. Pages that failed or are
/// blank contribute nothing, not even a separator.
pub fn join_pages<I>(pages: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let joined = pages
        .into_iter()
        .flatten()
        .map(|page| page.trim_end().to_string())
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn page_texts(pdf_bytes: &[u8]) -> Result<Vec<Option<String>>, ExtractionError> {
    let doc = Document::load_mem(pdf_bytes)?;
    if doc.is_encrypted() {
        return Err(ExtractionError::Encrypted);
    }

    let pages = doc
        .get_pages()
        .into_keys()
        .map(|page_number| match doc.extract_text(&[page_number]) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("Skipping page {page_number}: {e}");
                None
            }
        })
        .collect();

    Ok(pages)
}

// pdf-extract can panic on malformed input.
fn whole_document_text(pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
    std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(pdf_bytes))
        .map_err(|_| ExtractionError::Fallback("pdf-extract panicked".to_string()))?
        .map_err(|e| ExtractionError::Fallback(e.to_string()))
}
