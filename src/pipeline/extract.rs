//! PDF text extraction: document bytes → page-ordered plain text.
//!
//! The extractor pulls the text layer directly instead of rasterising pages;
//! recipes arrive as digitally authored PDFs far more often than scans, and
//! the downstream prompt only needs the words.
//!
//! Failure policy mirrors the rest of the pipeline: a page whose content
//! stream cannot be decoded degrades to an empty fragment (with a warning)
//! rather than aborting the document, and a document where *no* page yields
//! text returns [`ExtractedText::NoTextLayer`] so the caller can tell
//! "document supplied but unreadable" apart from "no document supplied".

use crate::error::ChefgenError;
use crate::pipeline::input;
use lopdf::Document;
use std::path::Path;
use tracing::{debug, warn};

/// Result of text extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedText {
    /// Concatenated text of every page, in page order.
    Text(String),
    /// The document parsed, but no page carries a text layer
    /// (scanned or image-only PDF).
    NoTextLayer,
}

impl ExtractedText {
    /// The extracted text, or `None` for the no-text-layer sentinel.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ExtractedText::Text(t) => Some(t),
            ExtractedText::NoTextLayer => None,
        }
    }
}

/// Extract the text layer from PDF bytes.
///
/// Never fails for a structurally valid PDF: per-page extraction errors
/// degrade to empty fragments. Returns [`ChefgenError::DocumentFormat`]
/// only when the byte stream is not parseable as a PDF at all.
pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText, ChefgenError> {
    let doc = Document::load_mem(bytes).map_err(|e| ChefgenError::DocumentFormat {
        detail: e.to_string(),
    })?;

    let pages = doc.get_pages();
    let mut text = String::new();

    // BTreeMap keys are 1-indexed page numbers, so iteration is page order.
    for &page_num in pages.keys() {
        match doc.extract_text(&[page_num]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                warn!("Page {page_num}: text extraction failed, skipping — {e}");
            }
        }
    }

    if text.trim().is_empty() {
        debug!("No text layer found in {}-page document", pages.len());
        return Ok(ExtractedText::NoTextLayer);
    }

    debug!(
        "Extracted {} characters from {} pages",
        text.len(),
        pages.len()
    );
    Ok(ExtractedText::Text(text))
}

/// Extract the text layer from a PDF at a local path.
///
/// Path problems surface as [`ChefgenError::DocumentNotFound`] /
/// [`ChefgenError::PermissionDenied`]; everything else behaves like
/// [`extract_text`].
pub fn extract_text_from_path(path: impl AsRef<Path>) -> Result<ExtractedText, ChefgenError> {
    let bytes = input::read_document(path)?;
    extract_text(&bytes)
}
