//! Error types for the chefgen library.
//!
//! One enum covers every failure the pipeline can report, but the variants
//! fall into three policy groups:
//!
//! * **Fatal configuration** — [`ChefgenError::ApiKeyMissing`] halts before
//!   any pipeline call; nothing is sent without a credential.
//!
//! * **Extraction-local** — the `Document*`/`NotAPdf` variants are reported
//!   in place of extracted text and do not prevent the caller from
//!   proceeding with text/image-only input.
//!
//! * **Dispatch-boundary** — [`ChefgenError::Transport`] is caught inside
//!   [`crate::generate`] and converted into a displayable warning string.
//!   Callers of the high-level API never see it as an `Err`.
//!
//! Nothing is silently dropped: every variant maps to a message a user sees.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the chefgen library.
#[derive(Debug, Error)]
pub enum ChefgenError {
    // ── Configuration errors ──────────────────────────────────────────────
    /// No API key was found in the environment.
    #[error(
        "GEMINI_API_KEY is not set.\n\
         Get a key at https://aistudio.google.com/apikey and run:\n\
         export GEMINI_API_KEY=..."
    )]
    ApiKeyMissing,

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Document errors ───────────────────────────────────────────────────
    /// The document path does not exist or could not be opened.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    DocumentNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// The byte stream could not be parsed as a PDF structure.
    #[error("PDF could not be parsed: {detail}")]
    DocumentFormat { detail: String },

    // ── Image errors ──────────────────────────────────────────────────────
    /// Supplied image bytes are not a decodable raster image.
    #[error("Image could not be decoded: {detail}\nSupported formats: JPEG, PNG.")]
    ImageDecode { detail: String },

    // ── Dispatch errors ───────────────────────────────────────────────────
    /// Network, auth, or quota failure while calling the generation endpoint.
    ///
    /// Caught at the dispatch boundary by [`crate::generate::generate`] and
    /// rendered as warning text rather than propagated.
    #[error("Generation request failed: {detail}")]
    Transport { detail: String },

    // ── Validation ────────────────────────────────────────────────────────
    /// No text, image, or document was supplied.
    ///
    /// Detected by the front end before the pipeline runs; the pipeline
    /// itself would pass empty values through to the template.
    #[error("Please provide at least one input (text, image, or PDF).")]
    NoInput,

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_missing_names_the_variable() {
        let msg = ChefgenError::ApiKeyMissing.to_string();
        assert!(msg.contains("GEMINI_API_KEY"), "got: {msg}");
    }

    #[test]
    fn document_not_found_includes_path() {
        let e = ChefgenError::DocumentNotFound {
            path: PathBuf::from("/tmp/menu.pdf"),
        };
        assert!(e.to_string().contains("/tmp/menu.pdf"));
    }

    #[test]
    fn not_a_pdf_shows_magic_bytes() {
        let e = ChefgenError::NotAPdf {
            path: PathBuf::from("photo.jpg"),
            magic: [0xFF, 0xD8, 0xFF, 0xE0],
        };
        let msg = e.to_string();
        assert!(msg.contains("photo.jpg"));
        assert!(msg.contains("255"));
    }

    #[test]
    fn transport_includes_detail() {
        let e = ChefgenError::Transport {
            detail: "HTTP 429: quota exceeded".into(),
        };
        assert!(e.to_string().contains("quota exceeded"));
    }

    #[test]
    fn no_input_is_user_facing() {
        let msg = ChefgenError::NoInput.to_string();
        assert!(msg.contains("at least one input"));
    }
}
