//! Error types for the vision-pdf2text library.
//!
//! Every failure in this crate is fatal: the pipeline is strictly
//! sequential, so when a page cannot be rendered or the vision API rejects
//! a request there is nothing useful left to do except surface the error
//! to the caller. Pages already emitted by the stream remain the only
//! output; there is no partial-result bookkeeping.
//!
//! The variants group into three families:
//!
//! * credential resolution — [`Pdf2TextError::MissingApiKey`], raised when
//!   the extraction client is constructed, before any file or network I/O;
//! * rendering — bad paths, non-PDF files, corrupt documents, pdfium
//!   failures;
//! * the remote call — transport errors, non-success HTTP statuses, and
//!   responses the crate cannot make sense of.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the vision-pdf2text library.
#[derive(Debug, Error)]
pub enum Pdf2TextError {
    // ── Credential errors ─────────────────────────────────────────────────
    /// No API key was resolvable from an explicit argument or the
    /// `OPENAI_API_KEY` environment variable.
    #[error(
        "No API key configured.\n\
         Set OPENAI_API_KEY or pass --api-key / ExtractionConfig::builder().api_key(...)."
    )]
    MissingApiKey,

    // ── Render errors ─────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// pdfium returned an error while rasterising a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    /// PNG encoding of a rendered page failed.
    #[error("Failed to PNG-encode page {page}: {detail}")]
    EncodeFailed { page: usize, detail: String },

    // ── Remote call errors ────────────────────────────────────────────────
    /// The HTTP request to the vision API could not be completed.
    #[error("Vision API request failed for page {page}: {detail}")]
    ApiRequestFailed { page: usize, detail: String },

    /// The vision API answered with a non-success status.
    #[error("Vision API returned HTTP {status} for page {page}: {body}")]
    ApiStatus {
        page: usize,
        status: u16,
        body: String,
    },

    /// The vision API response did not contain a usable completion.
    #[error("Malformed vision API response for page {page}: {detail}")]
    MalformedResponse { page: usize, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the output directory or write a page image file.
    #[error("Failed to write '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\
         Install libpdfium or set PDFIUM_LIB_PATH to an existing copy."
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_names_the_env_var() {
        let msg = Pdf2TextError::MissingApiKey.to_string();
        assert!(msg.contains("OPENAI_API_KEY"), "got: {msg}");
    }

    #[test]
    fn not_a_pdf_shows_magic_bytes() {
        let e = Pdf2TextError::NotAPdf {
            path: PathBuf::from("/tmp/notes.txt"),
            magic: *b"PK\x03\x04",
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.txt"));
        assert!(msg.contains("80"), "magic bytes should be listed: {msg}");
    }

    #[test]
    fn api_status_display() {
        let e = Pdf2TextError::ApiStatus {
            page: 4,
            status: 429,
            body: "rate limited".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("page 4"));
        assert!(msg.contains("rate limited"));
    }

    #[test]
    fn rasterisation_failed_display() {
        let e = Pdf2TextError::RasterisationFailed {
            page: 2,
            detail: "bitmap allocation".into(),
        };
        assert!(e.to_string().contains("page 2"));
    }
}
