//! Pipeline stages for per-page text extraction.
//!
//! Each submodule implements exactly one transformation step, which keeps
//! every stage independently testable and lets the rendering backend or
//! the remote client be swapped without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! render ──▶ encode ──▶ llm
//! (pdfium)   (base64)   (vision API)
//! ```
//!
//! 1. [`render`] — validate the input path and rasterise one page at a
//!    time; runs in `spawn_blocking` because pdfium is not async-safe
//! 2. [`encode`] — PNG-encode each `DynamicImage` and wrap it as a base64
//!    data URL for the multimodal request body
//! 3. [`llm`]    — send the page image plus the fixed prompt to the
//!    chat-completions endpoint; the only stage with network I/O

pub mod encode;
pub mod llm;
pub mod render;
