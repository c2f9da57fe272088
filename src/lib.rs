//! # vision-pdf2text
//!
//! Extract per-page text from PDF documents using a vision language model.
//!
//! ## Why this crate?
//!
//! Traditional PDF-to-text tools fail on scanned pages, multi-column
//! layouts, and tables. This crate rasterises each page into a PNG and
//! lets a vision-capable model read it as a human would, returning clean
//! Markdown-ish text per page.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Render  rasterise one page via pdfium (spawn_blocking)
//!  ├─ 2. Encode  PNG → base64 data URL
//!  ├─ 3. Extract one chat-completions call with the fixed prompt
//!  └─ 4. Yield   (page_num, text), then move to the next page
//! ```
//!
//! The pipeline is strictly sequential and lazy: each advance of the
//! stream does one page's work, so results arrive progressively while the
//! rest of the document is still untouched. There is no concurrency, no
//! retry, and no timeout — errors terminate the run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vision_pdf2text::{extract_stream, ExtractionConfig};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // API key taken from OPENAI_API_KEY unless set explicitly.
//!     let config = ExtractionConfig::default();
//!     let mut pages = extract_stream("document.pdf", &config).await?;
//!     while let Some(page) = pages.next().await {
//!         let page = page?;
//!         println!("Page {} Text:\n{}\n", page.page_num, page.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Each remote-endpoint field resolves independently with the same
//! precedence — explicit value > environment variable > default:
//!
//! | Field    | Environment       | Default                     |
//! |----------|-------------------|-----------------------------|
//! | API key  | `OPENAI_API_KEY`  | none (missing key is fatal) |
//! | Base URL | `OPENAI_BASE_URL` | `https://api.openai.com/v1` |
//! | Model    | `OPENAI_MODEL`    | `gpt-4o-mini`               |
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2text` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod prompts;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder};
pub use error::Pdf2TextError;
pub use extract::{extract, extract_sync, save_page_images};
pub use pipeline::encode::EncodedPage;
pub use pipeline::llm::{TextExtractor, VisionClient};
pub use stream::{extract_stream, PageStream, PageText};
