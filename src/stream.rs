//! Streaming extraction API: yield each page's text as soon as it arrives.
//!
//! The stream is a pull-based producer: advancing it performs one page's
//! render → encode → remote call before yielding, so page 1's text can be
//! printed while page 2 has not even been rendered yet. Pages are emitted
//! strictly in ascending page order — there is no concurrent dispatch and
//! therefore no reordering. The stream is finite (one item per page),
//! single-pass, and restartable only by calling [`extract_stream`] again.

use crate::config::ExtractionConfig;
use crate::error::Pdf2TextError;
use crate::pipeline::llm::{TextExtractor, VisionClient};
use crate::pipeline::{encode, render};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use tokio_stream::Stream;
use tracing::info;

/// One page's extraction result: a 1-based page number and the model's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub page_num: usize,
    pub text: String,
}

/// A boxed stream of per-page results, in page order.
pub type PageStream = Pin<Box<dyn Stream<Item = Result<PageText, Pdf2TextError>> + Send>>;

/// Extract a PDF's text page by page, streaming results as they complete.
///
/// Work happens lazily: nothing is rendered or sent until the stream is
/// polled, and each advance processes exactly one page. An empty (0-page)
/// PDF produces an empty stream, not an error.
///
/// # Errors
/// Fails up front on a missing API key (before any file access) or an
/// unreadable/invalid PDF. Per-page failures are yielded as `Err` items;
/// since every error in this crate is fatal, callers normally stop at the
/// first one.
pub async fn extract_stream(
    pdf_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<PageStream, Pdf2TextError> {
    let path = pdf_path.as_ref().to_path_buf();
    info!("Starting extraction: {}", path.display());

    // Credentials resolve first: a key-less run must fail before any
    // rendering or network work starts.
    let extractor = resolve_extractor(config)?;

    render::validate_pdf_path(&path)?;
    let total_pages = render::page_count(&path).await?;
    info!("PDF loaded: {} pages", total_pages);

    let s = stream::iter(0..total_pages).then(move |index| {
        let extractor = Arc::clone(&extractor);
        let path = path.clone();
        async move {
            let page_num = index + 1;

            let image = render::render_page(&path, index).await?;
            let encoded =
                encode::encode_page(&image).map_err(|e| Pdf2TextError::EncodeFailed {
                    page: page_num,
                    detail: e.to_string(),
                })?;
            // The bitmap is dead weight once encoded; free it before the
            // (potentially long) remote call.
            drop(image);

            let text = extractor.extract_page(page_num, &encoded).await?;
            Ok(PageText { page_num, text })
        }
    });

    Ok(Box::pin(s))
}

/// Pick the extractor: a pre-built one from the config, else a
/// [`VisionClient`] constructed (and credential-checked) now.
fn resolve_extractor(
    config: &ExtractionConfig,
) -> Result<Arc<dyn TextExtractor>, Pdf2TextError> {
    if let Some(ref extractor) = config.extractor {
        return Ok(Arc::clone(extractor));
    }

    Ok(Arc::new(VisionClient::new(config)?))
}
