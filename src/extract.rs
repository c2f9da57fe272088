//! Eager (full-document) extraction entry points.
//!
//! [`extract`] drives the streaming pipeline to completion and collects
//! every page into memory. Use [`crate::stream::extract_stream`] directly
//! when you want pages progressively — streaming is the primary API; these
//! wrappers exist for callers that just want the whole document.
//!
//! This module also hosts the opt-in image-saving mode inherited from the
//! tool's file-based ancestor: render every page to `page_N.png` files
//! instead of (or in addition to) calling the vision model.

use crate::config::ExtractionConfig;
use crate::error::Pdf2TextError;
use crate::pipeline::{encode, render};
use crate::stream::{extract_stream, PageText};
use futures::StreamExt;
use std::path::Path;
use tracing::{debug, info};

/// Extract every page of a PDF, returning the results in page order.
///
/// The first page failure aborts the run and is returned as the error;
/// there is no partial-success result.
pub async fn extract(
    pdf_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<Vec<PageText>, Pdf2TextError> {
    let mut stream = extract_stream(pdf_path, config).await?;

    let mut pages = Vec::new();
    while let Some(page) = stream.next().await {
        pages.push(page?);
    }

    info!("Extraction complete: {} pages", pages.len());
    Ok(pages)
}

/// Synchronous wrapper around [`extract`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    pdf_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<Vec<PageText>, Pdf2TextError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2TextError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(extract(pdf_path, config))
}

/// Render every page of a PDF to `page_N.png` files in `out_dir`.
///
/// The directory is created if it does not exist. No vision model is
/// involved and no API key is required. Returns the number of pages
/// written.
pub async fn save_page_images(
    pdf_path: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
) -> Result<usize, Pdf2TextError> {
    let path = pdf_path.as_ref();
    let out_dir = out_dir.as_ref();

    render::validate_pdf_path(path)?;
    let total_pages = render::page_count(path).await?;

    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|e| Pdf2TextError::OutputWriteFailed {
            path: out_dir.to_path_buf(),
            source: e,
        })?;

    for index in 0..total_pages {
        let page_num = index + 1;
        let image = render::render_page(path, index).await?;
        let png = encode::png_bytes(&image).map_err(|e| Pdf2TextError::EncodeFailed {
            page: page_num,
            detail: e.to_string(),
        })?;

        let file = out_dir.join(format!("page_{}.png", page_num));
        tokio::fs::write(&file, &png)
            .await
            .map_err(|e| Pdf2TextError::OutputWriteFailed {
                path: file.clone(),
                source: e,
            })?;
        debug!("Wrote {}", file.display());
    }

    info!(
        "Saved {} page images to {}",
        total_pages,
        out_dir.display()
    );
    Ok(total_pages)
}
