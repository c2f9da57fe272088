//! PDF rasterisation: render one page at a time to a `DynamicImage` via pdfium.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async
//! contexts. `tokio::task::spawn_blocking` moves the work onto the blocking
//! thread pool so rendering never stalls the async executor.
//!
//! ## Why reopen the document per page?
//!
//! The pipeline holds at most one page bitmap in memory: a page is
//! rendered, encoded, shipped to the vision API, and dropped before the
//! next page is touched. A `PdfDocument` borrows the pdfium binding and
//! cannot be carried across await points, so each render call opens the
//! document, renders its single page, and closes it again. Parsing a PDF
//! is microseconds against the seconds a vision-model round trip takes.

use crate::error::Pdf2TextError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

/// Longest-edge cap for rendered pages, in pixels.
///
/// A safety limit independent of page size: an A0 poster would otherwise
/// rasterise to tens of thousands of pixels per side and exhaust memory,
/// while 2000 px sits in the sweet spot vision models read reliably.
const MAX_RENDERED_PIXELS: i32 = 2000;

/// Validate that `path` points at a readable PDF file.
///
/// Checks existence, read permission, and the `%PDF` magic bytes so the
/// caller gets a precise error instead of a pdfium parse failure on, say,
/// a ZIP archive passed by mistake.
pub fn validate_pdf_path(path: &Path) -> Result<(), Pdf2TextError> {
    if !path.exists() {
        return Err(Pdf2TextError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(mut f) => {
            use std::io::Read;
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(Pdf2TextError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Pdf2TextError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(Pdf2TextError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    debug!("Validated PDF path: {}", path.display());
    Ok(())
}

/// Count the pages of a PDF without rendering anything.
pub async fn page_count(pdf_path: &Path) -> Result<usize, Pdf2TextError> {
    let path = pdf_path.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<usize, Pdf2TextError> {
        let pdfium = bind_pdfium()?;
        let document = open_document(&pdfium, &path)?;
        Ok(document.pages().len() as usize)
    })
    .await
    .map_err(|e| Pdf2TextError::Internal(format!("Page-count task panicked: {}", e)))?
}

/// Rasterise a single page (0-indexed) of a PDF into an image.
pub async fn render_page(pdf_path: &Path, index: usize) -> Result<DynamicImage, Pdf2TextError> {
    let path = pdf_path.to_path_buf();

    let image = tokio::task::spawn_blocking(move || render_page_blocking(&path, index))
        .await
        .map_err(|e| Pdf2TextError::Internal(format!("Render task panicked: {}", e)))?;

    image
}

/// Blocking implementation of single-page rendering.
fn render_page_blocking(pdf_path: &Path, index: usize) -> Result<DynamicImage, Pdf2TextError> {
    let pdfium = bind_pdfium()?;
    let document = open_document(&pdfium, pdf_path)?;

    let pages = document.pages();
    let page = pages
        .get(index as u16)
        .map_err(|e| Pdf2TextError::RasterisationFailed {
            page: index + 1,
            detail: format!("{:?}", e),
        })?;

    let render_config = PdfRenderConfig::new()
        .set_target_width(MAX_RENDERED_PIXELS)
        .set_maximum_height(MAX_RENDERED_PIXELS);

    let bitmap = page.render_with_config(&render_config).map_err(|e| {
        Pdf2TextError::RasterisationFailed {
            page: index + 1,
            detail: format!("{:?}", e),
        }
    })?;

    let image = bitmap.as_image();
    debug!(
        "Rendered page {} → {}x{} px",
        index + 1,
        image.width(),
        image.height()
    );

    Ok(image)
}

/// Bind to the pdfium shared library.
///
/// Tries the process working directory first, then the system library
/// search path, matching the usual deployment of a `libpdfium` copy
/// shipped next to the binary.
fn bind_pdfium() -> Result<Pdfium, Pdf2TextError> {
    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map(Pdfium::new)
        .map_err(|e| Pdf2TextError::PdfiumBindingFailed(format!("{:?}", e)))
}

/// Open a PDF document, mapping pdfium parse failures to [`Pdf2TextError`].
fn open_document<'a>(
    pdfium: &'a Pdfium,
    pdf_path: &Path,
) -> Result<PdfDocument<'a>, Pdf2TextError> {
    pdfium
        .load_pdf_from_file(pdf_path, None)
        .map_err(|e| Pdf2TextError::CorruptPdf {
            path: pdf_path.to_path_buf(),
            detail: format!("{:?}", e),
        })
}
