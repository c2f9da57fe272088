//! Image encoding: `DynamicImage` → base64 PNG data URL.
//!
//! Vision APIs accept images as base64 data URLs embedded in the JSON
//! request body. PNG is used because it is lossless — text crispness
//! matters far more than file size for extraction accuracy, and JPEG
//! artefacts on rendered text measurably degrade what the model reads.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// A page image encoded for transport: a `data:image/png;base64,…` URL.
///
/// Transient — built from one rendered page, used for exactly one request,
/// then dropped.
#[derive(Debug, Clone)]
pub struct EncodedPage {
    pub data_url: String,
}

/// PNG-encode a rendered page.
pub fn png_bytes(img: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
    Ok(buf)
}

/// Encode a rasterised page as a base64 PNG data URL ready for the API.
pub fn encode_page(img: &DynamicImage) -> Result<EncodedPage, image::ImageError> {
    let png = png_bytes(img)?;
    let b64 = STANDARD.encode(&png);
    debug!("Encoded page image → {} bytes base64", b64.len());

    Ok(EncodedPage {
        data_url: format!("data:image/png;base64,{b64}"),
    })
}
