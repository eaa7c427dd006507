//! Image encoding: `DynamicImage` → base64 PNG wrapped in [`ImagePayload`].
//!
//! The Gemini API accepts inline images as base64 data embedded in the JSON
//! request body. Exactly one encoding is used regardless of what the user
//! uploaded — re-encoding every input to PNG guarantees the mime type we
//! declare always matches the bytes we send, whatever format (JPEG, PNG,
//! WebP re-saved as JPEG, …) the upload arrived in.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tracing::debug;

/// Canonical mime type for every transmitted image.
pub const CANONICAL_IMAGE_MIME: &str = "image/png";

/// An image re-encoded for transmission: canonical mime type + base64 data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

/// Re-encode a decoded image as a base64 PNG ready for the API request.
///
/// PNG is lossless, so whatever detail the upload carried survives
/// re-encoding; the model sees exactly what the user photographed.
pub fn encode_image(img: &DynamicImage) -> Result<ImagePayload, image::ImageError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;

    let b64 = STANDARD.encode(&buf);
    debug!("Encoded image → {} bytes base64", b64.len());

    Ok(ImagePayload {
        mime_type: CANONICAL_IMAGE_MIME.to_string(),
        data: b64,
    })
}
