//! Input resolution: validate user-supplied document and image paths.
//!
//! Documents are checked for existence, readability, and the `%PDF` magic
//! bytes before extraction runs, so callers get a meaningful error rather
//! than a parser failure deep inside lopdf. Images are decoded eagerly for
//! the same reason: a corrupt upload should fail here, not at dispatch time.

use crate::error::ChefgenError;
use image::DynamicImage;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read a PDF document from a local path, validating magic bytes.
pub fn read_document(path: impl AsRef<Path>) -> Result<Vec<u8>, ChefgenError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ChefgenError::DocumentNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ChefgenError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(ChefgenError::DocumentNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| ChefgenError::Internal(format!("Failed to read '{}': {e}", path.display())))?;

    validate_pdf_magic(&bytes, path)?;

    debug!("Read PDF document: {} ({} bytes)", path.display(), bytes.len());
    Ok(bytes)
}

/// Verify the `%PDF` header on a byte stream.
pub fn validate_pdf_magic(bytes: &[u8], path: &Path) -> Result<(), ChefgenError> {
    if bytes.len() < 4 || &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        let n = bytes.len().min(4);
        magic[..n].copy_from_slice(&bytes[..n]);
        return Err(ChefgenError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        });
    }
    Ok(())
}

/// Load and decode an image from a local path.
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, ChefgenError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => ChefgenError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ChefgenError::DocumentNotFound {
            path: PathBuf::from(path),
        },
    })?;
    load_image_bytes(&bytes)
}

/// Decode raster image bytes (JPEG, PNG, …) into a [`DynamicImage`].
pub fn load_image_bytes(bytes: &[u8]) -> Result<DynamicImage, ChefgenError> {
    image::load_from_memory(bytes).map_err(|e| ChefgenError::ImageDecode {
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_document_reports_not_found() {
        let err = read_document("/nonexistent/menu.pdf").unwrap_err();
        assert!(matches!(err, ChefgenError::DocumentNotFound { .. }));
    }

    #[test]
    fn non_pdf_bytes_fail_magic_check() {
        let err = validate_pdf_magic(b"GIF89a", Path::new("anim.gif")).unwrap_err();
        match err {
            ChefgenError::NotAPdf { magic, .. } => assert_eq!(&magic, b"GIF8"),
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }

    #[test]
    fn short_bytes_fail_magic_check() {
        assert!(validate_pdf_magic(b"%P", Path::new("x.pdf")).is_err());
    }

    #[test]
    fn pdf_magic_passes() {
        assert!(validate_pdf_magic(b"%PDF-1.7\n", Path::new("ok.pdf")).is_ok());
    }

    #[test]
    fn garbage_image_bytes_rejected() {
        let err = load_image_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, ChefgenError::ImageDecode { .. }));
    }

    #[test]
    fn png_bytes_decode() {
        use image::{Rgba, RgbaImage};
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 128, 0, 255])));
        let mut buf = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        let decoded = load_image_bytes(&buf).unwrap();
        assert_eq!(decoded.width(), 4);
    }
}
