/// Image file loader
///
/// This module reads a user-selected file fully into memory and decodes it
/// into the displayable RGBA representation the rest of the app works with.
/// Decoding is CPU-bound, so it runs on a blocking task off the UI thread.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::task;

use crate::state::data::LoadedImage;

/// Extensions offered by the file picker. This is the only format gate the
/// app applies; actual decodability is decided by the decoder.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "ico",
];

/// Errors while turning a picked file into a displayable image.
///
/// Clone is required so the error can travel inside an application message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("could not read {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("{0} is not a recognized image format")]
    UnrecognizedFormat(String),
    #[error("could not decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("background task failed: {0}")]
    TaskJoin(String),
}

/// Load an image file into memory.
///
/// Reads the whole file, sniffs its format for the MIME tag, and decodes it
/// to RGBA8. The calling interaction returns immediately; the result arrives
/// later through the completion message.
pub async fn load_image(path: PathBuf) -> Result<LoadedImage, LoadError> {
    // Spawn blocking because decoding is CPU-intensive
    task::spawn_blocking(move || load_image_blocking(&path))
        .await
        .map_err(|e| LoadError::TaskJoin(e.to_string()))?
}

/// Blocking implementation of the image load
fn load_image_blocking(path: &Path) -> Result<LoadedImage, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path).map_err(|e| LoadError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    // Sniff the format from the magic bytes, not the extension
    let format = image::guess_format(&bytes)
        .map_err(|_| LoadError::UnrecognizedFormat(path.display().to_string()))?;
    let mime = format.to_mime_type().to_string();

    let decoded =
        image::load_from_memory_with_format(&bytes, format).map_err(|e| LoadError::Decode {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    println!(
        "📷 Loaded {} ({}x{}, {}, {:.1} KB)",
        filename,
        width,
        height,
        mime,
        bytes.len() as f64 / 1024.0
    );

    Ok(LoadedImage {
        rgba: Arc::new(rgba.into_raw()),
        width,
        height,
        mime,
        filename,
        byte_len: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let result = load_image(PathBuf::from("/nonexistent/folio.png")).await;
        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_non_image_bytes_are_rejected() {
        let path = temp_path("decipher_loader_not_an_image.bin");
        std::fs::write(&path, b"definitely not pixels").unwrap();

        let result = load_image(path.clone()).await;
        assert!(matches!(result, Err(LoadError::UnrecognizedFormat(_))));

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_valid_png_round_trips() {
        let path = temp_path("decipher_loader_100x100.png");
        let pixel = image::Rgba([120u8, 80, 40, 255]);
        image::RgbaImage::from_pixel(100, 100, pixel)
            .save(&path)
            .unwrap();

        let loaded = load_image(path.clone()).await.unwrap();
        assert_eq!(loaded.dimensions(), (100, 100));
        assert_eq!(loaded.mime, "image/png");
        assert_eq!(loaded.filename, "decipher_loader_100x100.png");
        assert_eq!(loaded.rgba.len(), 100 * 100 * 4);
        assert_eq!(&loaded.rgba[..4], &[120, 80, 40, 255]);

        let _ = std::fs::remove_file(path);
    }
}
