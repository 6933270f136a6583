/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the loader and the UI layer.

use std::sync::Arc;

/// An uploaded image held fully in memory.
///
/// This is the in-memory equivalent of a data URI: the decoded pixels plus a
/// MIME-type tag describing what the original bytes were. It is absent until
/// a load succeeds, and a later upload simply overwrites it.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Decoded RGBA8 pixels, row-major, tightly packed. Shared so that
    /// cloning the image (messages, GPU upload) never copies the buffer.
    pub rgba: Arc<Vec<u8>>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// MIME type of the original file (e.g. "image/png")
    pub mime: String,
    /// Filename only (e.g. "folio_12r.png")
    pub filename: String,
    /// Size of the original file in bytes
    pub byte_len: usize,
}

impl LoadedImage {
    /// Pixel dimensions of the decoded image
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
