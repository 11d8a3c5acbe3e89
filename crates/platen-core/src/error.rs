//! Error types for Platen

use thiserror::Error;

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data: {0}")]
    InvalidData(String),

    #[error("Font file too large: {size} bytes (max: {max}) at {path}")]
    TooLarge { path: String, size: u64, max: u64 },

    #[error("Invalid pixel size: {0}")]
    InvalidSize(u32),
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Failed to allocate a {width}x{height} surface")]
    PixmapCreationFailed { width: u32, height: u32 },

    #[error("Glyph outline for {0:?} could not be drawn")]
    OutlineExtractionFailed(char),

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}
