//! PNG export format
//!
//! Encodes RGBA images with the `image` crate.

use std::fs;
use std::path::Path;

use image::{ImageEncoder, RgbaImage};

use platen_core::error::ExportError;

/// Encodes an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

/// Encodes and writes a PNG, creating parent directories as needed.
pub fn write_png(path: impl AsRef<Path>, image: &RgbaImage) -> Result<(), ExportError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| ExportError::WriteFailed(format!("{}: {e}", parent.display())))?;
    }

    let bytes = encode_png(image)?;
    fs::write(path, bytes)
        .map_err(|e| ExportError::WriteFailed(format!("{}: {e}", path.display())))?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}
