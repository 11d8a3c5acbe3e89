//! Diagnostic sheets: a rendered layer framed on a card with notes.

use image::imageops::overlay;
use image::{Rgba, RgbaImage};

use platen_core::error::RenderError;
use platen_core::Color;
use platen_render::{bitmap, pixmap_to_image};

/// Card background
const BACKGROUND: Rgba<u8> = Rgba([240, 240, 240, 255]);
/// Gap around the layer
const MARGIN: u32 = 10;
/// Distance between note lines
const NOTE_PITCH: u32 = 15;
/// Narrow layers still get room for readable notes
const MIN_WIDTH: u32 = 240;

/// Frames `layer` on a grey card and prints `notes` below it.
///
/// The layer sits at (10, 10); the first note starts 15px under the
/// layer's bottom edge and each further note 15px lower.
pub fn diagnostic_sheet(layer: &RgbaImage, notes: &[String]) -> Result<RgbaImage, RenderError> {
    let (w, h) = layer.dimensions();
    let width = (w + 2 * MARGIN).max(MIN_WIDTH);
    let notes_top = h + 15;
    let height = notes_top + NOTE_PITCH * notes.len().max(3) as u32 + MARGIN;

    let mut sheet = RgbaImage::from_pixel(width, height, BACKGROUND);
    overlay(&mut sheet, layer, MARGIN as i64, MARGIN as i64);

    let strip_height = height - notes_top;
    let mut strip = tiny_skia::Pixmap::new(width, strip_height)
        .ok_or(RenderError::PixmapCreationFailed {
            width,
            height: strip_height,
        })?;
    for (i, note) in notes.iter().enumerate() {
        let y = (i as u32 * NOTE_PITCH) as f32;
        bitmap::fill_line(&mut strip, note, MARGIN as f32, y, Color::black());
    }
    overlay(&mut sheet, &pixmap_to_image(&strip)?, 0, notes_top as i64);

    Ok(sheet)
}
