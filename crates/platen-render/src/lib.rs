//! Box Renderer - aligned lines of text painted into a region
//!
//! Takes the lines the fit engine settled on and puts them on a surface:
//! each line measured, aligned inside the box, and painted fully opaque.
//!
//! ## Two Kinds of Glyphs
//!
//! - Outline faces are traced with skrifa and filled by tiny-skia with
//!   anti-aliasing and the winding rule
//! - The builtin face is stamped from embedded-graphics bitmap cells
//!
//! Surfaces are tiny-skia [`Pixmap`]s. [`pixmap_to_image`] hands the result
//! to the `image` crate for compositing and encoding.

pub mod bitmap;
pub mod outline;

use image::RgbaImage;
use tiny_skia::Pixmap;

use platen_core::error::RenderError;
use platen_core::types::{line_height, Alignment, Bounds};
use platen_core::{Color, MeasureFont};
use platen_fontdb::Face;
use platen_layout::{horizontal_start, vertical_start};

/// Largest surface side the renderer will allocate
pub const MAX_SURFACE_SIDE: u32 = 16_384;

/// Paints fitted lines into a box on a surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxRenderer;

impl BoxRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Draws `lines` inside `bounds` (surface coordinates).
    ///
    /// Lines are spaced by 1.2 x the font's line size. Empty lines draw
    /// nothing but still take up their slot.
    pub fn render(
        &self,
        surface: &mut Pixmap,
        lines: &[String],
        font: &Face,
        color: Color,
        alignment: Alignment,
        bounds: Bounds,
    ) -> Result<(), RenderError> {
        if !bounds.is_renderable() {
            return Err(RenderError::InvalidDimensions {
                width: bounds.width() as i64,
                height: bounds.height() as i64,
            });
        }

        let size = font.line_size();
        let pitch = line_height(size);
        let color = color.opaque();
        let mut y = vertical_start(alignment.vertical, bounds, lines.len(), size);

        for line in lines {
            if !line.is_empty() {
                let x = horizontal_start(alignment.horizontal, bounds, font.text_width(line));
                match font {
                    Face::Outline(face) => {
                        outline::fill_line(surface, face, line, x as f32, y as f32, color)?
                    },
                    Face::Builtin(_) => bitmap::fill_line(surface, line, x as f32, y as f32, color),
                }
            }
            y += pitch;
        }

        Ok(())
    }
}

/// A fully transparent surface the size of `bounds`.
pub fn new_layer(bounds: Bounds) -> Result<Pixmap, RenderError> {
    let (width, height) = bounds.dimensions().ok_or(RenderError::InvalidDimensions {
        width: bounds.width() as i64,
        height: bounds.height() as i64,
    })?;
    if width > MAX_SURFACE_SIDE || height > MAX_SURFACE_SIDE {
        return Err(RenderError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        });
    }
    Pixmap::new(width, height).ok_or(RenderError::PixmapCreationFailed { width, height })
}

/// Converts a premultiplied surface into straight-alpha RGBA.
pub fn pixmap_to_image(pixmap: &Pixmap) -> Result<RgbaImage, RenderError> {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data).ok_or_else(|| {
        RenderError::BackendError("surface size does not match its pixel data".to_string())
    })
}
