//! Anti-aliased drawing of outline fonts through tiny-skia
//!
//! A whole line is traced into one kurbo path, then filled once. skrifa
//! scales outlines to pixels, so the pen only has to shift each glyph to
//! its pen position.

use kurbo::{BezPath, PathEl};
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::DrawSettings;
use skrifa::{GlyphId, MetadataProvider};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use platen_core::error::RenderError;
use platen_core::{Color, MeasureFont};
use platen_fontdb::OutlineFace;

/// Paints `text` with its line box's top-left at (`x`, `top`).
pub fn fill_line(
    pixmap: &mut Pixmap,
    face: &OutlineFace,
    text: &str,
    x: f32,
    top: f32,
    color: Color,
) -> Result<(), RenderError> {
    let font = face.blob().font_ref().ok_or_else(|| {
        RenderError::BackendError(format!("{} no longer parses", face.blob().path().display()))
    })?;

    let size = Size::new(face.pixel_size() as f32);
    let outlines = font.outline_glyphs();
    let metrics = font.glyph_metrics(size, LocationRef::default());
    let charmap = font.charmap();

    let mut path = BezPath::new();
    let mut pen_x = 0.0f64;
    for ch in text.chars() {
        let gid = charmap.map(ch).unwrap_or(GlyphId::NOTDEF);
        if let Some(glyph) = outlines.get(gid) {
            let mut pen = PathPen {
                path: &mut path,
                offset: pen_x,
            };
            let settings = DrawSettings::unhinted(size, LocationRef::default());
            glyph
                .draw(settings, &mut pen)
                .map_err(|_| RenderError::OutlineExtractionFailed(ch))?;
        }
        pen_x += metrics.advance_width(gid).unwrap_or(0.0) as f64;
    }

    // Blank lines and runs of spaces have nothing to fill
    let Some(skia_path) = to_skia_path(&path) else {
        return Ok(());
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = true;

    // Fonts are y-up; flip and drop the baseline below the line top
    let baseline = top + face.ascent();
    let transform = Transform::from_scale(1.0, -1.0).post_translate(x, baseline);
    pixmap.fill_path(&skia_path, &paint, FillRule::Winding, transform, None);

    log::trace!("Filled {:?} at ({x:.1}, {top:.1})", text);
    Ok(())
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(ctrl, end) => {
                builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            },
            PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

/// Traces glyph outlines into a shared path, shifted to the pen position
struct PathPen<'a> {
    path: &'a mut BezPath,
    offset: f64,
}

impl skrifa::outline::OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((x as f64 + self.offset, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((x as f64 + self.offset, y as f64));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path.quad_to(
            (cx0 as f64 + self.offset, cy0 as f64),
            (x as f64 + self.offset, y as f64),
        );
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(
            (cx0 as f64 + self.offset, cy0 as f64),
            (cx1 as f64 + self.offset, cy1 as f64),
            (x as f64 + self.offset, y as f64),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_has_nothing_to_fill() {
        assert!(to_skia_path(&BezPath::new()).is_none());
    }

    #[test]
    fn test_pen_offsets_x_only() {
        use skrifa::outline::OutlinePen;

        let mut path = BezPath::new();
        let mut pen = PathPen {
            path: &mut path,
            offset: 10.0,
        };
        pen.move_to(1.0, 2.0);
        pen.line_to(3.0, 4.0);
        pen.close();

        let elements = path.elements();
        assert_eq!(elements[0], PathEl::MoveTo((11.0, 2.0).into()));
        assert_eq!(elements[1], PathEl::LineTo((13.0, 4.0).into()));
        assert_eq!(elements[2], PathEl::ClosePath);
    }
}
