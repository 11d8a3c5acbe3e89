//! The builtin bitmap font, drawn through embedded-graphics.

use std::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Point, Size};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::{Drawable, Pixel};
use tiny_skia::{ColorU8, Pixmap};

use platen_core::Color;
use platen_fontdb::BuiltinFace;

/// Lets embedded-graphics draw straight into a tiny-skia surface.
struct PixmapTarget<'a> {
    pixmap: &'a mut Pixmap,
}

impl OriginDimensions for PixmapTarget<'_> {
    fn size(&self) -> Size {
        Size::new(self.pixmap.width(), self.pixmap.height())
    }
}

impl DrawTarget for PixmapTarget<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let w = self.pixmap.width() as i32;
        let h = self.pixmap.height() as i32;
        let pixels_mut = self.pixmap.pixels_mut();
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 || point.x >= w || point.y >= h {
                continue;
            }
            let idx = (point.y * w + point.x) as usize;
            pixels_mut[idx] =
                ColorU8::from_rgba(color.r(), color.g(), color.b(), 255).premultiply();
        }
        Ok(())
    }
}

/// Paints `text` in bitmap cells with the top-left at (`x`, `top`).
pub fn fill_line(pixmap: &mut Pixmap, text: &str, x: f32, top: f32, color: Color) {
    let fill = Rgb888::new(color.r, color.g, color.b);
    let style = MonoTextStyle::new(BuiltinFace::mono_font(), fill);
    let origin = Point::new(x.round() as i32, top.round() as i32);
    let mut target = PixmapTarget { pixmap };

    match Text::with_baseline(text, origin, style, Baseline::Top).draw(&mut target) {
        Ok(_) => {},
        Err(never) => match never {},
    }
}
