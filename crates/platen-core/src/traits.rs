//! The contract between fonts and the fit engine
//!
//! Fitting only needs three questions answered: how big is this font,
//! how wide is this string, and can I have the same face at another size.

/// A font the fit engine can measure with
///
/// Implementors are cheap handles; `at_size` hands back a new one rather
/// than mutating in place.
///
/// ```ignore
/// struct Monospace(u32);
///
/// impl MeasureFont for Monospace {
///     fn pixel_size(&self) -> u32 {
///         self.0
///     }
///
///     fn text_width(&self, text: &str) -> f32 {
///         text.chars().count() as f32 * self.0 as f32 * 0.5
///     }
///
///     fn at_size(&self, size: u32) -> Option<Self> {
///         Some(Monospace(size))
///     }
/// }
/// ```
pub trait MeasureFont: Sized + Send + Sync {
    /// Nominal pixel size this handle was instantiated at
    fn pixel_size(&self) -> u32;

    /// Pixel size that sets line spacing
    ///
    /// Faces whose glyphs never scale report at least their glyph height
    /// so stacked lines do not overlap.
    fn line_size(&self) -> u32 {
        self.pixel_size()
    }

    /// Advance width of `text` in pixels, on a single line
    fn text_width(&self, text: &str) -> f32;

    /// The same face at another pixel size
    ///
    /// Fixed-size faces return `None`; the fit engine then packs once at
    /// whatever size the face already has.
    fn at_size(&self, size: u32) -> Option<Self>;
}
