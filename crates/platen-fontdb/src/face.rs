// this_file: crates/platen-fontdb/src/face.rs

//! Loaded font faces and how they measure text.
//!
//! Raw bytes live in a shared [`FontBlob`]. A [`skrifa::FontRef`] is made on
//! demand for each query, so TTC collections work and nothing leaks.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use embedded_graphics::mono_font::{ascii::FONT_6X13, MonoFont};
use read_fonts::TableProvider;
use skrifa::instance::{LocationRef, Size};
use skrifa::{GlyphId, MetadataProvider};

use platen_core::error::FontLoadError;
use platen_core::MeasureFont;

/// Font files above this size are refused (50MB).
pub const MAX_FONT_SIZE: u64 = 50 * 1024 * 1024;

/// Raw bytes of one face inside a font file.
#[derive(Debug)]
pub struct FontBlob {
    data: Vec<u8>,
    path: PathBuf,
    face_index: u32,
}

impl FontBlob {
    /// Reads and validates the first face of a font file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FontLoadError> {
        Self::load_index(path, 0)
    }

    /// Reads and validates one face of a font file or collection.
    pub fn load_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self, FontLoadError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let meta = fs::metadata(path).map_err(|_| FontLoadError::FileNotFound(display.clone()))?;
        if !meta.is_file() {
            return Err(FontLoadError::FileNotFound(display));
        }
        if meta.len() > MAX_FONT_SIZE {
            return Err(FontLoadError::TooLarge {
                path: display,
                size: meta.len(),
                max: MAX_FONT_SIZE,
            });
        }

        let data = fs::read(path).map_err(|_| FontLoadError::FileNotFound(display.clone()))?;
        Self::from_data(data, path.to_path_buf(), face_index)
    }

    /// Wraps bytes already in memory, checking that they parse.
    pub fn from_data(
        data: Vec<u8>,
        path: PathBuf,
        face_index: u32,
    ) -> Result<Self, FontLoadError> {
        let font = read_fonts::FontRef::from_index(&data, face_index)
            .map_err(|e| FontLoadError::InvalidData(format!("{}: {e}", path.display())))?;

        // Both tables are needed to map and measure characters
        font.head()
            .map_err(|e| FontLoadError::InvalidData(format!("{}: head: {e}", path.display())))?;
        font.cmap()
            .map_err(|e| FontLoadError::InvalidData(format!("{}: cmap: {e}", path.display())))?;

        Ok(Self {
            data,
            path,
            face_index,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    /// Creates a parsing view on demand
    pub fn font_ref(&self) -> Option<skrifa::FontRef<'_>> {
        skrifa::FontRef::from_index(&self.data, self.face_index).ok()
    }
}

/// An outline font instantiated at a pixel size.
#[derive(Debug, Clone)]
pub struct OutlineFace {
    blob: Arc<FontBlob>,
    size: u32,
}

impl OutlineFace {
    pub fn new(blob: Arc<FontBlob>, size: u32) -> Result<Self, FontLoadError> {
        if size == 0 {
            return Err(FontLoadError::InvalidSize(size));
        }
        Ok(Self { blob, size })
    }

    pub fn blob(&self) -> &Arc<FontBlob> {
        &self.blob
    }

    /// Distance from the top of a line to its baseline, in pixels.
    pub fn ascent(&self) -> f32 {
        self.blob
            .font_ref()
            .map(|font| {
                font.metrics(Size::new(self.size as f32), LocationRef::default())
                    .ascent
            })
            .unwrap_or(self.size as f32 * 0.8)
    }

    /// Glyph drawn for `ch`, `.notdef` when the face lacks it.
    pub fn glyph_id(&self, ch: char) -> GlyphId {
        self.blob
            .font_ref()
            .and_then(|font| font.charmap().map(ch))
            .unwrap_or(GlyphId::NOTDEF)
    }
}

impl MeasureFont for OutlineFace {
    fn pixel_size(&self) -> u32 {
        self.size
    }

    fn text_width(&self, text: &str) -> f32 {
        let Some(font) = self.blob.font_ref() else {
            return text.chars().count() as f32 * self.size as f32 * 0.5;
        };

        let charmap = font.charmap();
        let metrics = font.glyph_metrics(Size::new(self.size as f32), LocationRef::default());

        text.chars()
            .map(|ch| {
                let gid = charmap.map(ch).unwrap_or(GlyphId::NOTDEF);
                metrics.advance_width(gid).unwrap_or(0.0)
            })
            .sum()
    }

    fn at_size(&self, size: u32) -> Option<Self> {
        Self::new(Arc::clone(&self.blob), size).ok()
    }
}

/// The last-resort bitmap font compiled into the binary.
///
/// Glyph cells have a fixed size; the requested pixel size is only used for
/// line spacing, and never drops below the cell height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinFace {
    size: u32,
}

impl BuiltinFace {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    /// The bitmap font used to draw every builtin glyph
    pub fn mono_font() -> &'static MonoFont<'static> {
        &FONT_6X13
    }

    /// Horizontal advance of one glyph cell
    pub fn cell_advance() -> u32 {
        let font = Self::mono_font();
        font.character_size.width + font.character_spacing
    }
}

impl MeasureFont for BuiltinFace {
    fn pixel_size(&self) -> u32 {
        self.size
    }

    fn text_width(&self, text: &str) -> f32 {
        (text.chars().count() as u32 * Self::cell_advance()) as f32
    }

    fn line_size(&self) -> u32 {
        self.size.max(Self::mono_font().character_size.height)
    }

    fn at_size(&self, _size: u32) -> Option<Self> {
        None
    }
}

/// Either kind of face, as handed out by the resolver.
#[derive(Debug, Clone)]
pub enum Face {
    Outline(OutlineFace),
    Builtin(BuiltinFace),
}

impl Face {
    /// File the face came from, if any
    pub fn source_path(&self) -> Option<&Path> {
        match self {
            Self::Outline(face) => Some(face.blob().path()),
            Self::Builtin(_) => None,
        }
    }
}

impl MeasureFont for Face {
    fn pixel_size(&self) -> u32 {
        match self {
            Self::Outline(face) => face.pixel_size(),
            Self::Builtin(face) => face.pixel_size(),
        }
    }

    fn line_size(&self) -> u32 {
        match self {
            Self::Outline(face) => face.line_size(),
            Self::Builtin(face) => face.line_size(),
        }
    }

    fn text_width(&self, text: &str) -> f32 {
        match self {
            Self::Outline(face) => face.text_width(text),
            Self::Builtin(face) => face.text_width(text),
        }
    }

    fn at_size(&self, size: u32) -> Option<Self> {
        match self {
            Self::Outline(face) => face.at_size(size).map(Self::Outline),
            Self::Builtin(face) => face.at_size(size).map(Self::Builtin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_rejects_garbage() {
        let result = FontBlob::from_data(vec![0; 100], PathBuf::from("junk.ttf"), 0);
        assert!(matches!(result, Err(FontLoadError::InvalidData(_))));
    }

    #[test]
    fn test_blob_missing_file() {
        let result = FontBlob::load("/definitely/not/here/font.ttf");
        assert!(matches!(result, Err(FontLoadError::FileNotFound(_))));
    }

    #[test]
    fn test_blob_directory_is_not_a_font() {
        let result = FontBlob::load(std::env::temp_dir());
        assert!(matches!(result, Err(FontLoadError::FileNotFound(_))));
    }

    #[test]
    fn test_builtin_measures_by_cell() {
        let face = BuiltinFace::new(24);
        assert_eq!(face.pixel_size(), 24);
        assert_eq!(BuiltinFace::cell_advance(), 6);
        assert_eq!(face.text_width("abcd"), 24.0);
        assert_eq!(face.text_width("中文"), 12.0);
        assert_eq!(face.text_width(""), 0.0);
    }

    #[test]
    fn test_builtin_line_size_covers_cell_height() {
        assert_eq!(BuiltinFace::new(8).line_size(), 13);
        assert_eq!(BuiltinFace::new(13).line_size(), 13);
        assert_eq!(BuiltinFace::new(20).line_size(), 20);
        assert_eq!(Face::Builtin(BuiltinFace::new(1)).line_size(), 13);
        assert_eq!(Face::Builtin(BuiltinFace::new(1)).pixel_size(), 1);
    }

    #[test]
    fn test_builtin_cannot_resize() {
        assert!(BuiltinFace::new(12).at_size(10).is_none());
        assert!(Face::Builtin(BuiltinFace::new(12)).at_size(10).is_none());
    }
}
