//! Platen Core: the vocabulary shared by every stage
//!
//! A row of data becomes a finished image in five steps. Every crate in
//! the workspace speaks in the types defined here.
//!
//! ## The Pipeline
//!
//! 1. **Segmentation** - text splits into [`types::Token`]s
//! 2. **Font Resolution** - a [`types::FontKey`] becomes a loadable font
//! 3. **Fitting** - tokens wrap into lines, shrinking the font if needed
//! 4. **Rendering** - lines are painted into the region's [`types::Bounds`]
//! 5. **Compositing** - region layers are pasted over the canvas
//!
//! ## The Seam
//!
//! The fit engine never sees a concrete font. It measures through
//! [`traits::MeasureFont`], so outline fonts, the builtin bitmap font and
//! test doubles all fit text the same way.

pub mod error;
pub mod traits;

pub use traits::MeasureFont;

/// The data structures that flow between stages
pub mod types {
    use std::fmt;
    use std::path::PathBuf;
    use std::str::FromStr;

    use serde::{Deserialize, Serialize};

    use crate::Color;

    /// What kind of characters a token holds
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum TokenKind {
        /// A run of simple ASCII characters, kept together when wrapping
        Word,
        /// A single wide or non-ASCII character, breakable on either side
        Wide,
        /// A single whitespace character, a legal break point
        Space,
    }

    /// An atomic wrapping unit produced by segmentation
    ///
    /// Tokens are never empty. The original text is kept verbatim so that
    /// joining every token reproduces the input.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct Token {
        text: String,
        kind: TokenKind,
    }

    impl Token {
        /// Build a token; returns `None` for empty text
        pub fn new(text: impl Into<String>, kind: TokenKind) -> Option<Self> {
            let text = text.into();
            if text.is_empty() {
                None
            } else {
                Some(Self { text, kind })
            }
        }

        pub fn text(&self) -> &str {
            &self.text
        }

        pub fn kind(&self) -> TokenKind {
            self.kind
        }

        /// Text as it should appear on a rendered line
        ///
        /// Any whitespace character lays out as a single blank space.
        pub fn layout_text(&self) -> &str {
            match self.kind {
                TokenKind::Space => " ",
                TokenKind::Word | TokenKind::Wide => &self.text,
            }
        }
    }

    /// Final lines, final size and whether content was cut
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FitResult {
        pub lines: Vec<String>,
        pub size: u32,
        pub truncated: bool,
    }

    impl FitResult {
        /// Height of one line at the resolved size
        pub fn line_height(&self) -> f64 {
            line_height(self.size)
        }

        /// Height of every line stacked together
        pub fn text_height(&self) -> f64 {
            self.lines.len() as f64 * self.line_height()
        }
    }

    /// Line pitch used by fitting and rendering alike
    pub fn line_height(size: u32) -> f64 {
        size as f64 * 1.2
    }

    /// How a font was asked for
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum FontIdentifier {
        /// An explicit font file on disk
        Path(PathBuf),
        /// A family name, possibly in a non-Latin script
        Name(String),
        /// No preference at all
        None,
    }

    impl fmt::Display for FontIdentifier {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Path(path) => write!(f, "{}", path.display()),
                Self::Name(name) => write!(f, "{name}"),
                Self::None => write!(f, "default"),
            }
        }
    }

    /// Cache identity of a resolved font
    ///
    /// The pixel size is part of the key: the same family at 20px and 24px
    /// are two distinct entries.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct FontKey {
        pub identifier: FontIdentifier,
        pub size: u32,
    }

    impl FontKey {
        pub fn new(identifier: FontIdentifier, size: u32) -> Self {
            Self { identifier, size }
        }

        /// Same identifier at another size
        pub fn with_size(&self, size: u32) -> Self {
            Self {
                identifier: self.identifier.clone(),
                size,
            }
        }
    }

    impl fmt::Display for FontKey {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}@{}px", self.identifier, self.size)
        }
    }

    /// Integer pixel rectangle, right and bottom exclusive
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(from = "[i32; 4]", into = "[i32; 4]")]
    pub struct Bounds {
        pub left: i32,
        pub top: i32,
        pub right: i32,
        pub bottom: i32,
    }

    impl Bounds {
        pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
            Self {
                left,
                top,
                right,
                bottom,
            }
        }

        /// Horizontal extent, saturating at the `i32` range
        pub fn width(&self) -> i32 {
            self.right.saturating_sub(self.left)
        }

        /// Vertical extent, saturating at the `i32` range
        pub fn height(&self) -> i32 {
            self.bottom.saturating_sub(self.top)
        }

        /// Both sides are at least one pixel
        pub fn is_renderable(&self) -> bool {
            self.width() >= 1 && self.height() >= 1
        }

        /// The same size, anchored at the origin
        pub fn local(&self) -> Self {
            Self::new(0, 0, self.width(), self.height())
        }

        /// Pixel dimensions, when renderable
        pub fn dimensions(&self) -> Option<(u32, u32)> {
            if self.is_renderable() {
                Some((self.width() as u32, self.height() as u32))
            } else {
                None
            }
        }
    }

    impl From<[i32; 4]> for Bounds {
        fn from([left, top, right, bottom]: [i32; 4]) -> Self {
            Self::new(left, top, right, bottom)
        }
    }

    impl From<Bounds> for [i32; 4] {
        fn from(b: Bounds) -> Self {
            [b.left, b.top, b.right, b.bottom]
        }
    }

    impl fmt::Display for Bounds {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "({}, {}, {}, {})",
                self.left, self.top, self.right, self.bottom
            )
        }
    }

    /// Horizontal placement of each line inside the box
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum HorizontalAlign {
        #[default]
        Left,
        Center,
        Right,
    }

    /// Vertical placement of the text block inside the box
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum VerticalAlign {
        Top,
        #[default]
        Center,
        Bottom,
    }

    /// Horizontal and vertical alignment together
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Alignment {
        pub horizontal: HorizontalAlign,
        pub vertical: VerticalAlign,
    }

    impl Alignment {
        pub const fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
            Self {
                horizontal,
                vertical,
            }
        }
    }

    impl fmt::Display for HorizontalAlign {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                Self::Left => "left",
                Self::Center => "center",
                Self::Right => "right",
            })
        }
    }

    impl fmt::Display for VerticalAlign {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                Self::Top => "top",
                Self::Center => "center",
                Self::Bottom => "bottom",
            })
        }
    }

    impl fmt::Display for Alignment {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}/{}", self.horizontal, self.vertical)
        }
    }

    impl FromStr for HorizontalAlign {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_ascii_lowercase().as_str() {
                "left" => Ok(Self::Left),
                "center" | "centre" => Ok(Self::Center),
                "right" => Ok(Self::Right),
                other => Err(format!("unknown horizontal alignment: {other}")),
            }
        }
    }

    impl FromStr for VerticalAlign {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_ascii_lowercase().as_str() {
                "top" => Ok(Self::Top),
                "center" | "centre" | "middle" => Ok(Self::Center),
                "bottom" => Ok(Self::Bottom),
                other => Err(format!("unknown vertical alignment: {other}")),
            }
        }
    }

    /// How the fit engine reacts to text that does not fit
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Strategy {
        /// Shrink the font step by step before truncating
        #[default]
        Auto,
        /// Keep the nominal size and truncate
        Fixed,
    }

    impl fmt::Display for Strategy {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                Self::Auto => "auto",
                Self::Fixed => "fixed",
            })
        }
    }

    /// Everything needed to paint one text region
    ///
    /// Built fresh for every region of every row; never stored.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RegionStyle {
        /// Requested font and nominal pixel size
        pub font: FontKey,
        /// Family name to try when an explicit path does not load
        pub fallback_name: Option<String>,
        /// Fill color, always opaque
        pub color: Color,
        pub alignment: Alignment,
    }
}

/// RGBA color; text fills are always opaque
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// The same color with full alpha
    pub const fn opaque(self) -> Self {
        Self::rgb(self.r, self.g, self.b)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
