// this_file: crates/platen-batch/src/types.rs

//! Templates, rows, mappings and the records a batch run produces.

use std::collections::{BTreeMap, HashMap};

use camino::Utf8PathBuf;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use platen_core::types::{Bounds, HorizontalAlign, VerticalAlign};
use platen_core::Color;

/// What a template region holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    /// Text set from a row value
    Text,
    /// A picture loaded from a file named by a row value
    Image,
}

impl std::fmt::Display for RegionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Image => "image",
        })
    }
}

/// Style the design file suggests for a text region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleHints {
    /// Family name as written in the design file
    pub font_name: Option<String>,
    /// Pixel size
    pub size: Option<u32>,
    /// Fill color
    pub color: Option<Color>,
}

/// One named placeholder in a template.
#[derive(Debug, Clone)]
pub struct TemplateRegion {
    /// Unique name within the template
    pub name: String,
    /// Text or image
    pub kind: RegionKind,
    /// Placement on the canvas
    pub bounds: Bounds,
    /// Style suggestions for text regions
    pub hints: StyleHints,
    /// The region as the designer drew it, sized to `bounds`
    pub artwork: Option<RgbaImage>,
}

impl TemplateRegion {
    /// Name, kind, bounds and font hint, without the artwork
    pub fn summary(&self) -> RegionSummary {
        RegionSummary {
            name: self.name.clone(),
            kind: self.kind,
            bounds: self.bounds,
            font_name: self.hints.font_name.clone(),
        }
    }
}

/// A design template: canvas size plus regions in paint order.
#[derive(Debug, Clone, Default)]
pub struct Template {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Regions, painted first to last
    pub regions: Vec<TemplateRegion>,
}

impl Template {
    /// Summaries of every region, in paint order
    pub fn summaries(&self) -> Vec<RegionSummary> {
        self.regions.iter().map(TemplateRegion::summary).collect()
    }
}

/// What a mapping step gets to see about a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSummary {
    /// Region name
    pub name: String,
    /// Text or image
    pub kind: RegionKind,
    /// Placement on the canvas
    pub bounds: Bounds,
    /// Family name hint, for text regions
    pub font_name: Option<String>,
}

/// One data row: column name to text value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: HashMap<String, String>,
}

impl Row {
    /// Builds a row from column/value pairs.
    pub fn new<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of a column, if this row has it
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Sets a column value
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.values.insert(column.into(), value.into());
    }

    /// Number of columns present
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no values at all
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A loaded data source: known columns and rows in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names in order of first appearance
    pub columns: Vec<String>,
    /// Rows in source order
    pub rows: Vec<Row>,
}

/// Per-region alignment the operator pinned; unset sides fall through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentOverride {
    /// Horizontal alignment, if pinned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<HorizontalAlign>,
    /// Vertical alignment, if pinned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<VerticalAlign>,
}

/// Which column feeds which region, plus per-region style overrides.
///
/// Every map is keyed by region name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionMapping {
    /// Text region to column
    pub text: BTreeMap<String, String>,
    /// Image region to column
    pub image: BTreeMap<String, String>,
    /// Font file to use; an empty string keeps the template font
    pub fonts: BTreeMap<String, Utf8PathBuf>,
    /// Pixel size
    pub sizes: BTreeMap<String, u32>,
    /// RGB fill, used exactly as given
    pub colors: BTreeMap<String, [u8; 3]>,
    /// Pinned alignment
    pub alignment: BTreeMap<String, AlignmentOverride>,
}

impl RegionMapping {
    /// No region is mapped to any column
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.image.is_empty()
    }

    /// Number of mapped regions
    pub fn len(&self) -> usize {
        self.text.len() + self.image.len()
    }

    /// Column feeding `region`, whichever kind it is
    pub fn column_for(&self, region: &TemplateRegion) -> Option<&str> {
        let map = match region.kind {
            RegionKind::Text => &self.text,
            RegionKind::Image => &self.image,
        };
        map.get(&region.name).map(String::as_str)
    }

    /// Font file override for a region, ignoring blank entries
    pub fn font_override(&self, region: &str) -> Option<&Utf8PathBuf> {
        self.fonts
            .get(region)
            .filter(|path| !path.as_str().trim().is_empty())
    }

    /// Color override for a region
    pub fn color_override(&self, region: &str) -> Option<Color> {
        self.colors
            .get(region)
            .map(|&[r, g, b]| Color::rgb(r, g, b))
    }

    /// Drops entries that name unknown regions, wrong-kind regions or
    /// unknown columns, logging each one.
    pub fn retain_known(&mut self, regions: &[RegionSummary], columns: &[String]) {
        let kind_of = |name: &str| regions.iter().find(|r| r.name == name).map(|r| r.kind);
        let has_column = |column: &str| columns.iter().any(|c| c == column);

        for (kind, map) in [
            (RegionKind::Text, &mut self.text),
            (RegionKind::Image, &mut self.image),
        ] {
            map.retain(|region, column| {
                if kind_of(region.as_str()) != Some(kind) {
                    log::warn!("Mapping names unknown {kind} region '{region}', dropped");
                    false
                } else if !has_column(column.as_str()) {
                    log::warn!("Region '{region}' is mapped to unknown column '{column}', dropped");
                    false
                } else {
                    true
                }
            });
        }

        let known = |name: &String| kind_of(name.as_str()).is_some();
        self.fonts.retain(|name, _| known(name));
        self.sizes.retain(|name, _| known(name));
        self.colors.retain(|name, _| known(name));
        self.alignment.retain(|name, _| known(name));
    }
}

/// Interprets color components from a design file.
///
/// Components all within 0..=1 are scaled by 255; components all within
/// 0..=255 are used as they are. Anything else is rejected. Extra
/// components (alpha) are ignored and text stays opaque.
pub fn color_from_components(components: &[f64]) -> Option<Color> {
    let rgb = components.get(..3)?;
    if rgb.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let scale = if rgb.iter().all(|v| (0.0..=1.0).contains(v)) {
        255.0
    } else if rgb.iter().all(|v| (0.0..=255.0).contains(v)) {
        1.0
    } else {
        return None;
    };

    let channel = |v: f64| (v * scale).clamp(0.0, 255.0) as u8;
    Some(Color::rgb(channel(rgb[0]), channel(rgb[1]), channel(rgb[2])))
}

/// Milestones a batch run reports while it works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// Inputs loaded; this many rows will be rendered
    Started {
        /// Rows to render
        rows: usize,
    },
    /// A row was finished (every 5th row and the last)
    Row {
        /// Zero-based row index
        index: usize,
        /// Total rows
        total: usize,
    },
    /// All rows done
    Finished {
        /// Where the images went
        output: Utf8PathBuf,
    },
}

/// What a finished batch run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Rows read from the data source
    pub rows: usize,
    /// Images written to disk
    pub written: usize,
    /// Mapped regions that fell back to their artwork
    pub substitutions: usize,
    /// Output directory
    pub output_dir: Utf8PathBuf,
}
