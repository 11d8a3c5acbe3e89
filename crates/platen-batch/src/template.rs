// this_file: crates/platen-batch/src/template.rs

//! Where templates come from: the [`TemplateSource`] seam and the JSON
//! manifest format.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use platen_core::types::Bounds;

use crate::error::BatchError;
use crate::types::{color_from_components, RegionKind, StyleHints, Template, TemplateRegion};

/// Anything that can produce a template.
pub trait TemplateSource {
    /// Loads and parses the template.
    fn load(&self) -> Result<Template, BatchError>;
}

impl TemplateSource for Template {
    fn load(&self) -> Result<Template, BatchError> {
        Ok(self.clone())
    }
}

/// A template described by a JSON manifest plus artwork files.
///
/// ```json
/// { "width": 800, "height": 600,
///   "regions": [
///     { "name": "title", "kind": "text", "bounds": [10, 10, 300, 60],
///       "artwork": "layers/title.png",
///       "style": { "font": "Microsoft YaHei", "size": 24, "color": [0.1, 0.2, 0.3] } } ] }
/// ```
///
/// Artwork paths are relative to the manifest's directory.
#[derive(Debug, Clone)]
pub struct ManifestTemplate {
    path: Utf8PathBuf,
}

impl ManifestTemplate {
    /// Manifest at `path`
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Manifest location
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl TemplateSource for ManifestTemplate {
    fn load(&self) -> Result<Template, BatchError> {
        let text = fs::read_to_string(&self.path).map_err(|e| BatchError::Template {
            path: self.path.to_string(),
            reason: e.to_string(),
        })?;
        let base = self.path.parent().unwrap_or_else(|| Utf8Path::new("."));
        parse_manifest(&text, base).map_err(|reason| BatchError::Template {
            path: self.path.to_string(),
            reason,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    width: u32,
    height: u32,
    #[serde(default)]
    regions: Vec<ManifestRegion>,
}

#[derive(Debug, Deserialize)]
struct ManifestRegion {
    name: String,
    kind: RegionKind,
    bounds: Bounds,
    #[serde(default)]
    artwork: Option<Utf8PathBuf>,
    #[serde(default)]
    style: ManifestStyle,
}

#[derive(Debug, Default, Deserialize)]
struct ManifestStyle {
    #[serde(default)]
    font: Option<FontHint>,
    #[serde(default)]
    size: Option<f64>,
    #[serde(default)]
    color: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FontHint {
    Plain(String),
    Named {
        #[serde(alias = "Name")]
        name: String,
    },
}

impl FontHint {
    fn into_name(self) -> Option<String> {
        let name = match self {
            Self::Plain(name) | Self::Named { name } => name,
        };
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

/// Parses manifest JSON, loading artwork relative to `base`.
///
/// Missing or undecodable artwork is logged and left out; the region is
/// still part of the template.
pub fn parse_manifest(text: &str, base: &Utf8Path) -> Result<Template, String> {
    let manifest: Manifest = serde_json::from_str(text).map_err(|e| e.to_string())?;

    let regions = manifest
        .regions
        .into_iter()
        .map(|region| {
            let artwork = region.artwork.as_ref().and_then(|rel| load_artwork(&base.join(rel)));
            let hints = StyleHints {
                font_name: region.style.font.and_then(FontHint::into_name),
                size: region
                    .style
                    .size
                    .filter(|s| s.is_finite() && *s >= 1.0)
                    .map(|s| s as u32),
                color: region.style.color.as_deref().and_then(|c| {
                    let color = color_from_components(c);
                    if color.is_none() {
                        log::warn!("Region '{}' has unusable color {c:?}, ignored", region.name);
                    }
                    color
                }),
            };
            TemplateRegion {
                name: region.name,
                kind: region.kind,
                bounds: region.bounds,
                hints,
                artwork,
            }
        })
        .collect();

    Ok(Template {
        width: manifest.width,
        height: manifest.height,
        regions,
    })
}

fn load_artwork(path: &Utf8Path) -> Option<image::RgbaImage> {
    match image::open(path) {
        Ok(img) => Some(img.to_rgba8()),
        Err(e) => {
            log::warn!("Artwork {path} unavailable: {e}");
            None
        },
    }
}

/// One-line description of a region for listings and logs.
pub fn describe_region(region: &TemplateRegion) -> String {
    let mut out = format!("{} [{}] {}", region.name, region.kind, region.bounds);
    if region.kind == RegionKind::Text {
        let hints = &region.hints;
        out.push_str(&format!(
            " font={} size={} color={}",
            hints.font_name.as_deref().unwrap_or("-"),
            hints.size.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
            hints.color.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string()),
        ));
    }
    if region.artwork.is_none() {
        out.push_str(" (no artwork)");
    }
    out
}
