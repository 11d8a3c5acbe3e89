// this_file: crates/platen-batch/src/compositor.rs

//! Per-row composition: every region of the template becomes either a
//! freshly rendered layer or the designer's artwork.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use platen_core::types::{Bounds, RegionStyle, Strategy};
use platen_export::{diagnostic_sheet, write_png};
use platen_fontdb::{FontResolver, ResolvedFont};
use platen_layout::{fit, Fitted};
use platen_render::{new_layer, pixmap_to_image, BoxRenderer, MAX_SURFACE_SIDE};
use platen_unicode::segment;

use crate::error::RegionError;
use crate::security::{sanitize_path, validate_text_input};
use crate::style::resolve_style;
use crate::types::{RegionKind, RegionMapping, Row, Template, TemplateRegion};

/// Canvas fill before any region is pasted
const CANVAS: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Knobs for composing rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositorOptions {
    /// Fit strategy for every text region
    pub strategy: Strategy,
    /// Where diagnostic sheets go; `None` disables them
    pub debug_dir: Option<Utf8PathBuf>,
    /// Guess alignment from region names when nothing is pinned
    pub name_alignment_heuristic: bool,
    /// Image paths in rows are resolved inside this directory
    pub data_dir: Utf8PathBuf,
}

impl Default for CompositorOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            debug_dir: None,
            name_alignment_heuristic: true,
            data_dir: Utf8PathBuf::from("."),
        }
    }
}

/// One composed row.
#[derive(Debug, Clone)]
pub struct RenderedRow {
    /// The full canvas
    pub image: RgbaImage,
    /// Mapped regions that fell back to their artwork
    pub substitutions: usize,
}

/// Composes rows against a template.
pub struct Compositor {
    resolver: Arc<FontResolver>,
    renderer: BoxRenderer,
    options: CompositorOptions,
}

impl Compositor {
    /// Compositor sharing `resolver`'s cache.
    pub fn new(resolver: Arc<FontResolver>, options: CompositorOptions) -> Self {
        Self {
            resolver,
            renderer: BoxRenderer::new(),
            options,
        }
    }

    /// Composes one row. `index` is zero-based and only used for logs
    /// and diagnostic file names.
    ///
    /// Never fails: a mapped region that cannot be rendered is logged
    /// and replaced by its artwork.
    pub fn render_row(
        &self,
        template: &Template,
        mapping: &RegionMapping,
        row: &Row,
        index: usize,
    ) -> RenderedRow {
        let mut canvas = RgbaImage::from_pixel(template.width, template.height, CANVAS);
        let mut substitutions = 0;

        for region in &template.regions {
            let layer = match mapping.column_for(region) {
                Some(column) => match self.render_region(region, mapping, row, column, index) {
                    Ok(layer) => Some(layer),
                    Err(err) => {
                        log::warn!(
                            "Row {} region '{}': {err}; using original artwork",
                            index + 1,
                            region.name
                        );
                        substitutions += 1;
                        None
                    },
                },
                None => None,
            };

            match (&layer, &region.artwork) {
                (Some(layer), _) => paste(&mut canvas, layer, region.bounds),
                (None, Some(artwork)) => paste(&mut canvas, artwork, region.bounds),
                (None, None) => {
                    log::debug!("Region '{}' has no artwork to paste", region.name)
                },
            }
        }

        RenderedRow {
            image: canvas,
            substitutions,
        }
    }

    fn render_region(
        &self,
        region: &TemplateRegion,
        mapping: &RegionMapping,
        row: &Row,
        column: &str,
        index: usize,
    ) -> Result<RgbaImage, RegionError> {
        let (width, height) = region
            .bounds
            .dimensions()
            .ok_or(RegionError::EmptyBounds(region.bounds))?;
        if width > MAX_SURFACE_SIDE || height > MAX_SURFACE_SIDE {
            return Err(RegionError::Oversized(region.bounds));
        }
        let value = row
            .get(column)
            .ok_or_else(|| RegionError::MissingColumn(column.to_string()))?;

        match region.kind {
            RegionKind::Text => self.render_text(region, mapping, value, index),
            RegionKind::Image => self.load_image(region, value),
        }
    }

    /// Renders `text` into a transparent layer the size of the region.
    pub fn render_text(
        &self,
        region: &TemplateRegion,
        mapping: &RegionMapping,
        text: &str,
        index: usize,
    ) -> Result<RgbaImage, RegionError> {
        validate_text_input(text)?;

        let style = resolve_style(region, mapping, self.options.name_alignment_heuristic);
        let resolved = self
            .resolver
            .resolve(&style.font, style.fallback_name.as_deref());

        let local = region.bounds.local();
        let tokens = segment(text);
        let fitted = fit(&tokens, resolved.face.clone(), local, self.options.strategy);
        log::debug!(
            "Row {} region '{}': {} at {}px, {} line(s){}, color {}, align {}",
            index + 1,
            region.name,
            resolved.describe(),
            fitted.result.size,
            fitted.result.lines.len(),
            if fitted.result.truncated { " truncated" } else { "" },
            style.color,
            style.alignment
        );

        let mut layer = new_layer(local)?;
        self.renderer.render(
            &mut layer,
            &fitted.result.lines,
            &fitted.font,
            style.color,
            style.alignment,
            local,
        )?;
        let image = pixmap_to_image(&layer)?;

        if let Some(dir) = &self.options.debug_dir {
            write_debug_sheet(dir, index, region, &image, &style, &resolved, &fitted);
        }
        Ok(image)
    }

    /// Loads the picture a row names and scales it to the region.
    fn load_image(&self, region: &TemplateRegion, value: &str) -> Result<RgbaImage, RegionError> {
        let path = sanitize_path(value, &self.options.data_dir)?;
        let picture = image::open(&path)
            .map_err(|e| RegionError::Image {
                path: path.to_string(),
                reason: e.to_string(),
            })?
            .to_rgba8();

        let (width, height) = region
            .bounds
            .dimensions()
            .ok_or(RegionError::EmptyBounds(region.bounds))?;
        Ok(imageops::resize(&picture, width, height, FilterType::Lanczos3))
    }
}

fn paste(canvas: &mut RgbaImage, layer: &RgbaImage, bounds: Bounds) {
    imageops::overlay(canvas, layer, bounds.left as i64, bounds.top as i64);
}

/// `debug_<row>_<region>.png`, with the region name made file-safe
pub fn debug_file_name(index: usize, region: &str) -> String {
    let safe: String = region
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("debug_{index}_{safe}.png")
}

fn write_debug_sheet(
    dir: &Utf8Path,
    index: usize,
    region: &TemplateRegion,
    layer: &RgbaImage,
    style: &RegionStyle,
    resolved: &ResolvedFont,
    fitted: &Fitted<platen_fontdb::Face>,
) {
    let mut notes = vec![
        format!("Region: {}", region.name),
        format!("Font: {}", resolved.describe()),
        format!("Size: {}px", fitted.result.size),
        format!("Color: {}", style.color),
        format!("Align: {}", style.alignment),
    ];
    if fitted.result.truncated {
        notes.push("Truncated".to_string());
    }

    let path = dir.join(debug_file_name(index, &region.name));
    let written = diagnostic_sheet(layer, &notes)
        .map_err(|e| e.to_string())
        .and_then(|sheet| write_png(&path, &sheet).map_err(|e| e.to_string()));
    if let Err(err) = written {
        log::warn!("Cannot write diagnostic sheet {path}: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StyleHints;
    use platen_core::Color;
    use platen_fontdb::ResolverConfig;
    use std::fs;

    fn temp_dir(tag: &str) -> Utf8PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let dir = std::env::temp_dir().join(format!("platen-compositor-{tag}-{nanos}"));
        fs::create_dir_all(dir.join("fonts")).unwrap();
        Utf8PathBuf::from_path_buf(dir).unwrap()
    }

    fn compositor(root: &Utf8Path, debug: bool) -> Compositor {
        let resolver = Arc::new(FontResolver::new(ResolverConfig::isolated(root.as_std_path())));
        Compositor::new(
            resolver,
            CompositorOptions {
                debug_dir: debug.then(|| root.join("debug")),
                data_dir: root.to_path_buf(),
                ..CompositorOptions::default()
            },
        )
    }

    fn artwork(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([0, 200, 0, 255]))
    }

    fn template() -> Template {
        Template {
            width: 200,
            height: 100,
            regions: vec![
                TemplateRegion {
                    name: "title".into(),
                    kind: RegionKind::Text,
                    bounds: Bounds::new(0, 0, 200, 40),
                    hints: StyleHints {
                        color: Some(Color::black()),
                        ..StyleHints::default()
                    },
                    artwork: Some(artwork(200, 40)),
                },
                TemplateRegion {
                    name: "photo".into(),
                    kind: RegionKind::Image,
                    bounds: Bounds::new(150, 50, 190, 90),
                    hints: StyleHints::default(),
                    artwork: Some(artwork(40, 40)),
                },
            ],
        }
    }

    fn has_color(image: &RgbaImage, color: [u8; 3]) -> bool {
        image
            .pixels()
            .any(|p| p.0[3] > 0 && p.0[0] == color[0] && p.0[1] == color[1] && p.0[2] == color[2])
    }

    #[test]
    fn test_unmapped_regions_paste_artwork() {
        let root = temp_dir("unmapped");
        let rendered = compositor(&root, false).render_row(
            &template(),
            &RegionMapping::default(),
            &Row::default(),
            0,
        );

        assert_eq!(rendered.substitutions, 0);
        assert_eq!(rendered.image.dimensions(), (200, 100));
        assert_eq!(rendered.image.get_pixel(10, 10).0, [0, 200, 0, 255]);
        assert_eq!(rendered.image.get_pixel(160, 60).0, [0, 200, 0, 255]);
        assert_eq!(rendered.image.get_pixel(100, 70).0, [255, 255, 255, 0]);
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_mapped_text_replaces_artwork() {
        let root = temp_dir("text");
        let mut mapping = RegionMapping::default();
        mapping.text.insert("title".into(), "Name".into());
        mapping.colors.insert("title".into(), [10, 20, 30]);
        let row = Row::new([("Name", "Hello")]);

        let rendered = compositor(&root, false).render_row(&template(), &mapping, &row, 0);

        assert_eq!(rendered.substitutions, 0);
        let title = imageops::crop_imm(&rendered.image, 0, 0, 200, 40).to_image();
        assert!(!has_color(&title, [0, 200, 0]));
        assert!(has_color(&title, [10, 20, 30]));
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_missing_image_falls_back_to_artwork() {
        let root = temp_dir("missing-image");
        let mut mapping = RegionMapping::default();
        mapping.image.insert("photo".into(), "Picture".into());
        let row = Row::new([("Picture", "img/does-not-exist.png")]);

        let rendered = compositor(&root, false).render_row(&template(), &mapping, &row, 3);

        assert_eq!(rendered.substitutions, 1);
        assert_eq!(rendered.image.get_pixel(160, 60).0, [0, 200, 0, 255]);
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_image_region_is_resized_into_box() {
        let root = temp_dir("image");
        fs::create_dir_all(root.join("img")).unwrap();
        RgbaImage::from_pixel(7, 3, Rgba([200, 0, 0, 255]))
            .save(root.join("img/red.png"))
            .unwrap();

        let mut mapping = RegionMapping::default();
        mapping.image.insert("photo".into(), "Picture".into());
        let row = Row::new([("Picture", "img/red.png")]);

        let rendered = compositor(&root, false).render_row(&template(), &mapping, &row, 0);

        assert_eq!(rendered.substitutions, 0);
        let px = rendered.image.get_pixel(170, 70).0;
        assert!(px[0] > 150 && px[1] < 50, "unexpected pixel {px:?}");
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_extreme_bounds_fall_back_without_panicking() {
        let root = temp_dir("extreme");
        let mut template = template();
        template.regions[0].bounds = Bounds::new(i32::MIN, 0, i32::MAX, 10);
        template.regions[1].bounds = Bounds::new(0, i32::MIN, 40, i32::MAX);
        let mut mapping = RegionMapping::default();
        mapping.text.insert("title".into(), "Name".into());
        mapping.image.insert("photo".into(), "Picture".into());
        let row = Row::new([("Name", "Hello"), ("Picture", "img/red.png")]);

        let rendered = compositor(&root, false).render_row(&template, &mapping, &row, 0);

        assert_eq!(rendered.substitutions, 2);
        assert_eq!(rendered.image.dimensions(), (200, 100));
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_missing_column_and_long_text_fall_back() {
        let root = temp_dir("rejects");
        let mut mapping = RegionMapping::default();
        mapping.text.insert("title".into(), "Name".into());
        let compositor = compositor(&root, false);

        let rendered = compositor.render_row(&template(), &mapping, &Row::default(), 0);
        assert_eq!(rendered.substitutions, 1);

        let long = "x".repeat(crate::MAX_TEXT_LENGTH + 1);
        let rendered = compositor.render_row(&template(), &mapping, &Row::new([("Name", long)]), 0);
        assert_eq!(rendered.substitutions, 1);
        assert_eq!(rendered.image.get_pixel(5, 5).0, [0, 200, 0, 255]);
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_empty_value_clears_the_region() {
        let root = temp_dir("empty");
        let mut mapping = RegionMapping::default();
        mapping.text.insert("title".into(), "Name".into());
        let row = Row::new([("Name", "")]);

        let rendered = compositor(&root, false).render_row(&template(), &mapping, &row, 0);
        assert_eq!(rendered.substitutions, 0);
        assert_eq!(rendered.image.get_pixel(5, 5).0, [255, 255, 255, 0]);
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_debug_sheets_are_written() {
        let root = temp_dir("debug");
        fs::create_dir_all(root.join("debug")).unwrap();
        let mut mapping = RegionMapping::default();
        mapping.text.insert("title".into(), "Name".into());
        let row = Row::new([("Name", "Hi")]);

        compositor(&root, true).render_row(&template(), &mapping, &row, 2);
        assert!(root.join("debug/debug_2_title.png").is_file());
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_debug_file_name_is_sanitized() {
        assert_eq!(debug_file_name(0, "姓名"), "debug_0_姓名.png");
        assert_eq!(debug_file_name(4, "a/b c"), "debug_4_a_b_c.png");
    }
}
