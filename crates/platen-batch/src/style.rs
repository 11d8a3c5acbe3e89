// this_file: crates/platen-batch/src/style.rs

//! Effective style for a text region: mapping overrides, then template
//! hints, then defaults.

use platen_core::types::{
    Alignment, FontIdentifier, FontKey, HorizontalAlign, RegionStyle, VerticalAlign,
};
use platen_core::Color;

use crate::types::{RegionMapping, TemplateRegion};

/// Size used when neither the mapping nor the template gives one
pub const DEFAULT_SIZE: u32 = 12;

/// Alignment guessed from a region's name.
///
/// Titles are centred across the box; name fields hang from the top.
/// Everything else keeps the default left/center.
pub fn name_alignment(region: &str) -> Alignment {
    let lower = region.to_lowercase();
    let mut alignment = Alignment::default();
    if lower.contains("title") {
        alignment.horizontal = HorizontalAlign::Center;
    } else if lower.contains("name") || region.contains("姓名") {
        alignment.vertical = VerticalAlign::Top;
    }
    alignment
}

/// Builds the style a text region is painted with.
///
/// An operator font file becomes the explicit request and the template's
/// family name its fallback. Sizes of zero are ignored.
pub fn resolve_style(
    region: &TemplateRegion,
    mapping: &RegionMapping,
    name_heuristic: bool,
) -> RegionStyle {
    let name = region.name.as_str();
    let hinted_name = region.hints.font_name.clone();

    let (identifier, fallback_name) = match mapping.font_override(name) {
        Some(path) => (
            FontIdentifier::Path(path.clone().into_std_path_buf()),
            hinted_name,
        ),
        None => match hinted_name {
            Some(family) => (FontIdentifier::Name(family), None),
            None => (FontIdentifier::None, None),
        },
    };

    let size = mapping
        .sizes
        .get(name)
        .copied()
        .filter(|s| *s > 0)
        .or(region.hints.size.filter(|s| *s > 0))
        .unwrap_or(DEFAULT_SIZE);

    let color = mapping
        .color_override(name)
        .or(region.hints.color)
        .unwrap_or_else(Color::black)
        .opaque();

    let mut alignment = if name_heuristic {
        name_alignment(name)
    } else {
        Alignment::default()
    };
    if let Some(pinned) = mapping.alignment.get(name) {
        if let Some(horizontal) = pinned.horizontal {
            alignment.horizontal = horizontal;
        }
        if let Some(vertical) = pinned.vertical {
            alignment.vertical = vertical;
        }
    }

    RegionStyle {
        font: FontKey::new(identifier, size),
        fallback_name,
        color,
        alignment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AlignmentOverride, RegionKind, StyleHints};
    use platen_core::types::Bounds;
    use std::path::PathBuf;

    fn region(name: &str, hints: StyleHints) -> TemplateRegion {
        TemplateRegion {
            name: name.to_string(),
            kind: RegionKind::Text,
            bounds: Bounds::new(0, 0, 200, 40),
            hints,
            artwork: None,
        }
    }

    #[test]
    fn test_defaults_without_hints() {
        let style = resolve_style(
            &region("body", StyleHints::default()),
            &RegionMapping::default(),
            true,
        );
        assert_eq!(style.font, FontKey::new(FontIdentifier::None, DEFAULT_SIZE));
        assert_eq!(style.fallback_name, None);
        assert_eq!(style.color, Color::black());
        assert_eq!(
            style.alignment,
            Alignment::new(HorizontalAlign::Left, VerticalAlign::Center)
        );
    }

    #[test]
    fn test_mapping_overrides_win() {
        let hints = StyleHints {
            font_name: Some("宋体".into()),
            size: Some(20),
            color: Some(Color::rgb(1, 2, 3)),
        };
        let mut mapping = RegionMapping::default();
        mapping.fonts.insert("body".into(), "fonts/custom.ttf".into());
        mapping.sizes.insert("body".into(), 30);
        mapping.colors.insert("body".into(), [0, 0, 1]);

        let style = resolve_style(&region("body", hints), &mapping, true);
        assert_eq!(
            style.font,
            FontKey::new(FontIdentifier::Path(PathBuf::from("fonts/custom.ttf")), 30)
        );
        assert_eq!(style.fallback_name.as_deref(), Some("宋体"));
        assert_eq!(style.color, Color::rgb(0, 0, 1));
    }

    #[test]
    fn test_template_hints_apply_without_overrides() {
        let hints = StyleHints {
            font_name: Some("黑体".into()),
            size: Some(20),
            color: Some(Color::rgb(10, 20, 30)),
        };
        let mut mapping = RegionMapping::default();
        mapping.sizes.insert("body".into(), 0);

        let style = resolve_style(&region("body", hints), &mapping, true);
        assert_eq!(style.font, FontKey::new(FontIdentifier::Name("黑体".into()), 20));
        assert_eq!(style.color, Color::rgb(10, 20, 30));
    }

    #[test]
    fn test_color_override_beats_template_color() {
        let hints = StyleHints {
            color: Some(Color::black()),
            ..StyleHints::default()
        };
        for (rgb, expected) in [
            ([1, 1, 1], Color::rgb(1, 1, 1)),
            ([0, 0, 1], Color::rgb(0, 0, 1)),
            ([10, 20, 30], Color::rgb(10, 20, 30)),
        ] {
            let mut mapping = RegionMapping::default();
            mapping.colors.insert("body".into(), rgb);
            let style = resolve_style(&region("body", hints.clone()), &mapping, true);
            assert_eq!(style.color, expected);
        }
    }

    #[test]
    fn test_title_is_centred_horizontally() {
        let style = resolve_style(
            &region("MainTitle", StyleHints::default()),
            &RegionMapping::default(),
            true,
        );
        assert_eq!(style.alignment.horizontal, HorizontalAlign::Center);
        assert_eq!(style.alignment.vertical, VerticalAlign::Center);
    }

    #[test]
    fn test_name_fields_hang_from_top() {
        for name in ["user_name", "姓名"] {
            let style = resolve_style(
                &region(name, StyleHints::default()),
                &RegionMapping::default(),
                true,
            );
            assert_eq!(style.alignment.horizontal, HorizontalAlign::Left);
            assert_eq!(style.alignment.vertical, VerticalAlign::Top);
        }
    }

    #[test]
    fn test_heuristic_can_be_disabled() {
        let style = resolve_style(
            &region("title", StyleHints::default()),
            &RegionMapping::default(),
            false,
        );
        assert_eq!(style.alignment, Alignment::default());
    }

    #[test]
    fn test_pinned_alignment_beats_heuristic() {
        let mut mapping = RegionMapping::default();
        mapping.alignment.insert(
            "title".into(),
            AlignmentOverride {
                horizontal: Some(HorizontalAlign::Right),
                vertical: None,
            },
        );
        let style = resolve_style(&region("title", StyleHints::default()), &mapping, true);
        assert_eq!(
            style.alignment,
            Alignment::new(HorizontalAlign::Right, VerticalAlign::Center)
        );
    }
}
