// this_file: crates/platen-layout/src/proptests.rs

use super::{fit, floor_size, max_lines, pack, truncate};
use platen_core::types::{Bounds, Strategy as FitStrategy};
use platen_core::MeasureFont;
use platen_unicode::segment;
use proptest::prelude::*;

/// Integer advances so widths add up exactly.
#[derive(Debug, Clone)]
struct Cells(u32);

impl MeasureFont for Cells {
    fn pixel_size(&self) -> u32 {
        self.0
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars()
            .map(|c| if c.is_ascii() { self.0 / 2 + 1 } else { self.0 })
            .sum::<u32>() as f32
    }

    fn at_size(&self, size: u32) -> Option<Self> {
        Some(Cells(size))
    }
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.中文字体排版]{0,120}"
}

fn fit_strategy() -> impl Strategy<Value = FitStrategy> {
    prop_oneof![Just(FitStrategy::Auto), Just(FitStrategy::Fixed)]
}

// Property: the final size stays within [floor, nominal]
proptest! {
    #[test]
    fn prop_size_in_range(
        text in text_strategy(),
        nominal in 1u32..72,
        w in 1i32..400,
        h in 1i32..200,
        strategy in fit_strategy(),
    ) {
        let fitted = fit(&segment(&text), Cells(nominal), Bounds::new(0, 0, w, h), strategy);
        prop_assert!(fitted.result.size >= floor_size(nominal));
        prop_assert!(fitted.result.size <= nominal);
        prop_assert_eq!(fitted.font.pixel_size(), fitted.result.size);
    }
}

// Property: never more lines than the box holds
proptest! {
    #[test]
    fn prop_line_count_bounded(
        text in text_strategy(),
        nominal in 1u32..72,
        w in 1i32..400,
        h in 1i32..200,
        strategy in fit_strategy(),
    ) {
        let fitted = fit(&segment(&text), Cells(nominal), Bounds::new(0, 0, w, h), strategy);
        prop_assert!(fitted.result.lines.len() <= max_lines(h, fitted.result.size));
    }
}

// Property: packed lines fit the width, except a lone oversized character
proptest! {
    #[test]
    fn prop_lines_fit_width(
        text in text_strategy(),
        size in 1u32..72,
        w in 1i32..400,
    ) {
        let font = Cells(size);
        for line in pack(&segment(&text), &font, w as f32) {
            let width = font.text_width(&line);
            prop_assert!(
                width <= w as f32 || line.chars().count() == 1,
                "{line:?} is {width} wide in {w}"
            );
        }
    }
}

// Property: packing loses nothing but whitespace spelling
proptest! {
    #[test]
    fn prop_pack_preserves_content(text in text_strategy(), size in 1u32..72, w in 1i32..400) {
        let joined: String = pack(&segment(&text), &Cells(size), w as f32).concat();
        prop_assert_eq!(joined, text);
    }
}

// Property: truncating an already truncated set changes nothing
proptest! {
    #[test]
    fn prop_truncate_idempotent(
        lines in proptest::collection::vec("[a-z中]{0,20}", 0..12),
        max in 1usize..6,
    ) {
        let (once, _) = truncate(lines, max);
        let (twice, again) = truncate(once.clone(), max);
        prop_assert_eq!(twice, once);
        prop_assert!(!again);
    }
}
