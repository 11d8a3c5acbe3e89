// this_file: crates/platen-layout/src/lib.rs

//! Line breaking and auto-fit: make text fit a box, shrinking if allowed.
//!
//! Tokens are packed greedily into lines no wider than the box. Under
//! [`Strategy::Auto`] the font shrinks one pixel at a time until the lines
//! fit vertically or the floor size is reached. Whatever still overflows is
//! truncated with a `...` marker.

use platen_core::types::{
    line_height, Bounds, FitResult, HorizontalAlign, Strategy, Token, VerticalAlign,
};
use platen_core::MeasureFont;

/// Smallest size auto-fit will ever shrink to
pub const MIN_FIT_SIZE: u32 = 8;

/// Appended where content was cut
pub const ELLIPSIS: &str = "...";

/// Characters of a line kept in front of the ellipsis
const TRUNCATE_KEEP: usize = 10;

/// Lines plus the face instance they were measured with.
#[derive(Debug, Clone)]
pub struct Fitted<F> {
    pub result: FitResult,
    pub font: F,
}

/// Floor size for auto-fit: 60% of nominal, at least 8, never above nominal.
pub fn floor_size(nominal: u32) -> u32 {
    let floor = (nominal as f64 * 0.6).round() as u32;
    floor.max(MIN_FIT_SIZE).min(nominal)
}

/// How many lines of `size` fit in `height`, never fewer than one.
pub fn max_lines(height: i32, size: u32) -> usize {
    let pitch = line_height(size);
    if pitch <= 0.0 || height <= 0 {
        return 1;
    }
    ((height as f64 / pitch).floor() as usize).max(1)
}

/// Greedily packs tokens into lines no wider than `width`.
///
/// A token that is too wide on its own is split between characters; a
/// single character wider than the box gets a line to itself.
pub fn pack<F: MeasureFont>(tokens: &[Token], font: &F, width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0.0f32;

    for token in tokens {
        let text = token.layout_text();
        let token_width = font.text_width(text);

        if line_width + token_width <= width {
            line.push_str(text);
            line_width += token_width;
            continue;
        }

        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line_width = 0.0;
        }

        if token_width <= width {
            line.push_str(text);
            line_width = token_width;
            continue;
        }

        let mut buf = [0u8; 4];
        for ch in text.chars() {
            let ch_width = font.text_width(ch.encode_utf8(&mut buf));
            if !line.is_empty() && line_width + ch_width > width {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }
            line.push(ch);
            line_width += ch_width;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Cuts `lines` down to `max` lines, marking the cut.
///
/// Returns the lines and whether anything was dropped. A set already within
/// the limit comes back unchanged, so applying this twice is the same as
/// applying it once.
pub fn truncate(mut lines: Vec<String>, max: usize) -> (Vec<String>, bool) {
    let max = max.max(1);
    if lines.len() <= max {
        return (lines, false);
    }

    if max == 1 {
        lines.truncate(1);
        if let Some(first) = lines.first_mut() {
            if let Some(short) = shorten(first) {
                *first = short;
            }
        }
        return (lines, true);
    }

    lines.truncate(max - 1);
    let marker = lines
        .last()
        .and_then(|last| shorten(last))
        .unwrap_or_else(|| ELLIPSIS.to_string());
    lines.push(marker);
    (lines, true)
}

/// First characters of `line` plus the ellipsis, if the line is long.
fn shorten(line: &str) -> Option<String> {
    if line.chars().count() > TRUNCATE_KEEP {
        let head: String = line.chars().take(TRUNCATE_KEEP).collect();
        Some(format!("{head}{ELLIPSIS}"))
    } else {
        None
    }
}

/// Fits tokens into `bounds`, returning the lines and the face they fit at.
///
/// The nominal size is the size `font` was instantiated at. Faces that
/// cannot be re-instantiated are packed once at that size.
pub fn fit<F: MeasureFont>(
    tokens: &[Token],
    font: F,
    bounds: Bounds,
    strategy: Strategy,
) -> Fitted<F> {
    let nominal = font.pixel_size();
    let floor = floor_size(nominal);
    let width = bounds.width() as f32;
    let height = bounds.height() as f64;

    let mut font = font;
    let mut size = nominal;
    let mut lines = pack(tokens, &font, width);

    if strategy == Strategy::Auto {
        while lines.len() as f64 * line_height(font.line_size()) > height && size > floor {
            let Some(smaller) = font.at_size(size - 1) else {
                log::debug!("Face cannot change size; packing once at {size}px");
                break;
            };
            font = smaller;
            size -= 1;
            lines = pack(tokens, &font, width);
        }
    }

    let (lines, truncated) = truncate(lines, max_lines(bounds.height(), font.line_size()));
    if truncated {
        log::debug!("Text truncated to {} lines at {size}px in {bounds}", lines.len());
    }

    Fitted {
        result: FitResult {
            lines,
            size,
            truncated,
        },
        font,
    }
}

/// Top of the first line for a block of `lines` at `size`.
pub fn vertical_start(align: VerticalAlign, bounds: Bounds, lines: usize, size: u32) -> f64 {
    let text_height = lines as f64 * line_height(size);
    match align {
        VerticalAlign::Top => bounds.top as f64,
        VerticalAlign::Center => bounds.top as f64 + (bounds.height() as f64 - text_height) / 2.0,
        VerticalAlign::Bottom => bounds.bottom as f64 - text_height,
    }
}

/// Left edge of a line `line_width` wide.
pub fn horizontal_start(align: HorizontalAlign, bounds: Bounds, line_width: f32) -> f64 {
    let line_width = line_width as f64;
    match align {
        HorizontalAlign::Left => bounds.left as f64,
        HorizontalAlign::Center => bounds.left as f64 + (bounds.width() as f64 - line_width) / 2.0,
        HorizontalAlign::Right => bounds.right as f64 - line_width,
    }
}


#[cfg(test)]
mod proptests;
