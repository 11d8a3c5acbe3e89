// this_file: crates/platen-unicode/src/lib.rs

//! Coarse script-aware segmentation for greedy line wrapping.
//!
//! Latin words stay whole, every wide or non-ASCII character stands alone,
//! and whitespace becomes its own break-point token. That is enough to wrap
//! mixed CJK and Latin copy without a full line-break algorithm.

use platen_core::types::{Token, TokenKind};

/// A character that may join an ASCII word run.
fn is_simple(ch: char) -> bool {
    ch.is_ascii() && !ch.is_ascii_control() && !ch.is_whitespace()
}

/// Split `text` into wrapping tokens.
///
/// Joining the `text()` of every returned token reproduces the input
/// exactly. No token is empty.
pub fn segment(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    for ch in text.chars() {
        if is_simple(ch) {
            word.push(ch);
            continue;
        }

        flush(&mut word, &mut tokens);
        let kind = if ch.is_whitespace() {
            TokenKind::Space
        } else {
            TokenKind::Wide
        };
        tokens.extend(Token::new(ch.to_string(), kind));
    }

    flush(&mut word, &mut tokens);
    tokens
}

fn flush(word: &mut String, tokens: &mut Vec<Token>) {
    if !word.is_empty() {
        tokens.extend(Token::new(std::mem::take(word), TokenKind::Word));
    }
}

#[cfg(test)]
mod tests;

#[cfg(test)]
mod proptests;
