// this_file: crates/platen-unicode/src/tests.rs

use super::*;

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(Token::text).collect()
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(Token::kind).collect()
}

#[test]
fn test_empty_text() {
    assert!(segment("").is_empty());
}

#[test]
fn test_latin_words_stay_whole() {
    let tokens = segment("Hello World");
    assert_eq!(texts(&tokens), ["Hello", " ", "World"]);
    assert_eq!(
        kinds(&tokens),
        [TokenKind::Word, TokenKind::Space, TokenKind::Word]
    );
}

#[test]
fn test_punctuation_joins_the_word() {
    assert_eq!(texts(&segment("e.g., x-ray!")), ["e.g.,", " ", "x-ray!"]);
}

#[test]
fn test_cjk_characters_split_individually() {
    let tokens = segment("你好世界");
    assert_eq!(texts(&tokens), ["你", "好", "世", "界"]);
    assert!(tokens.iter().all(|t| t.kind() == TokenKind::Wide));
}

#[test]
fn test_mixed_script() {
    let tokens = segment("张三 Zhang San");
    assert_eq!(texts(&tokens), ["张", "三", " ", "Zhang", " ", "San"]);
}

#[test]
fn test_cjk_flushes_latin_run() {
    assert_eq!(texts(&segment("abc中def")), ["abc", "中", "def"]);
}

#[test]
fn test_each_whitespace_is_its_own_token() {
    let tokens = segment("a  \tb\n");
    assert_eq!(texts(&tokens), ["a", " ", " ", "\t", "b", "\n"]);
    assert_eq!(tokens[3].layout_text(), " ");
}

#[test]
fn test_full_width_space_is_space() {
    let tokens = segment("甲\u{3000}乙");
    assert_eq!(kinds(&tokens)[1], TokenKind::Space);
}

#[test]
fn test_latin_accents_are_wide() {
    assert_eq!(texts(&segment("café")), ["caf", "é"]);
}

#[test]
fn test_control_characters_are_not_simple() {
    let tokens = segment("a\u{7}b");
    assert_eq!(texts(&tokens), ["a", "\u{7}", "b"]);
    assert_eq!(tokens[1].kind(), TokenKind::Wide);
}
