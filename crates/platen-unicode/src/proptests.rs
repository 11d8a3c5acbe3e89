// this_file: crates/platen-unicode/src/proptests.rs

use super::*;
use proptest::prelude::*;

// Property: concatenating tokens reproduces the input
proptest! {
    #[test]
    fn prop_round_trip(s in "\\PC*") {
        let joined: String = segment(&s).iter().map(Token::text).collect();
        prop_assert_eq!(joined, s);
    }
}

// Property: mixed-script input never produces an empty token
proptest! {
    #[test]
    fn prop_no_empty_tokens(s in "[a-zA-Z0-9 \t中文日本語한국어.,!]*") {
        for token in segment(&s) {
            prop_assert!(!token.text().is_empty());
        }
    }
}

// Property: only word tokens hold more than one character
proptest! {
    #[test]
    fn prop_non_word_tokens_are_single_chars(s in "\\PC*") {
        for token in segment(&s) {
            if token.kind() != TokenKind::Word {
                prop_assert_eq!(token.text().chars().count(), 1);
            }
        }
    }
}

// Property: two word tokens are never adjacent
proptest! {
    #[test]
    fn prop_words_are_maximal(s in "[a-z 中]*") {
        let tokens = segment(&s);
        for pair in tokens.windows(2) {
            prop_assert!(!(pair[0].kind() == TokenKind::Word && pair[1].kind() == TokenKind::Word));
        }
    }
}
