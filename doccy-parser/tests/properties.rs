//! Property-based tests for parsing and typography
//!
//! Sources are generated from small grammars so every case is known to be well formed (or
//! known to contain no markup at all), and the properties check the tree shape that must
//! follow.

use doccy_parser::doccy::parsing::{parse_document, parse_tree};
use doccy_parser::doccy::prettify::typography::typeset;
use doccy_parser::doccy::testing::assert_tree;
use doccy_parser::doccy::Options;
use proptest::prelude::*;

/// Element names
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,5}"
}

/// Element content without braces or backslashes
fn content_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.!?'\"-]{0,12}"
}

/// A chain of nested elements and its depth.
fn nested_strategy() -> impl Strategy<Value = (String, usize)> {
    prop::collection::vec((name_strategy(), content_strategy()), 1..8).prop_map(|levels| {
        let depth = levels.len();
        let mut source = String::new();
        for (name, content) in &levels {
            source.push('{');
            source.push_str(name);
            source.push_str(": ");
            source.push_str(content);
        }
        source.push_str(&"}".repeat(depth));
        (source, depth)
    })
}

proptest! {
    #[test]
    fn brace_free_input_is_one_text_node(source in "[^{}]{1,200}") {
        let doc = parse_tree(&source);
        assert_tree(&doc).child_count(1).child(0, |text| text.text(&source));
    }

    #[test]
    fn nesting_depth_matches_brace_depth((source, depth) in nested_strategy()) {
        let doc = parse_tree(&source);
        assert_tree(&doc).child_count(1).max_depth(depth);
    }

    #[test]
    fn escaped_braces_never_open_structure(
        parts in prop::collection::vec(prop_oneof![
            Just(r"\{".to_string()),
            Just(r"\}".to_string()),
            "[a-z ]{1,6}",
        ], 1..20)
    ) {
        let source = parts.concat();
        let expected = source.replace(r"\{", "{").replace(r"\}", "}");
        let doc = parse_tree(&source);
        assert_tree(&doc).child_count(1).child(0, |text| text.text(&expected));
    }

    #[test]
    fn parsing_never_panics(source in "\\PC{0,200}") {
        let doc = parse_document(&source, &Options::default());
        prop_assert!(doc.node_count() >= 1);
    }

    #[test]
    fn typeset_is_idempotent(text in "[a-z '\".!?-]{0,60}") {
        let options = Options {
            double_sentence_spacing: true,
            ..Options::default()
        };
        let once = typeset(&text, &options);
        prop_assert_eq!(typeset(&once, &options), once);
    }

    #[test]
    fn every_double_hyphen_is_one_em_dash(words in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let text = words.join("--");
        let result = typeset(&text, &Options::default());
        prop_assert_eq!(result.matches('\u{2014}').count(), words.len() - 1);
        prop_assert!(!result.contains('-'));
    }

    #[test]
    fn every_ellipsis_is_one_glyph(words in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let text = words.join("...");
        let result = typeset(&text, &Options::default());
        prop_assert_eq!(result.matches('\u{2026}').count(), words.len() - 1);
        prop_assert!(!result.contains('.'));
    }
}
