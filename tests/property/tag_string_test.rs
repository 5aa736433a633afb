//! Property-based tests for the tag-string wire format.
//!
//! Splitting on `,` and dropping empty tokens must be stable under
//! re-joining, and parsing must agree with the raw tokens.

use binmarks::types::tag::{join_tags, parse_tag_string, split_tag_string, TagOp};
use proptest::prelude::*;

/// Tag strings with empty tokens, operators and repeated commas.
fn arb_tag_string() -> impl Strategy<Value = String> {
    prop::collection::vec("[-!]?[a-zA-Z0-9 _.]{0,8}", 0..8).prop_map(|tokens| tokens.join(","))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn split_then_join_is_idempotent(tags in arb_tag_string()) {
        let once = join_tags(&split_tag_string(&tags));
        let twice = join_tags(&split_tag_string(&once));
        prop_assert_eq!(&once, &twice);
        prop_assert!(split_tag_string(&once).iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn parsed_tokens_round_trip_to_wire(tags in arb_tag_string()) {
        let raw: Vec<&str> = split_tag_string(&tags)
            .into_iter()
            .filter(|t| *t != "-" && *t != "!")
            .collect();
        let parsed = parse_tag_string(&tags);

        prop_assert_eq!(parsed.len(), raw.len());
        for (token, raw) in parsed.iter().zip(raw) {
            prop_assert!(!token.name.is_empty());
            prop_assert_eq!(token.to_wire(), raw);
            let expected = match raw.chars().next() {
                Some('-') => TagOp::Negative,
                Some('!') => TagOp::Unique,
                _ => TagOp::Positive,
            };
            prop_assert_eq!(token.op, expected);
        }
    }
}
