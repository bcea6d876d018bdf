mod strategies;

use std::collections::HashSet;

use lastmatch::{Rule, RuleList};
use proptest::prelude::*;
use strategies::{all_docs, arb_doc_rules, arb_mixed_rules, doc_matches, doc_subject, read};

/// Whether `sub` appears in `full` in the same relative order.
fn is_subsequence(sub: &[Rule], full: &[Rule]) -> bool {
    let mut remaining = full.iter();
    sub.iter().all(|rule| remaining.any(|candidate| candidate == rule))
}

// ---------------------------------------------------------------------------
// Invariant 1: Idempotence
//
// Compressing an already compressed list changes nothing.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn idempotence_doc(rules in arb_doc_rules()) {
        let once = rules.compress();
        let twice = once.compress();
        prop_assert_eq!(&once, &twice, "compress is not idempotent");
    }

    #[test]
    fn idempotence_mixed(rules in arb_mixed_rules()) {
        let once = rules.compress();
        let twice = once.compress();
        prop_assert_eq!(&once, &twice, "compress is not idempotent");
    }

    #[test]
    fn determinism(rules in arb_mixed_rules()) {
        prop_assert_eq!(rules.compress(), rules.compress());
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: Order preservation
//
// Every surviving rule keeps its relative position, and nothing new appears.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn output_is_subsequence_of_input(rules in arb_mixed_rules()) {
        let compressed = rules.compress();
        prop_assert!(compressed.len() <= rules.len());
        prop_assert!(
            is_subsequence(compressed.as_slice(), rules.as_slice()),
            "compressed list {:?} is not an ordered subset of {:?}",
            compressed,
            rules,
        );
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Duplicate elision
//
// No two surviving rules share conditions, and every distinct condition of
// the input whose last occurrence survives is represented by that last rule.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn no_repeated_conditions(rules in arb_mixed_rules()) {
        let compressed = rules.compress();
        let mut seen = HashSet::new();
        for rule in &compressed {
            prop_assert!(
                seen.insert(rule.conditions()),
                "conditions {:?} survive twice",
                rule.conditions(),
            );
        }
    }

    #[test]
    fn survivors_are_last_occurrences(rules in arb_mixed_rules()) {
        let compressed = rules.compress();
        for rule in &compressed {
            let last = rules
                .last_match(|r| r.conditions() == rule.conditions())
                .expect("surviving conditions must come from the input");
            prop_assert_eq!(last, rule);
        }
    }

    #[test]
    fn at_most_one_catch_all(rules in arb_mixed_rules()) {
        let compressed = rules.compress();
        let count = compressed.iter().filter(|r| r.is_catch_all()).count();
        prop_assert!(count <= 1, "{} catch-all rules survived", count);
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Decision preservation
//
// For rules narrowed to one action and subject, the compressed list decides
// every document exactly as the uncompressed list does.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn decisions_preserved(rules in arb_doc_rules()) {
        let compressed = rules.compress();
        for doc in all_docs() {
            let before = rules.decide_for(&read(), &doc_subject(), &doc, &doc_matches);
            let after = compressed.decide_for(&read(), &doc_subject(), &doc, &doc_matches);
            prop_assert_eq!(
                before,
                after,
                "decision for {:?} changed: {:?} compressed to {:?}",
                doc,
                rules,
                compressed,
            );
        }
    }

    #[test]
    fn detailed_agrees_with_compress(rules in arb_mixed_rules()) {
        let report = rules.compress_detailed();
        prop_assert_eq!(report.rules(), &rules.compress());
        prop_assert_eq!(
            report.duplicates_removed() + report.truncated() + report.rules().len(),
            rules.len(),
        );
    }

    #[test]
    fn without_catch_all_only_duplicates_go(rules in arb_doc_rules()) {
        let rules: RuleList = rules.into_iter().filter(|r| !r.is_catch_all()).collect();
        let report = rules.compress_detailed();
        prop_assert_eq!(report.truncated(), 0);
        prop_assert_eq!(report.catch_all_index(), None);
    }
}
