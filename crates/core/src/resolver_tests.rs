// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use yare::parameterized;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[parameterized(
    identical = { "rig", "rig", 0 },
    empty_left = { "", "abc", 3 },
    kitten_sitting = { "kitten", "sitting", 3 },
    flaw_lawn = { "flaw", "lawn", 2 },
    one_insertion = { "alpa", "alpha", 1 },
    multibyte = { "café", "cafe", 1 },
)]
fn edit_distance(a: &str, b: &str, expected: usize) {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    assert_eq!(levenshtein(&a, &b), expected);
}

#[test]
fn exact_match_wins() {
    let candidates = names(&["alpha", "alph"]);
    assert_eq!(resolve("alph", &candidates), Some("alph"));
}

#[test]
fn typo_resolves_to_unique_best() {
    let candidates = names(&["alpha", "beta"]);
    assert_eq!(resolve("alpa", &candidates), Some("alpha"));
}

#[test]
fn tie_for_best_resolves_to_nothing() {
    let candidates = names(&["rig1", "rig2"]);
    assert_eq!(similarity("rig3", "rig1"), similarity("rig3", "rig2"));
    assert_eq!(resolve("rig3", &candidates), None);
}

#[test]
fn tie_below_the_best_does_not_block() {
    let candidates = names(&["rig10", "rig20", "board"]);
    // rig1 is one edit from rig10 and two from rig20
    assert_eq!(resolve("rig1", &candidates), Some("rig10"));
}

#[test]
fn dissimilar_name_resolves_to_nothing() {
    let candidates = names(&["alpha", "beta"]);
    assert_eq!(resolve("zzz", &candidates), None);
}

#[test]
fn threshold_is_inclusive() {
    // two edits over four chars: exactly 0.5
    assert_eq!(similarity("abcd", "abxy"), 0.5);
    let candidates = names(&["abxy"]);
    assert_eq!(resolve("abcd", &candidates), Some("abxy"));
}

#[test]
fn no_candidates_resolves_to_nothing() {
    let candidates: Vec<String> = Vec::new();
    assert_eq!(resolve("alpha", &candidates), None);
}

proptest! {
    #[test]
    fn similarity_is_symmetric_and_bounded(a in "[a-c]{0,6}", b in "[a-c]{0,6}") {
        let ab = similarity(&a, &b);
        prop_assert_eq!(ab, similarity(&b, &a));
        prop_assert!((0.0..=1.0).contains(&ab));
    }
}
