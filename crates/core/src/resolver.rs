// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fuzzy resource-name resolution
//!
//! Tolerates typos in resource names without guessing between two
//! similarly-named resources: an approximate match is only accepted when it
//! is the single best candidate.

/// Minimum similarity for an approximate match to be accepted
pub const MATCH_THRESHOLD: f64 = 0.5;

/// Resolve `requested` against the registered `candidates`.
///
/// Returns the exact match if present, otherwise the unique candidate with
/// the highest [`similarity`] at or above [`MATCH_THRESHOLD`].
pub fn resolve<'a, S: AsRef<str>>(requested: &str, candidates: &'a [S]) -> Option<&'a str> {
    if let Some(exact) = candidates.iter().find(|c| c.as_ref() == requested) {
        return Some(exact.as_ref());
    }

    let mut best: Option<(&'a str, f64)> = None;
    let mut tied = false;
    for candidate in candidates {
        let ratio = similarity(requested, candidate.as_ref());
        match best {
            Some((_, top)) if ratio < top => {}
            Some((_, top)) if ratio == top => tied = true,
            _ => {
                best = Some((candidate.as_ref(), ratio));
                tied = false;
            }
        }
    }

    match best {
        Some((name, ratio)) if ratio >= MATCH_THRESHOLD && !tied => Some(name),
        _ => None,
    }
}

/// Normalized edit-distance similarity in `0.0..=1.0`.
///
/// `1 - levenshtein(a, b) / max(len(a), len(b))`, counted in chars. Two
/// empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(&a, &b) as f64 / longest as f64
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
    // Single-row dynamic programming; row[j] is the distance between the
    // current prefix of `a` and b[..j].
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[b.len()]
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
