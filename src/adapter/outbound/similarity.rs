//! Levenshtein-based warehouse name matching.

use crate::port::outbound::similarity::{NameMatch, NameMatcher};

/// Scores candidates by normalized edit distance over lowercase characters.
///
/// `score = 100 * (1 - distance / max_len)`, so identical names score 100
/// and a name needing one edit per character scores 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinMatcher;

impl LevenshteinMatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Similarity of `a` and `b` on a 0..=100 scale.
    #[must_use]
    pub fn score(a: &str, b: &str) -> u8 {
        let a: Vec<char> = a.trim().to_lowercase().chars().collect();
        let b: Vec<char> = b.trim().to_lowercase().chars().collect();
        let longest = a.len().max(b.len());
        if longest == 0 {
            return 100;
        }
        let distance = levenshtein(&a, &b);
        let ratio = 1.0 - distance as f64 / longest as f64;
        (ratio * 100.0).round() as u8
    }
}

impl NameMatcher for LevenshteinMatcher {
    fn best_match(&self, input: &str, candidates: &[String]) -> Option<NameMatch> {
        let mut best: Option<NameMatch> = None;
        for candidate in candidates {
            let score = Self::score(input, candidate);
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(NameMatch {
                    candidate: candidate.clone(),
                    score,
                });
            }
        }
        best
    }
}

/// Minimum number of single-character edits turning `a` into `b`.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
