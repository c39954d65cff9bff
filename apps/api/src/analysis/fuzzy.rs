//! Fuzzy partial-ratio matching.

use strsim::normalized_levenshtein;

/// Similarity of two strings on a 0–100 scale. Must be deterministic.
pub trait FuzzyMatcher: Send + Sync {
    fn partial_ratio(&self, a: &str, b: &str) -> u8;
}

/// Best alignment of the shorter string inside the longer one.
///
/// The shorter string is compared against every window of the longer string
/// with the same character length; the best normalized Levenshtein
/// similarity wins. Empty input scores 0.
pub struct PartialRatio;

impl FuzzyMatcher for PartialRatio {
    fn partial_ratio(&self, a: &str, b: &str) -> u8 {
        if a.is_empty() || b.is_empty() {
            return 0;
        }

        let (short, long) = if a.chars().count() <= b.chars().count() {
            (a, b)
        } else {
            (b, a)
        };
        let long: Vec<char> = long.chars().collect();
        let width = short.chars().count();

        let mut best = 0u8;
        for window in long.windows(width) {
            let candidate: String = window.iter().collect();
            let score = (normalized_levenshtein(short, &candidate) * 100.0).round() as u8;
            if score > best {
                best = score;
                if best == 100 {
                    break;
                }
            }
        }
        best
    }
}
