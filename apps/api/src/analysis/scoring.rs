use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::keywords::KeywordSet;
use crate::config::Heuristics;

pub const LOW_MATCH: &str = "Low match. Tailor your resume to the JD.";
pub const DECENT_MATCH: &str = "Decent match. Add more JD-relevant skills.";
pub const EXCELLENT_MATCH: &str = "Excellent match!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// 0 – 100
    pub score: u32,
    /// One band message, then an optional missing-keywords message.
    pub messages: Vec<String>,
    /// `found ∩ keywords`, sorted.
    pub matched: Vec<String>,
}

/// Overlap score plus feedback for one résumé.
///
/// `score = round(|found ∩ keywords| / |keywords| × 100)`, rounding half to
/// even; 0 for an empty keyword set. Missing keywords are listed in
/// lexicographic order, capped at `missing_keyword_cap`.
pub fn generate_feedback(
    found: &BTreeSet<String>,
    keywords: &KeywordSet,
    heuristics: &Heuristics,
) -> Feedback {
    let matched: Vec<String> = keywords.intersection(found).cloned().collect();

    let score = if keywords.is_empty() {
        0
    } else {
        (matched.len() as f64 / keywords.len() as f64 * 100.0).round_ties_even() as u32
    };

    let band = if score < heuristics.decent_band {
        LOW_MATCH
    } else if score < heuristics.excellent_band {
        DECENT_MATCH
    } else {
        EXCELLENT_MATCH
    };
    let mut messages = vec![band.to_string()];

    let missing: Vec<&str> = keywords
        .difference(found)
        .take(heuristics.missing_keyword_cap)
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        messages.push(format!("Missing keywords: {}", missing.join(", ")));
    }

    Feedback {
        score,
        messages,
        matched,
    }
}
