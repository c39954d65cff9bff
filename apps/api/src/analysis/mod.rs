// JD keyword extraction, skill matching, scoring, and the per-batch orchestration
// that ties them to résumé extraction.

pub mod analyzer;
pub mod fuzzy;
pub mod keywords;
pub mod scoring;
pub mod skills;

pub use analyzer::Analyzer;
pub use fuzzy::PartialRatio;
