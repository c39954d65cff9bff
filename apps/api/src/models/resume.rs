use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// An uploaded résumé. Lives only as long as the request that carried it.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    /// Display name, usually the uploaded filename.
    pub name: String,
    pub content: Bytes,
}

/// Everything derived from one résumé in one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedResume {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub education: String,
    pub projects: String,
    pub certifications: String,
    /// JD keywords found in the résumé.
    pub skills: Vec<String>,
    /// Found skills that are also JD keywords.
    pub common_skills: Vec<String>,
    pub score: u32,
    pub feedback: Vec<String>,
}

/// One bar of the name-vs-score comparison chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBar {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub keyword_count: usize,
    /// Sorted by score, highest first; ties keep upload order.
    pub results: Vec<ExtractedResume>,
    /// Same order as `results`.
    pub comparison: Vec<ScoreBar>,
    /// Non-fatal problems, e.g. a PDF that could not be read.
    pub warnings: Vec<String>,
}
