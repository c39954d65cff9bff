use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub password: String,
    pub port: u16,
    pub rust_log: String,
    /// JSON lexicon file for the NLP pipeline. Built-in lexicon when unset.
    pub lexicon_path: Option<PathBuf>,
    /// Where to fetch the lexicon from when `lexicon_path` does not exist yet.
    pub lexicon_url: Option<String>,
    /// Run the header-driven segmentation pass (result is logged, then discarded).
    pub section_header_pass: bool,
    pub max_upload_bytes: usize,
    /// Sessions untouched for longer than this are dropped by the sweeper.
    pub session_idle_secs: u64,
    pub heuristics: Heuristics,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            username: require_env("PROFILER_USERNAME")?,
            password: require_env("PROFILER_PASSWORD")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            lexicon_path: std::env::var("NLP_LEXICON_PATH").ok().map(PathBuf::from),
            lexicon_url: std::env::var("NLP_LEXICON_URL").ok(),
            section_header_pass: std::env::var("SECTION_HEADER_PASS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (20 * 1024 * 1024).to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            session_idle_secs: std::env::var("SESSION_IDLE_SECS")
                .unwrap_or_else(|_| "1800".to_string())
                .parse::<u64>()
                .context("SESSION_IDLE_SECS must be a number of seconds")?,
            heuristics: Heuristics::default(),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Fixed matching heuristics. These are compatibility values, not tuned ones:
/// changing any of them changes scores for existing users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heuristics {
    /// A résumé line must score strictly above this partial ratio to count.
    pub fuzzy_threshold: u8,
    pub tech_terms: Vec<String>,
    pub education_keywords: Vec<String>,
    pub project_keywords: Vec<String>,
    pub certification_keywords: Vec<String>,
    pub education_limit: usize,
    pub project_limit: usize,
    pub certification_limit: usize,
    /// Scores below this are a low match.
    pub decent_band: u32,
    /// Scores at or above this are an excellent match.
    pub excellent_band: u32,
    pub missing_keyword_cap: usize,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 90,
            tech_terms: strings(&["python", "java", "sql", "c++", "aws", "azure"]),
            education_keywords: strings(&[
                "bca",
                "b.sc",
                "mca",
                "msc",
                "engineering",
                "university",
                "college",
                "degree",
                "cgpa",
                "gpa",
            ]),
            project_keywords: strings(&["project", "developed", "built", "implemented"]),
            certification_keywords: strings(&[
                "certified",
                "aws",
                "python",
                "coursera",
                "udemy",
                "training",
                "course",
                "workshop",
            ]),
            education_limit: 4,
            project_limit: 6,
            certification_limit: 5,
            decent_band: 50,
            excellent_band: 80,
            missing_keyword_cap: 5,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_truthy_values() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" YES "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_default_heuristics_keep_fixed_limits() {
        let h = Heuristics::default();
        assert_eq!(h.fuzzy_threshold, 90);
        assert_eq!(
            (h.education_limit, h.project_limit, h.certification_limit),
            (4, 6, 5)
        );
        assert_eq!(h.tech_terms.len(), 6);
        assert!(h.tech_terms.contains(&"c++".to_string()));
    }
}
