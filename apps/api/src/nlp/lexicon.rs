//! Word lists that drive the rule-based tagger.
//!
//! The built-in lexicon is compiled into the binary. A replacement can be
//! supplied as a JSON file of the same shape (`NLP_LEXICON_PATH`); when that
//! file does not exist yet it is fetched once from `NLP_LEXICON_URL`.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::EntityLabel;

const BUILTIN_LEXICON: &str = include_str!("lexicon.json");

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Lexicon file {0} does not exist and no NLP_LEXICON_URL is configured")]
    Missing(PathBuf),

    #[error("Failed to read lexicon file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lexicon JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Lexicon download from {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GazetteerEntry {
    pub text: String,
    pub label: EntityLabel,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub determiners: HashSet<String>,
    pub pronouns: HashSet<String>,
    /// Pronouns that stand alone as a noun chunk.
    pub personal_pronouns: HashSet<String>,
    pub adpositions: HashSet<String>,
    pub auxiliaries: HashSet<String>,
    pub coordinating_conjunctions: HashSet<String>,
    pub subordinating_conjunctions: HashSet<String>,
    pub particles: HashSet<String>,
    pub adverbs: HashSet<String>,
    pub verbs: HashSet<String>,
    pub adjectives: HashSet<String>,
    /// Forced nouns; wins over every suffix rule and the closed-class lists.
    pub nouns: HashSet<String>,
    pub number_words: HashSet<String>,
    pub stopwords: HashSet<String>,
    pub entities: Vec<GazetteerEntry>,
}

impl Lexicon {
    pub fn builtin() -> Self {
        serde_json::from_str(BUILTIN_LEXICON).expect("built-in lexicon is valid JSON")
    }

    pub fn from_json(raw: &str) -> Result<Self, LexiconError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, LexiconError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Resolves the lexicon for startup.
    ///
    /// No path: built-in. Existing path: read it. Missing path with a URL:
    /// download once, write it in place, then read it again. A failed
    /// download is returned as an error and is fatal for the caller.
    pub async fn load(path: Option<&Path>, url: Option<&str>) -> Result<Self, LexiconError> {
        let Some(path) = path else {
            info!("Using built-in NLP lexicon");
            return Ok(Self::builtin());
        };

        if path.exists() {
            info!("Loading NLP lexicon from {}", path.display());
            return Self::from_file(path);
        }

        let Some(url) = url else {
            return Err(LexiconError::Missing(path.to_path_buf()));
        };

        warn!(
            "NLP lexicon {} not found, fetching from {url}",
            path.display()
        );
        let body = fetch(url).await?;
        // Validate before anything lands on disk.
        Self::from_json(&body)?;
        persist(path, &body)?;
        Self::from_file(path)
    }
}

async fn fetch(url: &str) -> Result<String, LexiconError> {
    let wrap = |source| LexiconError::Fetch {
        url: url.to_string(),
        source,
    };
    reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(wrap)?
        .text()
        .await
        .map_err(wrap)
}

/// Writes through a temp file in the target directory so a crash never
/// leaves a half-written lexicon behind.
fn persist(path: &Path, body: &str) -> Result<(), LexiconError> {
    let io_err = |source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(body.as_bytes()).map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
