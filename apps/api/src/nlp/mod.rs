// NLP collaborator: tokens with part-of-speech and stopword flags, noun chunks,
// and named entities. Keyword extraction only talks to the `NlpPipeline` trait.

pub mod lexicon;
pub mod pipeline;

use serde::{Deserialize, Serialize};

pub use lexicon::Lexicon;
pub use pipeline::RuleBasedPipeline;

/// Universal part-of-speech tags (the subset the tagger emits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Verb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Org,
    Product,
    Loc,
    Gpe,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Byte offsets into the analyzed text.
    pub start: usize,
    pub end: usize,
    pub pos: PartOfSpeech,
    pub is_stop: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// Output of one pipeline run over a piece of text.
#[derive(Debug, Clone, Default)]
pub struct AnalyzedDoc {
    pub tokens: Vec<Token>,
    pub noun_chunks: Vec<String>,
    pub entities: Vec<Entity>,
}

/// The NLP backend. Implementations must be deterministic for a given input.
pub trait NlpPipeline: Send + Sync {
    fn analyze(&self, text: &str) -> AnalyzedDoc;
}
