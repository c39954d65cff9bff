//! JD keyword extraction.

use std::collections::BTreeSet;

use crate::nlp::{EntityLabel, NlpPipeline, PartOfSpeech};

/// Normalized JD terms. Ordered so every derived output is reproducible.
pub type KeywordSet = BTreeSet<String>;

/// Union of noun chunks, ORG/PRODUCT/LOC entities, non-stopword NOUN/PROPN
/// tokens, and whitelisted technical terms found anywhere in the JD.
pub fn extract_jd_keywords(jd_text: &str, nlp: &dyn NlpPipeline, tech_terms: &[String]) -> KeywordSet {
    let lowered = jd_text.to_lowercase();
    let doc = nlp.analyze(&lowered);

    let chunks = doc.noun_chunks.iter().map(String::as_str);
    let entities = doc
        .entities
        .iter()
        .filter(|e| {
            matches!(
                e.label,
                EntityLabel::Org | EntityLabel::Product | EntityLabel::Loc
            )
        })
        .map(|e| e.text.as_str());
    let nouns = doc
        .tokens
        .iter()
        .filter(|t| matches!(t.pos, PartOfSpeech::Noun | PartOfSpeech::Propn) && !t.is_stop)
        .map(|t| t.text.as_str());
    let whitelisted = tech_terms
        .iter()
        .filter(|term| lowered.contains(term.as_str()))
        .map(String::as_str);

    chunks
        .chain(entities)
        .chain(nouns)
        .chain(whitelisted)
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
