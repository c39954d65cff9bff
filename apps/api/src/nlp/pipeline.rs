//! Deterministic rule-based tagger standing in for a statistical English model.
//!
//! Tokenize with a regex, tag each token from lexicon lookups and suffix
//! rules, then derive noun chunks from the tag sequence and entities from the
//! gazetteer (longest match wins).

use once_cell::sync::Lazy;
use regex::Regex;

use super::{AnalyzedDoc, Entity, EntityLabel, Lexicon, NlpPipeline, PartOfSpeech, Token};

/// Words keep inner `.` and `-` (`b.sc`, `node.js`, `hands-on`) and trailing
/// `+`/`#` (`c++`, `c#`). Clitics split off; other symbols are punctuation.
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}](?:[\p{L}\p{N}.\-]*[\p{L}\p{N}])?[+#]*|'(?:s|re|ve|ll|d|m|t)\b|[^\s\p{L}\p{N}]")
        .unwrap()
});

const VERB_SUFFIXES: &[&str] = &["ing", "ed"];
const ADJ_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "ical", "less", "ish"];

pub struct RuleBasedPipeline {
    lexicon: Lexicon,
    gazetteer: Vec<(Vec<String>, EntityLabel)>,
}

impl RuleBasedPipeline {
    pub fn new(lexicon: Lexicon) -> Self {
        let mut gazetteer: Vec<(Vec<String>, EntityLabel)> = lexicon
            .entities
            .iter()
            .map(|e| {
                let words = TOKEN_REGEX
                    .find_iter(&e.text.to_lowercase())
                    .map(|m| m.as_str().to_string())
                    .collect::<Vec<_>>();
                (words, e.label)
            })
            .filter(|(words, _)| !words.is_empty())
            .collect();
        // Longest entries first so the first hit at a position is the longest.
        gazetteer.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self { lexicon, gazetteer }
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        TOKEN_REGEX
            .find_iter(text)
            .map(|m| {
                let lower = m.as_str().to_lowercase();
                Token {
                    text: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                    pos: self.tag(&lower),
                    is_stop: self.lexicon.stopwords.contains(&lower),
                }
            })
            .collect()
    }

    fn tag(&self, word: &str) -> PartOfSpeech {
        let lex = &self.lexicon;

        if !word.chars().any(char::is_alphanumeric) {
            return PartOfSpeech::Punct;
        }
        if lex.nouns.contains(word) {
            return PartOfSpeech::Noun;
        }
        if self
            .gazetteer
            .iter()
            .any(|(words, _)| words.len() == 1 && words[0] == word)
        {
            return PartOfSpeech::Propn;
        }
        if word.starts_with(|c: char| c.is_ascii_digit()) || lex.number_words.contains(word) {
            return PartOfSpeech::Num;
        }

        let closed_classes = [
            (&lex.determiners, PartOfSpeech::Det),
            (&lex.pronouns, PartOfSpeech::Pron),
            (&lex.auxiliaries, PartOfSpeech::Aux),
            (&lex.coordinating_conjunctions, PartOfSpeech::Cconj),
            (&lex.subordinating_conjunctions, PartOfSpeech::Sconj),
            (&lex.adpositions, PartOfSpeech::Adp),
            (&lex.particles, PartOfSpeech::Part),
            (&lex.adverbs, PartOfSpeech::Adv),
            (&lex.verbs, PartOfSpeech::Verb),
            (&lex.adjectives, PartOfSpeech::Adj),
        ];
        if let Some((_, pos)) = closed_classes.iter().find(|(set, _)| set.contains(word)) {
            return *pos;
        }

        let len = word.chars().count();
        if len > 4 && word.ends_with("ly") {
            PartOfSpeech::Adv
        } else if len > 5 && VERB_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            PartOfSpeech::Verb
        } else if len > 5 && ADJ_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            PartOfSpeech::Adj
        } else {
            PartOfSpeech::Noun
        }
    }

    /// `DET? (ADJ|NUM)* (NOUN|PROPN)+`, plus lone personal pronouns.
    fn noun_chunks(&self, text: &str, tokens: &[Token]) -> Vec<String> {
        let is_nominal = |t: &Token| matches!(t.pos, PartOfSpeech::Noun | PartOfSpeech::Propn);
        let is_modifier = |t: &Token| matches!(t.pos, PartOfSpeech::Adj | PartOfSpeech::Num);

        let mut chunks = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let tok = &tokens[i];
            if tok.pos == PartOfSpeech::Pron
                && self
                    .lexicon
                    .personal_pronouns
                    .contains(&tok.text.to_lowercase())
            {
                chunks.push(tok.text.clone());
                i += 1;
                continue;
            }

            let mut j = i;
            if tok.pos == PartOfSpeech::Det {
                j += 1;
            }
            while j < tokens.len() && is_modifier(&tokens[j]) {
                j += 1;
            }
            let mut k = j;
            while k < tokens.len() && is_nominal(&tokens[k]) {
                k += 1;
            }

            if k > j {
                chunks.push(text[tokens[i].start..tokens[k - 1].end].to_string());
                i = k;
            } else {
                i += 1;
            }
        }
        chunks
    }

    fn entities(&self, text: &str, tokens: &[Token]) -> Vec<Entity> {
        let lowered: Vec<String> = tokens.iter().map(|t| t.text.to_lowercase()).collect();
        let mut entities = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let hit = self.gazetteer.iter().find(|(words, _)| {
                i + words.len() <= lowered.len()
                    && words.iter().zip(&lowered[i..]).all(|(w, t)| w == t)
            });
            match hit {
                Some((words, label)) => {
                    let end = i + words.len();
                    entities.push(Entity {
                        text: text[tokens[i].start..tokens[end - 1].end].to_string(),
                        label: *label,
                    });
                    i = end;
                }
                None => i += 1,
            }
        }
        entities
    }
}

impl NlpPipeline for RuleBasedPipeline {
    fn analyze(&self, text: &str) -> AnalyzedDoc {
        let tokens = self.tokenize(text);
        let noun_chunks = self.noun_chunks(text, &tokens);
        let entities = self.entities(text, &tokens);
        AnalyzedDoc {
            tokens,
            noun_chunks,
            entities,
        }
    }
}
