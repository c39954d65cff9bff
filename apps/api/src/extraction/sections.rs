//! Section segmentation: education / projects / certifications.
//!
//! Two passes exist:
//! - `segment_by_headers` groups lines under the most recent section header.
//! - `extract_sections` keeps the first few lines mentioning section keywords.
//!
//! `extract_sections` is authoritative. The header pass is only run when
//! `SECTION_HEADER_PASS` is enabled, and its output is logged and dropped,
//! never merged into the result.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::NOT_FOUND;
use crate::config::Heuristics;

static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[•\-*●▪▶❖]+\s*").unwrap());

static HEADER_PATTERNS: Lazy<Vec<(SectionKind, Regex)>> = Lazy::new(|| {
    [
        (
            SectionKind::Education,
            &["education", "academic background", "qualification"][..],
        ),
        (SectionKind::Projects, &["project", "projects", "portfolio"][..]),
        (
            SectionKind::Certifications,
            &[
                "certification",
                "certifications",
                "certified",
                "course",
                "training",
            ][..],
        ),
    ]
    .into_iter()
    .map(|(kind, keys)| {
        let alternation = keys
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        (kind, Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap())
    })
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Education,
    Projects,
    Certifications,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    pub education: String,
    pub projects: String,
    pub certifications: String,
}

impl Sections {
    fn slot(&mut self, kind: SectionKind) -> &mut String {
        match kind {
            SectionKind::Education => &mut self.education,
            SectionKind::Projects => &mut self.projects,
            SectionKind::Certifications => &mut self.certifications,
        }
    }
}

/// Keyword-line-filter segmentation. Each section keeps the first N lines
/// that mention one of its keywords; a section with no such line is `"Not found"`.
pub fn extract_sections(text: &str, heuristics: &Heuristics) -> Sections {
    let lines = split_lines(text);

    let education = pick_lines(&lines, &heuristics.education_keywords, heuristics.education_limit);
    let projects = pick_lines(&lines, &heuristics.project_keywords, heuristics.project_limit);
    let certifications = pick_lines(
        &lines,
        &heuristics.certification_keywords,
        heuristics.certification_limit,
    );

    Sections {
        education: join_or_sentinel(education.iter().map(|l| l.to_string())),
        projects: join_or_sentinel(projects.iter().map(|l| format!("- {l}"))),
        certifications: join_or_sentinel(certifications.iter().map(|l| l.to_string())),
    }
}

/// Header-driven segmentation. A header line opens a buffer (header included)
/// that collects every following line until the next header. Sections that
/// never see a header stay empty.
pub fn segment_by_headers(text: &str) -> Sections {
    let mut sections = Sections::default();
    let mut current: Option<SectionKind> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for line in split_lines(text) {
        if let Some(kind) = match_header(line) {
            if let Some(open) = current {
                flush(sections.slot(open), &buffer, true);
            }
            current = Some(kind);
            buffer = vec![line];
        } else if current.is_some() {
            buffer.push(line);
        }
    }

    if let Some(open) = current {
        flush(sections.slot(open), &buffer, false);
    }

    sections
}

fn match_header(line: &str) -> Option<SectionKind> {
    HEADER_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(line))
        .map(|(kind, _)| *kind)
}

fn flush(slot: &mut String, buffer: &[&str], newline: bool) {
    slot.push_str(clean_lines(buffer.iter().copied()).join("\n").trim());
    if newline {
        slot.push('\n');
    }
}

fn pick_lines<'a>(lines: &[&'a str], keywords: &[String], limit: usize) -> Vec<String> {
    let matching = lines
        .iter()
        .copied()
        .filter(|line| {
            let lower = line.to_lowercase();
            keywords.iter().any(|k| lower.contains(k.as_str()))
        })
        .take(limit);
    clean_lines(matching)
}

fn join_or_sentinel(lines: impl Iterator<Item = String>) -> String {
    let joined = lines.collect::<Vec<_>>().join("\n");
    if joined.is_empty() {
        NOT_FOUND.to_string()
    } else {
        joined
    }
}

/// Trims, drops blank lines, and strips leading bullet glyphs.
fn clean_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    lines
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| BULLET_PREFIX.replace(l, "").into_owned())
        .collect()
}

/// Splits on every line boundary PDF text may carry, including form feeds
/// between pages and Unicode line/paragraph separators.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let is_break = matches!(
            ch,
            '\n' | '\r'
                | '\u{0b}'
                | '\u{0c}'
                | '\u{1c}'
                | '\u{1d}'
                | '\u{1e}'
                | '\u{85}'
                | '\u{2028}'
                | '\u{2029}'
        );
        if !is_break {
            continue;
        }
        lines.push(&text[start..idx]);
        start = idx + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(next_idx, '\n')) = chars.peek() {
                chars.next();
                start = next_idx + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
