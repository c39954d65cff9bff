//! Runs every uploaded résumé through extraction, matching and scoring.
//!
//! Blocking from start to finish. Handlers call [`Analyzer::run`], which
//! moves the whole batch onto the blocking pool.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::fuzzy::FuzzyMatcher;
use super::keywords::{extract_jd_keywords, KeywordSet};
use super::scoring::generate_feedback;
use super::skills::find_skills_in_resume;
use crate::config::Heuristics;
use crate::errors::AppError;
use crate::extraction::{extract_contact_info, extract_sections, segment_by_headers, TextExtractor};
use crate::models::{AnalysisReport, ExtractedResume, ResumeUpload, ScoreBar};
use crate::nlp::NlpPipeline;

#[derive(Clone)]
pub struct Analyzer {
    extractor: Arc<dyn TextExtractor>,
    nlp: Arc<dyn NlpPipeline>,
    fuzzy: Arc<dyn FuzzyMatcher>,
    heuristics: Arc<Heuristics>,
    /// Also run the header-driven segmentation; its output is only logged.
    header_pass: bool,
}

impl Analyzer {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        nlp: Arc<dyn NlpPipeline>,
        fuzzy: Arc<dyn FuzzyMatcher>,
        heuristics: Heuristics,
        header_pass: bool,
    ) -> Self {
        Self {
            extractor,
            nlp,
            fuzzy,
            heuristics: Arc::new(heuristics),
            header_pass,
        }
    }

    /// Async entry point: the batch runs on tokio's blocking pool.
    pub async fn run(
        &self,
        jd_text: String,
        resumes: Vec<ResumeUpload>,
    ) -> Result<AnalysisReport, AppError> {
        let analyzer = self.clone();
        tokio::task::spawn_blocking(move || analyzer.analyze(&jd_text, &resumes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}")))
    }

    /// Keywords are extracted once; résumés are processed in upload order,
    /// then stably sorted by score, highest first.
    pub fn analyze(&self, jd_text: &str, resumes: &[ResumeUpload]) -> AnalysisReport {
        let keywords = extract_jd_keywords(jd_text, self.nlp.as_ref(), &self.heuristics.tech_terms);
        info!(
            "Analyzing {} resume(s) against {} JD keyword(s)",
            resumes.len(),
            keywords.len()
        );

        let mut warnings = Vec::new();
        let mut results: Vec<ExtractedResume> = resumes
            .iter()
            .map(|resume| self.process(resume, &keywords, &mut warnings))
            .collect();

        results.sort_by(|a, b| b.score.cmp(&a.score));

        let comparison = results
            .iter()
            .map(|r| ScoreBar {
                name: r.name.clone(),
                score: r.score,
            })
            .collect();

        AnalysisReport {
            keyword_count: keywords.len(),
            results,
            comparison,
            warnings,
        }
    }

    fn process(
        &self,
        resume: &ResumeUpload,
        keywords: &KeywordSet,
        warnings: &mut Vec<String>,
    ) -> ExtractedResume {
        let text = match self.extractor.extract(&resume.content) {
            Ok(text) => text,
            Err(e) => {
                warn!("PDF extract failed for {}: {e}", resume.name);
                warnings.push(format!("PDF extract failed for {}: {e}", resume.name));
                String::new()
            }
        };

        let contact = extract_contact_info(&text);

        if self.header_pass {
            debug!(
                "Header-driven sections for {} (discarded): {:?}",
                resume.name,
                segment_by_headers(&text)
            );
        }
        let sections = extract_sections(&text, &self.heuristics);

        let found = find_skills_in_resume(
            &text,
            keywords,
            self.fuzzy.as_ref(),
            self.heuristics.fuzzy_threshold,
        );
        let feedback = generate_feedback(&found, keywords, &self.heuristics);
        debug!("{} scored {}", resume.name, feedback.score);

        ExtractedResume {
            name: resume.name.clone(),
            email: contact.email,
            phone: contact.phone,
            education: sections.education,
            projects: sections.projects,
            certifications: sections.certifications,
            skills: found.into_iter().collect(),
            common_skills: feedback.matched,
            score: feedback.score,
            feedback: feedback.messages,
        }
    }
}
