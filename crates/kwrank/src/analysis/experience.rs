//! Direct extraction of years-of-experience requirements from the posting.
//!
//! An optional pre-stage: phrases like "7+ years of product management" are
//! pulled straight from the posting text and merged into the candidate list,
//! so a sloppy upstream extraction cannot lose a hard requirement.

use regex::{Captures, Regex, RegexBuilder};
use tracing::debug;

use crate::config::ExperienceConfig;
use crate::errors::AnalysisError;
use crate::loader::Posting;
use crate::models::candidate::{KeywordCandidate, Provenance, Role};

/// Words at least one of which must appear in a matched requirement.
const EXPERIENCE_TERMS: &[&str] = &[
    "years",
    "experience",
    "background",
    "managing",
    "leading",
    "working",
];

/// One years-based requirement lifted from the posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceRequirement {
    /// The matched phrase, original casing, trimmed.
    pub full_text: String,
    /// Rendered "N+" from the first numeric capture.
    pub years: String,
    /// Surrounding posting text, 20 chars before to 50 after the match.
    pub context: String,
    pub is_minimum: bool,
    pub role: Role,
}

pub struct ExperienceExtractor {
    patterns: Vec<Regex>,
    senior_terms: Vec<String>,
    dedup_overlap: f64,
    min_length: usize,
}

impl ExperienceExtractor {
    pub fn new(config: &ExperienceConfig) -> Result<Self, AnalysisError> {
        let patterns = config
            .patterns
            .iter()
            .map(|pattern| compile_insensitive(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            patterns,
            senior_terms: config.senior_terms.iter().map(|t| t.to_lowercase()).collect(),
            dedup_overlap: config.dedup_overlap,
            min_length: config.min_length,
        })
    }

    /// All deduplicated requirements found in the posting, longest first.
    pub fn extract(&self, posting: &Posting) -> Vec<ExperienceRequirement> {
        let text = posting.raw();
        let mut requirements = Vec::new();
        for pattern in &self.patterns {
            for captures in pattern.captures_iter(text) {
                if let Some(requirement) = self.build_requirement(&captures, text) {
                    requirements.push(requirement);
                }
            }
        }
        let found = self.deduplicate(requirements);
        debug!(requirements = found.len(), "extracted experience requirements");
        found
    }

    fn build_requirement(
        &self,
        captures: &Captures<'_>,
        text: &str,
    ) -> Option<ExperienceRequirement> {
        let matched = captures.get(0)?;
        // The years value is the first all-digit capture; patterns place
        // qualifier words in earlier groups.
        let years = captures
            .iter()
            .skip(1)
            .flatten()
            .map(|group| group.as_str())
            .find(|value| !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()))?;

        let full_text = matched.as_str().trim().to_string();
        if full_text.chars().count() < self.min_length {
            return None;
        }
        let lowered = full_text.to_lowercase();
        if !EXPERIENCE_TERMS.iter().any(|term| lowered.contains(term)) {
            return None;
        }

        let role = if self.senior_terms.iter().any(|term| lowered.contains(term.as_str())) {
            Role::Core
        } else {
            Role::FunctionalSkills
        };

        Some(ExperienceRequirement {
            full_text,
            years: format!("{years}+"),
            context: context_window(text, matched.start(), matched.end()),
            is_minimum: true,
            role,
        })
    }

    /// Longest-first greedy dedup on word-set Jaccard overlap.
    fn deduplicate(&self, mut requirements: Vec<ExperienceRequirement>) -> Vec<ExperienceRequirement> {
        requirements.sort_by(|a, b| {
            b.full_text
                .chars()
                .count()
                .cmp(&a.full_text.chars().count())
        });

        let mut unique: Vec<ExperienceRequirement> = Vec::new();
        for requirement in requirements {
            let words = word_set(&requirement.full_text);
            let duplicate = unique
                .iter()
                .any(|kept| jaccard(&words, &word_set(&kept.full_text)) > self.dedup_overlap);
            if duplicate {
                debug!(text = %requirement.full_text, "dropping near-duplicate requirement");
            } else {
                unique.push(requirement);
            }
        }
        unique
    }
}

/// Requirements as loader-shaped candidates with direct-extraction provenance.
pub fn to_candidates(requirements: &[ExperienceRequirement]) -> Vec<KeywordCandidate> {
    requirements
        .iter()
        .map(|requirement| {
            KeywordCandidate::new(
                requirement.full_text.clone(),
                requirement.role,
                Provenance::DirectExtraction,
            )
        })
        .collect()
}

fn compile_insensitive(pattern: &str) -> Result<Regex, AnalysisError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
        .map_err(|e| {
            AnalysisError::InvalidConfig(format!("pattern '{pattern}' does not compile: {e}"))
        })
}

/// Snips `start - 20 .. end + 50`, clamped to char boundaries and trimmed.
fn context_window(text: &str, start: usize, end: usize) -> String {
    let mut from = start.saturating_sub(20);
    while from > 0 && !text.is_char_boundary(from) {
        from -= 1;
    }
    let mut to = (end + 50).min(text.len());
    while to < text.len() && !text.is_char_boundary(to) {
        to += 1;
    }
    text[from..to].trim().to_string()
}

fn word_set(text: &str) -> std::collections::HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn jaccard(a: &std::collections::HashSet<String>, b: &std::collections::HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
