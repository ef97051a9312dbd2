//! Multi-signal candidate scoring.
//!
//! Each candidate gets a frequency score against the posting, a section
//! boost, and a role weight, combined by the configured weights. The weighted
//! sum is then shaped by title-affinity, compound-phrase, and executive
//! multipliers before the buzzword penalty comes off.

use std::cmp::Ordering;
use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use crate::config::{compile_pattern, Config, RoleWeights, ScoringConfig, SectionConfig};
use crate::errors::AnalysisError;
use crate::loader::{Posting, EDGE_PUNCTUATION};
use crate::models::candidate::{KeywordCandidate, ScoredCandidate};

/// Exported scores are pinned to 3 decimals, so identical inputs serialize
/// byte-identically.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Result of scoring a batch: candidates ranked by descending composite,
/// plus the names of buzzwords removed when `drop_buzzwords` is on.
#[derive(Debug, Clone)]
pub struct ScoringOutcome {
    pub ranked: Vec<ScoredCandidate>,
    pub dropped_buzzwords: Vec<String>,
}

pub struct Scorer {
    scoring: ScoringConfig,
    roles: RoleWeights,
    sections: SectionConfig,
    buzzword_penalty: f64,
    executive_penalty: f64,
    executive_boost: f64,
    drop_buzzwords: bool,
    min_word_length: usize,
    buzzwords: HashSet<String>,
    executive_buzzwords: HashSet<String>,
    executive_vocabulary: HashSet<String>,
    /// (boost, pattern) in detection order: title, requirements,
    /// responsibilities, company. First match wins.
    section_patterns: Vec<(f64, Regex)>,
    job_title_patterns: Vec<Regex>,
}

impl Scorer {
    pub fn new(config: &Config) -> Result<Self, AnalysisError> {
        let sections = config.sections.clone();
        let section_patterns = vec![
            (sections.title_boost, compile_pattern(&sections.title_pattern)?),
            (
                sections.requirements_boost,
                compile_pattern(&sections.requirements_pattern)?,
            ),
            (
                sections.responsibilities_boost,
                compile_pattern(&sections.responsibilities_pattern)?,
            ),
            (
                sections.company_boost,
                compile_pattern(&sections.company_pattern)?,
            ),
        ];
        let job_title_patterns = config
            .scoring
            .job_title_patterns
            .iter()
            .map(|p| compile_pattern(p))
            .collect::<Result<Vec<_>, _>>()?;

        let lower_set =
            |values: &[String]| values.iter().map(|v| v.to_lowercase()).collect::<HashSet<_>>();

        Ok(Self {
            scoring: config.scoring.clone(),
            roles: config.roles.clone(),
            sections,
            buzzword_penalty: config.buzzwords.penalty,
            executive_penalty: config.buzzwords.executive_penalty,
            executive_boost: config.buzzwords.executive_boost,
            drop_buzzwords: config.buzzwords.drop_buzzwords,
            min_word_length: config.buzzwords.min_word_length,
            buzzwords: lower_set(&config.buzzwords.buzzwords),
            executive_buzzwords: lower_set(&config.buzzwords.executive_buzzwords),
            executive_vocabulary: lower_set(&config.buzzwords.executive_vocabulary),
            section_patterns,
            job_title_patterns,
        })
    }

    /// Scores every candidate and returns them ranked by descending
    /// composite; ties keep input order.
    pub fn score_all(&self, candidates: &[KeywordCandidate], posting: &Posting) -> ScoringOutcome {
        let job_title = self.extract_job_title(posting);
        let mut ranked = Vec::with_capacity(candidates.len());
        let mut dropped_buzzwords = Vec::new();

        for candidate in candidates {
            let is_buzz = self.is_buzzword(&candidate.text);
            if is_buzz && self.drop_buzzwords {
                dropped_buzzwords.push(candidate.text.clone());
                continue;
            }
            ranked.push(self.score_one(candidate, posting, job_title.as_deref(), is_buzz));
        }

        ranked.sort_by(|a, b| {
            b.composite_score
                .partial_cmp(&a.composite_score)
                .unwrap_or(Ordering::Equal)
        });

        debug!(
            scored = ranked.len(),
            dropped = dropped_buzzwords.len(),
            "scored candidates"
        );
        ScoringOutcome {
            ranked,
            dropped_buzzwords,
        }
    }

    fn score_one(
        &self,
        candidate: &KeywordCandidate,
        posting: &Posting,
        job_title: Option<&str>,
        is_buzz: bool,
    ) -> ScoredCandidate {
        let lowered = candidate.text.to_lowercase();
        let frequency_score = self.frequency_score(&candidate.text, posting);
        let section_boost = self.section_boost(&lowered, posting);
        let role_weight = self.roles.weight(candidate.role);

        let weights = &self.scoring.weights;
        let base = weights.frequency * frequency_score
            + weights.section * section_boost
            + weights.role * role_weight;

        let multiplier = self.title_multiplier(&lowered, job_title)
            * self.compound_multiplier(&lowered)
            * self.executive_adjustment(&lowered);

        let buzzword_penalty = if is_buzz { self.buzzword_penalty } else { 0.0 };
        let composite = (base * multiplier - buzzword_penalty).max(0.0);

        ScoredCandidate {
            text: candidate.text.clone(),
            role: candidate.role,
            source: candidate.source,
            frequency_score: round3(frequency_score),
            section_boost: round3(section_boost),
            role_weight: round3(role_weight),
            buzzword_penalty: round3(buzzword_penalty),
            composite_score: round3(composite),
        }
    }

    /// Occurrences scaled by posting length, clamped to [0, 1]. Absent
    /// phrases score 0.0.
    fn frequency_score(&self, phrase: &str, posting: &Posting) -> f64 {
        let occurrences = posting.count_occurrences(phrase);
        if occurrences == 0 || posting.word_count() == 0 {
            return 0.0;
        }
        (occurrences as f64 * self.scoring.frequency_scale / posting.word_count() as f64)
            .clamp(0.0, 1.0)
    }

    /// Maximum of the title-window boost, the boost of the section holding
    /// the phrase's first occurrence, and the experience floor.
    fn section_boost(&self, lowered_phrase: &str, posting: &Posting) -> f64 {
        let mut boost: f64 = 0.0;

        if posting
            .leading_window(self.sections.title_window_words)
            .contains(lowered_phrase)
        {
            boost = self.sections.title_boost;
        }

        if let Some(section_boost) = self.first_occurrence_boost(lowered_phrase, posting) {
            boost = boost.max(section_boost);
        }

        if lowered_phrase.contains("years") || lowered_phrase.contains("experience") {
            boost = boost.max(self.sections.experience_floor);
        }

        boost
    }

    /// Walks the posting lines with the section state machine and returns the
    /// boost of the section containing the phrase's first occurrence.
    fn first_occurrence_boost(&self, lowered_phrase: &str, posting: &Posting) -> Option<f64> {
        let mut current = self.sections.company_boost;
        for line in posting.lines() {
            if line.is_empty() {
                continue;
            }
            if let Some(boost) = self.section_of_line(line) {
                current = boost;
            }
            if line.contains(lowered_phrase) {
                return Some(current);
            }
        }
        None
    }

    fn section_of_line(&self, line: &str) -> Option<f64> {
        self.section_patterns
            .iter()
            .find(|(_, re)| re.is_match(line))
            .map(|(boost, _)| *boost)
    }

    /// Job title from the first 10 posting lines, falling back to the first
    /// non-empty line.
    fn extract_job_title(&self, posting: &Posting) -> Option<String> {
        let head: Vec<&String> = posting.lines().iter().take(10).collect();
        for line in &head {
            if line.is_empty() {
                continue;
            }
            if self.job_title_patterns.iter().any(|re| re.is_match(line)) {
                return Some((*line).clone());
            }
        }
        head.first()
            .map(|line| (*line).clone())
            .filter(|line| !line.is_empty())
    }

    fn title_multiplier(&self, lowered_phrase: &str, job_title: Option<&str>) -> f64 {
        match job_title {
            Some(title)
                if title.contains(lowered_phrase) || lowered_phrase.contains(title) =>
            {
                self.scoring.title_multiplier
            }
            _ => 1.0,
        }
    }

    /// Table entries take precedence; otherwise the multiplier follows the
    /// whitespace word count.
    fn compound_multiplier(&self, lowered_phrase: &str) -> f64 {
        for (compound, multiplier) in &self.scoring.compound_multipliers {
            if lowered_phrase.contains(compound.as_str()) {
                return *multiplier;
            }
        }
        match lowered_phrase.split_whitespace().count() {
            0 | 1 => 1.0,
            2 => self.scoring.two_word_multiplier,
            _ => self.scoring.multi_word_multiplier,
        }
    }

    fn executive_adjustment(&self, lowered_phrase: &str) -> f64 {
        if self.executive_vocabulary.contains(lowered_phrase) {
            self.executive_boost
        } else if self.executive_buzzwords.contains(lowered_phrase) {
            self.executive_penalty
        } else {
            1.0
        }
    }

    /// A candidate is buzzword-matched on its full lowered phrase or on any
    /// constituent word of at least `min_word_length` chars.
    fn is_buzzword(&self, phrase: &str) -> bool {
        let lowered = phrase.trim().to_lowercase();
        if self.buzzwords.contains(&lowered) {
            return true;
        }
        lowered
            .split_whitespace()
            .map(|word| word.trim_matches(EDGE_PUNCTUATION))
            .filter(|word| word.chars().count() >= self.min_word_length)
            .any(|word| self.buzzwords.contains(word))
    }
}
