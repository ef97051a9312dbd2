//! Input parsing: keyword-candidate lists and the prepared posting text.
//!
//! All file I/O in the crate happens here; the analysis stages operate on the
//! in-memory records this module produces.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::AnalysisError;
use crate::models::candidate::{KeywordCandidate, Provenance, Role};

/// Punctuation stripped from candidate and token edges. Symbols that carry
/// meaning in technical terms ('+', '#', '&', '/', '@') are deliberately
/// absent.
pub(crate) const EDGE_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '"', '\'', '(', ')', '[', ']', '{', '}', '<', '>',
];

// ────────────────────────────────────────────────────────────────────────────
// Posting
// ────────────────────────────────────────────────────────────────────────────

/// A job posting prepared for matching: the raw text plus a lowered copy,
/// its lowered lines, and the whitespace token count.
#[derive(Debug, Clone)]
pub struct Posting {
    raw: String,
    lower: String,
    lines: Vec<String>,
    word_count: usize,
}

impl Posting {
    pub fn new(text: &str) -> Result<Self, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::MalformedInput(
                "posting text is empty".to_string(),
            ));
        }
        let lower = text.to_lowercase();
        let lines = lower.lines().map(|l| l.trim().to_string()).collect();
        let word_count = lower.split_whitespace().count();
        Ok(Self {
            raw: text.to_string(),
            lower,
            lines,
            word_count,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let text = fs::read_to_string(path)?;
        Self::new(&text)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Lowered, trimmed posting lines in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Case-insensitive substring check against the posting text.
    pub fn contains(&self, fragment: &str) -> bool {
        !fragment.is_empty() && self.lower.contains(&fragment.to_lowercase())
    }

    /// Counts non-overlapping, case-insensitive, word-bounded occurrences of
    /// `phrase`. Phrases the posting lacks count 0; this never fails.
    pub fn count_occurrences(&self, phrase: &str) -> usize {
        if phrase.trim().is_empty() {
            return 0;
        }
        match phrase_pattern(phrase) {
            Some(re) => re.find_iter(&self.lower).count(),
            None => 0,
        }
    }

    /// The first `words` whitespace tokens of the lowered posting, re-joined
    /// with single spaces.
    pub fn leading_window(&self, words: usize) -> String {
        self.lower
            .split_whitespace()
            .take(words)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Word-bounded pattern for a phrase. `\b` is attached only where the phrase
/// edge is itself a word character, so symbol-edged terms like "c++" still
/// match literally.
fn phrase_pattern(phrase: &str) -> Option<Regex> {
    let lowered = phrase.to_lowercase();
    let escaped = regex::escape(&lowered);
    let mut pattern = String::with_capacity(escaped.len() + 4);
    if lowered.chars().next().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&escaped);
    if lowered.chars().last().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    Regex::new(&pattern).ok()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawRecord {
    kw: Option<String>,
    text: Option<String>,
    role: String,
    source: Option<String>,
}

/// The upstream extractor emits either a bare array of records or a
/// `{"keywords": [...]}` wrapper; records name the phrase `kw` or `text`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Wrapped { keywords: Vec<RawRecord> },
    Bare(Vec<RawRecord>),
}

/// Parses a keyword-candidate JSON document into normalized records.
///
/// Accepts both document shapes and both phrase field names. Fails with
/// `MalformedInput` on unparseable JSON, a record without a phrase field, a
/// phrase that is empty once trimmed, or an unknown role/source string.
pub fn candidates_from_json(json: &str) -> Result<Vec<KeywordCandidate>, AnalysisError> {
    let document: RawDocument = serde_json::from_str(json).map_err(|e| {
        AnalysisError::MalformedInput(format!("keyword JSON does not parse: {e}"))
    })?;
    let records = match document {
        RawDocument::Wrapped { keywords } => keywords,
        RawDocument::Bare(records) => records,
    };

    let mut candidates = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let raw_text = record.kw.or(record.text).ok_or_else(|| {
            AnalysisError::MalformedInput(format!("record {index} has no 'kw' or 'text' field"))
        })?;
        let text = normalize_keyword(&raw_text);
        if text.is_empty() {
            return Err(AnalysisError::MalformedInput(format!(
                "record {index} ('{raw_text}') is empty after trimming"
            )));
        }
        let role = Role::parse(&record.role).ok_or_else(|| {
            AnalysisError::MalformedInput(format!(
                "record {index} ('{text}') has unknown role '{}'",
                record.role
            ))
        })?;
        let source = match record.source.as_deref() {
            None => Provenance::LlmExtraction,
            Some(raw) => Provenance::parse(raw).ok_or_else(|| {
                AnalysisError::MalformedInput(format!(
                    "record {index} ('{text}') has unknown source '{raw}'"
                ))
            })?,
        };
        candidates.push(KeywordCandidate { text, role, source });
    }

    debug!(count = candidates.len(), "parsed keyword records");
    Ok(candidates)
}

pub fn candidates_from_path(path: impl AsRef<Path>) -> Result<Vec<KeywordCandidate>, AnalysisError> {
    let json = fs::read_to_string(path)?;
    candidates_from_json(&json)
}

/// Trims whitespace and strips leading/trailing punctuation.
pub fn normalize_keyword(raw: &str) -> String {
    raw.trim().trim_matches(EDGE_PUNCTUATION).trim().to_string()
}

/// Case-insensitive dedup on candidate text; the first-seen record wins and
/// keeps its role and source.
pub fn dedup_candidates(candidates: Vec<KeywordCandidate>) -> Vec<KeywordCandidate> {
    let mut seen = std::collections::HashSet::new();
    let before = candidates.len();
    let mut unique = Vec::with_capacity(before);
    for candidate in candidates {
        if seen.insert(candidate.text.to_lowercase()) {
            unique.push(candidate);
        }
    }
    if unique.len() < before {
        warn!(
            dropped = before - unique.len(),
            kept = unique.len(),
            "dropped duplicate keyword candidates"
        );
    }
    unique
}
