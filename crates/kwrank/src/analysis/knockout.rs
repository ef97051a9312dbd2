//! Knockout-requirement detection and candidate categorization.
//!
//! `KnockoutMatcher` is the compiled pattern matcher (years, degree,
//! certification, travel families); `Categorizer` applies the ordered rules,
//! the degree guardrail, and the knockout cap.

use std::cmp::Ordering;

use regex::Regex;
use tracing::{debug, warn};

use crate::config::{compile_pattern, CategoryConfig, Config};
use crate::errors::AnalysisError;
use crate::loader::Posting;
use crate::models::candidate::{
    Category, ClassifiedCandidate, KnockoutKind, KnockoutMatch, PatternFamily, Role,
    ScoredCandidate,
};

/// Spelled-out year values the years parser understands.
const SPELLED_VALUES: &[(&str, u32)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
    ("twenty", 20),
];

/// Parsed years requirement, used to detect conflicting parses in strict
/// mode. A simple "N+" reads as a minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YearsReq {
    Range(u32, u32),
    Min(u32),
}

#[derive(Debug, Clone, Copy)]
enum YearsTier {
    Range,
    Minimum,
    Simple,
}

#[derive(Debug)]
struct YearsHit {
    start: usize,
    end: usize,
    fragment: String,
    value: Option<YearsReq>,
}

impl YearsHit {
    fn overlaps(&self, other: &YearsHit) -> bool {
        self.start < other.end && other.start < self.end
    }
}

fn parse_years_number(raw: &str) -> Option<u32> {
    if let Ok(value) = raw.parse::<u32>() {
        return Some(value);
    }
    SPELLED_VALUES
        .iter()
        .find(|(word, _)| *word == raw)
        .map(|(_, value)| *value)
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, AnalysisError> {
    patterns.iter().map(|p| compile_pattern(p)).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// KnockoutMatcher
// ────────────────────────────────────────────────────────────────────────────

/// Pattern matcher for knockout requirements, compiled once from config.
///
/// Family priority: years > degree > certification > travel. Within the
/// years family, a range parse beats a minimum qualifier beats a simple
/// "N+", and lower-tier matches inside a higher-tier span are treated as
/// sub-matches, not independent requirements.
pub struct KnockoutMatcher {
    soft_skills: Vec<Regex>,
    years_range: Vec<Regex>,
    years_minimum: Vec<Regex>,
    years_simple: Vec<Regex>,
    degree: Vec<Regex>,
    certification: Vec<Regex>,
    travel: Vec<Regex>,
    preferred_indicators: Vec<String>,
    strict: bool,
}

impl KnockoutMatcher {
    pub fn new(config: &CategoryConfig) -> Result<Self, AnalysisError> {
        let p = &config.patterns;
        Ok(Self {
            soft_skills: compile_all(&p.soft_skill_exclusions)?,
            years_range: compile_all(&p.years_range)?,
            years_minimum: compile_all(&p.years_minimum)?,
            years_simple: compile_all(&p.years_simple)?,
            degree: compile_all(&p.degree)?,
            certification: compile_all(&p.certification)?,
            travel: compile_all(&p.travel)?,
            preferred_indicators: p
                .preferred_indicators
                .iter()
                .map(|i| i.to_lowercase())
                .collect(),
            strict: config.strict_validation,
        })
    }

    /// Classifies a candidate phrase against the knockout families.
    ///
    /// Returns `Ok(None)` for soft-skill phrases and phrases matching no
    /// family. Errs only in strict mode, on conflicting years parses.
    pub fn classify(&self, text: &str) -> Result<Option<KnockoutMatch>, AnalysisError> {
        let lowered = text.to_lowercase();

        if self.soft_skills.iter().any(|re| re.is_match(&lowered)) {
            return Ok(None);
        }

        if let Some(fragment) = self.years_fragment(text, &lowered)? {
            return Ok(Some(self.build_match(PatternFamily::Years, fragment, &lowered)));
        }

        for (family, patterns) in [
            (PatternFamily::Degree, &self.degree),
            (PatternFamily::Certification, &self.certification),
            (PatternFamily::Travel, &self.travel),
        ] {
            if let Some(fragment) = first_fragment(patterns, &lowered) {
                return Ok(Some(self.build_match(family, fragment, &lowered)));
            }
        }

        Ok(None)
    }

    /// Whether the phrase asserts a degree requirement, regardless of how it
    /// would classify. Drives the degree guardrail.
    pub fn asserts_degree(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.degree.iter().any(|re| re.is_match(&lowered))
    }

    fn years_fragment(
        &self,
        original: &str,
        lowered: &str,
    ) -> Result<Option<String>, AnalysisError> {
        let range_hits = scan_tier(&self.years_range, lowered, YearsTier::Range);
        let minimum_hits: Vec<YearsHit> = scan_tier(&self.years_minimum, lowered, YearsTier::Minimum)
            .into_iter()
            .filter(|hit| !overlaps_any(hit, &range_hits))
            .collect();
        let simple_hits: Vec<YearsHit> = scan_tier(&self.years_simple, lowered, YearsTier::Simple)
            .into_iter()
            .filter(|hit| !overlaps_any(hit, &range_hits) && !overlaps_any(hit, &minimum_hits))
            .collect();

        let retained: Vec<&YearsHit> = range_hits
            .iter()
            .chain(&minimum_hits)
            .chain(&simple_hits)
            .collect();
        let Some(first) = retained.first() else {
            return Ok(None);
        };

        if self.strict {
            let mut values: Vec<YearsReq> = Vec::new();
            for hit in &retained {
                if let Some(value) = hit.value {
                    if !values.contains(&value) {
                        values.push(value);
                    }
                }
            }
            if values.len() > 1 {
                let fragments: Vec<String> = retained
                    .iter()
                    .filter(|hit| hit.value.is_some())
                    .map(|hit| format!("'{}'", hit.fragment))
                    .collect();
                return Err(AnalysisError::ClassificationAmbiguous {
                    keyword: original.to_string(),
                    details: format!(
                        "conflicting years requirements: {}",
                        fragments.join(" vs ")
                    ),
                });
            }
        }

        Ok(Some(first.fragment.clone()))
    }

    fn build_match(
        &self,
        family: PatternFamily,
        fragment: String,
        lowered: &str,
    ) -> KnockoutMatch {
        let kind = if self
            .preferred_indicators
            .iter()
            .any(|indicator| lowered.contains(indicator.as_str()))
        {
            KnockoutKind::Preferred
        } else {
            KnockoutKind::Required
        };
        KnockoutMatch {
            family,
            fragment,
            kind,
        }
    }
}

/// First pattern that matches wins; its leftmost match is the fragment.
fn first_fragment(patterns: &[Regex], lowered: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.find(lowered))
        .map(|m| m.as_str().to_string())
}

fn overlaps_any(hit: &YearsHit, others: &[YearsHit]) -> bool {
    others.iter().any(|other| hit.overlaps(other))
}

fn scan_tier(regexes: &[Regex], lowered: &str, tier: YearsTier) -> Vec<YearsHit> {
    let mut hits = Vec::new();
    for re in regexes {
        for caps in re.captures_iter(lowered) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let numbers: Vec<u32> = caps
                .iter()
                .skip(1)
                .flatten()
                .filter_map(|group| parse_years_number(group.as_str()))
                .collect();
            let value = match tier {
                YearsTier::Range => {
                    (numbers.len() >= 2).then(|| YearsReq::Range(numbers[0], numbers[1]))
                }
                YearsTier::Minimum | YearsTier::Simple => {
                    numbers.first().map(|n| YearsReq::Min(*n))
                }
            };
            hits.push(YearsHit {
                start: whole.start(),
                end: whole.end(),
                fragment: whole.as_str().to_string(),
                value,
            });
        }
    }
    hits.sort_by_key(|hit| (hit.start, hit.end));
    hits
}

// ────────────────────────────────────────────────────────────────────────────
// Categorizer
// ────────────────────────────────────────────────────────────────────────────

/// Result of categorization: classified candidates in input order, plus the
/// names removed by the degree guardrail.
#[derive(Debug)]
pub struct CategorizationOutcome {
    pub classified: Vec<ClassifiedCandidate>,
    pub dropped_degree: Vec<String>,
}

pub struct Categorizer {
    matcher: KnockoutMatcher,
    top_skill_threshold: f64,
    max_knockouts: usize,
    degree_terms: Regex,
}

impl Categorizer {
    pub fn new(config: &Config) -> Result<Self, AnalysisError> {
        Ok(Self {
            matcher: KnockoutMatcher::new(&config.categories)?,
            top_skill_threshold: config.categories.top_skill_threshold,
            max_knockouts: config.categories.max_knockouts,
            degree_terms: compile_pattern(&config.categories.degree_terms_pattern)?,
        })
    }

    /// Applies the ordered category rules to every candidate, then the
    /// degree guardrail, then the knockout cap. Candidates stay in input
    /// order.
    pub fn categorize_all(
        &self,
        scored: Vec<ScoredCandidate>,
        posting: &Posting,
    ) -> Result<CategorizationOutcome, AnalysisError> {
        let mut classified = Vec::with_capacity(scored.len());
        for candidate in scored {
            // Culture-role candidates never match knockout patterns.
            let knockout = if candidate.role == Role::Culture {
                None
            } else {
                match self.matcher.classify(&candidate.text)? {
                    Some(m) if posting.contains(&m.fragment) => Some(m),
                    _ => None,
                }
            };
            let category = match knockout {
                Some(_) => Category::Knockout,
                None => fallthrough_category(
                    candidate.role,
                    candidate.composite_score,
                    self.top_skill_threshold,
                ),
            };
            classified.push(ClassifiedCandidate::from_scored(candidate, category, knockout));
        }

        let dropped_degree = self.apply_degree_guardrail(&mut classified, posting);
        let reclassified = self.enforce_knockout_cap(&mut classified);
        if reclassified > 0 {
            warn!(
                reclassified,
                max = self.max_knockouts,
                "knockout cap enforced"
            );
        }
        debug!(
            total = classified.len(),
            dropped_degree = dropped_degree.len(),
            "categorized candidates"
        );

        Ok(CategorizationOutcome {
            classified,
            dropped_degree,
        })
    }

    /// When the posting never mentions a degree, candidates asserting one
    /// are removed outright, whatever their category.
    fn apply_degree_guardrail(
        &self,
        classified: &mut Vec<ClassifiedCandidate>,
        posting: &Posting,
    ) -> Vec<String> {
        if self.degree_terms.is_match(posting.lower()) {
            return Vec::new();
        }
        let mut dropped = Vec::new();
        classified.retain(|candidate| {
            if self.matcher.asserts_degree(&candidate.text) {
                dropped.push(candidate.text.clone());
                false
            } else {
                true
            }
        });
        if !dropped.is_empty() {
            warn!(
                dropped = dropped.len(),
                "dropped degree requirements absent from the posting"
            );
        }
        dropped
    }

    /// Keeps the `max_knockouts` highest-scoring knockouts; the overflow is
    /// reclassified through the score rules.
    fn enforce_knockout_cap(&self, classified: &mut [ClassifiedCandidate]) -> usize {
        let mut knockout_indices: Vec<usize> = classified
            .iter()
            .enumerate()
            .filter(|(_, c)| c.category == Category::Knockout)
            .map(|(index, _)| index)
            .collect();
        if knockout_indices.len() <= self.max_knockouts {
            return 0;
        }

        knockout_indices.sort_by(|&a, &b| {
            classified[b]
                .composite_score
                .partial_cmp(&classified[a].composite_score)
                .unwrap_or(Ordering::Equal)
        });
        let overflow = knockout_indices.split_off(self.max_knockouts);
        for index in &overflow {
            let candidate = &mut classified[*index];
            candidate.category = fallthrough_category(
                candidate.role,
                candidate.composite_score,
                self.top_skill_threshold,
            );
            candidate.knockout = None;
        }
        overflow.len()
    }
}

/// Rules 2-4: threshold, then culture role, then supporting.
fn fallthrough_category(role: Role, composite: f64, threshold: f64) -> Category {
    if composite >= threshold {
        Category::TopSkill
    } else if role == Role::Culture {
        Category::CultureFit
    } else {
        Category::Supporting
    }
}
