//! Candidate records as they move through the pipeline.
//!
//! Each stage produces a derived record rather than mutating in place:
//! `KeywordCandidate` → `ScoredCandidate` → `ClassifiedCandidate`.

use serde::{Deserialize, Serialize};

/// Role bucket assigned by the upstream keyword-extraction step.
///
/// Weighting priority: core > functional_skills > industry_experience > culture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Core,
    FunctionalSkills,
    IndustryExperience,
    Culture,
}

impl Role {
    /// Parses a raw role string. Unknown values return `None` so the loader
    /// can reject them instead of silently defaulting.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_lowercase().as_str() {
            "core" => Some(Role::Core),
            "functional_skills" => Some(Role::FunctionalSkills),
            "industry_experience" => Some(Role::IndustryExperience),
            "culture" => Some(Role::Culture),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Core => "core",
            Role::FunctionalSkills => "functional_skills",
            Role::IndustryExperience => "industry_experience",
            Role::Culture => "culture",
        }
    }
}

/// Where a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    LlmExtraction,
    DirectExtraction,
}

impl Provenance {
    /// Parses a raw source string. Unknown values return `None` so the loader
    /// can reject them.
    pub fn parse(raw: &str) -> Option<Provenance> {
        match raw.trim().to_lowercase().as_str() {
            "llm_extraction" => Some(Provenance::LlmExtraction),
            "direct_extraction" => Some(Provenance::DirectExtraction),
            _ => None,
        }
    }
}

/// A keyword phrase extracted from a job posting, normalized by the loader.
///
/// Invariant: `text` is non-empty, trimmed, with no leading/trailing
/// punctuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCandidate {
    pub text: String,
    pub role: Role,
    pub source: Provenance,
}

impl KeywordCandidate {
    pub fn new(text: impl Into<String>, role: Role, source: Provenance) -> Self {
        Self {
            text: text.into(),
            role,
            source,
        }
    }
}

/// A candidate with its per-signal scores and the weighted composite.
///
/// All score fields are rounded to 3 decimals when the record is built, so
/// serialized output is stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub text: String,
    pub role: Role,
    pub source: Provenance,
    /// Occurrence count of the phrase in the posting, length-normalized to [0, 1].
    pub frequency_score: f64,
    /// Highest boost among the sections where the phrase appears.
    pub section_boost: f64,
    /// Static weight looked up from the role table.
    pub role_weight: f64,
    /// Deduction applied when the phrase (or a constituent word) is a buzzword.
    pub buzzword_penalty: f64,
    /// `(frequency*w1 + section*w2 + role*w3) × multipliers − buzzword_penalty`,
    /// floored at 0.
    pub composite_score: f64,
}

/// Final category assigned by the categorizer.
///
/// Output ordering follows this priority: knockout, top_skill, supporting,
/// culture_fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Knockout,
    TopSkill,
    Supporting,
    CultureFit,
}

impl Category {
    /// Ordering rank, lower sorts first.
    pub fn priority(&self) -> u8 {
        match self {
            Category::Knockout => 0,
            Category::TopSkill => 1,
            Category::Supporting => 2,
            Category::CultureFit => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Knockout => "knockout",
            Category::TopSkill => "top_skill",
            Category::Supporting => "supporting",
            Category::CultureFit => "culture_fit",
        }
    }
}

/// Which knockout pattern family fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternFamily {
    Years,
    Degree,
    Certification,
    Travel,
}

/// Whether the requirement is hard or softened by "preferred"-style wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutKind {
    Required,
    Preferred,
}

/// Metadata for a verified knockout match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnockoutMatch {
    pub family: PatternFamily,
    /// The exact lowered substring of the candidate that matched, also
    /// verified to appear in the posting text.
    pub fragment: String,
    pub kind: KnockoutKind,
}

/// A scored candidate with its final category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedCandidate {
    pub text: String,
    pub role: Role,
    pub source: Provenance,
    pub frequency_score: f64,
    pub section_boost: f64,
    pub role_weight: f64,
    pub buzzword_penalty: f64,
    pub composite_score: f64,
    pub category: Category,
    /// Present only when `category` is `Knockout`.
    pub knockout: Option<KnockoutMatch>,
}

impl ClassifiedCandidate {
    pub fn from_scored(scored: ScoredCandidate, category: Category, knockout: Option<KnockoutMatch>) -> Self {
        Self {
            text: scored.text,
            role: scored.role,
            source: scored.source,
            frequency_score: scored.frequency_score,
            section_boost: scored.section_boost,
            role_weight: scored.role_weight,
            buzzword_penalty: scored.buzzword_penalty,
            composite_score: scored.composite_score,
            category,
            knockout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_accepts_the_four_roles() {
        assert_eq!(Role::parse("core"), Some(Role::Core));
        assert_eq!(Role::parse("functional_skills"), Some(Role::FunctionalSkills));
        assert_eq!(Role::parse("industry_experience"), Some(Role::IndustryExperience));
        assert_eq!(Role::parse("culture"), Some(Role::Culture));
    }

    #[test]
    fn test_role_parse_is_case_insensitive_and_trims() {
        assert_eq!(Role::parse("  CORE "), Some(Role::Core));
        assert_eq!(Role::parse("Culture"), Some(Role::Culture));
    }

    #[test]
    fn test_role_parse_rejects_unknown_values() {
        assert_eq!(Role::parse("important"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("skill"), None);
    }

    #[test]
    fn test_role_serde_uses_snake_case() {
        let json = serde_json::to_string(&Role::FunctionalSkills).unwrap();
        assert_eq!(json, r#""functional_skills""#);
        let back: Role = serde_json::from_str(r#""industry_experience""#).unwrap();
        assert_eq!(back, Role::IndustryExperience);
    }

    #[test]
    fn test_category_priority_order() {
        assert!(Category::Knockout.priority() < Category::TopSkill.priority());
        assert!(Category::TopSkill.priority() < Category::Supporting.priority());
        assert!(Category::Supporting.priority() < Category::CultureFit.priority());
    }

    #[test]
    fn test_category_serde_uses_snake_case() {
        let json = serde_json::to_string(&Category::TopSkill).unwrap();
        assert_eq!(json, r#""top_skill""#);
        let back: Category = serde_json::from_str(r#""culture_fit""#).unwrap();
        assert_eq!(back, Category::CultureFit);
    }

    #[test]
    fn test_classified_candidate_carries_scores_through() {
        let scored = ScoredCandidate {
            text: "product analytics".to_string(),
            role: Role::Core,
            source: Provenance::LlmExtraction,
            frequency_score: 0.2,
            section_boost: 0.8,
            role_weight: 1.2,
            buzzword_penalty: 0.0,
            composite_score: 0.55,
        };
        let classified = ClassifiedCandidate::from_scored(scored, Category::TopSkill, None);
        assert_eq!(classified.composite_score, 0.55);
        assert_eq!(classified.category, Category::TopSkill);
        assert!(classified.knockout.is_none());
    }
}
