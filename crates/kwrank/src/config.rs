//! Engine configuration: every weight, threshold, list, and pattern the
//! pipeline consults, as explicit structs with documented defaults.
//!
//! Nothing here is global. Stages receive `&Config` at construction time, so
//! tests can tune a single knob per invocation.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;
use crate::models::candidate::Role;

/// Spelled-out number alternation used by the years patterns ("three years").
const SPELLED_NUMBERS: &str = "one|two|three|four|five|six|seven|eight|nine|ten|\
eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty";

/// Generic buzzwords that dilute a keyword list. Matched against the full
/// phrase or any constituent word.
const DEFAULT_BUZZWORDS: &[&str] = &[
    "vision",
    "strategy",
    "strategic",
    "roadmap",
    "delivery",
    "execution",
    "discovery",
    "innovation",
    "data-driven",
    "metrics",
    "kpis",
    "scalable",
    "alignment",
    "ownership",
    "stakeholders",
    "go-to-market",
    "collaboration",
    "agile",
    "sprint",
    "backlog",
    "prioritization",
    "user-centric",
    "customer-centric",
    "outcomes",
    "best practices",
    "cross-functional",
    "communication",
    "leadership",
    "fast-paced",
    "results-oriented",
    "growth hacking",
    "roi",
    "north star",
    "market research",
    "ecosystem",
];

/// Overused executive phrases, penalized multiplicatively.
const DEFAULT_EXECUTIVE_BUZZWORDS: &[&str] = &[
    "thought leadership",
    "best-in-class",
    "world-class",
    "cutting-edge",
    "bleeding-edge",
    "paradigm shift",
    "game-changer",
    "disruptive",
    "revolutionary",
    "transformational",
    "synergies",
    "low-hanging fruit",
    "move the needle",
    "boil the ocean",
    "circle back",
    "touch base",
    "drill down",
    "deep dive",
    "take offline",
    "leverage synergies",
    "actionable insights",
    "holistic approach",
    "end-to-end solution",
    "turn-key",
    "enterprise-grade",
    "mission-critical",
    "scalable solution",
    "robust framework",
    "seamless integration",
    "optimize efficiency",
    "maximize roi",
    "drive value",
];

/// Authentic executive vocabulary, boosted multiplicatively.
const DEFAULT_EXECUTIVE_VOCABULARY: &[&str] = &[
    "p&l",
    "p&l responsibility",
    "revenue ownership",
    "business outcomes",
    "portfolio management",
    "cross-functional leadership",
    "organizational design",
    "board reporting",
    "investor relations",
    "market expansion",
    "acquisition integration",
    "team scaling",
    "hiring plans",
    "culture building",
    "succession planning",
    "executive presence",
    "strategic partnerships",
    "competitive positioning",
    "go-to-market execution",
    "budget ownership",
    "headcount planning",
    "performance management",
    "talent development",
    "executive coaching",
    "vp of product",
    "director of product",
    "head of product",
    "chief product officer",
    "product portfolio",
    "platform strategy",
    "product vision",
    "product leadership",
    "executive team",
    "leadership team",
    "senior leadership",
    "c-suite",
];

/// Soft-skill phrasings that must never classify as knockouts.
const DEFAULT_SOFT_SKILL_EXCLUSIONS: &[&str] = &[
    r"leadership\s+style",
    r"communication\s+skills",
    r"strategic\s+thinking",
    r"problem\s+solving",
    r"team\s+player",
    r"passion",
    r"enthusiasm",
    r"mindset",
    r"empathy",
    r"collaborative",
    r"innovative",
    r"customer-obsessed",
    r"results-oriented",
    r"data-driven",
    r"fast-paced",
];

/// Wording that softens a requirement to "preferred".
const DEFAULT_PREFERRED_INDICATORS: &[&str] = &[
    "preferred",
    "plus",
    "bonus",
    "nice to have",
    "advantage",
    "desirable",
    "beneficial",
    "would be great",
    "a plus but not required",
];

/// Degree wording on the candidate side.
const DEFAULT_DEGREE_PATTERNS: &[&str] = &[
    r"bachelor'?s?\s*degree",
    r"master'?s?\s*degree",
    r"\bmba\b",
    r"\bphd\b",
    r"\b(bs|ms|ba|ma)\s+(degree|in)\b",
    r"degree\s+in\s+\w+",
    r"(bachelor'?s?|master'?s?)\s+in\s+\w+",
    r"bachelor'?s?/master'?s?",
];

/// Certification wording on the candidate side.
const DEFAULT_CERTIFICATION_PATTERNS: &[&str] = &[r"certifi(?:cation|ed)", r"\bpmp\b"];

/// Travel-requirement wording on the candidate side.
const DEFAULT_TRAVEL_PATTERNS: &[&str] = &[
    r"(extensive|significant|frequent).*travel",
    r"travel.*required",
    r"willing to travel",
    r"travel.*\d+%",
    r"up to \d+%.*travel",
];

/// Degree terms checked against the posting for the degree guardrail.
const DEFAULT_DEGREE_TERMS: &str = r"\b(degree|bachelor|master|mba|phd|computer\s+science)\b";

/// Compound phrases with hand-tuned multipliers; first match wins.
const DEFAULT_COMPOUND_MULTIPLIERS: &[(&str, f64)] = &[
    ("saas", 1.5),
    ("product management", 1.3),
    ("b2b", 1.2),
    ("api", 1.2),
    ("platform", 1.2),
    ("growth", 1.1),
    ("leadership", 1.1),
    ("strategy", 1.1),
    ("data", 1.1),
    ("analytics", 1.1),
];

/// Phrases marking a directly-extracted requirement as senior scope.
const DEFAULT_SENIOR_TERMS: &[&str] = &[
    "product management",
    "product-led growth",
    "product strategy",
    "cross-functional",
    "leadership",
    "managing teams",
    "leading teams",
    "product development",
    "product marketing",
    "growth teams",
];

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Weights for the composite score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub frequency: f64,
    pub section: f64,
    pub role: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            frequency: 0.55,
            section: 0.25,
            role: 0.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    /// Multiplier applied to occurrences-per-token before clamping to [0, 1].
    /// At 100.0, one occurrence in a 100-word posting scores 1.0.
    pub frequency_scale: f64,
    /// Applied when the phrase overlaps the detected posting title.
    pub title_multiplier: f64,
    /// Patterns locating the job title within the posting's first lines.
    pub job_title_patterns: Vec<String>,
    /// Word-count multipliers for compound phrases without a table entry.
    pub two_word_multiplier: f64,
    pub multi_word_multiplier: f64,
    /// Specific compound phrases, checked before the word-count rule.
    pub compound_multipliers: Vec<(String, f64)>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            frequency_scale: 100.0,
            title_multiplier: 1.2,
            job_title_patterns: vec![
                r"(director|vp|vice president|head of|lead|manager|senior|principal)\s+.*?(product|engineering|growth)".to_string(),
                r"(product|engineering|growth)\s+.*?(director|vp|vice president|head of|lead|manager)".to_string(),
            ],
            two_word_multiplier: 1.3,
            multi_word_multiplier: 1.5,
            compound_multipliers: DEFAULT_COMPOUND_MULTIPLIERS
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }
}

/// Static weight per role bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleWeights {
    pub core: f64,
    pub functional_skills: f64,
    pub industry_experience: f64,
    pub culture: f64,
}

impl RoleWeights {
    pub fn weight(&self, role: Role) -> f64 {
        match role {
            Role::Core => self.core,
            Role::FunctionalSkills => self.functional_skills,
            Role::IndustryExperience => self.industry_experience,
            Role::Culture => self.culture,
        }
    }
}

impl Default for RoleWeights {
    fn default() -> Self {
        Self {
            core: 1.2,
            functional_skills: 0.6,
            industry_experience: 0.5,
            culture: 0.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuzzwordConfig {
    /// Deduction subtracted from the composite of a buzzword-matched phrase.
    pub penalty: f64,
    /// Multiplier for overused executive phrases.
    pub executive_penalty: f64,
    /// Multiplier for authentic executive vocabulary.
    pub executive_boost: f64,
    /// Remove buzzword-matched candidates entirely instead of penalizing.
    pub drop_buzzwords: bool,
    /// Constituent words shorter than this never trigger a buzzword match.
    pub min_word_length: usize,
    pub buzzwords: Vec<String>,
    pub executive_buzzwords: Vec<String>,
    pub executive_vocabulary: Vec<String>,
}

impl Default for BuzzwordConfig {
    fn default() -> Self {
        Self {
            penalty: 0.3,
            executive_penalty: 0.8,
            executive_boost: 1.15,
            drop_buzzwords: false,
            min_word_length: 3,
            buzzwords: strings(DEFAULT_BUZZWORDS),
            executive_buzzwords: strings(DEFAULT_EXECUTIVE_BUZZWORDS),
            executive_vocabulary: strings(DEFAULT_EXECUTIVE_VOCABULARY),
        }
    }
}

/// Section detection patterns and boosts. Patterns are matched against
/// lowered posting lines in the field order below; first match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    pub title_pattern: String,
    pub requirements_pattern: String,
    pub responsibilities_pattern: String,
    pub company_pattern: String,
    pub title_boost: f64,
    pub requirements_boost: f64,
    pub responsibilities_boost: f64,
    pub company_boost: f64,
    /// Anything inside the first N words of the posting counts as title.
    pub title_window_words: usize,
    /// Floor applied to phrases containing "years" or "experience".
    pub experience_floor: f64,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            title_pattern: r"^.*?(director|vp|vice president|head of|lead|manager).*$".to_string(),
            requirements_pattern: r"(what you.ll need|what we.re looking for|what you bring|requirements|qualifications|must have|experience|skills)".to_string(),
            responsibilities_pattern: r"(what you.ll do|what you.ll be doing|responsibilities|role|opportunity|day to day)".to_string(),
            company_pattern: r"(about|why join|benefits|culture|perks|our mission)".to_string(),
            title_boost: 1.0,
            requirements_boost: 0.8,
            responsibilities_boost: 0.8,
            company_boost: 0.3,
            title_window_words: 150,
            experience_floor: 0.9,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Categorization
// ────────────────────────────────────────────────────────────────────────────

/// Knockout pattern families. The years tiers are listed in priority order:
/// range beats minimum-qualifier beats simple "N+".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnockoutPatterns {
    pub years_range: Vec<String>,
    pub years_minimum: Vec<String>,
    pub years_simple: Vec<String>,
    pub degree: Vec<String>,
    pub certification: Vec<String>,
    pub travel: Vec<String>,
    pub soft_skill_exclusions: Vec<String>,
    /// Plain substrings, not regexes.
    pub preferred_indicators: Vec<String>,
}

impl Default for KnockoutPatterns {
    fn default() -> Self {
        Self {
            years_range: vec![
                r"(\d+)\s*[-–]\s*(\d+)\s*years?".to_string(),
                format!(r"\b({SPELLED_NUMBERS})\s*[-–]\s*({SPELLED_NUMBERS})\s*years?"),
            ],
            years_minimum: vec![
                r"minimum\s+(?:of\s+)?(\d+)\+?\s*years?".to_string(),
                r"at\s+least\s+(\d+)\+?\s*years?".to_string(),
                r"(\d+)\+?\s*years?\s*minimum".to_string(),
                format!(r"minimum\s+(?:of\s+)?({SPELLED_NUMBERS})\s*years?"),
                format!(r"at\s+least\s+({SPELLED_NUMBERS})\s*years?"),
                format!(r"\b({SPELLED_NUMBERS})\s*years?\s*minimum"),
            ],
            years_simple: vec![
                r"(\d+)\+?\s*years?".to_string(),
                format!(r"\b({SPELLED_NUMBERS})\+?\s*years?"),
            ],
            degree: strings(DEFAULT_DEGREE_PATTERNS),
            certification: strings(DEFAULT_CERTIFICATION_PATTERNS),
            travel: strings(DEFAULT_TRAVEL_PATTERNS),
            soft_skill_exclusions: strings(DEFAULT_SOFT_SKILL_EXCLUSIONS),
            preferred_indicators: strings(DEFAULT_PREFERRED_INDICATORS),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Composite score at or above which a non-knockout becomes a top skill.
    pub top_skill_threshold: f64,
    /// Knockouts beyond this cap are reclassified by the score rules.
    pub max_knockouts: usize,
    /// Fail with an ambiguity error on conflicting years parses instead of
    /// resolving by pattern priority.
    pub strict_validation: bool,
    /// Posting-side regex for the degree guardrail.
    pub degree_terms_pattern: String,
    pub patterns: KnockoutPatterns,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            top_skill_threshold: 0.5,
            max_knockouts: 5,
            strict_validation: false,
            degree_terms_pattern: DEFAULT_DEGREE_TERMS.to_string(),
            patterns: KnockoutPatterns::default(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Clustering and injection
// ────────────────────────────────────────────────────────────────────────────

/// Knobs for the default token-based similarity backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Jaro-Winkler score at or above which two tokens count as the same.
    pub fuzzy_token_threshold: f64,
    /// Tokens shorter than this are ignored.
    pub min_token_length: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            fuzzy_token_threshold: 0.88,
            min_token_length: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Similarity at or above which a candidate joins an existing cluster.
    pub similarity_threshold: f64,
    /// A non-knockout cluster survives the trim when its score is at least
    /// `median × median_multiplier`.
    pub median_multiplier: f64,
    /// The trim never reduces the non-knockout cluster count below this.
    pub min_keep: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.5,
            median_multiplier: 1.2,
            min_keep: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectionConfig {
    /// Matches below this floor are discarded; a cluster with none records
    /// "no suitable injection point".
    pub relevance_floor: f64,
    /// At or above this, the sentence may only need a short phrase added.
    pub phrase_similarity: f64,
    /// At or above this, the sentence counts as already covering the keyword.
    pub covered_similarity: f64,
    /// Fraction of keyword words present that counts as already covered.
    pub covered_word_ratio: f64,
    /// Keyword words shorter than this are ignored by the ratio check.
    pub min_word_length: usize,
    /// Matches kept per cluster.
    pub max_matches: usize,
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            relevance_floor: 0.3,
            phrase_similarity: 0.7,
            covered_similarity: 0.8,
            covered_word_ratio: 0.7,
            min_word_length: 3,
            max_matches: 3,
        }
    }
}

/// Direct extraction of experience requirements from the posting text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceConfig {
    /// Off by default; the loader's candidate list is usually sufficient.
    pub enabled: bool,
    pub patterns: Vec<String>,
    pub senior_terms: Vec<String>,
    /// Word-set Jaccard overlap above which two requirements are duplicates.
    pub dedup_overlap: f64,
    /// Matches shorter than this many characters are discarded.
    pub min_length: usize,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            patterns: vec![
                r"(\d+)\+?\s*years?\s+(in|of|with|as|managing|leading|doing|performing|working|experience)\s+([^.]{10,100})".to_string(),
                r"(\d+)\s*[-–]\s*(\d+)\s*years?\s+(in|of|with|as|managing|leading|doing|performing|working|experience)\s+([^.]{10,100})".to_string(),
                r"(minimum|at least|minimum of)\s+(\d+)\+?\s*years?\s+(in|of|with|as|managing|leading|doing|performing|working|experience)\s+([^.]{10,100})".to_string(),
                r"experience\s+(in|with|as|managing|leading|doing|performing|working)\s+([^,]{5,50})[,.]?\s*for\s+(\d+)\+?\s*years?".to_string(),
                r"([^.]{5,100})\s+(?:with|including|having)\s+(?:at least\s+)?(\d+)\+?\s*years?\s+(in|of|with|as|managing|leading)".to_string(),
            ],
            senior_terms: strings(DEFAULT_SENIOR_TERMS),
            dedup_overlap: 0.6,
            min_length: 15,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Cap on the number of top-skill clusters emitted. `None` means
    /// unlimited; callers commonly set 5.
    pub top_count: Option<usize>,
}

// ────────────────────────────────────────────────────────────────────────────
// Master config
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub roles: RoleWeights,
    pub buzzwords: BuzzwordConfig,
    pub sections: SectionConfig,
    pub categories: CategoryConfig,
    pub similarity: SimilarityConfig,
    pub clustering: ClusterConfig,
    pub injection: InjectionConfig,
    pub experience: ExperienceConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Rejects out-of-range weights/thresholds and non-compiling patterns.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let w = &self.scoring.weights;
        check_unit_range("scoring.weights.frequency", w.frequency)?;
        check_unit_range("scoring.weights.section", w.section)?;
        check_unit_range("scoring.weights.role", w.role)?;
        if w.frequency + w.section + w.role > 1.0 + f64::EPSILON {
            return Err(AnalysisError::InvalidConfig(format!(
                "scoring weights must sum to at most 1.0, got {}",
                w.frequency + w.section + w.role
            )));
        }

        check_unit_range("clustering.similarity_threshold", self.clustering.similarity_threshold)?;
        check_unit_range("similarity.fuzzy_token_threshold", self.similarity.fuzzy_token_threshold)?;
        check_unit_range("injection.relevance_floor", self.injection.relevance_floor)?;
        check_unit_range("injection.phrase_similarity", self.injection.phrase_similarity)?;
        check_unit_range("injection.covered_similarity", self.injection.covered_similarity)?;
        check_unit_range("injection.covered_word_ratio", self.injection.covered_word_ratio)?;

        if self.categories.top_skill_threshold < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "categories.top_skill_threshold must be non-negative, got {}",
                self.categories.top_skill_threshold
            )));
        }
        if self.injection.max_matches == 0 {
            return Err(AnalysisError::InvalidConfig(
                "injection.max_matches must be at least 1".to_string(),
            ));
        }

        let p = &self.categories.patterns;
        for pattern in p
            .years_range
            .iter()
            .chain(&p.years_minimum)
            .chain(&p.years_simple)
            .chain(&p.degree)
            .chain(&p.certification)
            .chain(&p.travel)
            .chain(&p.soft_skill_exclusions)
        {
            check_pattern(pattern)?;
        }
        check_pattern(&self.categories.degree_terms_pattern)?;
        check_pattern(&self.sections.title_pattern)?;
        check_pattern(&self.sections.requirements_pattern)?;
        check_pattern(&self.sections.responsibilities_pattern)?;
        check_pattern(&self.sections.company_pattern)?;
        for pattern in self
            .scoring
            .job_title_patterns
            .iter()
            .chain(&self.experience.patterns)
        {
            check_pattern(pattern)?;
        }

        Ok(())
    }
}

fn check_unit_range(name: &str, value: f64) -> Result<(), AnalysisError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(AnalysisError::InvalidConfig(format!(
            "{name} must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}

fn check_pattern(pattern: &str) -> Result<(), AnalysisError> {
    compile_pattern(pattern).map(|_| ())
}

/// Compiles a config pattern, mapping failures to `InvalidConfig`. Stages
/// compile their patterns once at construction through this.
pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, AnalysisError> {
    Regex::new(pattern)
        .map_err(|e| AnalysisError::InvalidConfig(format!("pattern '{pattern}' does not compile: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = ScoringWeights::default();
        assert!((w.frequency + w.section + w.role - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_role_weight_lookup_follows_priority() {
        let roles = RoleWeights::default();
        assert!(roles.weight(Role::Core) > roles.weight(Role::FunctionalSkills));
        assert!(roles.weight(Role::FunctionalSkills) > roles.weight(Role::IndustryExperience));
        assert!(roles.weight(Role::IndustryExperience) > roles.weight(Role::Culture));
    }

    #[test]
    fn test_validate_rejects_weight_out_of_range() {
        let mut config = Config::default();
        config.scoring.weights.frequency = 1.4;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("frequency"), "got: {err}");
    }

    #[test]
    fn test_validate_rejects_weight_sum_above_one() {
        let mut config = Config::default();
        config.scoring.weights.frequency = 0.9;
        config.scoring.weights.section = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let mut config = Config::default();
        config.categories.patterns.degree.push("([unclosed".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("does not compile"), "got: {err}");
    }

    #[test]
    fn test_validate_rejects_zero_max_matches() {
        let mut config = Config::default();
        config.injection.max_matches = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_cluster_threshold_is_half() {
        assert!((ClusterConfig::default().similarity_threshold - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_relevance_floor() {
        assert!((InjectionConfig::default().relevance_floor - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_buzzword_list_contains_known_terms() {
        let config = BuzzwordConfig::default();
        assert!(config.buzzwords.iter().any(|b| b == "fast-paced"));
        assert!(config.executive_vocabulary.iter().any(|b| b == "p&l"));
        assert!(config
            .executive_buzzwords
            .iter()
            .any(|b| b == "paradigm shift"));
    }

    #[test]
    fn test_years_patterns_compile_with_spelled_numbers() {
        let patterns = KnockoutPatterns::default();
        for pattern in patterns
            .years_range
            .iter()
            .chain(&patterns.years_minimum)
            .chain(&patterns.years_simple)
        {
            assert!(Regex::new(pattern).is_ok(), "pattern failed: {pattern}");
        }
        let spelled = Regex::new(&patterns.years_simple[1]).unwrap();
        assert!(spelled.is_match("three years"));
    }
}
