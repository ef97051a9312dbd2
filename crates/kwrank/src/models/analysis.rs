//! Output structures: clusters, injection outcomes, and the analysis result.

use serde::{Deserialize, Serialize};

use crate::models::candidate::{Category, ClassifiedCandidate};

/// A group of near-duplicate candidates.
///
/// `members` is ordered by descending composite score (ties keep input
/// order), so the first member is always the cluster representative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Text of the highest-scoring member.
    pub alias: String,
    /// Highest-priority category among the members.
    pub category: Category,
    pub members: Vec<ClassifiedCandidate>,
}

impl Cluster {
    /// The member the alias was taken from.
    pub fn representative(&self) -> Option<&ClassifiedCandidate> {
        self.members.first()
    }

    /// Composite score of the representative; 0 for an empty cluster.
    pub fn score(&self) -> f64 {
        self.representative().map(|m| m.composite_score).unwrap_or(0.0)
    }

    /// Member texts other than the alias.
    pub fn alternate_texts(&self) -> Vec<&str> {
        self.members
            .iter()
            .skip(1)
            .map(|m| m.text.as_str())
            .collect()
    }
}

/// Suggested action for a single resume match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionAction {
    /// The sentence already carries the keyword (verbatim, by word overlap,
    /// or by very high similarity).
    AlreadyCovered,
    /// Related content; a short keyword phrase could be worked in.
    AddPhrase,
    /// No close content; a new bullet featuring the keyword is needed.
    AddBullet,
}

/// One resume sentence matched against a cluster alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectionMatch {
    pub sentence: String,
    /// Path into the resume, e.g. `work[0].highlights[2]`.
    pub location: String,
    /// Human-readable context, e.g. "Acme - Senior PM".
    pub context: String,
    pub section: String,
    pub similarity: f64,
    pub action: InjectionAction,
}

/// Per-cluster result of the resume injection scan.
///
/// "No suitable injection point" is a first-class outcome, recorded when no
/// sentence clears the relevance floor. It is never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InjectionOutcome {
    /// Ranked matches at or above the relevance floor, best first.
    Suggestion {
        alias: String,
        matches: Vec<InjectionMatch>,
    },
    NoSuitablePoint { alias: String },
}

impl InjectionOutcome {
    pub fn alias(&self) -> &str {
        match self {
            InjectionOutcome::Suggestion { alias, .. } => alias,
            InjectionOutcome::NoSuitablePoint { alias } => alias,
        }
    }

    pub fn best(&self) -> Option<&InjectionMatch> {
        match self {
            InjectionOutcome::Suggestion { matches, .. } => matches.first(),
            InjectionOutcome::NoSuitablePoint { .. } => None,
        }
    }
}

/// Stage tallies carried alongside the clusters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisCounts {
    /// Candidates entering the scorer, after dedup and any direct extraction.
    pub candidates: usize,
    /// Candidates removed by `drop_buzzwords`.
    pub dropped_buzzwords: usize,
    /// Degree claims removed because the posting mentions no degree at all.
    pub dropped_degree: usize,
    pub clusters: usize,
    pub knockouts: usize,
    pub top_skills: usize,
    pub supporting: usize,
    pub culture_fit: usize,
}

/// Full result of a pipeline run.
///
/// `clusters` is ordered by category priority, then by descending
/// representative score. `injections`, when present, is parallel to
/// `clusters`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub clusters: Vec<Cluster>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injections: Option<Vec<InjectionOutcome>>,
    pub counts: AnalysisCounts,
}

impl Analysis {
    /// The short-circuit result for an empty candidate list.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn clusters_in(&self, category: Category) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter().filter(move |c| c.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::{Provenance, Role};

    fn make_member(text: &str, score: f64, category: Category) -> ClassifiedCandidate {
        ClassifiedCandidate {
            text: text.to_string(),
            role: Role::Core,
            source: Provenance::LlmExtraction,
            frequency_score: 0.0,
            section_boost: 0.0,
            role_weight: 1.2,
            buzzword_penalty: 0.0,
            composite_score: score,
            category,
            knockout: None,
        }
    }

    #[test]
    fn test_cluster_representative_is_first_member() {
        let cluster = Cluster {
            alias: "roadmap planning".to_string(),
            category: Category::TopSkill,
            members: vec![
                make_member("roadmap planning", 0.9, Category::TopSkill),
                make_member("planning roadmaps", 0.4, Category::Supporting),
            ],
        };
        assert_eq!(cluster.representative().unwrap().text, "roadmap planning");
        assert!((cluster.score() - 0.9).abs() < f64::EPSILON);
        assert_eq!(cluster.alternate_texts(), vec!["planning roadmaps"]);
    }

    #[test]
    fn test_empty_cluster_scores_zero() {
        let cluster = Cluster {
            alias: String::new(),
            category: Category::Supporting,
            members: vec![],
        };
        assert_eq!(cluster.score(), 0.0);
        assert!(cluster.representative().is_none());
    }

    #[test]
    fn test_injection_outcome_serde_tags_status() {
        let outcome = InjectionOutcome::NoSuitablePoint {
            alias: "kubernetes".to_string(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains(r#""status":"no_suitable_point""#), "got {json}");
    }

    #[test]
    fn test_injection_outcome_best_is_first_match() {
        let outcome = InjectionOutcome::Suggestion {
            alias: "sql".to_string(),
            matches: vec![
                InjectionMatch {
                    sentence: "Built SQL pipelines".to_string(),
                    location: "work[0].highlights[0]".to_string(),
                    context: "Acme - Data Engineer".to_string(),
                    section: "highlights".to_string(),
                    similarity: 0.8,
                    action: InjectionAction::AlreadyCovered,
                },
                InjectionMatch {
                    sentence: "Maintained dashboards".to_string(),
                    location: "work[0].highlights[1]".to_string(),
                    context: "Acme - Data Engineer".to_string(),
                    section: "highlights".to_string(),
                    similarity: 0.4,
                    action: InjectionAction::AddBullet,
                },
            ],
        };
        assert_eq!(outcome.best().unwrap().location, "work[0].highlights[0]");
        assert_eq!(outcome.alias(), "sql");
    }

    #[test]
    fn test_empty_analysis_has_no_clusters() {
        let analysis = Analysis::empty();
        assert!(analysis.clusters.is_empty());
        assert!(analysis.injections.is_none());
        assert_eq!(analysis.counts.candidates, 0);
    }
}
