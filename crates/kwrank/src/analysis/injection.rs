//! Resume injection-point scanning.
//!
//! A resume is flattened into located sentences, then every cluster alias is
//! matched against them. Each cluster gets an explicit outcome: ranked
//! suggestions, or "no suitable point" when nothing clears the relevance
//! floor.

use std::cmp::Ordering;

use serde_json::Value;
use tracing::{debug, warn};

use crate::analysis::scoring::round3;
use crate::analysis::similarity::Similarity;
use crate::config::Config;
use crate::errors::AnalysisError;
use crate::models::analysis::{Cluster, InjectionAction, InjectionMatch, InjectionOutcome};

/// One matchable resume sentence with its position in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeSentence {
    pub text: String,
    /// Path into the resume, e.g. `work[0].highlights[2]`.
    pub location: String,
    /// Human-readable context, e.g. "Acme - Senior PM".
    pub context: String,
    pub section: String,
}

/// Flattened resume content ready for alias matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeContent {
    sentences: Vec<ResumeSentence>,
}

impl ResumeContent {
    /// Pre-segmented plain text: every sentence on every line becomes one
    /// entry with a generic location.
    pub fn from_plain_text(text: &str) -> Self {
        let mut content = ResumeContent::default();
        for line in text.lines() {
            for piece in split_sentences(line) {
                let index = content.sentences.len() + 1;
                content.push(
                    piece,
                    format!("text (sentence {index})"),
                    "Resume".to_string(),
                    "text",
                );
            }
        }
        content
    }

    /// Walks a JSON Resume document: `basics.summary` sentences, work
    /// summaries and highlight bullets, education and skill summaries. Each
    /// entry is tagged with its path, so a suggestion names the exact field
    /// to edit.
    pub fn from_json(resume: &Value) -> Self {
        let mut content = ResumeContent::default();

        if let Some(summary) = resume.pointer("/basics/summary").and_then(Value::as_str) {
            for (index, piece) in split_sentences(summary).into_iter().enumerate() {
                content.push(
                    piece,
                    format!("basics.summary (sentence {})", index + 1),
                    "Executive Summary".to_string(),
                    "basics_summary",
                );
            }
        }

        if let Some(entries) = resume.get("work").and_then(Value::as_array) {
            for (work_index, work) in entries.iter().enumerate() {
                let company = text_field(work, "company")
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Company {}", work_index + 1));
                let position = text_field(work, "position").unwrap_or("Position");
                let context = format!("{company} - {position}");

                if let Some(summary) = text_field(work, "summary") {
                    for (index, piece) in split_sentences(summary).into_iter().enumerate() {
                        content.push(
                            piece,
                            format!("work[{work_index}].summary (sentence {})", index + 1),
                            context.clone(),
                            "work_summary",
                        );
                    }
                }
                if let Some(highlights) = work.get("highlights").and_then(Value::as_array) {
                    for (highlight_index, highlight) in highlights.iter().enumerate() {
                        if let Some(text) = highlight.as_str() {
                            content.push(
                                text,
                                format!("work[{work_index}].highlights[{highlight_index}]"),
                                context.clone(),
                                "highlights",
                            );
                        }
                    }
                }
            }
        }

        if let Some(entries) = resume.get("education").and_then(Value::as_array) {
            for (edu_index, education) in entries.iter().enumerate() {
                let institution = text_field(education, "institution")
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Institution {}", edu_index + 1));
                let degree = text_field(education, "studyType").unwrap_or("Degree");
                if let Some(summary) = text_field(education, "summary") {
                    content.push(
                        summary,
                        format!("education[{edu_index}].summary"),
                        format!("{institution} - {degree}"),
                        "education",
                    );
                }
            }
        }

        if let Some(entries) = resume.get("skills").and_then(Value::as_array) {
            for (skill_index, skill) in entries.iter().enumerate() {
                let name = text_field(skill, "name")
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Skill {}", skill_index + 1));
                if let Some(summary) = text_field(skill, "summary") {
                    content.push(
                        summary,
                        format!("skills[{skill_index}].summary"),
                        name,
                        "skills",
                    );
                }
            }
        }

        content
    }

    pub fn from_json_str(raw: &str) -> Result<Self, AnalysisError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| AnalysisError::MalformedInput(format!("resume is not valid JSON: {e}")))?;
        Ok(Self::from_json(&value))
    }

    pub fn sentences(&self) -> &[ResumeSentence] {
        &self.sentences
    }

    fn push(&mut self, text: &str, location: String, context: String, section: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.sentences.push(ResumeSentence {
            text: trimmed.to_string(),
            location,
            context,
            section: section.to_string(),
        });
    }
}

fn split_sentences(text: &str) -> Vec<&str> {
    text.split(". ")
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

fn text_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

pub struct InjectionScanner<'a> {
    similarity: &'a dyn Similarity,
    relevance_floor: f64,
    phrase_similarity: f64,
    covered_similarity: f64,
    covered_word_ratio: f64,
    min_word_length: usize,
    max_matches: usize,
}

impl<'a> InjectionScanner<'a> {
    pub fn new(similarity: &'a dyn Similarity, config: &Config) -> Self {
        Self {
            similarity,
            relevance_floor: config.injection.relevance_floor,
            phrase_similarity: config.injection.phrase_similarity,
            covered_similarity: config.injection.covered_similarity,
            covered_word_ratio: config.injection.covered_word_ratio,
            min_word_length: config.injection.min_word_length,
            max_matches: config.injection.max_matches,
        }
    }

    /// One outcome per cluster, in cluster order.
    pub fn scan(&self, clusters: &[Cluster], resume: &ResumeContent) -> Vec<InjectionOutcome> {
        if resume.sentences().is_empty() {
            warn!("resume has no matchable content");
        }
        clusters
            .iter()
            .map(|cluster| self.scan_alias(&cluster.alias, resume))
            .collect()
    }

    fn scan_alias(&self, alias: &str, resume: &ResumeContent) -> InjectionOutcome {
        let mut scored: Vec<(usize, f64)> = resume
            .sentences()
            .iter()
            .enumerate()
            .map(|(index, sentence)| (index, self.similarity.coverage(alias, &sentence.text)))
            .filter(|(_, score)| *score >= self.relevance_floor)
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(self.max_matches);

        if scored.is_empty() {
            debug!(alias, "no sentence cleared the relevance floor");
            return InjectionOutcome::NoSuitablePoint {
                alias: alias.to_string(),
            };
        }

        let matches = scored
            .into_iter()
            .map(|(index, score)| {
                let sentence = &resume.sentences()[index];
                InjectionMatch {
                    sentence: sentence.text.clone(),
                    location: sentence.location.clone(),
                    context: sentence.context.clone(),
                    section: sentence.section.clone(),
                    similarity: round3(score),
                    action: self.classify(alias, &sentence.text, score),
                }
            })
            .collect();
        InjectionOutcome::Suggestion {
            alias: alias.to_string(),
            matches,
        }
    }

    /// Action tier for one sentence. Verbatim containment and high word
    /// overlap count as covered even when the backend score is modest.
    fn classify(&self, alias: &str, sentence: &str, similarity: f64) -> InjectionAction {
        let sentence_lower = sentence.to_lowercase();
        let alias_lower = alias.to_lowercase();
        if sentence_lower.contains(&alias_lower) {
            return InjectionAction::AlreadyCovered;
        }

        let significant: Vec<&str> = alias_lower
            .split_whitespace()
            .filter(|word| word.chars().count() >= self.min_word_length)
            .collect();
        if !significant.is_empty() {
            let present = significant
                .iter()
                .filter(|word| sentence_lower.contains(**word))
                .count();
            if present as f64 / significant.len() as f64 >= self.covered_word_ratio {
                return InjectionAction::AlreadyCovered;
            }
        }

        if similarity >= self.covered_similarity {
            InjectionAction::AlreadyCovered
        } else if similarity >= self.phrase_similarity {
            InjectionAction::AddPhrase
        } else {
            InjectionAction::AddBullet
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::similarity::TokenSimilarity;
    use crate::models::candidate::Category;
    use serde_json::json;

    /// Coverage looked up by sentence text; similarity is unused.
    struct FixedCoverage(Vec<(&'static str, f64)>);

    impl Similarity for FixedCoverage {
        fn similarity(&self, _a: &str, _b: &str) -> f64 {
            0.0
        }

        fn coverage(&self, _phrase: &str, text: &str) -> f64 {
            self.0
                .iter()
                .find(|(sentence, _)| *sentence == text)
                .map_or(0.0, |(_, score)| *score)
        }
    }

    fn make_cluster(alias: &str) -> Cluster {
        Cluster {
            alias: alias.to_string(),
            category: Category::TopSkill,
            members: Vec::new(),
        }
    }

    fn resume_fixture() -> Value {
        json!({
            "basics": {
                "summary": "Led product teams across three markets. Shipped analytics platforms."
            },
            "work": [
                {
                    "company": "Acme",
                    "position": "Senior PM",
                    "summary": "Owned roadmap planning.",
                    "highlights": [
                        "Launched b2b saas platform",
                        "Grew revenue through experiments"
                    ]
                }
            ],
            "education": [
                {
                    "institution": "State",
                    "studyType": "MBA",
                    "summary": "Focus on strategy"
                }
            ],
            "skills": [
                { "name": "Analytics", "summary": "Dashboards and experimentation" }
            ]
        })
    }

    #[test]
    fn test_json_walk_tags_locations_and_contexts() {
        let content = ResumeContent::from_json(&resume_fixture());
        let entries: Vec<(&str, &str, &str)> = content
            .sentences()
            .iter()
            .map(|s| (s.location.as_str(), s.context.as_str(), s.section.as_str()))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("basics.summary (sentence 1)", "Executive Summary", "basics_summary"),
                ("basics.summary (sentence 2)", "Executive Summary", "basics_summary"),
                ("work[0].summary (sentence 1)", "Acme - Senior PM", "work_summary"),
                ("work[0].highlights[0]", "Acme - Senior PM", "highlights"),
                ("work[0].highlights[1]", "Acme - Senior PM", "highlights"),
                ("education[0].summary", "State - MBA", "education"),
                ("skills[0].summary", "Analytics", "skills"),
            ]
        );
        assert_eq!(
            content.sentences()[0].text,
            "Led product teams across three markets"
        );
    }

    #[test]
    fn test_json_walk_defaults_for_missing_names() {
        let content = ResumeContent::from_json(&json!({
            "work": [{ "summary": "Ran the support rotation." }]
        }));
        assert_eq!(content.sentences()[0].context, "Company 1 - Position");
    }

    #[test]
    fn test_plain_text_splits_lines_and_sentences() {
        let content =
            ResumeContent::from_plain_text("Led teams. Shipped platforms.\nBuilt dashboards.\n\n");
        let texts: Vec<&str> = content.sentences().iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Led teams", "Shipped platforms.", "Built dashboards."]
        );
        assert_eq!(content.sentences()[2].location, "text (sentence 3)");
    }

    #[test]
    fn test_invalid_resume_json_is_malformed_input() {
        let err = match ResumeContent::from_json_str("{not json") {
            Err(err) => err,
            Ok(_) => panic!("invalid JSON must not parse"),
        };
        assert!(matches!(err, AnalysisError::MalformedInput(_)));
    }

    #[test]
    fn test_action_tiers_from_score_and_containment() {
        let backend = FixedCoverage(vec![
            ("Drove growth experiments weekly", 0.95),
            ("Ran many experiments", 0.75),
            ("Wrote marketing copy", 0.4),
            ("Managed vendor contracts", 0.1),
        ]);
        let scanner = InjectionScanner::new(&backend, &Config::default());
        let mut resume = ResumeContent::default();
        for (sentence, _) in &backend.0 {
            resume.push(sentence, "text".to_string(), "Resume".to_string(), "text");
        }

        let outcomes = scanner.scan(&[make_cluster("growth experiments")], &resume);
        let matches = match &outcomes[0] {
            InjectionOutcome::Suggestion { matches, .. } => matches,
            other => panic!("expected a suggestion, got {other:?}"),
        };
        let tiers: Vec<(f64, InjectionAction)> =
            matches.iter().map(|m| (m.similarity, m.action)).collect();
        assert_eq!(
            tiers,
            vec![
                (0.95, InjectionAction::AlreadyCovered),
                (0.75, InjectionAction::AddPhrase),
                (0.4, InjectionAction::AddBullet),
            ],
            "below-floor sentences are dropped and the rest rank best first"
        );
    }

    #[test]
    fn test_word_overlap_counts_as_covered() {
        let backend = FixedCoverage(vec![("Set product strategy and roadmap reviews", 0.5)]);
        let scanner = InjectionScanner::new(&backend, &Config::default());
        let mut resume = ResumeContent::default();
        resume.push(
            "Set product strategy and roadmap reviews",
            "text".to_string(),
            "Resume".to_string(),
            "text",
        );

        let outcomes = scanner.scan(&[make_cluster("product strategy roadmap")], &resume);
        let best = outcomes[0].best().map(|m| m.action);
        assert_eq!(
            best,
            Some(InjectionAction::AlreadyCovered),
            "all three significant words are present despite the 0.5 score"
        );
    }

    #[test]
    fn test_below_floor_is_no_suitable_point() {
        let backend = TokenSimilarity::default();
        let scanner = InjectionScanner::new(&backend, &Config::default());
        let resume = ResumeContent::from_plain_text("Perfected sourdough starters at home.");

        let outcomes = scanner.scan(&[make_cluster("kubernetes orchestration")], &resume);
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(
            outcomes[0],
            InjectionOutcome::NoSuitablePoint { .. }
        ));
        assert_eq!(outcomes[0].alias(), "kubernetes orchestration");
        assert!(outcomes[0].best().is_none());
    }

    #[test]
    fn test_empty_resume_yields_no_points_for_every_cluster() {
        let backend = TokenSimilarity::default();
        let scanner = InjectionScanner::new(&backend, &Config::default());
        let outcomes = scanner.scan(
            &[make_cluster("alpha"), make_cluster("beta")],
            &ResumeContent::default(),
        );
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes
            .iter()
            .all(|o| matches!(o, InjectionOutcome::NoSuitablePoint { .. })));
    }

    #[test]
    fn test_matches_capped_at_configured_max() {
        let backend = FixedCoverage(vec![
            ("one", 0.9),
            ("two", 0.8),
            ("three", 0.7),
            ("four", 0.6),
            ("five", 0.5),
        ]);
        let scanner = InjectionScanner::new(&backend, &Config::default());
        let mut resume = ResumeContent::default();
        for (sentence, _) in &backend.0 {
            resume.push(sentence, "text".to_string(), "Resume".to_string(), "text");
        }

        let outcomes = scanner.scan(&[make_cluster("anything")], &resume);
        let matches = match &outcomes[0] {
            InjectionOutcome::Suggestion { matches, .. } => matches,
            other => panic!("expected a suggestion, got {other:?}"),
        };
        let scores: Vec<f64> = matches.iter().map(|m| m.similarity).collect();
        assert_eq!(scores, vec![0.9, 0.8, 0.7]);
    }

    #[test]
    fn test_scan_covers_clusters_in_order() {
        let backend = TokenSimilarity::default();
        let scanner = InjectionScanner::new(&backend, &Config::default());
        let resume = ResumeContent::from_plain_text("Shipped analytics platforms for retail.");

        let outcomes = scanner.scan(
            &[make_cluster("data analytics"), make_cluster("quantum weaving")],
            &resume,
        );
        assert_eq!(outcomes[0].alias(), "data analytics");
        assert_eq!(outcomes[1].alias(), "quantum weaving");
        assert!(matches!(outcomes[0], InjectionOutcome::Suggestion { .. }));
        assert!(matches!(
            outcomes[1],
            InjectionOutcome::NoSuitablePoint { .. }
        ));
    }
}
