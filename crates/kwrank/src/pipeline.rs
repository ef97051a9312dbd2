//! End-to-end orchestration: candidates and a posting in, ordered clusters
//! out, with an injection scan when a resume is supplied.

use tracing::{debug, info};

use crate::analysis::clustering::Clusterer;
use crate::analysis::experience::{self, ExperienceExtractor};
use crate::analysis::injection::{InjectionScanner, ResumeContent};
use crate::analysis::knockout::Categorizer;
use crate::analysis::scoring::Scorer;
use crate::analysis::similarity::{Similarity, TokenSimilarity};
use crate::config::Config;
use crate::errors::AnalysisError;
use crate::loader::{self, Posting};
use crate::models::analysis::{Analysis, AnalysisCounts, Cluster};
use crate::models::candidate::{Category, KeywordCandidate};

/// Runs the full analysis with the default token-similarity backend.
///
/// An empty candidate list is not an error; it produces an empty analysis.
pub fn analyze(
    candidates: Vec<KeywordCandidate>,
    posting: &Posting,
    resume: Option<&ResumeContent>,
    config: &Config,
) -> Result<Analysis, AnalysisError> {
    let similarity = TokenSimilarity::new(&config.similarity);
    analyze_with_similarity(candidates, posting, resume, config, &similarity)
}

/// Same pipeline with a caller-supplied similarity backend, used by both the
/// clusterer and the injection scan.
pub fn analyze_with_similarity(
    mut candidates: Vec<KeywordCandidate>,
    posting: &Posting,
    resume: Option<&ResumeContent>,
    config: &Config,
    similarity: &dyn Similarity,
) -> Result<Analysis, AnalysisError> {
    config.validate()?;

    if config.experience.enabled {
        let extractor = ExperienceExtractor::new(&config.experience)?;
        let requirements = extractor.extract(posting);
        // Appended after the loaded list, so an upstream duplicate wins the
        // first-seen dedup below.
        candidates.extend(experience::to_candidates(&requirements));
    }
    let candidates = loader::dedup_candidates(candidates);

    if candidates.is_empty() {
        info!("no candidates to analyze");
        return Ok(Analysis::empty());
    }
    info!(candidates = candidates.len(), "starting keyword analysis");

    let scorer = Scorer::new(config)?;
    let scoring = scorer.score_all(&candidates, posting);
    debug!(
        scored = scoring.ranked.len(),
        dropped_buzzwords = scoring.dropped_buzzwords.len(),
        "scoring complete"
    );

    let categorizer = Categorizer::new(config)?;
    let categorization = categorizer.categorize_all(scoring.ranked, posting)?;
    debug!(
        classified = categorization.classified.len(),
        dropped_degree = categorization.dropped_degree.len(),
        "categorization complete"
    );

    let clusterer = Clusterer::new(similarity, config);
    let clusters = clusterer.cluster(categorization.classified);

    let injections = resume.map(|content| {
        let scanner = InjectionScanner::new(similarity, config);
        scanner.scan(&clusters, content)
    });

    let counts = AnalysisCounts {
        candidates: candidates.len(),
        dropped_buzzwords: scoring.dropped_buzzwords.len(),
        dropped_degree: categorization.dropped_degree.len(),
        clusters: clusters.len(),
        knockouts: count_in(&clusters, Category::Knockout),
        top_skills: count_in(&clusters, Category::TopSkill),
        supporting: count_in(&clusters, Category::Supporting),
        culture_fit: count_in(&clusters, Category::CultureFit),
    };
    info!(
        clusters = counts.clusters,
        knockouts = counts.knockouts,
        top_skills = counts.top_skills,
        "analysis complete"
    );

    Ok(Analysis {
        clusters,
        injections,
        counts,
    })
}

fn count_in(clusters: &[Cluster], category: Category) -> usize {
    clusters.iter().filter(|c| c.category == category).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::{Provenance, Role};

    fn posting(text: &str) -> Posting {
        match Posting::new(text) {
            Ok(posting) => posting,
            Err(err) => panic!("fixture posting must load: {err}"),
        }
    }

    fn candidate(text: &str, role: Role) -> KeywordCandidate {
        KeywordCandidate::new(text, role, Provenance::LlmExtraction)
    }

    #[test]
    fn test_empty_candidates_produce_empty_analysis() {
        let analysis = match analyze(
            Vec::new(),
            &posting("# Director of Product\n\nWe build things."),
            None,
            &Config::default(),
        ) {
            Ok(analysis) => analysis,
            Err(err) => panic!("empty input must not error: {err}"),
        };
        assert!(analysis.clusters.is_empty());
        assert!(analysis.injections.is_none());
        assert_eq!(analysis.counts, AnalysisCounts::default());
    }

    #[test]
    fn test_invalid_config_rejected_before_any_work() {
        let mut config = Config::default();
        config.clustering.similarity_threshold = 2.0;
        let err = match analyze(
            vec![candidate("product management", Role::Core)],
            &posting("# Director of Product\n\nProduct management matters."),
            None,
            &config,
        ) {
            Err(err) => err,
            Ok(_) => panic!("out-of-range threshold must be rejected"),
        };
        assert!(matches!(err, AnalysisError::InvalidConfig(_)));
    }

    #[test]
    fn test_experience_extraction_merges_before_dedup() {
        let mut config = Config::default();
        config.experience.enabled = true;
        let analysis = match analyze(
            vec![candidate("7+ years of product management experience", Role::Core)],
            &posting(
                "# Director of Product\n\n## Requirements\n\nYou bring 7+ years of product management experience.",
            ),
            None,
            &config,
        ) {
            Ok(analysis) => analysis,
            Err(err) => panic!("analysis must succeed: {err}"),
        };
        // The direct extraction duplicates the supplied candidate and
        // collapses in the dedup; the loaded record wins.
        assert_eq!(analysis.counts.candidates, 1);
        assert_eq!(analysis.counts.knockouts, 1);
        let knockout = match analysis.clusters_in(Category::Knockout).next() {
            Some(cluster) => cluster,
            None => panic!("the years requirement must be a knockout"),
        };
        let member = match knockout.representative() {
            Some(member) => member,
            None => panic!("cluster must have members"),
        };
        assert_eq!(member.source, Provenance::LlmExtraction);
    }
}
