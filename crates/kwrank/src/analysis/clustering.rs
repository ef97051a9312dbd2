//! Greedy single-linkage clustering over classified candidates.
//!
//! Candidates are processed by descending composite score; each joins the
//! most similar existing cluster at or above the threshold, else founds a
//! new one. Cluster order, the median trim, and the top-skill cap all happen
//! here so the pipeline emits display-ready clusters.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::analysis::similarity::Similarity;
use crate::config::Config;
use crate::models::analysis::Cluster;
use crate::models::candidate::{Category, ClassifiedCandidate};

pub struct Clusterer<'a> {
    similarity: &'a dyn Similarity,
    threshold: f64,
    median_multiplier: f64,
    min_keep: usize,
    top_count: Option<usize>,
}

impl<'a> Clusterer<'a> {
    pub fn new(similarity: &'a dyn Similarity, config: &Config) -> Self {
        Self {
            similarity,
            threshold: config.clustering.similarity_threshold,
            median_multiplier: config.clustering.median_multiplier,
            min_keep: config.clustering.min_keep,
            top_count: config.output.top_count,
        }
    }

    /// Clusters candidates and returns clusters ordered by category
    /// priority, then descending alias score, then founding order. Weak
    /// non-knockout clusters are median-trimmed and the top-skill cap is
    /// applied last.
    pub fn cluster(&self, mut candidates: Vec<ClassifiedCandidate>) -> Vec<Cluster> {
        candidates.sort_by(|a, b| {
            b.composite_score
                .partial_cmp(&a.composite_score)
                .unwrap_or(Ordering::Equal)
        });

        let groups = self.link_greedy(candidates);
        let mut clusters: Vec<Cluster> = groups.into_iter().filter_map(build_cluster).collect();

        clusters.sort_by(|a, b| {
            a.category
                .priority()
                .cmp(&b.category.priority())
                .then_with(|| b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal))
        });

        let clusters = self.trim_by_median(clusters);
        let clusters = match self.top_count {
            Some(cap) => cap_top_skills(clusters, cap),
            None => clusters,
        };

        debug!(clusters = clusters.len(), "clustered candidates");
        clusters
    }

    fn link_greedy(&self, candidates: Vec<ClassifiedCandidate>) -> Vec<Vec<ClassifiedCandidate>> {
        let mut groups: Vec<Vec<ClassifiedCandidate>> = Vec::new();
        for candidate in candidates {
            // (group index, linkage, alias score) of the best cluster so far.
            let mut best: Option<(usize, f64, f64)> = None;
            for (index, group) in groups.iter().enumerate() {
                let linkage = group
                    .iter()
                    .map(|member| self.similarity.similarity(&candidate.text, &member.text))
                    .fold(0.0_f64, f64::max);
                if linkage < self.threshold {
                    continue;
                }
                let alias_score = group.first().map_or(0.0, |m| m.composite_score);
                let better = match best {
                    None => true,
                    Some((_, best_linkage, best_alias)) => {
                        linkage > best_linkage
                            || (linkage == best_linkage && alias_score > best_alias)
                    }
                };
                if better {
                    best = Some((index, linkage, alias_score));
                }
            }
            match best {
                Some((index, _, _)) => groups[index].push(candidate),
                None => groups.push(vec![candidate]),
            }
        }
        groups
    }

    /// Median-based trim over non-knockout clusters. Runs only when they
    /// outnumber `min_keep`; never drops a knockout cluster and never leaves
    /// fewer than `min_keep` non-knockout clusters.
    fn trim_by_median(&self, clusters: Vec<Cluster>) -> Vec<Cluster> {
        let scores: Vec<f64> = clusters
            .iter()
            .filter(|c| c.category != Category::Knockout)
            .map(|c| c.score())
            .collect();
        if scores.len() <= self.min_keep {
            return clusters;
        }

        let cutoff = median(&scores) * self.median_multiplier;
        let surviving = scores.iter().filter(|s| **s >= cutoff).count();
        let before = clusters.len();

        let kept: Vec<Cluster> = if surviving >= self.min_keep {
            clusters
                .into_iter()
                .filter(|c| c.category == Category::Knockout || c.score() >= cutoff)
                .collect()
        } else {
            // Not enough clear the cutoff; keep the strongest min_keep.
            let mut ranked: Vec<usize> = clusters
                .iter()
                .enumerate()
                .filter(|(_, c)| c.category != Category::Knockout)
                .map(|(index, _)| index)
                .collect();
            ranked.sort_by(|&a, &b| {
                clusters[b]
                    .score()
                    .partial_cmp(&clusters[a].score())
                    .unwrap_or(Ordering::Equal)
            });
            ranked.truncate(self.min_keep);
            let keep: HashSet<usize> = ranked.into_iter().collect();
            clusters
                .into_iter()
                .enumerate()
                .filter(|(index, c)| c.category == Category::Knockout || keep.contains(index))
                .map(|(_, c)| c)
                .collect()
        };

        debug!(trimmed = before - kept.len(), cutoff, "median trim");
        kept
    }
}

fn build_cluster(members: Vec<ClassifiedCandidate>) -> Option<Cluster> {
    let first = members.first()?;
    let alias = first.text.clone();
    let mut category = first.category;
    for member in &members[1..] {
        if member.category.priority() < category.priority() {
            category = member.category;
        }
    }
    Some(Cluster {
        alias,
        category,
        members,
    })
}

/// Middle value; the mean of the two middles for even counts.
fn median(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Keeps the first `cap` top-skill clusters; other categories pass through.
fn cap_top_skills(clusters: Vec<Cluster>, cap: usize) -> Vec<Cluster> {
    let mut kept = 0usize;
    clusters
        .into_iter()
        .filter(|cluster| {
            if cluster.category != Category::TopSkill {
                return true;
            }
            if kept < cap {
                kept += 1;
                true
            } else {
                false
            }
        })
        .collect()
}
