//! Textual similarity behind a trait, so the clusterer and injection scan can
//! swap backends (tests use fixed stubs; a semantic backend could slot in
//! without touching either stage).

use std::collections::BTreeSet;

use crate::config::SimilarityConfig;
use crate::loader::EDGE_PUNCTUATION;

/// Common words dropped before token comparison.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "of", "in", "on", "for", "with", "to", "at",
    "by", "as", "is", "are", "be", "this", "that", "from",
];

pub trait Similarity {
    /// Symmetric similarity between two phrases, in [0, 1].
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Directional variant: how much of `phrase` the `text` accounts for.
    /// Defaults to the symmetric score; backends may sharpen it.
    fn coverage(&self, phrase: &str, text: &str) -> f64 {
        self.similarity(phrase, text)
    }
}

/// Token-overlap similarity with Jaro-Winkler fuzzy token matching.
///
/// Both phrases are reduced to sorted, deduped significant-token sets. Exact
/// token matches pair first; leftovers pair greedily by Jaro-Winkler at or
/// above the configured threshold. The symmetric score normalizes the pair
/// count cosine-style by `sqrt(|a| * |b|)`.
#[derive(Debug, Clone)]
pub struct TokenSimilarity {
    fuzzy_threshold: f64,
    min_token_length: usize,
}

impl TokenSimilarity {
    pub fn new(config: &SimilarityConfig) -> Self {
        Self {
            fuzzy_threshold: config.fuzzy_token_threshold,
            min_token_length: config.min_token_length,
        }
    }

    /// Sorted, deduped significant tokens of `text`.
    fn tokens(&self, text: &str) -> Vec<String> {
        let mut set = BTreeSet::new();
        for raw in text.split_whitespace() {
            let token = raw.trim_matches(EDGE_PUNCTUATION).to_lowercase();
            if token.chars().count() < self.min_token_length {
                continue;
            }
            if STOPWORDS.contains(&token.as_str()) {
                continue;
            }
            set.insert(token);
        }
        set.into_iter().collect()
    }

    /// Number of matched token pairs between two sorted token lists. The
    /// lists are taken in a canonical order first, so the count does not
    /// depend on argument order.
    fn matched_pairs(&self, a: &[String], b: &[String]) -> usize {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let mut second_left: Vec<&String> = second.iter().collect();
        let mut unmatched = Vec::new();
        let mut pairs = 0;

        for token in first {
            if let Some(pos) = second_left.iter().position(|t| *t == token) {
                second_left.remove(pos);
                pairs += 1;
            } else {
                unmatched.push(token);
            }
        }

        for token in unmatched {
            let mut best: Option<(usize, f64)> = None;
            for (pos, other) in second_left.iter().enumerate() {
                let score = strsim::jaro_winkler(token, other);
                if score >= self.fuzzy_threshold && best.map_or(true, |(_, s)| score > s) {
                    best = Some((pos, score));
                }
            }
            if let Some((pos, _)) = best {
                second_left.remove(pos);
                pairs += 1;
            }
        }

        pairs
    }
}

impl Default for TokenSimilarity {
    fn default() -> Self {
        Self::new(&SimilarityConfig::default())
    }
}

impl Similarity for TokenSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let tokens_a = self.tokens(a);
        let tokens_b = self.tokens(b);
        if tokens_a.is_empty() || tokens_b.is_empty() {
            return 0.0;
        }
        let pairs = self.matched_pairs(&tokens_a, &tokens_b);
        pairs as f64 / ((tokens_a.len() * tokens_b.len()) as f64).sqrt()
    }

    fn coverage(&self, phrase: &str, text: &str) -> f64 {
        let phrase_tokens = self.tokens(phrase);
        let text_tokens = self.tokens(text);
        if phrase_tokens.is_empty() || text_tokens.is_empty() {
            return 0.0;
        }
        let pairs = self.matched_pairs(&phrase_tokens, &text_tokens);
        pairs as f64 / phrase_tokens.len() as f64
    }
}
