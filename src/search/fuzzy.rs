//! Fuzzy Matching Engine
//!
//! Approximate substring search (Sellers' variant of Levenshtein distance):
//! a query token matches a field value when some substring of the value is
//! within `threshold * token_len` edits of the token. Scores follow the
//! "lower is better" convention, in [0, 1].

use super::normalize::{fold, NormalizedQuery};
use super::ranking::{MatchSource, ScoredProfessional};
use crate::store::Professional;

/// Scores are floored here so that exact hits keep their field weighting
const SCORE_EPSILON: f64 = f64::EPSILON;

/// Per-field weights
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWeights {
    pub name: f64,
    pub description: f64,
    pub specialties: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            name: 0.4,
            description: 0.2,
            specialties: 0.4,
        }
    }
}

impl FieldWeights {
    fn total(&self) -> f64 {
        self.name + self.description + self.specialties
    }
}

/// Fuzzy matcher configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyConfig {
    /// Maximum accepted edits per token character (0.0 = exact only)
    pub threshold: f64,
    /// Tokens shorter than this are ignored, and a match must agree on at least this many characters
    pub min_match_len: usize,
    pub weights: FieldWeights,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            min_match_len: 3,
            weights: FieldWeights::default(),
        }
    }
}

/// Best approximate occurrence of a token inside a text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenMatch {
    /// Edit distance to the closest substring
    pub distance: usize,
    /// distance / token length
    pub score: f64,
}

/// Fuzzy matcher with configuration
#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher {
    config: FuzzyConfig,
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FuzzyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FuzzyConfig {
        &self.config
    }

    /// Score every professional against the raw query.
    ///
    /// Returns only professionals with at least one matching field, in input order.
    pub fn match_all(&self, query: &str, professionals: &[&Professional]) -> Vec<ScoredProfessional> {
        let normalized = NormalizedQuery::new(query);
        let tokens: Vec<Vec<char>> = normalized
            .matchable_tokens(self.config.min_match_len)
            .into_iter()
            .map(|t| t.chars().collect())
            .collect();

        if tokens.is_empty() {
            return Vec::new();
        }

        professionals
            .iter()
            .filter_map(|p| {
                self.score_professional(&tokens, p).map(|score| ScoredProfessional {
                    professional: (*p).clone(),
                    score,
                    source: MatchSource::Fuzzy,
                })
            })
            .collect()
    }

    /// Weighted score of one professional, None when no field matched
    pub fn score_professional(&self, tokens: &[Vec<char>], professional: &Professional) -> Option<f64> {
        let weights = &self.config.weights;
        let total_weight = weights.total();
        if total_weight <= 0.0 {
            return None;
        }

        let fields: [(f64, Option<f64>); 3] = [
            (
                weights.name,
                self.field_score(tokens, std::iter::once(professional.name.as_str())),
            ),
            (
                weights.description,
                self.field_score(tokens, std::iter::once(professional.description.as_str())),
            ),
            (
                weights.specialties,
                self.field_score(tokens, professional.specialties.iter().map(String::as_str)),
            ),
        ];

        let mut matched = false;
        let mut combined = 1.0;
        for (weight, score) in fields {
            if let Some(score) = score {
                matched = true;
                combined *= score.max(SCORE_EPSILON).powf(weight / total_weight);
            }
        }

        matched.then_some(combined)
    }

    /// Best value score over a field's values
    fn field_score<'a>(&self, tokens: &[Vec<char>], values: impl Iterator<Item = &'a str>) -> Option<f64> {
        values
            .filter_map(|value| self.value_score(tokens, value))
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Mean token score for one value; unmatched tokens count as 1.0
    fn value_score(&self, tokens: &[Vec<char>], value: &str) -> Option<f64> {
        if value.trim().is_empty() {
            return None;
        }
        let haystack: Vec<char> = fold(value).chars().collect();

        let mut any = false;
        let mut sum = 0.0;
        for token in tokens {
            match self.token_match(token, &haystack) {
                Some(m) => {
                    any = true;
                    sum += m.score;
                }
                None => sum += 1.0,
            }
        }

        any.then(|| sum / tokens.len() as f64)
    }

    /// Accepted approximate occurrence of `token` in `haystack`
    pub fn token_match(&self, token: &[char], haystack: &[char]) -> Option<TokenMatch> {
        let len = token.len();
        if len < self.config.min_match_len {
            return None;
        }

        let distance = substring_distance(token, haystack);
        let score = distance as f64 / len as f64;

        if score <= self.config.threshold && len - distance.min(len) >= self.config.min_match_len {
            Some(TokenMatch { distance, score })
        } else {
            None
        }
    }
}

/// Minimum edit distance between `pattern` and any substring of `text`
pub fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    if pattern.is_empty() {
        return 0;
    }

    // Row 0 is all zeros: a match may start anywhere in the text
    let mut prev = vec![0usize; text.len() + 1];
    let mut cur = vec![0usize; text.len() + 1];

    for (i, &pc) in pattern.iter().enumerate() {
        cur[0] = i + 1;
        for (j, &tc) in text.iter().enumerate() {
            let substitution = prev[j] + usize::from(pc != tc);
            let deletion = prev[j + 1] + 1;
            let insertion = cur[j] + 1;
            cur[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    // A match may end anywhere as well
    prev.into_iter().min().unwrap_or(pattern.len())
}
