//! Category Fallback Matcher
//!
//! Runs only when the fuzzy pass found nothing. A category matches when a
//! query token occurs inside its folded name-plus-specialties text; every
//! professional in a matched category gets the same fixed score.

use super::normalize::NormalizedQuery;
use super::ranking::{MatchSource, ScoredProfessional};
use crate::catalog::Catalog;
use crate::store::Professional;
use std::collections::HashSet;
use tracing::debug;

/// Score given to category matches: worse than a strong fuzzy hit, better than no match
pub const FALLBACK_SCORE: f64 = 0.5;

pub struct CategoryFallback<'a> {
    catalog: &'a Catalog,
    min_token_len: usize,
}

impl<'a> CategoryFallback<'a> {
    pub fn new(catalog: &'a Catalog, min_token_len: usize) -> Self {
        Self {
            catalog,
            min_token_len,
        }
    }

    /// Category ids hit by the query tokens
    // NOTE: plain substring containment, so a 3-letter token can hit inside an
    // unrelated word. Kept as is until product decides otherwise.
    pub fn matched_categories(&self, query: &NormalizedQuery) -> HashSet<u32> {
        let tokens = query.matchable_tokens(self.min_token_len);
        if tokens.is_empty() {
            return HashSet::new();
        }
        self.catalog.matching(&tokens).into_iter().collect()
    }

    pub fn match_all(&self, query: &str, professionals: &[&Professional]) -> Vec<ScoredProfessional> {
        let normalized = NormalizedQuery::new(query);
        let matched = self.matched_categories(&normalized);
        if matched.is_empty() {
            return Vec::new();
        }
        debug!("Category fallback matched categories {:?}", matched);

        professionals
            .iter()
            .filter(|p| p.categories.iter().any(|c| matched.contains(c)))
            .map(|p| ScoredProfessional {
                professional: (*p).clone(),
                score: FALLBACK_SCORE,
                source: MatchSource::Category,
            })
            .collect()
    }
}
