//! Result Ranker
//!
//! Orders candidates by score (ascending, lower is better), breaks ties by
//! average rating (descending) and keeps one page.

use crate::catalog::Catalog;
use crate::store::Professional;
use serde::Serialize;

/// Results returned per query
pub const PAGE_SIZE: usize = 10;

/// Which matcher produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    Fuzzy,
    Category,
}

/// A professional plus its transient match score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredProfessional {
    pub professional: Professional,
    pub score: f64,
    pub source: MatchSource,
}

/// Sort and truncate candidates. The sort is stable, so equal
/// (score, rating) pairs keep their input order.
pub fn rank(mut candidates: Vec<ScoredProfessional>, limit: usize) -> Vec<ScoredProfessional> {
    candidates.sort_by(|a, b| {
        a.score
            .total_cmp(&b.score)
            .then_with(|| b.professional.avg_rating.total_cmp(&a.professional.avg_rating))
    });
    candidates.truncate(limit);
    candidates
}

/// Wire projection of a ranked result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    pub category: String,
    pub photo_url: Option<String>,
    pub avg_rating: f64,
}

impl SearchHit {
    pub fn project(result: &ScoredProfessional, catalog: &Catalog) -> Self {
        let p = &result.professional;
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            category: catalog.primary_label(&p.categories).to_string(),
            photo_url: p.photo_url.clone(),
            avg_rating: p.avg_rating,
        }
    }
}
