//! Search Engine Integration
//!
//! Ties together normalization, fuzzy matching, category fallback and
//! ranking, plus the one store read and the failed-search side effect.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::fallback::CategoryFallback;
use super::fuzzy::{FuzzyConfig, FuzzyMatcher};
use super::ranking::{rank, ScoredProfessional, SearchHit, PAGE_SIZE};
use crate::catalog::Catalog;
use crate::error::{validate_query, AppError};
use crate::failed_search::FailedSearchLogger;
use crate::store::{Professional, ProfessionalStore};

/// Pure part of the pipeline: no I/O, deterministic for a fixed snapshot
pub struct SearchPipeline {
    fuzzy: FuzzyMatcher,
    catalog: Arc<Catalog>,
    page_size: usize,
}

impl SearchPipeline {
    pub fn new(catalog: Arc<Catalog>, config: FuzzyConfig) -> Self {
        Self {
            fuzzy: FuzzyMatcher::with_config(config),
            catalog,
            page_size: PAGE_SIZE,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Fuzzy pass, category fallback when it finds nothing, then ranking
    pub fn run(&self, query: &str, professionals: &[Professional]) -> Vec<ScoredProfessional> {
        let eligible: Vec<&Professional> = professionals.iter().filter(|p| p.is_eligible()).collect();

        let mut candidates = self.fuzzy.match_all(query, &eligible);
        if candidates.is_empty() {
            let fallback = CategoryFallback::new(&self.catalog, self.fuzzy.config().min_match_len);
            candidates = fallback.match_all(query, &eligible);
            debug!("Fuzzy pass empty, category fallback produced {} candidates", candidates.len());
        } else {
            debug!("Fuzzy pass produced {} candidates", candidates.len());
        }

        rank(candidates, self.page_size)
    }
}

/// Ranked results of one query
#[derive(Debug)]
pub struct SearchOutcome {
    pub results: Vec<ScoredProfessional>,
    /// Pending failed-search write, when one was scheduled
    pub failed_search_log: Option<JoinHandle<()>>,
}

impl SearchOutcome {
    fn empty() -> Self {
        Self {
            results: Vec::new(),
            failed_search_log: None,
        }
    }

    pub fn hits(&self, catalog: &Catalog) -> Vec<SearchHit> {
        self.results
            .iter()
            .map(|r| SearchHit::project(r, catalog))
            .collect()
    }
}

/// Search context: built once at startup and shared by every request
pub struct SearchService {
    store: Arc<dyn ProfessionalStore>,
    pipeline: SearchPipeline,
    failed_searches: FailedSearchLogger,
}

impl SearchService {
    pub fn new(
        store: Arc<dyn ProfessionalStore>,
        pipeline: SearchPipeline,
        failed_searches: FailedSearchLogger,
    ) -> Self {
        Self {
            store,
            pipeline,
            failed_searches,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.pipeline.catalog()
    }

    /// Run one query end to end.
    ///
    /// Blank and over-long queries return nothing without touching the
    /// store. A store failure aborts with `SearchFailed`; a failed-search
    /// write never does.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, AppError> {
        let term = query.trim();
        if term.is_empty() {
            return Ok(SearchOutcome::empty());
        }
        if let Err(e) = validate_query(term) {
            debug!("Ignoring query: {}", e);
            return Ok(SearchOutcome::empty());
        }

        let professionals = self.store.eligible_professionals().await.map_err(|e| {
            error!("Failed to fetch eligible professionals: {}", e);
            AppError::SearchFailed(e.to_string())
        })?;

        let results = self.pipeline.run(term, &professionals);
        info!("Search {:?} returned {} results", term, results.len());

        let failed_search_log = if results.is_empty() {
            self.failed_searches.log(term)
        } else {
            None
        };

        Ok(SearchOutcome {
            results,
            failed_search_log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failed_search::testing::MemorySink;
    use crate::search::fallback::FALLBACK_SCORE;
    use crate::search::ranking::MatchSource;
    use crate::store::{MemoryStore, StoreError};
    use async_trait::async_trait;

    fn pro(id: &str, name: &str, specialties: &[&str], categories: &[u32], rating: f64) -> Professional {
        Professional {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            categories: categories.to_vec(),
            avg_rating: rating,
            review_count: 0,
            photo_url: None,
            phone: None,
            active: true,
            subscription_active: true,
        }
    }

    fn pipeline() -> SearchPipeline {
        SearchPipeline::new(Arc::new(Catalog::builtin()), FuzzyConfig::default())
    }

    fn service(pros: Vec<Professional>) -> (SearchService, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::default());
        let service = SearchService::new(
            Arc::new(MemoryStore::new(pros)),
            pipeline(),
            FailedSearchLogger::new(sink.clone()),
        );
        (service, sink)
    }

    fn ids(results: &[ScoredProfessional]) -> Vec<&str> {
        results.iter().map(|r| r.professional.id.as_str()).collect()
    }

    struct FailingStore;

    #[async_trait]
    impl ProfessionalStore for FailingStore {
        async fn eligible_professionals(&self) -> Result<Vec<Professional>, StoreError> {
            Err(StoreError::Unavailable("connection reset".to_string()))
        }
    }

    #[test]
    fn test_specialty_match_ranks_by_rating() {
        let pros = vec![
            pro("low", "Juan Ruiz", &["Reparación de Fugas", "Instalación de canillas"], &[1], 3.1),
            pro("high", "Ana Paz", &["Reparación de Fugas", "Instalación de canillas"], &[1], 4.9),
            pro("other", "Luis Vega", &["Destapaciones"], &[1], 5.0),
        ];
        let results = pipeline().run("canilla que gotea", &pros);
        assert_eq!(ids(&results), vec!["high", "low"]);
        assert!(results.iter().all(|r| r.source == MatchSource::Fuzzy));
    }

    #[test]
    fn test_fallback_runs_only_when_fuzzy_empty() {
        let pros = vec![
            pro("e1", "Juan Ramos", &[], &[2], 4.2),
            pro("e2", "Ana Gómez", &[], &[2], 4.8),
            pro("p1", "Luis Vega", &[], &[1], 5.0),
        ];
        let results = pipeline().run("luz", &pros);
        assert_eq!(ids(&results), vec!["e2", "e1"]);
        assert!(results.iter().all(|r| r.score == FALLBACK_SCORE));

        // A fuzzy hit suppresses the fallback entirely
        let mut with_name_hit = pros.clone();
        with_name_hit.push(pro("lz", "Electro Luz", &[], &[14], 3.0));
        let results = pipeline().run("luz", &with_name_hit);
        assert_eq!(ids(&results), vec!["lz"]);
    }

    #[test]
    fn test_ineligible_never_returned() {
        let mut inactive = pro("off", "Plomería Pérez", &["Plomería"], &[1], 5.0);
        inactive.active = false;
        let mut unpaid = pro("unpaid", "Plomería Díaz", &["Plomería"], &[1], 5.0);
        unpaid.subscription_active = false;
        let ok = pro("ok", "Ana Ruiz", &[], &[1], 2.0);

        let results = pipeline().run("plomería", &[inactive, unpaid, ok]);
        // No eligible fuzzy hit, so the category fallback returns the eligible plumber only
        assert_eq!(ids(&results), vec!["ok"]);
    }

    #[test]
    fn test_page_size_cap() {
        let pros: Vec<Professional> = (0..15)
            .map(|i| pro(&format!("p{i:02}"), &format!("Plomero {i}"), &[], &[1], i as f64 / 3.0))
            .collect();
        let results = pipeline().run("plomero", &pros);
        assert_eq!(results.len(), PAGE_SIZE);
        // Equal scores, so the best-rated ten come first
        assert_eq!(results[0].professional.id, "p14");
        assert_eq!(results[9].professional.id, "p05");
    }

    #[test]
    fn test_idempotent() {
        let pros = crate::store::seed::seed_professionals();
        let p = pipeline();
        let first = p.run("instalacion de gas", &pros);
        let second = p.run("instalacion de gas", &pros);
        assert!(!first.is_empty());
        assert_eq!(ids(&first), ids(&second));
    }

    #[tokio::test]
    async fn test_no_match_logs_failed_search() {
        let (service, sink) = service(vec![pro("p", "Juan Ramos", &["Destapaciones"], &[1], 4.0)]);
        let outcome = service.search("xyzxyz").await.unwrap();
        assert!(outcome.results.is_empty());

        outcome.failed_search_log.expect("log scheduled").await.unwrap();
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].term, "xyzxyz");
    }

    #[tokio::test]
    async fn test_short_query_not_logged() {
        let (service, sink) = service(vec![pro("p", "Juan Ramos", &[], &[1], 4.0)]);
        let outcome = service.search("pl").await.unwrap();
        assert!(outcome.results.is_empty());
        assert!(outcome.failed_search_log.is_none());
        assert!(sink.records().is_empty());
    }

    #[tokio::test]
    async fn test_hit_not_logged() {
        let (service, sink) = service(vec![pro("p", "Juan Ramos", &["Destapaciones"], &[1], 4.0)]);
        let outcome = service.search("destapacion").await.unwrap();
        assert_eq!(outcome.results.len(), 1);
        assert!(outcome.failed_search_log.is_none());
        assert!(sink.records().is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_skips_store() {
        let sink = Arc::new(MemorySink::default());
        let service = SearchService::new(
            Arc::new(FailingStore),
            pipeline(),
            FailedSearchLogger::new(sink.clone()),
        );
        let outcome = service.search("   ").await.unwrap();
        assert!(outcome.results.is_empty());
        assert!(outcome.failed_search_log.is_none());
    }

    #[tokio::test]
    async fn test_overlong_query_is_empty_without_store_read() {
        let sink = Arc::new(MemorySink::default());
        let service = SearchService::new(
            Arc::new(FailingStore),
            pipeline(),
            FailedSearchLogger::new(sink.clone()),
        );
        let outcome = service.search(&"zq".repeat(300)).await.unwrap();
        assert!(outcome.results.is_empty());
        assert!(outcome.failed_search_log.is_none());
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_canilla_query_reaches_plumber_through_category() {
        // "canilla que gotea" shares no close substring with "Reparación de Fugas";
        // the plumber is found through the Plomería table ("Instalación de canillas")
        let pros = vec![
            pro("low", "Juan Ruiz", &[], &[1], 3.0),
            pro("fugas", "Ana Paz", &["Reparación de Fugas"], &[1], 4.5),
            pro("electric", "Luis Vega", &["Tableros"], &[2], 5.0),
        ];
        let eligible: Vec<&Professional> = pros.iter().collect();
        assert!(FuzzyMatcher::new().match_all("canilla que gotea", &eligible).is_empty());

        let results = pipeline().run("canilla que gotea", &pros);
        assert_eq!(ids(&results), vec!["fugas", "low"]);
        assert!(results.iter().all(|r| r.source == MatchSource::Category));
    }

    #[tokio::test]
    async fn test_store_failure_is_search_failed() {
        let sink = Arc::new(MemorySink::default());
        let service = SearchService::new(
            Arc::new(FailingStore),
            pipeline(),
            FailedSearchLogger::new(sink.clone()),
        );
        let err = service.search("plomero").await.unwrap_err();
        assert!(matches!(err, AppError::SearchFailed(_)));
        assert_eq!(err.public_message(), "Search failed");
        assert!(sink.records().is_empty());
    }
}
