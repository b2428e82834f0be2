//! Router-level tests: status codes and JSON shapes of every endpoint

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use crate::catalog::Catalog;
use crate::failed_search::testing::MemorySink;
use crate::failed_search::FailedSearchLogger;
use crate::search::{FuzzyConfig, SearchPipeline, SearchService};
use crate::server::{router, AppState};
use crate::store::{MemoryStore, Professional, ProfessionalStore, StoreError};
use crate::suggest::Suggester;

struct FailingStore;

#[async_trait]
impl ProfessionalStore for FailingStore {
    async fn eligible_professionals(&self) -> Result<Vec<Professional>, StoreError> {
        Err(StoreError::Unavailable("firestore quota exceeded".to_string()))
    }
}

fn state_with(store: Arc<dyn ProfessionalStore>) -> (AppState, Arc<MemorySink>) {
    let catalog = Arc::new(Catalog::builtin());
    let sink = Arc::new(MemorySink::default());
    let search = SearchService::new(
        store,
        SearchPipeline::new(catalog.clone(), FuzzyConfig::default()),
        FailedSearchLogger::new(sink.clone()),
    );
    let state = AppState {
        search: Arc::new(search),
        suggester: Arc::new(Suggester::new(catalog, None)),
    };
    (state, sink)
}

fn seeded_state() -> (AppState, Arc<MemorySink>) {
    state_with(Arc::new(MemoryStore::seeded()))
}

async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

#[tokio::test]
async fn test_search_returns_projected_hits() {
    let (state, sink) = seeded_state();
    let (status, body) = get(state, "/api/search?q=gasista").await;

    assert_eq!(status, StatusCode::OK);
    let hits = body.as_array().unwrap();
    assert!(!hits.is_empty() && hits.len() <= 10);
    assert_eq!(hits[0]["id"], "seed-003");
    assert_eq!(hits[0]["category"], "Gasista");

    let mut keys: Vec<&str> = hits[0].as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["avgRating", "category", "id", "name", "photoUrl"]);
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn test_search_accepts_accents_and_case() {
    let (state, _) = seeded_state();
    let (status, body) = get(state, "/api/search?q=CERRAJER%C3%8DA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "seed-008");
}

#[tokio::test]
async fn test_missing_or_blank_query_is_empty_array() {
    let (state, sink) = seeded_state();
    let (status, body) = get(state.clone(), "/api/search").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(vec![]));

    let (status, body) = get(state, "/api/search?q=%20%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(vec![]));
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn test_store_failure_is_generic_500() {
    let (state, sink) = state_with(Arc::new(FailingStore));
    let (status, body) = get(state, "/api/search?q=plomero").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "error": "Search failed" }));
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn test_overlong_query_is_empty_array() {
    let (state, sink) = seeded_state();
    let uri = format!("/api/search?q={}", "zq".repeat(300));
    let (status, body) = get(state, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(vec![]));
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn test_zero_results_still_200() {
    let (state, _) = seeded_state();
    let (status, body) = get(state, "/api/search?q=zzzqqqxxx").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(vec![]));
}

#[tokio::test]
async fn test_suggest_endpoint() {
    let (state, _) = seeded_state();
    let (status, body) = get(state.clone(), "/api/suggest?q=olor%20a%20gas%20en%20la%20cocina").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "categories": [{ "id": 3, "name": "Gasista" }] }));

    let (status, body) = get(state, "/api/suggest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "categories": [] }));
}

#[tokio::test]
async fn test_categories_endpoint() {
    let (state, _) = seeded_state();
    let (status, body) = get(state, "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    let categories = body.as_array().unwrap();
    assert_eq!(categories.len(), 15);
    assert_eq!(categories[0]["name"], "Plomería");
    assert!(categories[0].get("folded").is_none());
}

#[tokio::test]
async fn test_health() {
    let (state, _) = seeded_state();
    let (status, body) = get(state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));
}
