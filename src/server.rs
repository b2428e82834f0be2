//! HTTP surface of the search service
//!
//! One router over a shared, read-only context built at startup.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::Category;
use crate::error::AppError;
use crate::search::{SearchHit, SearchService};
use crate::suggest::{CategorySuggestion, Suggester};

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
    pub suggester: Arc<Suggester>,
}

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub categories: Vec<CategorySuggestion>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", get(search_handler))
        .route("/api/suggest", get(suggest_handler))
        .route("/api/categories", get(categories_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Vec<SearchHit>>, AppError> {
    let Some(q) = params.q else {
        return Ok(Json(Vec::new()));
    };
    // The failed-search write, if any, keeps running after the response
    let outcome = state.search.search(&q).await?;
    Ok(Json(outcome.hits(state.search.catalog())))
}

async fn suggest_handler(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Json<SuggestResponse> {
    let categories = match params.q {
        Some(q) => state.suggester.suggest(&q).await,
        None => Vec::new(),
    };
    Json(SuggestResponse { categories })
}

async fn categories_handler(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.search.catalog().categories().to_vec())
}

async fn health_handler() -> impl IntoResponse {
    "ok"
}

/// Bind and serve until Ctrl-C
pub async fn serve(bind: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", bind, e))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
