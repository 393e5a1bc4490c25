//! Free-text query endpoint backed by the search index.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use kbgate_search::SearchHit;

use super::{error, ApiError};
use crate::state::AppState;

const DEFAULT_TOP_K: usize = 10;
const MAX_TOP_K: usize = 50;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(rename = "topK")]
    pub top_k: Option<usize>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub q: String,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    if query.q.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "q must not be empty"));
    }
    let top_k = query.top_k.unwrap_or(DEFAULT_TOP_K);
    if !(1..=MAX_TOP_K).contains(&top_k) {
        return Err(error(
            StatusCode::BAD_REQUEST,
            format!("topK must be between 1 and {MAX_TOP_K}"),
        ));
    }

    let exists = state
        .search
        .index_exists()
        .await
        .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    if !exists {
        return Err(error(
            StatusCode::NOT_FOUND,
            format!("index not found: {}", state.search.index_name()),
        ));
    }

    let results = state
        .search
        .search(&query.q, top_k)
        .await
        .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(SearchResponse {
        q: query.q,
        count: results.len(),
        results,
    }))
}
