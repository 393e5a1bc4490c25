//! Service health: reports search-engine reachability without ever failing
//! the endpoint itself.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opensearch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    match state.search.info().await {
        Ok(version) => Json(HealthResponse {
            ok: true,
            opensearch: Some(version),
            error: None,
        }),
        Err(e) => Json(HealthResponse {
            ok: false,
            opensearch: None,
            error: Some(e.to_string()),
        }),
    }
}
