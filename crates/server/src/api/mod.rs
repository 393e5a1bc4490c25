//! Domain-focused API endpoint modules.
//!
//! Each sub-module owns a single responsibility area. The shared error
//! payload lives here in mod.rs.

mod documents;
mod health;
mod reindex;
mod search;

#[cfg(test)]
mod tests;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

// ── Shared types ─────────────────────────────────────────────────

/// Error payload shared by all endpoints.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { detail: detail.into() }))
}

// ── Re-exports ───────────────────────────────────────────────────
// Preserves flat `api::foo` import paths used by main.rs route registration.

pub use documents::{documents, upload};
pub use health::health;
pub use reindex::reindex;
pub use search::search;
