//! Document upload and listing.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use kbgate_core::DocumentRecord;

use super::{error, ApiError};
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_id: Uuid,
    pub filename: String,
}

/// Accept a multipart upload, store the raw bytes, and register the
/// document. Nothing is extracted or indexed here; that happens on
/// reindex, so a bad document can never fail its own upload.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error(StatusCode::BAD_REQUEST, format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(sanitize_filename)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| error(StatusCode::BAD_REQUEST, "filename is required"))?;

        let content = field
            .bytes()
            .await
            .map_err(|e| error(StatusCode::BAD_REQUEST, format!("failed to read upload: {e}")))?;
        if content.is_empty() {
            return Err(error(StatusCode::BAD_REQUEST, "empty file"));
        }

        let file_id = Uuid::new_v4();
        let mut registry = state.registry.write().await;
        let dst = registry.uploads_dir().join(format!("{file_id}__{filename}"));
        tokio::fs::write(&dst, &content)
            .await
            .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, format!("failed to store file: {e}")))?;

        let record = DocumentRecord {
            file_id,
            filename: filename.clone(),
            path: dst,
            uploaded_at: Utc::now(),
        };
        registry
            .append(record)
            .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

        info!(%file_id, filename = %filename, bytes = content.len(), "document uploaded");
        return Ok(Json(UploadResponse { file_id, filename }));
    }

    Err(error(StatusCode::BAD_REQUEST, "file field is required"))
}

/// Strip any path components from a client-supplied filename.
fn sanitize_filename(name: &str) -> String {
    std::path::Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string()
}

/// List every registered document.
pub async fn documents(State(state): State<Arc<AppState>>) -> Json<Vec<DocumentRecord>> {
    let registry = state.registry.read().await;
    Json(registry.list().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("dir/inner.txt"), "inner.txt");
    }

    #[test]
    fn sanitize_rejects_bare_directories() {
        assert_eq!(sanitize_filename(".."), "");
        assert_eq!(sanitize_filename("/"), "");
    }
}
