//! Reindexing: run the ingestion pipeline over registered documents and
//! push the resulting chunk records to the search index.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use kbgate_core::{ChunkRecord, DocumentRecord};
use kbgate_ingest::{chunk_records, ChunkParams};

use super::{error, ApiError};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReindexQuery {
    /// Reindex a single document instead of every registered one.
    pub file_id: Option<Uuid>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReindexResponse {
    pub ok: bool,
    pub indexed_chunks: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

/// Rebuild the chunk index for all documents (or one, via `fileId`).
///
/// Chunk ids derive from `(fileId, chunkIndex)` only, so every rerun
/// overwrites the previous chunk set in place instead of accumulating
/// duplicates.
pub async fn reindex(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReindexQuery>,
) -> Result<Json<ReindexResponse>, ApiError> {
    let docs: Vec<DocumentRecord> = {
        let registry = state.registry.read().await;
        match query.file_id {
            Some(id) => match registry.find(id) {
                Some(doc) => vec![doc.clone()],
                None => {
                    return Err(error(
                        StatusCode::NOT_FOUND,
                        format!("fileId not found: {id}"),
                    ))
                }
            },
            None => registry.list().to_vec(),
        }
    };

    state
        .search
        .ensure_index()
        .await
        .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, format!("search engine unavailable: {e}")))?;

    // The per-document pipeline is pure CPU work; fan it out across the
    // rayon pool off the async runtime.
    let params = state.chunk_params;
    let records = tokio::task::spawn_blocking(move || gather_records(docs, &params))
        .await
        .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, format!("reindex task failed: {e}")))?;

    if records.is_empty() {
        return Ok(Json(ReindexResponse {
            ok: true,
            indexed_chunks: 0,
            index: None,
        }));
    }

    let indexed = state
        .search
        .bulk_upsert(&records)
        .await
        .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, format!("bulk index failed: {e}")))?;
    state
        .search
        .refresh()
        .await
        .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, format!("index refresh failed: {e}")))?;

    info!(indexed, "reindex complete");
    Ok(Json(ReindexResponse {
        ok: true,
        indexed_chunks: indexed,
        index: Some(state.search.index_name().to_string()),
    }))
}

/// Read, extract, normalize, and chunk every document in parallel.
/// A file missing from disk is skipped with a warning, not an error.
fn gather_records(docs: Vec<DocumentRecord>, params: &ChunkParams) -> Vec<ChunkRecord> {
    let per_doc: Vec<Vec<ChunkRecord>> = docs
        .par_iter()
        .map(|doc| match std::fs::read(&doc.path) {
            Ok(bytes) => chunk_records(doc, &bytes, params),
            Err(e) => {
                warn!(
                    file_id = %doc.file_id,
                    path = %doc.path.display(),
                    "skipping unreadable file: {e}"
                );
                Vec::new()
            }
        })
        .collect();
    per_doc.into_iter().flatten().collect()
}
