//! Shared data model: registered documents and the chunk records derived
//! from them during ingestion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered document: one uploaded file.
///
/// Immutable once created. Chunks are recomputed from the stored bytes on
/// every reindex, never persisted alongside the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub file_id: Uuid,
    /// Original filename as uploaded (path components stripped).
    pub filename: String,
    /// Where the raw bytes live on disk.
    pub path: std::path::PathBuf,
    pub uploaded_at: DateTime<Utc>,
}

/// One chunk of a document's normalized text, ready for indexing.
///
/// `chunk_id` is derived from `(file_id, chunk_index)` and nothing else, so
/// re-ingesting the same document with the same parameters reproduces the
/// same ids and the index collaborator overwrites instead of duplicating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkRecord {
    pub chunk_id: String,
    pub file_id: Uuid,
    pub filename: String,
    pub chunk_index: usize,
    pub content: String,
}

/// Derive the stable chunk identifier for `(file_id, chunk_index)`.
pub fn chunk_id(file_id: Uuid, chunk_index: usize) -> String {
    format!("{file_id}:{chunk_index}")
}
