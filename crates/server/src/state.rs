//! Shared request state.

use tokio::sync::RwLock;

use kbgate_ingest::ChunkParams;
use kbgate_search::SearchClient;

use crate::registry::FileRegistry;

pub struct AppState {
    /// Validated once at startup; handlers never re-check.
    pub chunk_params: ChunkParams,
    pub registry: RwLock<FileRegistry>,
    pub search: SearchClient,
}
