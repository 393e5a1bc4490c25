mod api;
mod registry;
mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::info;

use kbgate_ingest::ChunkParams;
use kbgate_search::SearchClient;

use crate::registry::FileRegistry;
use crate::state::AppState;

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/upload", post(api::upload))
        .route("/documents", get(api::documents))
        .route("/reindex", post(api::reindex))
        .route("/search", get(api::search))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    kbgate_core::config::load_dotenv();
    let config = kbgate_core::Config::from_env();
    config.log_summary();

    // A broken chunking configuration must never reach the ingestion path.
    let chunk_params = ChunkParams::new(config.chunking.chunk_size, config.chunking.overlap)?;

    let registry = FileRegistry::load(&config.storage)?;
    info!("Document registry ready ({} files)", registry.len());

    let search = SearchClient::new(&config.opensearch);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState {
        chunk_params,
        registry: RwLock::new(registry),
        search,
    });

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
