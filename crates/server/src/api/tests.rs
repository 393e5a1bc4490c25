//! Router-level tests: request in, JSON out, nothing mocked but the disk.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tokio::sync::RwLock;
use tower::util::ServiceExt;

use kbgate_core::config::{ChunkingConfig, Config, OpenSearchConfig, ServerConfig, StorageConfig};
use kbgate_ingest::ChunkParams;
use kbgate_search::SearchClient;

use crate::registry::FileRegistry;
use crate::state::AppState;

fn test_state(dir: &std::path::Path) -> Arc<AppState> {
    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        storage: StorageConfig {
            data_dir: dir.to_path_buf(),
        },
        opensearch: OpenSearchConfig {
            url: "http://127.0.0.1:9200".to_string(),
            index: "kb_chunks_test".to_string(),
            username: None,
            password: None,
        },
        chunking: ChunkingConfig {
            chunk_size: 800,
            overlap: 120,
        },
    };
    let registry = FileRegistry::load(&config.storage).unwrap();
    let search = SearchClient::new(&config.opensearch);
    Arc::new(AppState {
        chunk_params: ChunkParams::new(config.chunking.chunk_size, config.chunking.overlap).unwrap(),
        registry: RwLock::new(registry),
        search,
    })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn multipart_upload(filename: &str, contents: &str) -> Request<Body> {
    let boundary = "kbgate-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\r\n\
         {contents}\r\n\
         --{boundary}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn upload_registers_and_stores_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path());

    let response = crate::build_router(state.clone())
        .oneshot(multipart_upload("hello.txt", "Hello from the test suite"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["filename"], "hello.txt");
    let file_id = json["fileId"].as_str().unwrap().to_string();

    // The raw bytes landed under uploads/ with the id-prefixed name.
    let stored = dir
        .path()
        .join("uploads")
        .join(format!("{file_id}__hello.txt"));
    assert_eq!(std::fs::read_to_string(stored).unwrap(), "Hello from the test suite");

    // And the registry lists it.
    let response = crate::build_router(state)
        .oneshot(Request::builder().uri("/documents").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["fileId"], file_id.as_str());
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let boundary = "kbgate-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"other\"\r\n\r\n\
         not a file\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap();

    let response = crate::build_router(test_state(dir.path()))
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_upload_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let response = crate::build_router(test_state(dir.path()))
        .oneshot(multipart_upload("empty.txt", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_requires_a_query() {
    let dir = tempfile::tempdir().unwrap();
    let response = crate::build_router(test_state(dir.path()))
        .oneshot(Request::builder().uri("/search?q=").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_bounds_top_k() {
    let dir = tempfile::tempdir().unwrap();
    let response = crate::build_router(test_state(dir.path()))
        .oneshot(
            Request::builder()
                .uri("/search?q=hello&topK=51")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reindex_of_unknown_file_id_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let uri = format!("/reindex?fileId={}", uuid::Uuid::new_v4());
    let response = crate::build_router(test_state(dir.path()))
        .oneshot(Request::builder().method("POST").uri(&uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
