//! Thin REST client for the OpenSearch index holding chunk records.

use kbgate_core::config::OpenSearchConfig;
use kbgate_core::ChunkRecord;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

/// How many characters of chunk content a search hit carries as preview.
const PREVIEW_CHARS: usize = 160;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search engine error: {status} — {body}")]
    Api { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("bulk indexing reported per-item errors")]
    BulkRejected,
}

/// One ranked search result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub file_id: String,
    pub filename: String,
    pub chunk_index: usize,
    pub score: f64,
    /// First highlighted fragment, when the engine produced one.
    pub highlight: Option<String>,
    pub content_preview: String,
}

/// Client for one OpenSearch endpoint + index.
///
/// All writes are keyed by the chunk's derived id, so re-ingesting a
/// document overwrites its previous chunks instead of duplicating them.
/// Chunks whose index is no longer produced (a document that shrank) are
/// left behind; see [`SearchClient::bulk_upsert`].
pub struct SearchClient {
    client: reqwest::Client,
    base_url: String,
    index: String,
    username: Option<String>,
    password: Option<String>,
}

impl SearchClient {
    pub fn new(config: &OpenSearchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            index: config.index.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.username {
            Some(user) => req.basic_auth(user, self.password.as_deref()),
            None => req,
        }
    }

    /// Cluster version string, for health reporting.
    pub async fn info(&self) -> Result<String, SearchError> {
        let response = self.authed(self.client.get(&self.base_url)).send().await?;
        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api { status, body });
        }
        let resp: serde_json::Value = response.json().await?;
        let version = resp["version"]["number"]
            .as_str()
            .unwrap_or("unknown")
            .to_string();
        Ok(version)
    }

    pub async fn index_exists(&self) -> Result<bool, SearchError> {
        let url = format!("{}/{}", self.base_url, self.index);
        let response = self.authed(self.client.head(&url)).send().await?;
        match response.status().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(SearchError::Api { status, body })
            }
        }
    }

    /// Create the chunk index with its field mapping unless it already exists.
    pub async fn ensure_index(&self) -> Result<(), SearchError> {
        if self.index_exists().await? {
            return Ok(());
        }

        let body = json!({
            "mappings": {
                "properties": {
                    "fileId": { "type": "keyword" },
                    "filename": { "type": "keyword" },
                    "chunkId": { "type": "keyword" },
                    "chunkIndex": { "type": "integer" },
                    "content": { "type": "text" },
                }
            }
        });

        let url = format!("{}/{}", self.base_url, self.index);
        let response = self.authed(self.client.put(&url)).json(&body).send().await?;
        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api { status, body });
        }
        info!("created index '{}'", self.index);
        Ok(())
    }

    /// Bulk-index chunk records, keyed by chunk id (idempotent upsert).
    ///
    /// Re-emitted ids overwrite their previous value; ids that are no longer
    /// emitted are not touched, so a document that shrank leaves its stale
    /// higher-index chunks in the index. Returns the number of records sent.
    pub async fn bulk_upsert(&self, records: &[ChunkRecord]) -> Result<usize, SearchError> {
        if records.is_empty() {
            return Ok(0);
        }

        let payload = bulk_body(&self.index, records);
        debug!(records = records.len(), "sending bulk index request");

        let url = format!("{}/_bulk", self.base_url);
        let response = self
            .authed(self.client.post(&url))
            .header("Content-Type", "application/x-ndjson")
            .body(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api { status, body });
        }

        let resp: serde_json::Value = response.json().await?;
        if resp["errors"].as_bool().unwrap_or(false) {
            return Err(SearchError::BulkRejected);
        }
        Ok(records.len())
    }

    /// Make newly indexed chunks visible to search.
    pub async fn refresh(&self) -> Result<(), SearchError> {
        let url = format!("{}/{}/_refresh", self.base_url, self.index);
        let response = self.authed(self.client.post(&url)).send().await?;
        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api { status, body });
        }
        Ok(())
    }

    /// Match query over chunk content with highlighting, top `size` hits.
    pub async fn search(&self, query: &str, size: usize) -> Result<Vec<SearchHit>, SearchError> {
        let body = json!({
            "size": size,
            "query": { "match": { "content": query } },
            "highlight": {
                "fields": { "content": {} },
                "pre_tags": ["<em>"],
                "post_tags": ["</em>"],
            },
        });

        let url = format!("{}/{}/_search", self.base_url, self.index);
        let response = self.authed(self.client.post(&url)).json(&body).send().await?;
        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api { status, body });
        }

        let resp: serde_json::Value = response.json().await?;
        let hits = resp["hits"]["hits"]
            .as_array()
            .ok_or_else(|| SearchError::Parse("missing hits.hits".into()))?;

        Ok(hits.iter().map(hit_from_json).collect())
    }
}

fn hit_from_json(hit: &serde_json::Value) -> SearchHit {
    let source = &hit["_source"];
    SearchHit {
        file_id: source["fileId"].as_str().unwrap_or_default().to_string(),
        filename: source["filename"].as_str().unwrap_or_default().to_string(),
        chunk_index: source["chunkIndex"].as_u64().unwrap_or(0) as usize,
        score: hit["_score"].as_f64().unwrap_or(0.0),
        highlight: hit["highlight"]["content"][0].as_str().map(str::to_string),
        content_preview: preview(source["content"].as_str().unwrap_or_default()),
    }
}

/// NDJSON bulk payload: an `index` action line (keyed by chunk id) followed
/// by the record itself, per record, with a trailing newline.
fn bulk_body(index: &str, records: &[ChunkRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() * 2);
    for rec in records {
        lines.push(
            json!({ "index": { "_index": index, "_id": rec.chunk_id } }).to_string(),
        );
        lines.push(serde_json::to_string(rec).expect("chunk record serializes"));
    }
    let mut payload = lines.join("\n");
    payload.push('\n');
    payload
}

/// First `PREVIEW_CHARS` characters of `content`, with an ellipsis marker
/// when the content was actually truncated.
fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
