use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub opensearch: OpenSearchConfig,
    pub chunking: ChunkingConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            storage: StorageConfig::from_env(),
            opensearch: OpenSearchConfig::from_env(),
            chunking: ChunkingConfig::from_env(),
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:      {}:{}", self.server.host, self.server.port);
        tracing::info!("  storage:     data_dir={}", self.storage.data_dir.display());
        tracing::info!("  opensearch:  url={}, index={}", self.opensearch.url, self.opensearch.index);
        tracing::info!(
            "  chunking:    chunk_size={}, overlap={}",
            self.chunking.chunk_size,
            self.chunking.overlap
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 8000),
        }
    }
}

// ── Storage ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    fn from_env() -> Self {
        Self {
            data_dir: PathBuf::from(env_or("DATA_DIR", "data")),
        }
    }

    /// Directory holding raw uploaded files.
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    /// Path of the document registry file.
    pub fn meta_path(&self) -> PathBuf {
        self.data_dir.join("meta.json")
    }
}

// ── OpenSearch ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenSearchConfig {
    pub url: String,
    pub index: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl OpenSearchConfig {
    fn from_env() -> Self {
        Self {
            url: env_or("OPENSEARCH_URL", "http://localhost:9200"),
            index: env_or("OPENSEARCH_INDEX", "kb_chunks"),
            username: env_opt("OPENSEARCH_USERNAME"),
            password: env_opt("OPENSEARCH_PASSWORD"),
        }
    }
}

// ── Chunking ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk.
    pub chunk_size: usize,
    /// Characters repeated from the tail of one chunk at the head of the next.
    pub overlap: usize,
}

impl ChunkingConfig {
    fn from_env() -> Self {
        Self {
            chunk_size: env_usize("CHUNK_SIZE", 800),
            overlap: env_usize("CHUNK_OVERLAP", 120),
        }
    }
}
