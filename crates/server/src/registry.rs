//! JSON-file-backed document registry.
//!
//! The registry is the service's only mutable metadata: a `meta.json` file
//! under the data dir holding `{ "files": [...] }`. Every mutation writes
//! through to disk so a restart picks up exactly what was registered.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kbgate_core::config::StorageConfig;
use kbgate_core::DocumentRecord;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("registry file corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct MetaFile {
    files: Vec<DocumentRecord>,
}

pub struct FileRegistry {
    path: PathBuf,
    uploads_dir: PathBuf,
    files: Vec<DocumentRecord>,
}

impl FileRegistry {
    /// Open the registry at the configured location, creating the data
    /// directories and an empty meta file on first use.
    pub fn load(storage: &StorageConfig) -> Result<Self, RegistryError> {
        let uploads_dir = storage.uploads_dir();
        fs::create_dir_all(&uploads_dir)?;

        let path = storage.meta_path();
        let files = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str::<MetaFile>(&raw)?.files
        } else {
            fs::write(&path, serde_json::to_string_pretty(&MetaFile::default())?)?;
            Vec::new()
        };

        Ok(Self { path, uploads_dir, files })
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn list(&self) -> &[DocumentRecord] {
        &self.files
    }

    pub fn find(&self, file_id: Uuid) -> Option<&DocumentRecord> {
        self.files.iter().find(|f| f.file_id == file_id)
    }

    /// Register a document and persist the registry.
    pub fn append(&mut self, record: DocumentRecord) -> Result<(), RegistryError> {
        self.files.push(record);
        self.persist()
    }

    fn persist(&self) -> Result<(), RegistryError> {
        let meta = serde_json::json!({ "files": self.files });
        fs::write(&self.path, serde_json::to_string_pretty(&meta)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn storage(dir: &Path) -> StorageConfig {
        StorageConfig { data_dir: dir.to_path_buf() }
    }

    fn record(filename: &str) -> DocumentRecord {
        DocumentRecord {
            file_id: Uuid::new_v4(),
            filename: filename.to_string(),
            path: PathBuf::from(format!("unused/{filename}")),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn load_creates_dirs_and_empty_meta() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());
        let registry = FileRegistry::load(&storage).unwrap();
        assert!(registry.is_empty());
        assert!(storage.uploads_dir().is_dir());
        assert!(storage.meta_path().is_file());
    }

    #[test]
    fn append_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        let rec = record("notes.txt");
        let id = rec.file_id;
        {
            let mut registry = FileRegistry::load(&storage).unwrap();
            registry.append(rec).unwrap();
        }

        let reloaded = FileRegistry::load(&storage).unwrap();
        assert_eq!(reloaded.len(), 1);
        let found = reloaded.find(id).unwrap();
        assert_eq!(found.filename, "notes.txt");
    }

    #[test]
    fn find_misses_unknown_ids() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FileRegistry::load(&storage(dir.path())).unwrap();
        assert!(registry.find(Uuid::new_v4()).is_none());
    }

    #[test]
    fn meta_file_keeps_the_original_shape() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());
        let mut registry = FileRegistry::load(&storage).unwrap();
        registry.append(record("a.txt")).unwrap();

        let raw = fs::read_to_string(storage.meta_path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(parsed["files"].is_array());
        assert_eq!(parsed["files"][0]["filename"], "a.txt");
        assert!(parsed["files"][0]["fileId"].is_string());
    }
}
