use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Context as _;
use async_trait::async_trait;
use tokio::fs;

/// Read-only access to the corpus files. Paths are relative to the corpus root.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn read(&self, path: &Path) -> anyhow::Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct LocalFsStore {
    base_dir: PathBuf,
}

impl LocalFsStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait]
impl ContentStore for LocalFsStore {
    async fn read(&self, path: &Path) -> anyhow::Result<Vec<u8>> {
        let full = self.base_dir.join(path);
        fs::read(&full)
            .await
            .with_context(|| format!("read: {}", full.display()))
    }
}

/// In-memory corpus. Counts reads so cache behaviour can be observed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: HashMap<PathBuf, Vec<u8>>,
    reads: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    pub fn with_json(mut self, path: impl Into<PathBuf>, value: &serde_json::Value) -> Self {
        self.insert(path, value.to_string());
        self
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn read(&self, path: &Path) -> anyhow::Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no such file: {}", path.display()))
    }
}

pub async fn load_json<T: serde::de::DeserializeOwned>(
    store: &dyn ContentStore,
    path: &Path,
) -> anyhow::Result<T> {
    let bytes = store.read(path).await?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse json: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_counts_reads_and_reports_missing_paths() {
        let mut store = MemoryStore::new();
        store.insert("broken.json", "{not json");

        let missing = load_json::<Vec<u32>>(&store, Path::new("missing.json")).await;
        let broken = load_json::<Vec<u32>>(&store, Path::new("broken.json")).await;

        assert!(format!("{:#}", missing.unwrap_err()).contains("no such file: missing.json"));
        assert!(format!("{:#}", broken.unwrap_err()).contains("parse json: broken.json"));
        assert_eq!(store.read_count(), 2);
    }

    #[tokio::test]
    async fn local_fs_store_reads_relative_to_base() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir_all(dir.path().join("index"))?;
        std::fs::write(dir.path().join("index/toc.json"), br#"{"items":[]}"#)?;

        let store = LocalFsStore::new(dir.path());
        let value: serde_json::Value = load_json(&store, Path::new("index/toc.json")).await?;
        assert_eq!(value["items"], serde_json::json!([]));

        let err = store.read(Path::new("index/none.json")).await.unwrap_err();
        assert!(format!("{err:#}").contains("none.json"));
        Ok(())
    }
}
