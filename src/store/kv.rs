//! Key-value backends for [`super::TranslationStore`].

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::{
    Mutex,
    RwLock,
};

use super::StoreError;

/// One mutation inside an atomic batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Put(String, String),
    Delete(String),
}

impl Write {
    #[must_use]
    pub fn put(key: &str, value: impl Into<String>) -> Self {
        Self::Put(key.to_string(), value.into())
    }

    #[must_use]
    pub fn delete(key: &str) -> Self {
        Self::Delete(key.to_string())
    }
}

/// Local persistent string key-value store.
///
/// `write_batch` must apply all writes or none, and must be durable once it
/// returns `Ok`.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn write_batch(&self, writes: Vec<Write>) -> Result<(), StoreError>;
}

/// Applies `writes` to an in-memory map.
fn apply(entries: &mut BTreeMap<String, String>, writes: Vec<Write>) {
    for write in writes {
        match write {
            Write::Put(key, value) => {
                entries.insert(key, value);
            }
            Write::Delete(key) => {
                entries.remove(&key);
            }
        }
    }
}

/// Volatile store, used by tests and for runs without a cache file.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    /// Current entries
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write_batch(&self, writes: Vec<Write>) -> Result<(), StoreError> {
        apply(&mut *self.entries.write().await, writes);
        Ok(())
    }
}

/// Store backed by a single JSON document on disk.
///
/// A batch is written to a sibling `.tmp` file, synced, then renamed over the
/// document, so readers only ever see a complete old or new version. A
/// document that no longer parses is reported by `get` and replaced by the
/// next `write_batch`.
#[derive(Debug)]
pub struct FileKeyValueStore {
    /// JSON document path
    path: PathBuf,
    /// Serialises read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    /// Reads the whole document. A missing file is an empty store.
    async fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the document on disk via temp file and rename.
    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let content = serde_json::to_vec_pretty(entries)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp_path = self.temp_path();
        let mut file = tokio::fs::File::create(&temp_path).await?;
        file.write_all(&content).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }

    /// Sibling path used while writing.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(ToOwned::to_owned).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load().await?.remove(key))
    }

    async fn write_batch(&self, writes: Vec<Write>) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = match self.load().await {
            Ok(entries) => entries,
            Err(StoreError::Serialization(error)) => {
                tracing::warn!(
                    %error,
                    path = %self.path.display(),
                    "Key-value document is corrupt, replacing it"
                );
                BTreeMap::new()
            }
            Err(error) => return Err(error),
        };
        apply(&mut entries, writes);
        self.persist(&entries).await?;

        tracing::debug!(path = %self.path.display(), "Persisted key-value batch");
        Ok(())
    }
}
