// Storage Service
// Key/value persistence for the selected theme

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by a key/value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded")]
    QuotaExceeded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String key/value store shared by everything on the page.
/// Last writer wins; no locking across callers.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// In-memory store, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StorageError {
        StorageError::Unavailable("memory store lock poisoned".to_string())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let items = self.items.read().map_err(|_| Self::poisoned())?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self.items.write().map_err(|_| Self::poisoned())?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let mut items = self.items.write().map_err(|_| Self::poisoned())?;
        items.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object on disk, cached after first read
pub struct FileStore {
    path: PathBuf,
    cache: RwLock<Option<HashMap<String, String>>>,
}

impl FileStore {
    /// Create a store persisting to `storage.json` inside `data_dir`
    pub fn new(data_dir: &Path) -> Self {
        Self::with_path(data_dir.join("storage.json"))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            cache: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StorageResult<HashMap<String, String>> {
        if let Ok(cache) = self.cache.read() {
            if let Some(ref items) = *cache {
                return Ok(items.clone());
            }
        }

        let items = if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            if content.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            HashMap::new()
        };

        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(items.clone());
        }

        Ok(items)
    }

    fn save(&self, items: HashMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&items)?;
        std::fs::write(&self.path, content)?;

        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(items);
        }

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(items)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(items)?;
        }
        Ok(())
    }
}
