//! Handoff storage backends.

use async_trait::async_trait;
use fs2::FileExt;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tokio::task;
use tracing::{debug, warn};

use capture_protocols::{HandoffBackend, HandoffError, HandoffKey};

/// In-memory backend for tests and single-process runs.
pub struct MemoryBackend {
    values: RwLock<HashMap<HandoffKey, Value>>,
}

impl MemoryBackend {
    /// Create a new memory backend.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HandoffBackend for MemoryBackend {
    async fn get(&self, key: HandoffKey) -> Result<Option<Value>, HandoffError> {
        let values = self.values.read().await;
        Ok(values.get(&key).cloned())
    }

    async fn set(&self, key: HandoffKey, value: Value) -> Result<(), HandoffError> {
        let mut values = self.values.write().await;
        values.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: HandoffKey) -> Result<(), HandoffError> {
        let mut values = self.values.write().await;
        values.remove(&key);
        Ok(())
    }
}

/// File backend shared by every process of one operator profile.
///
/// All keys live in one JSON object:
/// ```text
/// {
///   "capture_last_business_name": "Acme LLC",
///   "capture_last_base_url": "http://localhost:5000",
///   "capture_refresh_token": 1718000000000
/// }
/// ```
/// Writers hold an exclusive advisory lock on a sibling `.lock` file for the
/// whole read-modify-write, then persist a uniquely named temp file over the
/// original. Readers take no lock and see either the old or the new document.
pub struct FileBackend {
    path: PathBuf,
    lock_path: PathBuf,
    /// Keeps at most one blocking writer per backend waiting on the file lock.
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Create a file backend, creating the parent directory if needed.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self, HandoffError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let lock_path = lock_path_for(&path);
        debug!("FileBackend initialized at {:?} (lock {:?})", path, lock_path);

        Ok(Self {
            path,
            lock_path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, Value>, HandoffError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(parse_document(&self.path, &content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Apply `edit` to the stored document under the inter-process lock.
    ///
    /// `edit` returns whether it changed anything; unchanged documents are
    /// not rewritten.
    async fn update<F>(&self, edit: F) -> Result<bool, HandoffError>
    where
        F: FnOnce(&mut BTreeMap<String, Value>) -> bool + Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();
        let lock_path = self.lock_path.clone();

        task::spawn_blocking(move || update_locked(&path, &lock_path, edit))
            .await
            .map_err(|e| HandoffError::Storage(format!("Handoff write task failed: {}", e)))?
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}

fn parse_document(path: &Path, content: &str) -> BTreeMap<String, Value> {
    if content.trim().is_empty() {
        return BTreeMap::new();
    }

    match serde_json::from_str(content) {
        Ok(values) => values,
        Err(e) => {
            warn!("Handoff file {:?} is not a JSON object, starting empty: {}", path, e);
            BTreeMap::new()
        }
    }
}

fn update_locked<F>(path: &Path, lock_path: &Path, edit: F) -> Result<bool, HandoffError>
where
    F: FnOnce(&mut BTreeMap<String, Value>) -> bool,
{
    let lock_file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(lock_path)?;
    // Released when `lock_file` is dropped.
    FileExt::lock_exclusive(&lock_file)?;

    let mut values = match std::fs::read_to_string(path) {
        Ok(content) => parse_document(path, &content),
        Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
        Err(e) => return Err(e.into()),
    };

    if !edit(&mut values) {
        return Ok(false);
    }

    let content = serde_json::to_string_pretty(&values)?;
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    drop(lock_file);
    Ok(true)
}

#[async_trait]
impl HandoffBackend for FileBackend {
    async fn get(&self, key: HandoffKey) -> Result<Option<Value>, HandoffError> {
        let values = self.read_all().await?;
        Ok(values.get(key.as_str()).cloned())
    }

    async fn set(&self, key: HandoffKey, value: Value) -> Result<(), HandoffError> {
        let name = key.as_str();
        self.update(move |values| {
            values.insert(name.to_string(), value);
            true
        })
        .await?;
        debug!("Handoff key {} written to {:?}", key, self.path);
        Ok(())
    }

    async fn remove(&self, key: HandoffKey) -> Result<(), HandoffError> {
        let name = key.as_str();
        if self.update(move |values| values.remove(name).is_some()).await? {
            debug!("Handoff key {} removed from {:?}", key, self.path);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
