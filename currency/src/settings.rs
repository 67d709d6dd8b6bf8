//! Settings store implementations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use convdata_common::{ConvDataError, SettingValue, SettingsStore};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::LoadResult;

/// Settings held in memory.
#[derive(Default)]
pub struct MemorySettingsStore {
    values: DashMap<String, SettingValue>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a key.
    pub fn remove(&self, key: &str) {
        self.values.remove(key);
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).map(|v| v.clone())
    }

    async fn set(&self, key: &str, value: SettingValue) -> convdata_common::Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Settings persisted as a single JSON object on disk.
///
/// The whole document is rewritten on every `set`.
pub struct JsonFileSettingsStore {
    path: PathBuf,
    values: Mutex<HashMap<String, SettingValue>>,
}

impl JsonFileSettingsStore {
    /// Open the document at `path`, starting empty if it does not exist.
    pub async fn open(path: impl Into<PathBuf>) -> LoadResult<Self> {
        let path = path.into();
        let values = match tokio::fs::read_to_string(&path).await {
            Ok(contents) if contents.trim().is_empty() => HashMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Settings file not found, starting empty");
                HashMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, values: &HashMap<String, SettingValue>) -> convdata_common::Result<()> {
        let storage = |e: String| {
            warn!(path = %self.path.display(), error = %e, "Failed to persist settings");
            ConvDataError::StorageError(e)
        };

        let json = serde_json::to_string_pretty(values).map_err(|e| storage(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage(e.to_string()))?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| storage(e.to_string()))
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.lock().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: SettingValue) -> convdata_common::Result<()> {
        let mut values = self.values.lock().await;
        values.insert(key.to_string(), value);
        self.persist(&values).await
    }
}
