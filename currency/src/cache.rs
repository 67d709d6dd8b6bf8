//! Durable storage for raw currency payloads.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::error::{LoadError, LoadResult};

/// Named text blobs that survive restarts.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read a blob; `LoadError::Cache` if it does not exist.
    async fn read(&self, name: &str) -> LoadResult<String>;

    /// Write a blob, replacing previous contents.
    async fn write(&self, name: &str, contents: &str) -> LoadResult<()>;

    /// Remove a blob. Removing a missing blob is not an error.
    async fn remove(&self, name: &str) -> LoadResult<()>;
}

/// Stores each blob as a file under one directory.
pub struct FileCacheStore {
    dir: PathBuf,
}

impl FileCacheStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the blobs.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn read(&self, name: &str) -> LoadResult<String> {
        let path = self.path(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LoadError::Cache(format!("{} not found", path.display())))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, name: &str, contents: &str) -> LoadResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path(name);
        tokio::fs::write(&path, contents).await?;
        debug!(path = %path.display(), bytes = contents.len(), "Wrote cache file");
        Ok(())
    }

    async fn remove(&self, name: &str) -> LoadResult<()> {
        match tokio::fs::remove_file(self.path(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process cache, lost on restart.
#[derive(Default)]
pub struct MemoryCacheStore {
    blobs: DashMap<String, String>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn read(&self, name: &str) -> LoadResult<String> {
        self.blobs
            .get(name)
            .map(|blob| blob.clone())
            .ok_or_else(|| LoadError::Cache(format!("{} not found", name)))
    }

    async fn write(&self, name: &str, contents: &str) -> LoadResult<()> {
        self.blobs.insert(name.to_string(), contents.to_string());
        Ok(())
    }

    async fn remove(&self, name: &str) -> LoadResult<()> {
        self.blobs.remove(name);
        Ok(())
    }
}
