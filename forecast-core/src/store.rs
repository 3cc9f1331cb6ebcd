//! Durable key-value preferences (the last chosen city).

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::{collections::BTreeMap, fmt::Debug, path::PathBuf};
use tracing::warn;

/// Key under which the last selected city is remembered.
pub const CITY_KEY: &str = "city";

#[async_trait]
pub trait PreferenceStore: Send + Sync + Debug {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Process-local store, handy for tests and for running without a data directory.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.values.lock().insert(key.to_string(), value.to_string());
        store
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat JSON object on disk, rewritten on every `set`.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: tokio::sync::Mutex::new(()) }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Raw file contents; `None` when the file does not exist yet.
    async fn read_raw(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to read preferences file: {}", self.path.display())
            }),
        }
    }

    fn parse(&self, contents: &str) -> Result<BTreeMap<String, String>> {
        serde_json::from_str(contents)
            .with_context(|| format!("Failed to parse preferences file: {}", self.path.display()))
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.read_raw().await? {
            Some(contents) => Ok(self.parse(&contents)?.remove(key)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut values = match self.read_raw().await? {
            Some(contents) => match self.parse(&contents) {
                Ok(values) => values,
                Err(e) => {
                    warn!(error = %e, "replacing unreadable preferences file");
                    BTreeMap::new()
                }
            },
            None => BTreeMap::new(),
        };
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(&values)
            .context("Failed to serialize preferences to JSON")?;

        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write preferences file: {}", self.path.display()))
    }
}
