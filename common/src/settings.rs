//! Key/value settings contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::time::Timestamp;

/// A single persisted setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    String(String),
    Bool(bool),
    Timestamp(Timestamp),
}

/// Durable key/value settings with string, boolean and timestamp values.
///
/// Typed getters return `None` both for missing keys and for keys holding a
/// value of another type.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read a raw setting.
    async fn get(&self, key: &str) -> Option<SettingValue>;

    /// Write a raw setting, replacing any previous value.
    async fn set(&self, key: &str, value: SettingValue) -> Result<()>;

    /// Check if a key holds any value.
    async fn contains(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }

    async fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key).await? {
            SettingValue::String(value) => Some(value),
            _ => None,
        }
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.set(key, SettingValue::String(value.to_string())).await
    }

    async fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key).await? {
            SettingValue::Bool(value) => Some(value),
            _ => None,
        }
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set(key, SettingValue::Bool(value)).await
    }

    async fn get_timestamp(&self, key: &str) -> Option<Timestamp> {
        match self.get(key).await? {
            SettingValue::Timestamp(value) => Some(value),
            _ => None,
        }
    }

    async fn set_timestamp(&self, key: &str, value: Timestamp) -> Result<()> {
        self.set(key, SettingValue::Timestamp(value)).await
    }
}
