//! ConvData Currency Loader
//!
//! Loads currency units and exchange ratios from a local cache or a web
//! service and installs them as the Currency category.
//!
//! # Features
//!
//! - Cache-first loading with a 24 hour refresh window
//! - Network policy awareness (offline, metered opt-in)
//! - Locale and settings based default currency pair
//! - Truncated "1 A = x B" ratio strings
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use convdata_currency::{
//!     CurrencyLoader, CurrencyLoaderConfig, CurrencyLoaderDeps, FileCacheStore, HttpCurrencyClient,
//!     MemorySettingsStore, NetworkMonitor,
//! };
//!
//! let loader = CurrencyLoader::new(CurrencyLoaderConfig::default(), CurrencyLoaderDeps {
//!     strings: Arc::new(ResourceStrings::en_us()),
//!     client: Some(Arc::new(HttpCurrencyClient::new(endpoint, timeout)?)),
//!     cache: Arc::new(FileCacheStore::new("cache")),
//!     settings: Arc::new(MemorySettingsStore::new()),
//!     network: Arc::new(NetworkMonitor::default()),
//! })?;
//!
//! loader.load_data().await;
//! ```

pub mod error;
pub mod config;
pub mod client;
pub mod cache;
pub mod settings;
pub mod network;
pub mod parse;
pub mod format;
pub mod defaults;
pub mod loader;

pub use error::{LoadError, LoadResult};
pub use config::CurrencyLoaderConfig;
pub use client::{CurrencyHttpClient, HttpCurrencyClient};
pub use cache::{CacheStore, FileCacheStore, MemoryCacheStore};
pub use settings::{JsonFileSettingsStore, MemorySettingsStore};
pub use network::{NetworkMonitor, NetworkPolicyMonitor};
pub use defaults::{DefaultPairs, SelectedCurrencies};
pub use loader::{CurrencyLoadStatus, CurrencyLoader, CurrencyLoaderDeps};

#[cfg(any(test, feature = "test-utils"))]
pub use client::MockCurrencyClient;
