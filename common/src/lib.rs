//! ConvData Common Types
//!
//! This crate contains the shared data model of the conversion engine:
//! categories, units, conversion data, the conversion table, and the
//! narrow collaborator contracts (string provider, settings store, network
//! behavior, view-model callback) the loaders consume or expose.

pub mod identifiers;
pub mod model;
pub mod table;
pub mod loader;
pub mod localization;
pub mod settings;
pub mod network;
pub mod error;
pub mod time;

pub use identifiers::*;
pub use model::*;
pub use table::ConversionTable;
pub use loader::{ConverterDataLoader, CurrencyCallback, CurrencyDataLoader};
pub use localization::{format_localized, ResourceStrings, StringProvider};
pub use settings::{SettingValue, SettingsStore};
pub use network::NetworkAccessBehavior;
pub use error::*;
