//! ConvData Static Units
//!
//! Builds the conversion graph for every fixed measurement category.
//!
//! # Features
//!
//! - Linear categories derived from one base factor per unit
//! - Explicit affine conversions for temperature
//! - Region-aware default source/target units
//! - Localized unit and category names
//!
//! # Example
//!
//! ```rust,ignore
//! use convdata_common::{CategoryId, ResourceStrings, StaticUnit};
//! use convdata_units::{RegionPreferences, StaticGraphBuilder};
//!
//! let strings = ResourceStrings::en_us();
//! let table = StaticGraphBuilder::new(&strings, RegionPreferences::for_region("US")).build();
//!
//! let feet = table.find_unit(CategoryId::Length, "ft").unwrap();
//! let meters = table.find_unit(CategoryId::Length, "m").unwrap();
//! assert_eq!(table.convert(10.0, feet, meters), Some(3.048));
//! ```

pub mod region;
pub mod data;
pub mod builder;
pub mod loader;

pub use region::RegionPreferences;
pub use builder::StaticGraphBuilder;
pub use loader::StaticDataLoader;
