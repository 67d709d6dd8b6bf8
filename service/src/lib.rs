//! ConvData Conversion Service
//!
//! A single entry point over the static unit graph and the currency loader.

pub mod config;
pub mod service;

pub use config::ServiceConfig;
pub use service::{ConversionService, TracingCallback};
