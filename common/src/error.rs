//! Error types for the conversion data model.

use crate::identifiers::{CategoryId, UnitId};
use thiserror::Error;

/// Errors raised by table lookups and configuration checks.
#[derive(Error, Debug)]
pub enum ConvDataError {
    /// Category is not part of the table.
    #[error("Unknown category: {0}")]
    UnknownCategory(CategoryId),

    /// Unit is not part of the table.
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// No conversion exists between the two units.
    #[error("No conversion from {from} to {to}")]
    NoConversion { from: UnitId, to: UnitId },

    /// A ratio-map entry references a unit missing from every unit list.
    #[error("Unit {0} has ratios but is not listed in any category")]
    OrphanUnit(UnitId),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Settings could not be persisted.
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ConvDataError {
    /// Get error code for logs and the UI layer.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConvDataError::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            ConvDataError::UnknownUnit(_) => "UNKNOWN_UNIT",
            ConvDataError::NoConversion { .. } => "NO_CONVERSION",
            ConvDataError::OrphanUnit(_) => "ORPHAN_UNIT",
            ConvDataError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            ConvDataError::StorageError(_) => "STORAGE_ERROR",
        }
    }
}

/// Result type alias for conversion data operations.
pub type Result<T> = std::result::Result<T, ConvDataError>;
