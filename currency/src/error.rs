//! Currency loader error types.

use thiserror::Error;

/// Errors raised while fetching, caching or parsing currency data.
///
/// None of these cross the loader's public boundary; they are logged and
/// collapsed into a load outcome.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP request failed with status {status}")]
    Http { status: u16 },

    /// A cache entry is missing or unreadable.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Local I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A payload is not the expected JSON shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No HTTP client was configured.
    #[error("No currency HTTP client configured")]
    MissingClient,
}

impl LoadError {
    /// Check if retrying the same operation later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            LoadError::Network(_) => true,
            LoadError::Http { status } => *status >= 500 || *status == 429,
            LoadError::Cache(_) | LoadError::Io(_) => false,
            LoadError::Parse(_) | LoadError::MissingClient => false,
        }
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => LoadError::Http {
                status: status.as_u16(),
            },
            None => LoadError::Network(err.to_string()),
        }
    }
}

/// Result type for currency loading steps.
pub type LoadResult<T> = Result<T, LoadError>;
