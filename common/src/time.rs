//! Time constants and helpers for cache freshness.

use chrono::{DateTime, Duration, Utc};

/// Freshness constants.
pub mod constants {
    use super::Duration;

    /// Maximum age of cached currency data before a refresh is attempted (24 hours).
    pub fn cache_max_age() -> Duration {
        Duration::hours(24)
    }

    /// Age after which cached currency data is flagged as outdated (7 days).
    pub fn stale_warning_age() -> Duration {
        Duration::days(7)
    }
}

/// A UTC timestamp.
pub type Timestamp = DateTime<Utc>;

/// Get the current timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Check if a timestamp lies further in the past than `age`.
pub fn is_older_than(timestamp: Timestamp, age: Duration) -> bool {
    now() - timestamp > age
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_older_than() {
        let yesterday = now() - Duration::hours(25);
        assert!(is_older_than(yesterday, constants::cache_max_age()));

        let recent = now() - Duration::hours(1);
        assert!(!is_older_than(recent, constants::cache_max_age()));
    }

    #[test]
    fn test_future_timestamp_is_fresh() {
        let future = now() + Duration::hours(1);
        assert!(!is_older_than(future, Duration::zero()));
    }
}
