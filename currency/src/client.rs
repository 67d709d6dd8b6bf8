//! HTTP access to the currency metadata and ratio endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::{LoadError, LoadResult};

/// Fetches the two raw currency payloads.
///
/// Both methods return the response body untouched; parsing happens in the
/// loader so that the same bytes can be written to the cache.
#[async_trait]
pub trait CurrencyHttpClient: Send + Sync {
    /// Fetch currency metadata localized for `language`.
    async fn get_currency_metadata(&self, language: &str) -> LoadResult<String>;

    /// Fetch every currency's ratio relative to `source_currency`.
    async fn get_currency_ratios(&self, source_currency: &str) -> LoadResult<String>;
}

/// reqwest-backed client for a currency data service.
pub struct HttpCurrencyClient {
    http: Client,
    base_url: String,
}

impl HttpCurrencyClient {
    /// Create a client rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> LoadResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("convdata/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get(&self, path: &str, query: (&str, &str)) -> LoadResult<String> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, query = ?query, "Requesting currency data");

        let response = self.http.get(&url).query(&[query]).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Http {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl CurrencyHttpClient for HttpCurrencyClient {
    async fn get_currency_metadata(&self, language: &str) -> LoadResult<String> {
        self.get("metadata", ("localizeFor", language)).await
    }

    async fn get_currency_ratios(&self, source_currency: &str) -> LoadResult<String> {
        self.get("ratios", ("localCurrency", source_currency)).await
    }
}

/// Mock currency client for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockCurrencyClient {
    metadata: parking_lot::RwLock<String>,
    ratios: parking_lot::RwLock<String>,
    fail: std::sync::atomic::AtomicBool,
    calls: dashmap::DashMap<&'static str, usize>,
    delay: parking_lot::RwLock<Duration>,
    in_flight: std::sync::atomic::AtomicUsize,
    max_in_flight: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockCurrencyClient {
    /// Sample metadata payload with USD and EUR.
    pub const METADATA: &'static str = r#"[{"CountryCode":"USA","CountryName":"United States","CurrencyCode":"USD","CurrencyName":"Dollar","CurrencySymbol":"$"},{"CountryCode":"EUR","CountryName":"Europe","CurrencyCode":"EUR","CurrencyName":"Euro","CurrencySymbol":"€"}]"#;

    /// Sample ratios payload with USD and EUR.
    pub const RATIOS: &'static str = r#"[{"An":"USD","Ch":0,"Pc":0,"Rt":1},{"An":"EUR","Ch":0.003803,"Pc":0.4149,"Rt":0.920503,"Yh":0.9667,"Yl":0.86701}]"#;

    /// Create a mock serving the sample payloads.
    pub fn new() -> Self {
        Self::with_payloads(Self::METADATA, Self::RATIOS)
    }

    /// Create a mock serving custom payloads.
    pub fn with_payloads(metadata: impl Into<String>, ratios: impl Into<String>) -> Self {
        Self {
            metadata: parking_lot::RwLock::new(metadata.into()),
            ratios: parking_lot::RwLock::new(ratios.into()),
            fail: std::sync::atomic::AtomicBool::new(false),
            calls: dashmap::DashMap::new(),
            delay: parking_lot::RwLock::new(Duration::ZERO),
            in_flight: std::sync::atomic::AtomicUsize::new(0),
            max_in_flight: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Create a mock whose every request fails.
    pub fn failing() -> Self {
        let client = Self::new();
        client.set_failing(true);
        client
    }

    /// Make subsequent requests fail or succeed.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Replace the ratios payload.
    pub fn set_ratios(&self, ratios: impl Into<String>) {
        *self.ratios.write() = ratios.into();
    }

    /// Number of requests issued to an endpoint (`"metadata"` or `"ratios"`).
    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls.get(endpoint).map(|c| *c).unwrap_or(0)
    }

    /// Hold every response for `delay` before answering.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write() = delay;
    }

    /// Highest number of requests that were in flight at the same time.
    pub fn max_concurrent_requests(&self) -> usize {
        self.max_in_flight.load(std::sync::atomic::Ordering::SeqCst)
    }

    async fn respond(&self, endpoint: &'static str, body: &parking_lot::RwLock<String>) -> LoadResult<String> {
        use std::sync::atomic::Ordering;

        *self.calls.entry(endpoint).or_insert(0) += 1;
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        let delay = *self.delay.read();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(LoadError::Network(format!("{} unreachable", endpoint)));
        }
        Ok(body.read().clone())
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Default for MockCurrencyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl CurrencyHttpClient for MockCurrencyClient {
    async fn get_currency_metadata(&self, _language: &str) -> LoadResult<String> {
        self.respond("metadata", &self.metadata).await
    }

    async fn get_currency_ratios(&self, _source_currency: &str) -> LoadResult<String> {
        self.respond("ratios", &self.ratios).await
    }
}
