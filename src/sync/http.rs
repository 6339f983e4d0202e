//! HTTP catalog source backed by `reqwest`.

use super::source::{parse_catalog, CatalogSource};
use crate::domain::error::{GridError, Result};
use crate::domain::record::Record;
use async_trait::async_trait;
use std::time::Duration;
use tracing::Instrument;

/// Catalog endpoint used when none is configured.
pub const DEFAULT_SOURCE_URL: &str = "https://dummyjson.com/products";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fetches the catalog with a single HTTP GET.
///
/// # Examples
///
/// ```no_run
/// use catalog_grid::sync::{CatalogSource, HttpCatalogSource};
/// use std::time::Duration;
///
/// # async fn run() -> catalog_grid::Result<()> {
/// let source = HttpCatalogSource::new("https://dummyjson.com/products", Duration::from_secs(5))?;
/// let records = source.fetch().await?;
/// println!("{} records", records.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    url: String,
    client: reqwest::Client,
}

impl HttpCatalogSource {
    /// Creates a source for `url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Config`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GridError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request(&self) -> Result<Vec<Record>> {
        tracing::debug!("requesting catalog");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GridError::SourceUnavailable(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = %status, "catalog request rejected");
            return Err(GridError::SourceUnavailable(format!(
                "unexpected status {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| GridError::SourceUnavailable(format!("failed to read body: {e}")))?;

        let records = parse_catalog(&body)?;
        tracing::debug!(count = records.len(), bytes = body.len(), "catalog received");
        Ok(records)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Vec<Record>> {
        let span = tracing::debug_span!("http_fetch_catalog", url = %self.url);
        self.request().instrument(span).await
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
