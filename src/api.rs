//! HTTP client for the distributions listing endpoint.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::models::{FilterState, PageResponse};
use crate::query::listing_url;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {status}")]
    Status { status: StatusCode },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Listing client bound to one base URL.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DistributionsClient {
    base_url: String,
    http: reqwest::Client,
}

impl DistributionsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of distributions for `filters`.
    ///
    /// Exactly one GET is issued; there are no retries.
    pub async fn list(&self, filters: &FilterState) -> Result<PageResponse, ApiError> {
        let url = listing_url(&self.base_url, filters);
        debug!(%url, "fetching distributions");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(%url, %status, "listing request rejected");
            return Err(ApiError::Status { status });
        }

        let body = response.text().await?;
        let page: PageResponse = serde_json::from_str(&body)?;
        debug!(rows = page.data.len(), "listing decoded");
        Ok(page)
    }
}
