//! `OmdbClient` - OMDb API client implementation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalOmdbApi;
use super::cache::ResponseCache;
use super::error::UpstreamError;
use super::params::{SearchParams, cache_key};
use super::types::{DetailRecord, OmdbEnvelope, OmdbSearchResponse, UpstreamPage};

/// Default OMDb endpoint.
const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";

/// Per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(8000);

/// Maximum number of retries for transient failures.
const MAX_RETRIES: u32 = 2;

/// Backoff unit; the n-th retry waits `n * RETRY_BACKOFF`.
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// OMDb API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// HTTP client (timeout applied per request).
    http_client: Client,
    /// Endpoint URL.
    base_url: Url,
    /// API key sent as `apikey`.
    api_key: String,
    /// Retries after the first attempt.
    max_retries: u32,
    /// Linear backoff unit.
    retry_backoff: Duration,
    /// Response cache, possibly shared with other clients.
    cache: Arc<ResponseCache>,
}

/// Builder for `OmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    retry_backoff: Option<Duration>,
    cache: Option<Arc<ResponseCache>>,
}

impl OmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            timeout: None,
            max_retries: None,
            retry_backoff: None,
            cache: None,
        }
    }

    /// Overrides the endpoint URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 8000ms).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the number of retries for transient failures (default: 2).
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Sets the linear backoff unit (default: 1s).
    #[must_use]
    pub const fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = Some(backoff);
        self
    }

    /// Uses an existing cache instead of a fresh one.
    #[must_use]
    pub fn cache(mut self, cache: Arc<ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<OmdbClient> {
        let api_key = self.api_key.context("api_key is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("failed to build HTTP client")?;

        Ok(OmdbClient {
            http_client,
            base_url,
            api_key,
            max_retries: self.max_retries.unwrap_or(MAX_RETRIES),
            retry_backoff: self.retry_backoff.unwrap_or(RETRY_BACKOFF),
            cache: self.cache.unwrap_or_default(),
        })
    }
}

/// Decodes a JSON body, mapping failures to `UpstreamError::Upstream`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, UpstreamError> {
    serde_json::from_str(body)
        .map_err(|e| UpstreamError::Upstream(format!("failed to decode OMDb response: {e}")))
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::new()
    }

    /// Returns the response cache.
    #[must_use]
    pub const fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// Returns the raw body for `query`, consulting the cache first.
    ///
    /// Only payloads whose `Response` flag is `"True"` are cached.
    async fn fetch(
        &self,
        key: String,
        query: &[(&str, String)],
    ) -> Result<Arc<str>, UpstreamError> {
        if let Some(body) = self.cache.get(&key).await {
            tracing::debug!(%key, "OMDb cache hit");
            return Ok(body);
        }

        let body: Arc<str> = Arc::from(self.request_with_retry(query).await?);
        let envelope: OmdbEnvelope = decode(&body)?;
        if envelope.is_success() {
            self.cache.insert(key, Arc::clone(&body)).await;
        } else {
            tracing::debug!(%key, error = ?envelope.error, "OMDb error payload, not cached");
        }
        Ok(body)
    }

    /// Sends a GET request, retrying transient failures with linear backoff.
    async fn request_with_retry(&self, query: &[(&str, String)]) -> Result<String, UpstreamError> {
        let mut retries = 0u32;
        loop {
            match self.request_once(query).await {
                Ok(body) => return Ok(body),
                Err(err) if err.is_transient() && retries < self.max_retries => {
                    retries = retries.saturating_add(1);
                    let backoff = self.retry_backoff.saturating_mul(retries);
                    tracing::warn!(
                        retry = retries,
                        max_retries = self.max_retries,
                        backoff_ms = backoff.as_millis(),
                        error = ?err,
                        "OMDb request failed. Retrying..."
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Sends a single GET request and returns the body of a 2xx response.
    async fn request_once(&self, query: &[(&str, String)]) -> Result<String, UpstreamError> {
        let request = self
            .http_client
            .get(self.base_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("apikey", self.api_key.as_str())])
            .query(query)
            .build()
            .map_err(|e| UpstreamError::Upstream(format!("failed to build request: {e}")))?;

        tracing::debug!(params = ?query, "OMDb API request");

        let response = match self.http_client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let err = UpstreamError::from_transport(&e);
                tracing::debug!(error = %e, kind = ?err, "OMDb transport failure");
                return Err(err);
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "OMDb API returned an error status");
            return Err(UpstreamError::from_status(status));
        }

        response
            .text()
            .await
            .map_err(|e| UpstreamError::from_transport(&e))
    }
}

impl LocalOmdbApi for OmdbClient {
    #[instrument(skip_all, fields(query = %params.query, page = params.page))]
    async fn search(&self, params: &SearchParams) -> Result<UpstreamPage, UpstreamError> {
        let body = self.fetch(params.cache_key(), &params.to_query()).await?;

        let envelope: OmdbEnvelope = decode(&body)?;
        if !envelope.is_success() {
            return Err(UpstreamError::from_search_message(
                &params.query,
                envelope.error.as_deref(),
            ));
        }

        let response: OmdbSearchResponse = decode(&body)?;
        let total_count = response.total_count();
        Ok(UpstreamPage {
            items: response.search,
            total_count,
            page_index: params.page,
        })
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn detail(&self, id: &str) -> Result<DetailRecord, UpstreamError> {
        let query = [("i", String::from(id))];
        let body = self.fetch(cache_key(query.clone()), &query).await?;

        let envelope: OmdbEnvelope = decode(&body)?;
        if !envelope.is_success() {
            return Err(UpstreamError::from_detail_message(
                id,
                envelope.error.as_deref(),
            ));
        }

        decode(&body)
    }
}
