//! Artwork catalog API client implementation.
//!
//! This module provides the client for the Art Institute of Chicago public
//! REST API. It issues a single GET per page and does not retry.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, instrument, warn};

use super::error::{ApiError, Result};
use super::types::ArtworkPage;
use crate::config::Settings;

/// The artwork catalog API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ArticClient {
    /// The HTTP client.
    client: Client,
    /// The API base URL, without a trailing slash.
    base_url: String,
}

impl ArticClient {
    /// Create a new client from the application settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot
    /// be built.
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_timeout(
            &settings.base_url,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    /// Create a new client for an explicit base URL and timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url);
        if base_url.is_empty() {
            return Err(ApiError::InvalidUrl("base URL is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("artworks-tui/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self { client, base_url })
    }

    /// Fetch one page of artworks.
    ///
    /// # Arguments
    ///
    /// * `page` - The 1-based page number
    /// * `limit` - Number of artworks per page
    ///
    /// # Returns
    ///
    /// The parsed listing: the artworks on the page and the collection total.
    #[instrument(skip(self))]
    pub async fn fetch_artworks(&self, page: u32, limit: u32) -> Result<ArtworkPage> {
        debug!("Fetching artworks page");

        let url = format!("{}/artworks", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("page", page), ("limit", limit)])
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let result: ArtworkPage = Self::handle_response(response).await?;
        debug!(
            "Fetched {} artworks (total: {})",
            result.len(),
            result.total()
        );
        Ok(result)
    }

    /// Handle the HTTP response, checking the status and parsing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str::<T>(&body)
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);

            Err(Self::error_from_response(status, &url, &error_body))
        }
    }

    /// Create an error from an HTTP response, preferring the API's own message.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| {
                json.get("detail")
                    .or_else(|| json.get("error"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            });

        match detail {
            Some(detail) => ApiError::from_status(status, &format!("{} ({})", url, detail)),
            None => ApiError::from_status(status, url),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Normalize the base URL by trimming whitespace and trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');

    if !url.starts_with("https://") && !is_loopback(url) {
        warn!("URL does not use HTTPS: {}", url);
    }

    url.to_string()
}

fn is_loopback(url: &str) -> bool {
    url.contains("localhost") || url.contains("127.0.0.1")
}
