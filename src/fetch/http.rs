// src/fetch/http.rs
// =============================================================================
// The real page fetcher, backed by reqwest.
//
// Key functionality:
// - One shared client (connection pooling) with a per-request timeout
// - Only HTTP 200 counts as success; every other status is a FetchError
// - Transport failures are categorized into readable messages
// =============================================================================

use super::{FetchError, Fetcher};
use reqwest::{Client, StatusCode};
use std::time::Duration;

// Fetches pages over HTTP(S)
//
// Client is cheap to clone (it's an Arc internally), so HttpFetcher is too.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        // text() decodes using the charset from Content-Type (UTF-8 by default)
        response.text().await.map_err(categorize_error)
    }
}

// Turns a reqwest error into a transport FetchError with a short reason
fn categorize_error(error: reqwest::Error) -> FetchError {
    let error_string = error.to_string();

    let reason = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "could not resolve hostname".to_string()
        } else {
            format!("connection failed: {}", error_string)
        }
    } else if error.is_builder() {
        format!("invalid request: {}", error_string)
    } else if error.is_body() || error.is_decode() {
        format!("failed to read body: {}", error_string)
    } else {
        error_string
    };

    FetchError::Transport(reason)
}
