//! Shared HTTP client wrapper
//!
//! Thin wrapper around `reqwest::Client` that centralizes USER_AGENT and
//! timeout configuration.

use crate::config::network::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{AppError, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Shared HTTP client with standard configuration
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    /// Create a new client with default Marquee settings
    pub fn new() -> Result<Self> {
        Self::from_builder(reqwest::Client::builder())
    }

    /// Client that ignores system proxy settings (local test servers)
    #[cfg(test)]
    pub(crate) fn direct() -> Result<Self> {
        Self::from_builder(reqwest::Client::builder().no_proxy())
    }

    fn from_builder(builder: reqwest::ClientBuilder) -> Result<Self> {
        let inner = builder
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { inner })
    }

    /// GET a URL and deserialize the JSON response
    ///
    /// Non-success status codes are errors.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.inner.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let data = resp.json::<T>().await?;
        Ok(data)
    }

    /// Access the underlying reqwest client
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_inner_access() {
        let client = HttpClient::new().unwrap();
        let _inner = client.inner();
    }

    #[tokio::test]
    async fn test_get_json_invalid_url() {
        let client = HttpClient::direct().unwrap();
        let result: Result<serde_json::Value> = client.get_json("not a url").await;
        assert!(matches!(result, Err(AppError::Network(_))));
    }

    #[tokio::test]
    async fn test_get_json_unreachable_host() {
        let client = HttpClient::direct().unwrap();
        let result: Result<serde_json::Value> =
            client.get_json("http://invalid.invalid.invalid").await;
        assert!(result.is_err());
    }
}
