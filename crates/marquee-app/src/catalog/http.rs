//! HTTP catalog source
//!
//! Implementation of `CatalogSource` over a single JSON `GET`.

use async_trait::async_trait;

use crate::config::catalog::DEFAULT_CATALOG_URL;
use crate::error::Result;
use crate::network::HttpClient;

use super::traits::CatalogSource;
use super::types::MovieRecord;

/// Catalog fetched from a fixed endpoint returning a JSON array of movies
pub struct HttpCatalog {
    client: HttpClient,
    url: String,
}

impl HttpCatalog {
    /// Create a source for the default endpoint
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_CATALOG_URL)
    }

    /// Create a source for a custom endpoint (for testing or mirrors)
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(HttpClient::new()?, url))
    }

    /// Create a source sharing an existing client
    pub fn with_client(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Endpoint this source reads
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    fn name(&self) -> &str {
        "HTTP catalog"
    }

    async fn fetch(&self) -> Result<Vec<MovieRecord>> {
        self.client.get_json(&self.url).await
    }
}
