//! Catalog source trait
//!
//! Defines the interface for anything that can produce the movie list.

use async_trait::async_trait;

use crate::error::Result;

use super::types::MovieRecord;

/// A source of the full movie list
///
/// Sources are stateless: every call fetches afresh, nothing is cached.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Display name for logs (e.g., "HTTP catalog")
    fn name(&self) -> &str;

    /// Fetch every movie in the catalog
    async fn fetch(&self) -> Result<Vec<MovieRecord>>;
}
