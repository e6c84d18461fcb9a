//! Movie catalog
//!
//! The remote movie list and the helpers that cross-reference it against
//! the liked-set.

pub mod http;
pub mod traits;
pub mod types;

// Re-exports
pub use http::HttpCatalog;
pub use traits::CatalogSource;
pub use types::MovieRecord;

use tracing::{debug, warn};

/// Fetch the catalog, degrading to an empty list on any failure
///
/// One attempt, no retry. The error is logged rather than returned.
pub async fn fetch_catalog(source: &dyn CatalogSource) -> Vec<MovieRecord> {
    match source.fetch().await {
        Ok(movies) => {
            debug!(source = source.name(), count = movies.len(), "catalog fetched");
            movies
        }
        Err(e) => {
            warn!(source = source.name(), error = %e, "catalog fetch failed, showing empty list");
            Vec::new()
        }
    }
}

/// Movies whose title is in `liked`, in catalog order
pub fn liked_in(catalog: &[MovieRecord], liked: &[String]) -> Vec<MovieRecord> {
    catalog
        .iter()
        .filter(|m| liked.contains(&m.title))
        .cloned()
        .collect()
}

/// Movies whose title is not in `liked`, in catalog order
pub fn unliked_in(catalog: &[MovieRecord], liked: &[String]) -> Vec<MovieRecord> {
    catalog
        .iter()
        .filter(|m| !liked.contains(&m.title))
        .cloned()
        .collect()
}
