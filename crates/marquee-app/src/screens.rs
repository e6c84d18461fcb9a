//! Screen view-models
//!
//! Plain data for the two screens: the catalog minus liked movies, and the
//! liked movies found in the catalog. Rendering is up to the front end.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::catalog::{fetch_catalog, liked_in, unliked_in, CatalogSource, MovieRecord};

/// One movie as shown on a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRow {
    pub movie: MovieRecord,
    pub liked: bool,
}

/// Rows for the movies screen: everything not yet liked
pub fn movies_screen(catalog: &[MovieRecord], liked: &[String]) -> Vec<MovieRow> {
    unliked_in(catalog, liked)
        .into_iter()
        .map(|movie| MovieRow { movie, liked: false })
        .collect()
}

/// Rows for the likes screen: liked movies present in the catalog
pub fn likes_screen(catalog: &[MovieRecord], liked: &[String]) -> Vec<MovieRow> {
    liked_in(catalog, liked)
        .into_iter()
        .map(|movie| MovieRow { movie, liked: true })
        .collect()
}

/// Likes screen that re-fetches the catalog whenever the liked-set changes
///
/// The refresh policy lives here, in the consumer; the liked-movies store
/// only publishes changes.
pub struct LikesFeed {
    liked: watch::Receiver<Vec<String>>,
    source: Arc<dyn CatalogSource>,
}

impl LikesFeed {
    pub fn new(liked: watch::Receiver<Vec<String>>, source: Arc<dyn CatalogSource>) -> Self {
        Self { liked, source }
    }

    /// Fetch the catalog and build rows for the current liked-set
    pub async fn current(&mut self) -> Vec<MovieRow> {
        let titles = self.liked.borrow_and_update().clone();
        let catalog = fetch_catalog(self.source.as_ref()).await;
        likes_screen(&catalog, &titles)
    }

    /// Wait for the liked-set to change, then rebuild the rows
    ///
    /// Returns `None` once the liked-movies store has been dropped.
    pub async fn next_change(&mut self) -> Option<Vec<MovieRow>> {
        self.liked.changed().await.ok()?;
        debug!("liked movies changed, refreshing likes screen");
        Some(self.current().await)
    }
}
