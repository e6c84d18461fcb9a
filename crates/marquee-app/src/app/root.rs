//! Application root
//!
//! Owns the store, both preferences and the catalog source. Nothing here is
//! global: front ends receive `Arc` handles from the `App` they built.

use std::sync::Arc;

use marquee::{FileStore, KeyValueStore, LikedMovies, ThemePreference};
use tracing::info;

use crate::catalog::{fetch_catalog, CatalogSource, HttpCatalog, MovieRecord};
use crate::config::AppConfig;
use crate::error::Result;
use crate::screens::{likes_screen, movies_screen, LikesFeed, MovieRow};

pub struct App {
    store: Arc<dyn KeyValueStore>,
    liked: Arc<LikedMovies>,
    theme: Arc<ThemePreference>,
    catalog: Arc<dyn CatalogSource>,
}

impl App {
    /// Build the app from configuration: file storage and the HTTP catalog
    pub async fn open(config: &AppConfig) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => Arc::new(FileStore::new(dir)),
            None => Arc::new(FileStore::open_default()?),
        };
        let catalog: Arc<dyn CatalogSource> = Arc::new(HttpCatalog::with_url(&config.catalog_url)?);
        Ok(Self::with_parts(store, catalog).await)
    }

    /// Build the app from explicit parts and load both preferences
    pub async fn with_parts(store: Arc<dyn KeyValueStore>, catalog: Arc<dyn CatalogSource>) -> Self {
        let liked = LikedMovies::new(Arc::clone(&store));
        let theme = ThemePreference::new(Arc::clone(&store));

        let (liked_outcome, theme_outcome) = tokio::join!(liked.initialize(), theme.initialize());
        info!(
            ?liked_outcome,
            ?theme_outcome,
            liked = liked.len(),
            theme = %theme.mode(),
            "preferences loaded"
        );

        Self {
            store,
            liked: Arc::new(liked),
            theme: Arc::new(theme),
            catalog,
        }
    }

    /// Storage backend shared by both preferences
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    /// Liked-movies store
    pub fn liked(&self) -> Arc<LikedMovies> {
        Arc::clone(&self.liked)
    }

    /// Theme store
    pub fn theme(&self) -> Arc<ThemePreference> {
        Arc::clone(&self.theme)
    }

    /// Catalog source
    pub fn catalog(&self) -> Arc<dyn CatalogSource> {
        Arc::clone(&self.catalog)
    }

    /// Fetch the catalog (empty on failure)
    pub async fn fetch_catalog(&self) -> Vec<MovieRecord> {
        fetch_catalog(self.catalog.as_ref()).await
    }

    /// Rows for the movies screen
    pub async fn movies_screen(&self) -> Vec<MovieRow> {
        let catalog = self.fetch_catalog().await;
        movies_screen(&catalog, &self.liked.liked_movies())
    }

    /// Rows for the likes screen
    pub async fn likes_screen(&self) -> Vec<MovieRow> {
        let catalog = self.fetch_catalog().await;
        likes_screen(&catalog, &self.liked.liked_movies())
    }

    /// Likes screen that refreshes itself when the liked-set changes
    pub fn likes_feed(&self) -> LikesFeed {
        LikesFeed::new(self.liked.subscribe(), self.catalog())
    }

    /// Wait for pending writes of both preferences
    ///
    /// Returns the first persistence failure, if any.
    pub async fn shutdown(&self) -> Result<()> {
        let (liked, theme) = tokio::join!(self.liked.flush(), self.theme.flush());
        liked?;
        theme?;
        info!("preferences flushed");
        Ok(())
    }
}
