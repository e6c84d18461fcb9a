//! Marquee — persisted movie preferences
//!
//! The liked-movies set and the light/dark theme flag, each held in memory
//! and mirrored to durable key-value storage.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use marquee::{KeyValueStore, LikedMovies, MemoryStore, ThemePreference};
//!
//! # async fn demo() {
//! let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
//! let liked = LikedMovies::open(Arc::clone(&store)).await;
//! let theme = ThemePreference::open(store).await;
//!
//! liked.add_liked_movie("Alien");
//! theme.toggle_theme();
//! # }
//! ```

pub mod config;
pub mod error;
pub mod liked;
pub mod preference;
pub mod storage;
pub mod theme;

pub use error::{Result, StoreError};
pub use liked::LikedMovies;
pub use preference::{HydrateOutcome, Preference};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use theme::{ThemeMode, ThemePreference};
