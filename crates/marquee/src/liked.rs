//! Liked movies
//!
//! The set of movie titles the user has marked as liked. Titles are the
//! identity key; the list keeps insertion order and never holds a title
//! twice.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::config::keys::LIKED_MOVIES;
use crate::error::Result;
use crate::preference::{HydrateOutcome, Preference};
use crate::storage::KeyValueStore;

/// Liked-movie titles mirrored to the `likedMovies` storage key
pub struct LikedMovies {
    titles: Preference<Vec<String>>,
}

impl LikedMovies {
    /// Create an empty set; call [`initialize`](Self::initialize) to load stored titles
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            titles: Preference::new(store, LIKED_MOVIES, Vec::new()),
        }
    }

    /// Create the set and load stored titles
    pub async fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let liked = Self::new(store);
        liked.initialize().await;
        liked
    }

    /// Load stored titles. Never fails; on error the set is left as it was.
    pub async fn initialize(&self) -> HydrateOutcome {
        self.titles.hydrate_with(dedup_titles).await
    }

    /// Mark `title` as liked. Returns false if it already was.
    pub fn add_liked_movie(&self, title: &str) -> bool {
        let added = self.titles.update(|titles| {
            if titles.iter().any(|t| t == title) {
                return false;
            }
            titles.push(title.to_string());
            true
        });
        debug!(title, added, "add liked movie");
        added
    }

    /// Unmark `title`. Returns false if it was not liked.
    pub fn remove_liked_movie(&self, title: &str) -> bool {
        let removed = self.titles.update(|titles| {
            let before = titles.len();
            titles.retain(|t| t != title);
            titles.len() != before
        });
        debug!(title, removed, "remove liked movie");
        removed
    }

    /// Flip the liked state of `title`. Returns the new state.
    pub fn toggle_liked_movie(&self, title: &str) -> bool {
        let mut liked = false;
        self.titles.update(|titles| {
            let before = titles.len();
            titles.retain(|t| t != title);
            if titles.len() == before {
                titles.push(title.to_string());
                liked = true;
            }
            true
        });
        liked
    }

    /// Whether `title` is currently liked
    pub fn is_movie_liked(&self, title: &str) -> bool {
        self.titles.with(|titles| titles.iter().any(|t| t == title))
    }

    /// Snapshot of the liked titles in insertion order
    pub fn liked_movies(&self) -> Vec<String> {
        self.titles.get()
    }

    /// Number of liked titles
    pub fn len(&self) -> usize {
        self.titles.with(Vec::len)
    }

    /// Whether no title is liked
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Observe the liked titles
    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.titles.subscribe()
    }

    /// Wait for pending writes; fails if any of them failed
    pub async fn flush(&self) -> Result<()> {
        self.titles.flush().await
    }
}

/// Drop repeated titles, keeping the first occurrence
fn dedup_titles(titles: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(titles.len());
    for title in titles {
        if !unique.contains(&title) {
            unique.push(title);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::FlakyStore;
    use crate::storage::{FileStore, MemoryStore};
    use std::env::temp_dir;
    use std::sync::atomic::{AtomicU32, Ordering};

    static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_root() -> std::path::PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        temp_dir().join(format!("marquee_liked_test_{}_{}", std::process::id(), id))
    }

    fn empty_liked() -> (Arc<MemoryStore>, LikedMovies) {
        let store = Arc::new(MemoryStore::new());
        let liked = LikedMovies::new(store.clone());
        (store, liked)
    }

    #[tokio::test]
    async fn test_add_and_query() {
        let (_, liked) = empty_liked();

        assert!(liked.add_liked_movie("A"));
        assert!(liked.is_movie_liked("A"));
        assert!(!liked.is_movie_liked("B"));
        assert_eq!(liked.len(), 1);
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let (store, liked) = empty_liked();

        assert!(liked.add_liked_movie("A"));
        assert!(!liked.add_liked_movie("A"));
        liked.flush().await.unwrap();

        assert_eq!(liked.liked_movies(), vec!["A".to_string()]);
        assert_eq!(store.raw(LIKED_MOVIES).as_deref(), Some(r#"["A"]"#));
    }

    #[tokio::test]
    async fn test_remove() {
        let (store, liked) = empty_liked();

        liked.add_liked_movie("A");
        liked.add_liked_movie("B");
        assert!(liked.remove_liked_movie("A"));
        liked.flush().await.unwrap();

        assert!(!liked.is_movie_liked("A"));
        assert!(liked.is_movie_liked("B"));
        assert_eq!(store.raw(LIKED_MOVIES).as_deref(), Some(r#"["B"]"#));
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let (_, liked) = empty_liked();
        liked.add_liked_movie("A");
        let mut rx = liked.subscribe();

        assert!(!liked.remove_liked_movie("Z"));
        assert_eq!(liked.liked_movies(), vec!["A".to_string()]);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_liked_iff_last_op_was_add() {
        let (_, liked) = empty_liked();
        let ops = [
            ("A", true),
            ("B", true),
            ("A", false),
            ("A", true),
            ("B", false),
            ("B", false),
            ("C", true),
            ("A", false),
        ];

        for (title, add) in ops {
            if add {
                liked.add_liked_movie(title);
            } else {
                liked.remove_liked_movie(title);
            }
        }

        assert!(!liked.is_movie_liked("A"));
        assert!(!liked.is_movie_liked("B"));
        assert!(liked.is_movie_liked("C"));
    }

    #[tokio::test]
    async fn test_insertion_order() {
        let (_, liked) = empty_liked();
        for title in ["Heat", "Alien", "Brazil"] {
            liked.add_liked_movie(title);
        }
        assert_eq!(liked.liked_movies(), vec!["Heat", "Alien", "Brazil"]);
    }

    #[tokio::test]
    async fn test_toggle() {
        let (_, liked) = empty_liked();

        assert!(liked.toggle_liked_movie("A"));
        assert!(liked.is_movie_liked("A"));

        assert!(!liked.toggle_liked_movie("A"));
        assert!(!liked.is_movie_liked("A"));
    }

    #[tokio::test]
    async fn test_initialize_without_stored_entry() {
        let (_, liked) = empty_liked();
        assert_eq!(liked.initialize().await, HydrateOutcome::Missing);
        assert!(liked.is_empty());
    }

    #[tokio::test]
    async fn test_initialize_dedups_stored_titles() {
        let store = Arc::new(MemoryStore::with_entries([(
            LIKED_MOVIES,
            r#"["A","B","A","C","B"]"#,
        )]));
        let liked = LikedMovies::open(store).await;
        assert_eq!(liked.liked_movies(), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_initialize_read_failure_leaves_empty_set() {
        let store = Arc::new(FlakyStore::failing_reads());
        let liked = LikedMovies::new(store);

        assert_eq!(liked.initialize().await, HydrateOutcome::Failed);
        assert!(liked.is_empty());
    }

    #[tokio::test]
    async fn test_initialize_wrong_shape_leaves_empty_set() {
        let store = Arc::new(MemoryStore::with_entries([(LIKED_MOVIES, r#"{"A":1}"#)]));
        let liked = LikedMovies::new(store);

        assert_eq!(liked.initialize().await, HydrateOutcome::Failed);
        assert!(liked.is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_keeps_memory_state() {
        let store = Arc::new(FlakyStore::failing_writes());
        let liked = LikedMovies::new(store);

        liked.add_liked_movie("A");
        assert!(liked.flush().await.is_err());
        assert!(liked.is_movie_liked("A"));
    }

    #[tokio::test]
    async fn test_file_roundtrip_across_restart() {
        let root = temp_root();

        {
            let liked = LikedMovies::open(Arc::new(FileStore::new(&root))).await;
            liked.add_liked_movie("Alien");
            liked.add_liked_movie("Heat");
            liked.add_liked_movie("Brazil");
            liked.remove_liked_movie("Heat");
            liked.flush().await.unwrap();
        }

        {
            let liked = LikedMovies::open(Arc::new(FileStore::new(&root))).await;
            assert_eq!(liked.liked_movies(), vec!["Alien", "Brazil"]);
        }

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn test_dedup_titles() {
        let titles = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(dedup_titles(titles), vec!["b", "a"]);
    }
}
