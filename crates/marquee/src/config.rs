//! Configuration constants for the preference layer

/// Application metadata
pub mod app {
    /// Application name (used for the config directory)
    pub const NAME: &str = "marquee";
}

/// Fixed storage keys, one per preference store
pub mod keys {
    /// Liked movie titles, stored as a JSON array of strings
    pub const LIKED_MOVIES: &str = "likedMovies";

    /// Display mode, stored as a JSON boolean (`true` = dark)
    pub const THEME_MODE: &str = "themeMode";
}

/// File store layout
pub mod storage {
    /// Extension appended to each key to form its file name
    pub const FILE_EXTENSION: &str = "json";
}
