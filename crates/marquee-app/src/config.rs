//! Configuration for marquee app services
//!
//! Compile-time constants plus [`AppConfig`], the runtime settings read from
//! the environment.

use std::path::PathBuf;

/// Catalog-related configuration
pub mod catalog {
    /// Default endpoint returning the full movie list
    pub const DEFAULT_CATALOG_URL: &str =
        "https://my-json-server.typicode.com/horizon-code-academy/fake-movies-api/movies";

    /// Environment variable overriding the catalog endpoint
    pub const CATALOG_URL_ENV: &str = "MARQUEE_CATALOG_URL";
}

/// Storage-related configuration
pub mod storage {
    /// Environment variable overriding the data directory
    pub const DATA_DIR_ENV: &str = "MARQUEE_DATA_DIR";
}

/// Network-related configuration
pub mod network {
    /// User agent for HTTP requests
    pub const USER_AGENT: &str = concat!("marquee/", env!("CARGO_PKG_VERSION"));

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Whole-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Runtime settings for [`App`](crate::App)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory for the preference files; `None` uses the platform config dir
    pub data_dir: Option<PathBuf>,
    /// Endpoint returning the movie list
    pub catalog_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            catalog_url: catalog::DEFAULT_CATALOG_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `MARQUEE_DATA_DIR` and `MARQUEE_CATALOG_URL`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env_non_empty(storage::DATA_DIR_ENV).map(PathBuf::from),
            catalog_url: env_non_empty(catalog::CATALOG_URL_ENV).unwrap_or(defaults.catalog_url),
        }
    }

    /// Use `dir` for the preference files
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Fetch the catalog from `url`
    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
