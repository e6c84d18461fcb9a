//! Marquee App Services
//!
//! Movie catalog, screen view-models, and the composition root that wires
//! the preference stores to their consumers. Depends on the `marquee` core
//! crate.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod network;
pub mod screens;

pub use app::App;
pub use config::AppConfig;
pub use error::{AppError, Result};
