//! Composition root
//!
//! `App` builds the storage backend, both preference stores and the catalog
//! source once, and hands out handles to whichever consumer needs them.

pub mod root;

pub use root::App;
