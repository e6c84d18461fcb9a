//! Durable key-value storage
//!
//! String values under string keys. Every backend is async and may fail;
//! the preference stores decide what a failure means.

pub mod file;
pub mod memory;

#[cfg(test)]
pub(crate) mod testing;

pub use file::{config_dir, FileStore};
pub use memory::MemoryStore;

use crate::error::Result;
use async_trait::async_trait;

/// A durable string-to-string map
///
/// Values are overwritten wholesale; there are no partial updates.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if it was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
