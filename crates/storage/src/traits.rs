//! Ordered store abstraction
//!
//! This module defines the OrderedStore trait that lets sessions run against
//! an in-memory map or a durable engine without knowing which one they got.

use std::fmt;

use doclite_core::Result;

/// Ordered mapping from string key to string value
///
/// Iteration order is ascending byte order of the keys. All methods must be
/// safe to call concurrently from multiple threads (requires Send + Sync);
/// single-key writes are atomic, nothing else is.
pub trait OrderedStore: Send + Sync + fmt::Debug {
    /// Get the value stored under `key`
    ///
    /// Returns None if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite the value under `key`
    fn set(&self, key: &str, value: String) -> Result<()>;

    /// Remove `key`
    ///
    /// Returns true if the key existed.
    fn remove(&self, key: &str) -> Result<bool>;

    /// Check whether `key` exists
    fn contains(&self, key: &str) -> Result<bool>;

    /// All entries in ascending key order
    fn entries(&self) -> Result<Vec<(String, String)>>;

    /// All keys in ascending order
    fn keys(&self) -> Result<Vec<String>>;

    /// Up to `take` keys starting at position `skip` of the full ordering
    fn key_range(&self, skip: usize, take: usize) -> Result<Vec<String>>;

    /// Key at position `index` of the full ordering
    fn key_at(&self, index: usize) -> Result<Option<String>> {
        Ok(self.key_range(index, 1)?.into_iter().next())
    }

    /// Entries whose key starts with `prefix`, in ascending key order
    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>>;

    /// Number of entries
    fn count(&self) -> Result<usize>;

    /// Durability checkpoint
    ///
    /// No-op for non-durable implementations.
    fn flush(&self) -> Result<()>;

    /// Release handles held by the store
    ///
    /// Must not delete persisted data. Operations after close are
    /// implementation defined.
    fn close(&self) -> Result<()>;
}
