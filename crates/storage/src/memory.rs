//! InMemoryStore: non-durable ordered store
//!
//! This module implements the OrderedStore trait using:
//! - `BTreeMap<String, String>` for ordered key storage
//! - `parking_lot::RwLock` for thread-safe access
//!
//! The durable store keeps its live state in an `InMemoryStore` as well and
//! only adds the log on top, so both share the same ordering semantics.

use std::collections::BTreeMap;
use std::ops::Bound;

use parking_lot::RwLock;

use doclite_core::Result;

use crate::traits::OrderedStore;

/// Ordered in-memory store using BTreeMap with RwLock
///
/// Thread-safe through `parking_lot::RwLock`. Flush and close are no-ops;
/// all data is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<BTreeMap<String, String>>,
}

impl InMemoryStore {
    /// Create a new empty InMemoryStore
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a store pre-populated with `entries`
    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self {
            data: RwLock::new(entries),
        }
    }

    /// Insert, returning whether the key was new
    pub fn insert(&self, key: String, value: String) -> bool {
        self.data.write().insert(key, value).is_none()
    }

    /// Remove, returning whether the key existed
    pub fn delete(&self, key: &str) -> bool {
        self.data.write().remove(key).is_some()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// True if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl OrderedStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        self.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.delete(key))
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.data.read().contains_key(key))
    }

    fn entries(&self) -> Result<Vec<(String, String)>> {
        let data = self.data.read();
        Ok(data.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.data.read().keys().cloned().collect())
    }

    fn key_range(&self, skip: usize, take: usize) -> Result<Vec<String>> {
        let data = self.data.read();
        Ok(data.keys().skip(skip).take(take).cloned().collect())
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        let data = self.data.read();

        let results = data
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(results)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.len())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }
}
