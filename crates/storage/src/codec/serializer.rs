//! JSON value serializer at the base of the codec pipeline.

use serde::de::DeserializeOwned;
use serde::Serialize;

use doclite_core::{Error, Result};

/// Converts documents to and from JSON bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    /// Serialize `value` to JSON bytes
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| Error::SerializationError(e.to_string()))
    }

    /// Deserialize JSON bytes
    ///
    /// An empty buffer yields `None`.
    pub fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Option<T>> {
        if bytes.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(bytes)
            .map(Some)
            .map_err(|e| Error::SerializationError(e.to_string()))
    }
}
