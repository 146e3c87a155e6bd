//! Auto-increment counters
//!
//! Each document name owns one counter document, stored under
//! `NextAutoId-{DocumentName}` in the same store as the documents and
//! encoded with the same codec. The counter holds the last issued value.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use doclite_core::{Document, DocumentId, Error, Identified, KeyCodec, Result};
use doclite_storage::codec::DocumentCodec;
use doclite_storage::OrderedStore;

/// Persisted counter for one document name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextAutoId {
    /// Name of the counted document type
    pub id: String,
    /// Last issued identifier
    pub next_id: i64,
}

impl NextAutoId {
    fn fresh(document: &str) -> Self {
        Self {
            id: document.to_string(),
            next_id: 0,
        }
    }
}

impl Identified for NextAutoId {
    fn id(&self) -> Option<DocumentId> {
        Some(DocumentId::Text(self.id.clone()))
    }

    fn set_id(&mut self, id: DocumentId) -> Result<()> {
        self.id = id.try_into()?;
        Ok(())
    }
}

impl Document for NextAutoId {}

/// Issues integral identifiers, one counter per document name
///
/// The read-modify-write of a counter and the following store flush run
/// under one lock, so concurrent sessions of a factory never receive the
/// same value.
#[derive(Debug, Default)]
pub struct AutoIncrement {
    lock: Mutex<()>,
}

impl AutoIncrement {
    /// Create an issuer
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next identifier for `document`
    ///
    /// `template` selects the integral kind of the result. The counter is
    /// persisted and the store flushed before the value is returned.
    ///
    /// # Errors
    ///
    /// - `Error::IdentifierOverflow` if the next value does not fit the kind
    ///   of `template`; the counter is left unchanged in that case.
    /// - `Error::Corruption` if a counter record is stored but decodes to
    ///   nothing. Only a missing record starts a fresh counter.
    pub fn next_id(
        &self,
        store: &dyn OrderedStore,
        codec: &DocumentCodec,
        document: &str,
        template: &DocumentId,
    ) -> Result<DocumentId> {
        let _guard = self.lock.lock();

        let key = counter_key(document);
        let mut counter = match store.get(&key)? {
            Some(text) => codec.deserialize::<NextAutoId>(&text)?.ok_or_else(|| {
                Error::Corruption(format!("counter record {} is unreadable", key))
            })?,
            None => NextAutoId::fresh(document),
        };

        let overflow = |value: i64| Error::IdentifierOverflow {
            document: document.to_string(),
            value,
        };
        let value = counter
            .next_id
            .checked_add(1)
            .ok_or_else(|| overflow(counter.next_id))?;
        let id = template
            .with_integral_value(value)
            .ok_or_else(|| overflow(value))?;

        counter.next_id = value;
        store.set(&key, codec.serialize(&counter)?)?;
        store.flush()?;

        debug!(document, value, "Issued auto-increment id");
        Ok(id)
    }
}

/// Store key of the counter for `document`
pub fn counter_key(document: &str) -> String {
    KeyCodec::key_for::<NextAutoId>(Some(&DocumentId::Text(document.to_string())))
}
