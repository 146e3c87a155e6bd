//! Session: the document API over one store
//!
//! Sessions are cheap handles; every session of a factory shares the same
//! store, codec and identifier assignor. All calls are synchronous.
//!
//! # Example
//!
//! ```
//! use doclite_core::{Document, DocumentId, Identified, Result};
//! use doclite_engine::{SessionFactory, SessionFactoryConfig};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Customer {
//!     id: i32,
//!     name: String,
//! }
//!
//! impl Identified for Customer {
//!     fn id(&self) -> Option<DocumentId> {
//!         Some(self.id.into())
//!     }
//!
//!     fn set_id(&mut self, id: DocumentId) -> Result<()> {
//!         self.id = id.try_into()?;
//!         Ok(())
//!     }
//! }
//!
//! impl Document for Customer {}
//!
//! let factory = SessionFactory::open(SessionFactoryConfig::new().in_memory()).unwrap();
//! let session = factory.open_session();
//!
//! let mut customer = Customer { id: 0, name: "foo bar".to_string() };
//! session.add(&mut customer).unwrap();
//! assert_eq!(customer.id, 1);
//!
//! let loaded: Customer = session.get(1i32).unwrap().unwrap();
//! assert_eq!(loaded.name, "foo bar");
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use doclite_core::{Document, DocumentId, Error, KeyCodec, Result};
use doclite_storage::codec::DocumentCodec;
use doclite_storage::OrderedStore;

use crate::identity::IdentifierAssignor;

/// Document session over a shared store
pub struct Session {
    store: Arc<dyn OrderedStore>,
    codec: Arc<DocumentCodec>,
    assignor: Arc<IdentifierAssignor>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store)
            .field("pipeline", &self.codec.pipeline_id())
            .finish()
    }
}

impl Session {
    pub(crate) fn new(
        store: Arc<dyn OrderedStore>,
        codec: Arc<DocumentCodec>,
        assignor: Arc<IdentifierAssignor>,
    ) -> Self {
        Self {
            store,
            codec,
            assignor,
        }
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Document of type `T` with identifier `id`
    ///
    /// Returns `Ok(None)` if no such document is stored.
    pub fn get<T: Document>(&self, id: impl Into<DocumentId>) -> Result<Option<T>> {
        let key = KeyCodec::key_for::<T>(Some(&id.into()));
        self.load(&key)
    }

    /// The singleton document of type `T`
    pub fn get_singleton<T: Document>(&self) -> Result<Option<T>> {
        let key = KeyCodec::key_for::<T>(None);
        self.load(&key)
    }

    /// Documents of type `T` with any of the given identifiers
    ///
    /// Missing identifiers are skipped. Results come back in store order,
    /// not in the order of `ids`.
    pub fn get_many<T, I>(&self, ids: I) -> Result<Vec<T>>
    where
        T: Document,
        I: IntoIterator,
        I::Item: Into<DocumentId>,
    {
        let name = T::document_name();
        let wanted: HashSet<String> = ids
            .into_iter()
            .map(|id| KeyCodec::key(&name, Some(&id.into())))
            .collect();

        let mut documents = Vec::with_capacity(wanted.len());
        for (key, text) in self.store.entries()? {
            if wanted.contains(&key) {
                if let Some(document) = self.codec.deserialize(&text)? {
                    documents.push(document);
                }
            }
        }
        Ok(documents)
    }

    /// Every document of type `T`, in store order
    pub fn get_all<T: Document>(&self) -> Result<Vec<T>> {
        let name = T::document_name();
        let mut documents = Vec::new();
        for (_, text) in self.scan(&name)? {
            if let Some(document) = self.codec.deserialize(&text)? {
                documents.push(document);
            }
        }
        Ok(documents)
    }

    /// Positional page over the whole store, decoded as `T`
    ///
    /// Positions count every key in the store, not only keys of `T`.
    /// Entries in the window that belong to another document name (other
    /// types, auto-increment counters) are skipped, so a page may hold fewer
    /// than `take` documents. An empty store yields an empty page.
    ///
    /// # Errors
    ///
    /// `Error::OutOfRange` if `skip + take` exceeds the number of keys.
    pub fn get_page<T: Document>(&self, skip: usize, take: usize) -> Result<Vec<T>> {
        let count = self.store.count()?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let end = skip.checked_add(take);
        if end.map_or(true, |end| end > count) {
            return Err(Error::OutOfRange { skip, take, count });
        }

        let name = T::document_name();
        let mut documents = Vec::with_capacity(take);
        for key in self.store.key_range(skip, take)? {
            if !KeyCodec::belongs_to(&key, &name) {
                continue;
            }
            if let Some(document) = self.load(&key)? {
                documents.push(document);
            }
        }
        Ok(documents)
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Assign missing identifiers and store `document`
    ///
    /// Overwrites any document already stored under the same key.
    pub fn add<T: Document>(&self, document: &mut T) -> Result<()> {
        self.assignor
            .assign(document, self.store.as_ref(), &self.codec)?;

        let key = KeyCodec::key_for::<T>(document.id().as_ref());
        let text = self.codec.serialize(document)?;
        self.store.set(&key, text)?;

        debug!(key = %key, "Stored document");
        Ok(())
    }

    /// Delete `document` by its current key
    ///
    /// Returns false if nothing was stored under that key.
    pub fn remove<T: Document>(&self, document: &T) -> Result<bool> {
        let key = KeyCodec::key_for::<T>(document.id().as_ref());
        let removed = self.store.remove(&key)?;
        debug!(key = %key, removed, "Removed document");
        Ok(removed)
    }

    // ========================================================================
    // Cardinality queries
    // ========================================================================

    /// First document of type `T` in store order
    ///
    /// # Errors
    ///
    /// `Error::NoMatch` if none is stored.
    pub fn first<T: Document>(&self) -> Result<T> {
        self.first_or_default()?.ok_or_else(no_match::<T>)
    }

    /// First document of type `T`, or `None`
    pub fn first_or_default<T: Document>(&self) -> Result<Option<T>> {
        Ok(self.get_all::<T>()?.into_iter().next())
    }

    /// Last document of type `T` in store order
    ///
    /// # Errors
    ///
    /// `Error::NoMatch` if none is stored.
    pub fn last<T: Document>(&self) -> Result<T> {
        self.last_or_default()?.ok_or_else(no_match::<T>)
    }

    /// Last document of type `T`, or `None`
    pub fn last_or_default<T: Document>(&self) -> Result<Option<T>> {
        Ok(self.get_all::<T>()?.pop())
    }

    /// The only document of type `T`
    ///
    /// # Errors
    ///
    /// - `Error::NoMatch` if none is stored
    /// - `Error::CardinalityMismatch` if more than one is stored
    pub fn single<T: Document>(&self) -> Result<T> {
        self.single_or_default()?.ok_or_else(no_match::<T>)
    }

    /// The only document of type `T`, or `None`
    ///
    /// # Errors
    ///
    /// `Error::CardinalityMismatch` if more than one is stored.
    pub fn single_or_default<T: Document>(&self) -> Result<Option<T>> {
        let mut all = self.get_all::<T>()?;
        match all.len() {
            0 => Ok(None),
            1 => Ok(all.pop()),
            found => Err(Error::CardinalityMismatch {
                document: T::document_name().into_owned(),
                found,
            }),
        }
    }

    /// True if any document of type `T` is stored
    pub fn any<T: Document>(&self) -> Result<bool> {
        Ok(self.count::<T>()? > 0)
    }

    /// Number of stored documents of type `T`
    pub fn count<T: Document>(&self) -> Result<usize> {
        Ok(self.scan(&T::document_name())?.len())
    }

    /// Make every write of this session durable
    pub fn flush(&self) -> Result<()> {
        self.store.flush()
    }

    fn load<T: Document>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key)? {
            Some(text) => self.codec.deserialize(&text),
            None => Ok(None),
        }
    }

    /// Entries in the partition of `name`
    ///
    /// A prefix scan also returns keys of longer names ("Order" matches
    /// "OrderLine-1"), so the results are filtered by partition.
    fn scan(&self, name: &str) -> Result<Vec<(String, String)>> {
        let mut entries = self.store.scan_prefix(name)?;
        entries.retain(|(key, _)| KeyCodec::belongs_to(key, name));
        Ok(entries)
    }
}

fn no_match<T: Document>() -> Error {
    Error::NoMatch {
        document: T::document_name().into_owned(),
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Err(e) = self.store.flush() {
            warn!(error = %e, "Failed to flush store when dropping session");
        }
    }
}
