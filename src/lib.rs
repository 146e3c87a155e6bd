//! DocLite - lightweight embedded document store
//!
//! DocLite stores serde-serializable documents in an ordered key/value store,
//! one key per document: `"{DocumentName}-{id}"`, or just `"{DocumentName}"`
//! for singletons. Documents can be compressed (zstd) and encrypted
//! (AES-128-CBC) on their way to the store.
//!
//! # Quick Start
//!
//! ```
//! use doclite::{Document, DocumentId, Identified, Result, SessionFactory, SessionFactoryConfig};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Customer {
//!     id: i64,
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
//! let factory = SessionFactory::open(SessionFactoryConfig::new().in_memory().compress())?;
//! let session = factory.open_session();
//!
//! let mut customer = Customer { id: 0, name: "foo bar".into() };
//! session.add(&mut customer)?;
//!
//! assert_eq!(session.count::<Customer>()?, 1);
//! assert_eq!(session.single::<Customer>()?.id, 1);
//! # Ok::<(), doclite::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `doclite-core`: errors, identifiers, document traits, key codec
//! - `doclite-storage`: ordered store trait, in-memory store, codec pipeline
//! - `doclite-durability`: record log and the persistent store
//! - `doclite-engine`: sessions, the session factory, configuration

pub use doclite_core::{
    short_type_name, visit_each, Document, DocumentId, Error, Identified, KeyCodec, Result,
};
pub use doclite_durability::PersistentStore;
pub use doclite_engine::{
    ConfigError, NextAutoId, Session, SessionFactory, SessionFactoryConfig, CONFIG_FILE_NAME,
};
pub use doclite_storage::codec;
pub use doclite_storage::{InMemoryStore, OrderedStore};

pub use uuid::Uuid;
