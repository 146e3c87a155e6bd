//! Session factory: owns one store and one codec pipeline
//!
//! The factory builds everything once from its configuration:
//!
//! ```text
//! SessionFactoryConfig ──► CodecChain (zstd? → aes-128-cbc?) ──► DocumentCodec
//!                      └─► InMemoryStore | PersistentStore
//! ```
//!
//! Sessions opened from a factory share both through `Arc`s.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use doclite_core::Result;
use doclite_durability::PersistentStore;
use doclite_storage::codec::{
    Aes128CbcCodec, CodecChain, DocumentCodec, TextEncoding, ZstdCodec,
};
use doclite_storage::{InMemoryStore, OrderedStore};

use crate::config::SessionFactoryConfig;
use crate::identity::IdentifierAssignor;
use crate::session::Session;

/// Hands out sessions over one configured store
#[derive(Debug)]
pub struct SessionFactory {
    config: SessionFactoryConfig,
    store: Arc<dyn OrderedStore>,
    codec: Arc<DocumentCodec>,
    assignor: Arc<IdentifierAssignor>,
    closed: bool,
}

impl SessionFactory {
    /// Validate `config`, build the codec pipeline and open the store
    ///
    /// # Errors
    ///
    /// - `Error::ConfigurationError` if validation fails
    /// - `Error::StoreLocked` if another factory holds the location
    /// - `Error::IoError` if the store directory cannot be opened
    pub fn open(config: SessionFactoryConfig) -> Result<Self> {
        config.validate()?;

        let codec = Arc::new(build_codec(&config)?);
        let store: Arc<dyn OrderedStore> = if config.is_in_memory() {
            Arc::new(InMemoryStore::new())
        } else {
            Arc::new(PersistentStore::open(config.location())?)
        };

        info!(
            location = ?config.location(),
            in_memory = config.is_in_memory(),
            pipeline = codec.pipeline_id(),
            "Opened session factory"
        );

        Ok(Self {
            config,
            store,
            codec,
            assignor: Arc::new(IdentifierAssignor::new()),
            closed: false,
        })
    }

    /// New session sharing this factory's store and codec
    pub fn open_session(&self) -> Session {
        Session::new(
            Arc::clone(&self.store),
            Arc::clone(&self.codec),
            Arc::clone(&self.assignor),
        )
    }

    /// Configured store location
    pub fn location(&self) -> &Path {
        self.config.location()
    }

    /// Configuration the factory was opened with
    pub fn config(&self) -> &SessionFactoryConfig {
        &self.config
    }

    /// Flush and release the store
    pub fn close(mut self) -> Result<()> {
        self.shutdown()
    }

    /// Close the store and delete its persisted files
    ///
    /// Files in the location that the store did not create are kept.
    pub fn drop_store(mut self) -> Result<()> {
        self.shutdown()?;
        if !self.config.is_in_memory() {
            PersistentStore::destroy(self.config.location())?;
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.store.flush()?;
        self.store.close()
    }
}

impl Drop for SessionFactory {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!(location = ?self.config.location(), error = %e, "Failed to close store");
        }
    }
}

/// Byte stages in fixed order: compress, then encrypt
fn build_codec(config: &SessionFactoryConfig) -> Result<DocumentCodec> {
    let mut chain = CodecChain::new();
    if config.is_compressed() {
        chain = chain.with_stage(Box::new(ZstdCodec::new(config.level())?));
    }
    if let Some(key) = config.encryption_key() {
        chain = chain.with_stage(Box::new(Aes128CbcCodec::new(key)?));
    }

    let encoding = if config.is_in_memory() && chain.is_empty() {
        TextEncoding::Direct
    } else {
        TextEncoding::Base64
    };
    Ok(DocumentCodec::new(chain, encoding))
}
