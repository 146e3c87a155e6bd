//! Session Comprehensive Test Suite
//!
//! End-to-end coverage of the document API through `SessionFactory` and
//! `Session`, across every store and codec combination.
//!
//! ## Modules
//!
//! - `crud`: add, get, get_many, get_all, remove, overwrite
//! - `empty_session`: every query against an empty store
//! - `queries`: first/last/single and their `_or_default` variants
//! - `paging`: positional paging over the whole store
//! - `identifiers`: auto-increment, sequential GUIDs, singletons
//! - `codec_stages`: what actually lands in the store per pipeline
//! - `persistence`: reopen, locking, drop_store
//! - `concurrency`: sessions on several threads
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test session_comprehensive
//! cargo test --test session_comprehensive paging::
//! ```

#![allow(dead_code)]

use doclite::{
    visit_each, Document, DocumentId, Identified, Result, SessionFactory, SessionFactoryConfig,
};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use uuid::Uuid;

pub const KEY: &str = "ABCDEFGHIJKLMNOP";

// ============================================================================
// Fixture documents
// ============================================================================

/// Document with an auto-increment `i32` id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDocument {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl TestDocument {
    pub fn new(id: i32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: "something good!".to_string(),
        }
    }
}

impl Identified for TestDocument {
    fn id(&self) -> Option<DocumentId> {
        Some(self.id.into())
    }

    fn set_id(&mut self, id: DocumentId) -> Result<()> {
        self.id = id.try_into()?;
        Ok(())
    }
}

impl Document for TestDocument {}

/// Document whose GUID id is private and only set through `set_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentWithGuid {
    id: Uuid,
    pub name: String,
    pub some_other_property: String,
}

impl DocumentWithGuid {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.to_string(),
            some_other_property: "backing field with different name".to_string(),
        }
    }

    pub fn guid(&self) -> Uuid {
        self.id
    }
}

impl Identified for DocumentWithGuid {
    fn id(&self) -> Option<DocumentId> {
        Some(self.id.into())
    }

    fn set_id(&mut self, id: DocumentId) -> Result<()> {
        self.id = id.try_into()?;
        Ok(())
    }
}

impl Document for DocumentWithGuid {}

/// Document without an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingletonDocument {
    pub name: String,
}

impl Identified for SingletonDocument {}
impl Document for SingletonDocument {}

/// Child entity with its own GUID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: Uuid,
    pub sku: String,
}

impl Identified for OrderLine {
    fn id(&self) -> Option<DocumentId> {
        Some(self.id.into())
    }

    fn set_id(&mut self, id: DocumentId) -> Result<()> {
        self.id = id.try_into()?;
        Ok(())
    }
}

/// Root with an `i64` id and GUID children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub lines: Vec<OrderLine>,
}

impl Order {
    pub fn with_lines(skus: &[&str]) -> Self {
        Self {
            id: 0,
            lines: skus
                .iter()
                .map(|sku| OrderLine {
                    id: Uuid::nil(),
                    sku: sku.to_string(),
                })
                .collect(),
        }
    }
}

impl Identified for Order {
    fn id(&self) -> Option<DocumentId> {
        Some(self.id.into())
    }

    fn set_id(&mut self, id: DocumentId) -> Result<()> {
        self.id = id.try_into()?;
        Ok(())
    }

    fn visit_children(
        &mut self,
        visit: &mut dyn FnMut(&mut dyn Identified) -> Result<()>,
    ) -> Result<()> {
        visit_each(self.lines.iter_mut(), visit)
    }
}

impl Document for Order {}

/// Document stored under a custom name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i16,
    pub total: u64,
}

impl Identified for Invoice {
    fn id(&self) -> Option<DocumentId> {
        Some(self.id.into())
    }

    fn set_id(&mut self, id: DocumentId) -> Result<()> {
        self.id = id.try_into()?;
        Ok(())
    }
}

impl Document for Invoice {
    fn document_name() -> std::borrow::Cow<'static, str> {
        "Bill".into()
    }
}

/// Document with a `u8` id, for overflow checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tiny {
    pub id: u8,
}

impl Identified for Tiny {
    fn id(&self) -> Option<DocumentId> {
        Some(self.id.into())
    }

    fn set_id(&mut self, id: DocumentId) -> Result<()> {
        self.id = id.try_into()?;
        Ok(())
    }
}

impl Document for Tiny {}

/// Document whose id cannot be written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadOnlyId {
    pub id: i32,
}

impl Identified for ReadOnlyId {
    fn id(&self) -> Option<DocumentId> {
        Some(self.id.into())
    }
}

impl Document for ReadOnlyId {}

/// Document with an opaque text id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
}

impl Identified for Tag {
    fn id(&self) -> Option<DocumentId> {
        Some(self.id.as_str().into())
    }
}

impl Document for Tag {}

// ============================================================================
// Factories
// ============================================================================

/// Adds codec options to a base configuration
pub type Configure = fn(SessionFactoryConfig) -> SessionFactoryConfig;

pub fn plain(config: SessionFactoryConfig) -> SessionFactoryConfig {
    config
}

pub fn compressed(config: SessionFactoryConfig) -> SessionFactoryConfig {
    config.compress()
}

pub fn encrypted(config: SessionFactoryConfig) -> SessionFactoryConfig {
    config.encrypt_with_key(KEY)
}

pub fn compressed_encrypted(config: SessionFactoryConfig) -> SessionFactoryConfig {
    config.compress().encrypt_with_key(KEY)
}

/// Codec pipelines exercised by the suite
pub fn pipelines() -> Vec<(&'static str, Configure)> {
    vec![
        ("plain", plain as Configure),
        ("compressed", compressed),
        ("encrypted", encrypted),
        ("compressed+encrypted", compressed_encrypted),
    ]
}

/// In-memory factory without byte stages
pub fn in_memory() -> SessionFactory {
    SessionFactory::open(SessionFactoryConfig::new().in_memory()).unwrap()
}

/// Persistent factory with its own temporary directory
pub struct TempFactory {
    pub factory: SessionFactory,
    pub dir: TempDir,
}

impl TempFactory {
    pub fn open() -> Self {
        Self::with(plain)
    }

    pub fn with(configure: Configure) -> Self {
        let dir = TempDir::new().unwrap();
        let config = configure(SessionFactoryConfig::new().store_at(dir.path()));
        let factory = SessionFactory::open(config).unwrap();
        Self { factory, dir }
    }
}

/// Run `check` against every store kind and pipeline
pub fn for_each_factory(check: impl Fn(&str, &SessionFactory)) {
    for (name, configure) in pipelines() {
        let factory = SessionFactory::open(configure(SessionFactoryConfig::new().in_memory())).unwrap();
        check(&format!("in-memory/{}", name), &factory);

        let temp = TempFactory::with(configure);
        check(&format!("persistent/{}", name), &temp.factory);
    }
}

mod concurrency;
mod crud;
mod paging;
