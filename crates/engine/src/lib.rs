//! Document engine for DocLite
//!
//! This crate ties the lower layers together:
//! - SessionFactory: builds the codec pipeline and opens the store
//! - Session: typed CRUD, lookups, paging and cardinality queries
//! - Identifier assignment (sequential GUIDs, auto-increment counters)
//! - Configuration via builder or `doclite.toml`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod factory;
pub mod identity;
pub mod session;

pub use config::{ConfigError, SessionFactoryConfig, CONFIG_FILE_NAME};
pub use factory::SessionFactory;
pub use identity::{IdentifierAssignor, NextAutoId};
pub use session::Session;
