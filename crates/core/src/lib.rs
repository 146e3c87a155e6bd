//! Core types and traits for DocLite
//!
//! This crate defines the foundational types used throughout the system:
//! - DocumentId: identifier value of a document (integral, GUID, text)
//! - Identified / Document: compile-time identifier access and naming
//! - KeyCodec: ordered string keys from (document name, identifier)
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod id;
pub mod key;

pub use document::{short_type_name, visit_each, Document, Identified};
pub use error::{Error, Result};
pub use id::DocumentId;
pub use key::{KeyCodec, KEY_SEPARATOR};
