//! Error types for DocLite
//!
//! This module defines the error type shared by every layer of the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Lookups that find nothing are not errors: they return `Ok(None)` or an
//! empty collection. Only cardinality-checked queries (`first`, `last`,
//! `single`) and positional paging raise on unmet expectations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for DocLite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for DocLite
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (file operations on a persistent store)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A codec stage (compression, encryption, text encoding) failed
    #[error("Codec error: {0}")]
    CodecError(String),

    /// Invalid configuration, detected at construction time
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Positional page falls outside the store
    #[error("Page out of range: skip {skip} + take {take} exceeds {count} stored entries")]
    OutOfRange {
        /// Requested offset
        skip: usize,
        /// Requested length
        take: usize,
        /// Entries in the store
        count: usize,
    },

    /// No document of the requested type exists
    #[error("No document of type '{document}' found")]
    NoMatch {
        /// Document name that was scanned
        document: String,
    },

    /// More than one document matched where exactly one was required
    #[error("Expected exactly one document of type '{document}', found {found}")]
    CardinalityMismatch {
        /// Document name that was scanned
        document: String,
        /// Number of matching documents
        found: usize,
    },

    /// The identifier is still at its default value and cannot be assigned
    #[error("Identifier of '{document}' is not writable and still holds a default value")]
    IdentifierNotWritable {
        /// Type whose identifier could not be set
        document: String,
    },

    /// An identifier value of the wrong kind was supplied
    #[error("Identifier type mismatch: expected {expected}, got {actual}")]
    IdentifierTypeMismatch {
        /// Identifier kind the document declares
        expected: &'static str,
        /// Identifier kind that was supplied
        actual: &'static str,
    },

    /// An auto-increment value does not fit the identifier width
    #[error("Auto-increment value {value} does not fit the identifier of '{document}'")]
    IdentifierOverflow {
        /// Document name whose counter overflowed
        document: String,
        /// Counter value that could not be represented
        value: i64,
    },

    /// Data corruption detected in a persistent store
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// The store directory is held by another handle
    #[error("Store at {} is locked by another process", .0.display())]
    StoreLocked(PathBuf),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),
}
