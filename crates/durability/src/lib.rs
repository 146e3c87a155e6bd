//! Durability layer for DocLite
//!
//! This crate implements the persistent ordered store:
//! - Record encoding with CRC32 checksums
//! - Append-only record log with tail recovery and compaction
//! - Store directory layout and exclusive locking
//! - PersistentStore, an `OrderedStore` that survives restarts

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod encoding;
pub mod log;
pub mod paths;
pub mod persistent;

pub use encoding::LogRecord;
pub use paths::StorePaths;
pub use persistent::PersistentStore;
