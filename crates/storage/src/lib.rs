//! Storage layer for DocLite
//!
//! This crate provides:
//! - OrderedStore: the ordered string-to-string store abstraction
//! - InMemoryStore: BTreeMap-based store with RwLock
//! - codec: the serialize, compress, encrypt pipeline that turns documents
//!   into stored text

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod memory;
pub mod traits;

pub use memory::InMemoryStore;
pub use traits::OrderedStore;
