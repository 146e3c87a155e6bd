//! Codec pipeline.
//!
//! Every stored document passes through the same pipeline:
//!
//! ```text
//! serialize (JSON) -> compress (zstd, optional) -> encrypt (AES-128-CBC, optional) -> text
//! ```
//!
//! Byte stages implement [`StorageCodec`] and are composed by a
//! [`CodecChain`]. [`DocumentCodec`] sits on top and produces the text that
//! is written to the store.
//!
//! # Usage
//!
//! ```
//! use doclite_storage::codec::{CodecChain, DocumentCodec, TextEncoding, ZstdCodec};
//!
//! let chain = CodecChain::new().with_stage(Box::new(ZstdCodec::default()));
//! let codec = DocumentCodec::new(chain, TextEncoding::Base64);
//!
//! let text = codec.serialize(&vec![1, 2, 3]).unwrap();
//! let back: Option<Vec<i32>> = codec.deserialize(&text).unwrap();
//! assert_eq!(back, Some(vec![1, 2, 3]));
//! ```

mod chain;
mod compression;
mod document;
mod encryption;
mod serializer;
mod traits;

pub use chain::CodecChain;
pub use compression::{ZstdCodec, DEFAULT_COMPRESSION_LEVEL};
pub use document::{DocumentCodec, TextEncoding};
pub use encryption::{Aes128CbcCodec, IV_LENGTH, KEY_LENGTH};
pub use serializer::JsonSerializer;
pub use traits::{CodecError, StorageCodec};
