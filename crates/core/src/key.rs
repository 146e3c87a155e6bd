//! Key encoding for documents
//!
//! All documents live in one flat, ordered key space. A key is either the
//! bare document name (singleton documents) or `"{name}-{encoded id}"`.
//!
//! ## Ordering
//!
//! For two documents of the same type, `key(a) < key(b)` iff `id(a) < id(b)`.
//! Integral identifiers are left-padded with `'0'` to a fixed width per type
//! (u8: 3, i16: 5, i32: 10, i64: 19) so lexical and numeric order agree.
//! GUIDs are encoded in their canonical lowercase hyphenated form, which
//! sorts like the underlying 128-bit value.
//!
//! ## Type scope
//!
//! A key belongs to a type iff it equals the document name or starts with
//! `"{name}-"`. Matching on the bare name prefix would let a scan for
//! `"Orde"` pick up `"Order-1"`.

use crate::document::Document;
use crate::id::DocumentId;
use std::borrow::Cow;

/// Separator between document name and encoded identifier
pub const KEY_SEPARATOR: char = '-';

/// Key codec for document names and identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyCodec;

impl KeyCodec {
    /// Document name for a type
    pub fn name_for<T: Document>() -> Cow<'static, str> {
        T::document_name()
    }

    /// Key for a document of type `T` with the given identifier
    pub fn key_for<T: Document>(id: Option<&DocumentId>) -> String {
        Self::key(&T::document_name(), id)
    }

    /// Key for a document name and identifier
    pub fn key(name: &str, id: Option<&DocumentId>) -> String {
        match Self::encode_id(id) {
            Some(encoded) => format!("{}{}{}", name, KEY_SEPARATOR, encoded),
            None => name.to_string(),
        }
    }

    /// Encode an identifier for use in a key
    ///
    /// Returns `None` for a missing identifier, which selects the singleton
    /// key. Padding is applied to the decimal text, so a negative value keeps
    /// its sign inside the padded field.
    pub fn encode_id(id: Option<&DocumentId>) -> Option<String> {
        let id = id?;
        let text = id.to_string();
        Some(match id.padded_width() {
            Some(width) => format!("{:0>width$}", text, width = width),
            None => text,
        })
    }

    /// True if `key` belongs to the partition of `name`
    pub fn belongs_to(key: &str, name: &str) -> bool {
        match key.strip_prefix(name) {
            Some("") => true,
            Some(rest) => rest.starts_with(KEY_SEPARATOR),
            None => false,
        }
    }

    /// Encoded identifier part of a key in the partition of `name`
    ///
    /// Returns `None` for the singleton key or keys of other partitions.
    pub fn id_part<'k>(key: &'k str, name: &str) -> Option<&'k str> {
        key.strip_prefix(name)?.strip_prefix(KEY_SEPARATOR)
    }
}
