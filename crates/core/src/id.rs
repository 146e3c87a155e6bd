//! Document identifiers
//!
//! A document carries at most one identifier. Its kind decides both how the
//! identifier is assigned on first `add` and how it is encoded into a key:
//!
//! - Integral (`u8`, `i16`, `i32`, `i64`): zero means "not yet assigned";
//!   auto-incremented and zero-padded to a fixed width.
//! - GUID (`Uuid`): nil means "not yet assigned"; filled with a sequential GUID.
//! - Text: opaque, always caller supplied.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier value of a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentId {
    /// 8-bit unsigned identifier
    Byte(u8),
    /// 16-bit signed identifier
    Int16(i16),
    /// 32-bit signed identifier
    Int32(i32),
    /// 64-bit signed identifier
    Int64(i64),
    /// GUID identifier
    Guid(Uuid),
    /// Opaque text identifier
    Text(String),
}

impl DocumentId {
    /// Short name of the identifier kind, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            DocumentId::Byte(_) => "u8",
            DocumentId::Int16(_) => "i16",
            DocumentId::Int32(_) => "i32",
            DocumentId::Int64(_) => "i64",
            DocumentId::Guid(_) => "guid",
            DocumentId::Text(_) => "text",
        }
    }

    /// True for the integral kinds eligible for auto-increment
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            DocumentId::Byte(_) | DocumentId::Int16(_) | DocumentId::Int32(_) | DocumentId::Int64(_)
        )
    }

    /// True for GUID identifiers
    pub fn is_guid(&self) -> bool {
        matches!(self, DocumentId::Guid(_))
    }

    /// True when the identifier still holds its language default
    ///
    /// Zero for integral kinds, nil for GUIDs. Text identifiers are never
    /// considered unassigned.
    pub fn is_default(&self) -> bool {
        match self {
            DocumentId::Byte(v) => *v == 0,
            DocumentId::Int16(v) => *v == 0,
            DocumentId::Int32(v) => *v == 0,
            DocumentId::Int64(v) => *v == 0,
            DocumentId::Guid(v) => v.is_nil(),
            DocumentId::Text(_) => false,
        }
    }

    /// Fixed key width for integral kinds
    ///
    /// Wide enough for the largest positive value of each type so that
    /// lexical and numeric order coincide.
    pub fn padded_width(&self) -> Option<usize> {
        match self {
            DocumentId::Byte(_) => Some(3),
            DocumentId::Int16(_) => Some(5),
            DocumentId::Int32(_) => Some(10),
            DocumentId::Int64(_) => Some(19),
            DocumentId::Guid(_) | DocumentId::Text(_) => None,
        }
    }

    /// Build an identifier of the same integral kind from a counter value
    ///
    /// Returns `None` if this identifier is not integral or the value does
    /// not fit the kind's width.
    pub fn with_integral_value(&self, value: i64) -> Option<DocumentId> {
        match self {
            DocumentId::Byte(_) => u8::try_from(value).ok().map(DocumentId::Byte),
            DocumentId::Int16(_) => i16::try_from(value).ok().map(DocumentId::Int16),
            DocumentId::Int32(_) => i32::try_from(value).ok().map(DocumentId::Int32),
            DocumentId::Int64(_) => Some(DocumentId::Int64(value)),
            DocumentId::Guid(_) | DocumentId::Text(_) => None,
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Byte(v) => write!(f, "{}", v),
            DocumentId::Int16(v) => write!(f, "{}", v),
            DocumentId::Int32(v) => write!(f, "{}", v),
            DocumentId::Int64(v) => write!(f, "{}", v),
            DocumentId::Guid(v) => write!(f, "{}", v),
            DocumentId::Text(v) => f.write_str(v),
        }
    }
}

macro_rules! impl_id_conversions {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl From<$ty> for DocumentId {
            fn from(value: $ty) -> Self {
                DocumentId::$variant(value)
            }
        }

        impl TryFrom<DocumentId> for $ty {
            type Error = Error;

            fn try_from(id: DocumentId) -> Result<Self> {
                match id {
                    DocumentId::$variant(value) => Ok(value),
                    other => Err(Error::IdentifierTypeMismatch {
                        expected: $name,
                        actual: other.kind_name(),
                    }),
                }
            }
        }
    };
}

impl_id_conversions!(u8, Byte, "u8");
impl_id_conversions!(i16, Int16, "i16");
impl_id_conversions!(i32, Int32, "i32");
impl_id_conversions!(i64, Int64, "i64");
impl_id_conversions!(Uuid, Guid, "guid");
impl_id_conversions!(String, Text, "text");

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        DocumentId::Text(value.to_string())
    }
}
