//! Document capability traits
//!
//! Every persisted type implements [`Document`]. Identifier access is
//! expressed through [`Identified`], resolved at compile time per type:
//!
//! - `id()` returns `None` for singleton documents (no identifier field).
//! - `set_id()` is only overridden by types whose identifier may be assigned
//!   by the store. The default rejects the write, so a read-only identifier
//!   that is still at its default surfaces as an error instead of an
//!   ambiguous key.
//! - `visit_children()` exposes owned sub-documents so GUID identifiers can
//!   be filled through the whole object graph.
//!
//! # Example
//!
//! ```
//! use doclite_core::{Document, DocumentId, Identified, Result};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Customer {
//!     id: i32,
//!     name: String,
//! }
//!
//! impl Identified for Customer {
//!     fn id(&self) -> Option<DocumentId> {
//!         Some(self.id.into())
//!     }
//!
//!     fn set_id(&mut self, id: DocumentId) -> Result<()> {
//!         self.id = id.try_into()?;
//!         Ok(())
//!     }
//! }
//!
//! impl Document for Customer {}
//!
//! assert_eq!(Customer::document_name(), "Customer");
//! ```

use crate::error::{Error, Result};
use crate::id::DocumentId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;

/// Identifier access for a node of a document graph
pub trait Identified {
    /// Current identifier, `None` if the type has no identifier
    fn id(&self) -> Option<DocumentId> {
        None
    }

    /// Assign the identifier
    ///
    /// # Errors
    ///
    /// The default implementation returns `Error::IdentifierNotWritable`.
    /// Implementations return `Error::IdentifierTypeMismatch` when handed an
    /// identifier of the wrong kind.
    fn set_id(&mut self, _id: DocumentId) -> Result<()> {
        Err(Error::IdentifierNotWritable {
            document: short_type_name::<Self>().to_string(),
        })
    }

    /// Visit owned sub-documents (elements of collections included)
    fn visit_children(
        &mut self,
        _visit: &mut dyn FnMut(&mut dyn Identified) -> Result<()>,
    ) -> Result<()> {
        Ok(())
    }
}

/// A type that can be stored in a session
pub trait Document: Identified + Serialize + DeserializeOwned {
    /// Name of the key partition for this type
    ///
    /// Defaults to the short type name (module path and generics removed).
    fn document_name() -> Cow<'static, str> {
        Cow::Borrowed(short_type_name::<Self>())
    }
}

/// Visit every element of a collection of sub-documents
///
/// Helper for `Identified::visit_children` implementations.
pub fn visit_each<'a, D, I>(
    items: I,
    visit: &mut dyn FnMut(&mut dyn Identified) -> Result<()>,
) -> Result<()>
where
    D: Identified + 'a,
    I: IntoIterator<Item = &'a mut D>,
{
    for item in items {
        visit(item)?;
    }
    Ok(())
}

/// Short name of a type: last path segment, generic arguments removed
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = match full.find('<') {
        Some(pos) => &full[..pos],
        None => full,
    };
    base.rsplit("::").next().unwrap_or(base)
}
