//! Identifier assignment on `add`
//!
//! Runs, in order:
//! 1. Every node of the document graph holding a nil GUID gets a fresh
//!    sequential GUID.
//! 2. A root integral id still at zero gets the next auto-increment value.
//! 3. Anything else (singleton, manual id) is left alone.

use tracing::debug;

use doclite_core::{Document, DocumentId, Identified, Result};
use doclite_storage::codec::DocumentCodec;
use doclite_storage::OrderedStore;

use super::auto_increment::AutoIncrement;
use super::sequential::next_sequential_guid;

/// Assigns identifiers to documents before they are stored
#[derive(Debug, Default)]
pub struct IdentifierAssignor {
    auto_increment: AutoIncrement,
}

impl IdentifierAssignor {
    /// Create an assignor with its own counter lock
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign every missing identifier of `document`
    ///
    /// # Errors
    ///
    /// - `Error::IdentifierNotWritable` if an id still at its default cannot
    ///   be set
    /// - `Error::IdentifierOverflow` if the counter outgrows the id type
    pub fn assign<T: Document>(
        &self,
        document: &mut T,
        store: &dyn OrderedStore,
        codec: &DocumentCodec,
    ) -> Result<()> {
        fill_guids(document)?;

        match document.id() {
            Some(id) if id.is_integral() && id.is_default() => {
                let name = T::document_name();
                let next = self.auto_increment.next_id(store, codec, &name, &id)?;
                debug!(document = %name, id = %next, "Assigned auto-increment id");
                document.set_id(next)
            }
            _ => Ok(()),
        }
    }
}

/// Replace nil GUIDs with sequential ones across the object graph
fn fill_guids(node: &mut dyn Identified) -> Result<()> {
    if let Some(DocumentId::Guid(guid)) = node.id() {
        if guid.is_nil() {
            node.set_id(DocumentId::Guid(next_sequential_guid()))?;
        }
    }
    node.visit_children(&mut |child: &mut dyn Identified| fill_guids(child))
}
