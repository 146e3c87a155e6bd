//! Identifier assignment
//!
//! - `sequential`: strictly increasing GUIDs
//! - `auto_increment`: persisted per-document-name counters
//! - `assignor`: applies both to a document graph on `add`

mod assignor;
mod auto_increment;
mod sequential;

pub use assignor::IdentifierAssignor;
pub use auto_increment::{counter_key, AutoIncrement, NextAutoId};
pub use sequential::{next_sequential_guid, SequentialGuid};
