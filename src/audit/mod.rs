//! Audit trail for record mutations
//!
//! Every create, update and delete performed through the services is appended
//! to `audit.log` as one JSON object per line, with the record's state before
//! and after the change. Bulk operations (import, restore, reset) are logged
//! as a single summary entry.

mod diff;
mod entry;
mod logger;

pub use diff::summarize_changes;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
