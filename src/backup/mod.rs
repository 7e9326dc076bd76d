//! Backup system for Sitebook
//!
//! - `BackupManager` writes timestamped snapshots into the backup directory
//!   and prunes them by the retention counts in settings
//! - `RestoreManager` validates a snapshot and swaps it in
//!
//! Backups use the full JSON export format, so a file written by the old
//! browser app (collections plus `settings`) restores the same way.

mod manager;
mod restore;

pub use manager::{BackupInfo, BackupManager};
pub use restore::{RestoreManager, RestoreResult, ValidationResult};
