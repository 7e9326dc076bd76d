//! Configuration module for Sitebook
//!
//! - Path resolution for data, backups and the audit log
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SitebookPaths;
pub use settings::{BackupRetention, Language, Settings};
