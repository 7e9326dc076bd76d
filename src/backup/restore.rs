//! Backup restoration for Sitebook
//!
//! A backup is parsed and validated in full before anything on disk is
//! touched; a bad file leaves the current ledger as it was.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::{SitebookError, SitebookResult};
use crate::export::{import_from_json, ExportMetadata, FullExport};
use crate::storage::Storage;

pub struct RestoreManager<'a> {
    storage: &'a Storage,
}

impl<'a> RestoreManager<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn read_snapshot(backup_path: &Path) -> SitebookResult<FullExport> {
        let contents = fs::read_to_string(backup_path)
            .map_err(|e| SitebookError::Io(format!("Failed to read backup file: {}", e)))?;
        import_from_json(&contents)
    }

    /// Replace all records and settings with the backup contents
    pub fn restore_from_file(&self, backup_path: &Path) -> SitebookResult<RestoreResult> {
        let snapshot = Self::read_snapshot(backup_path)?;
        let result = RestoreResult {
            schema_version: snapshot.schema_version.clone(),
            backup_date: snapshot.exported_at,
            counts: ExportMetadata::describe(&snapshot.records),
        };

        let reason = format!("restore from {}", backup_path.display());
        snapshot.apply(self.storage, &reason)?;

        Ok(result)
    }

    /// Validate a backup file without restoring it
    pub fn validate_backup(&self, backup_path: &Path) -> SitebookResult<ValidationResult> {
        match Self::read_snapshot(backup_path) {
            Ok(snapshot) => Ok(ValidationResult {
                error: None,
                schema_version: Some(snapshot.schema_version.clone()),
                backup_date: snapshot.exported_at,
                counts: Some(ExportMetadata::describe(&snapshot.records)),
            }),
            Err(SitebookError::Import(reason)) => Ok(ValidationResult {
                error: Some(reason),
                schema_version: None,
                backup_date: None,
                counts: None,
            }),
            Err(e) => Err(e),
        }
    }
}

fn describe_counts(counts: &ExportMetadata) -> String {
    format!(
        "{} incomes, {} expenses, {} labourers, {} attendance marks, {} labour payments, {} vendors",
        counts.income_count,
        counts.expense_count,
        counts.labour_count,
        counts.attendance_count,
        counts.payment_count,
        counts.vendor_count
    )
}

#[derive(Debug)]
pub struct RestoreResult {
    pub schema_version: String,
    /// Absent for backups written by older versions of the app
    pub backup_date: Option<DateTime<Utc>>,
    pub counts: ExportMetadata,
}

impl RestoreResult {
    pub fn summary(&self) -> String {
        format!("Restored: {}", describe_counts(&self.counts))
    }
}

#[derive(Debug)]
pub struct ValidationResult {
    /// Why the backup cannot be restored
    pub error: Option<String>,
    pub schema_version: Option<String>,
    pub backup_date: Option<DateTime<Utc>>,
    pub counts: Option<ExportMetadata>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn summary(&self) -> String {
        match (&self.error, &self.counts) {
            (Some(error), _) => format!("Invalid backup: {}", error),
            (None, Some(counts)) => format!(
                "Valid backup (v{}): {}",
                self.schema_version.as_deref().unwrap_or("?"),
                describe_counts(counts)
            ),
            (None, None) => "Valid backup".to_string(),
        }
    }
}
