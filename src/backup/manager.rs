//! Backup manager for Sitebook
//!
//! Each backup is a full JSON snapshot, the same document `export json`
//! writes, so any backup can also be imported by hand.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::paths::SitebookPaths;
use crate::config::settings::BackupRetention;
use crate::error::{SitebookError, SitebookResult};
use crate::export::FullExport;
use crate::storage::file_io::write_json_atomic;
use crate::storage::Storage;

const PREFIX: &str = "backup-";

/// Metadata about a backup file
#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
    /// Oldest backup of its calendar month; kept under the monthly count
    pub is_monthly: bool,
}

pub struct BackupManager {
    backup_dir: PathBuf,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: &SitebookPaths, retention: BackupRetention) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            retention,
        }
    }

    /// Write a snapshot of the current ledger and settings
    pub fn create_backup(&self, storage: &Storage) -> SitebookResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            SitebookError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let now = Utc::now();
        let filename = format!(
            "{}{}-{:03}.json",
            PREFIX,
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(filename);

        let snapshot = FullExport::from_storage(storage)?;
        write_json_atomic(&backup_path, &snapshot)?;

        info!(path = %backup_path.display(), records = snapshot.records.record_count(), "backup written");
        Ok(backup_path)
    }

    /// All backups, newest first
    pub fn list_backups(&self) -> SitebookResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.backup_dir).map_err(|e| {
            SitebookError::Io(format!("Failed to read backup directory: {}", e))
        })?;

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SitebookError::Io(format!("Failed to read directory entry: {}", e))
            })?;
            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        // walking oldest to newest, the first backup seen in a month is its monthly
        let mut months = HashSet::new();
        for backup in backups.iter_mut().rev() {
            let month = (backup.created_at.year(), backup.created_at.month());
            backup.is_monthly = months.insert(month);
        }

        Ok(backups)
    }

    /// Delete backups beyond the daily and monthly counts
    pub fn enforce_retention(&self) -> SitebookResult<Vec<PathBuf>> {
        let (monthly, daily): (Vec<_>, Vec<_>) =
            self.list_backups()?.into_iter().partition(|b| b.is_monthly);

        let expired = daily
            .into_iter()
            .skip(self.retention.daily_count as usize)
            .chain(monthly.into_iter().skip(self.retention.monthly_count as usize));

        let mut deleted = Vec::new();
        for backup in expired {
            fs::remove_file(&backup.path).map_err(|e| {
                SitebookError::Io(format!("Failed to delete old backup: {}", e))
            })?;
            debug!(file = %backup.filename, "expired backup removed");
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    pub fn create_backup_with_retention(
        &self,
        storage: &Storage,
    ) -> SitebookResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup(storage)?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Look up a backup by file name
    pub fn get_backup(&self, filename: &str) -> SitebookResult<Option<BackupInfo>> {
        Ok(self
            .list_backups()?
            .into_iter()
            .find(|b| b.filename == filename))
    }

    pub fn get_latest_backup(&self) -> SitebookResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename.strip_prefix(PREFIX)?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
        is_monthly: false,
    })
}

/// Parse `YYYYMMDD-HHMMSS` with an optional `-mmm` millisecond suffix
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = stamp.split('-').collect();
    let (date_part, time_part, millis) = match parts.as_slice() {
        [date, time] => (*date, *time, 0),
        [date, time, millis] => (*date, *time, millis.parse().ok()?),
        _ => return None,
    };

    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let date = NaiveDate::parse_from_str(date_part, "%Y%m%d").ok()?;
    let hour = time_part[0..2].parse().ok()?;
    let minute = time_part[2..4].parse().ok()?;
    let second = time_part[4..6].parse().ok()?;
    let time = chrono::NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;

    Some(DateTime::from_naive_utc_and_offset(date.and_time(time), Utc))
}
