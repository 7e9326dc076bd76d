//! Append-only audit log writer
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{SitebookError, SitebookResult};

use super::entry::AuditEntry;

pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    fn open_for_append(&self) -> SitebookResult<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| SitebookError::Io(format!("Failed to open audit log: {}", e)))
    }

    fn write_line(file: &mut File, entry: &AuditEntry) -> SitebookResult<()> {
        let json = serde_json::to_string(entry)
            .map_err(|e| SitebookError::Json(format!("Failed to serialize audit entry: {}", e)))?;
        writeln!(file, "{}", json)
            .map_err(|e| SitebookError::Io(format!("Failed to write audit entry: {}", e)))
    }

    pub fn log(&self, entry: &AuditEntry) -> SitebookResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries with a single flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> SitebookResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut file = self.open_for_append()?;
        for entry in entries {
            Self::write_line(&mut file, entry)?;
        }
        file.flush()
            .map_err(|e| SitebookError::Io(format!("Failed to flush audit log: {}", e)))
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> SitebookResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| SitebookError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                SitebookError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                SitebookError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> SitebookResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
