//! Path management for Sitebook
//!
//! ## Path Resolution Order
//!
//! 1. `SITEBOOK_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/sitebook` on Linux,
//!    `~/Library/Application Support/sitebook` on macOS, `%APPDATA%\sitebook` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SitebookError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "SITEBOOK_DATA_DIR";

/// Manages all paths used by Sitebook
#[derive(Debug, Clone)]
pub struct SitebookPaths {
    base_dir: PathBuf,
}

impl SitebookPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and
    /// `SITEBOOK_DATA_DIR` is not set.
    pub fn new() -> Result<Self, SitebookError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SitebookPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON file per record collection
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn incomes_file(&self) -> PathBuf {
        self.data_dir().join("incomes.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    pub fn labours_file(&self) -> PathBuf {
        self.data_dir().join("labours.json")
    }

    pub fn attendance_file(&self) -> PathBuf {
        self.data_dir().join("attendance.json")
    }

    pub fn payments_file(&self) -> PathBuf {
        self.data_dir().join("labour_payments.json")
    }

    pub fn vendors_file(&self) -> PathBuf {
        self.data_dir().join("vendors.json")
    }

    /// Ensure the base, data and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), SitebookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SitebookError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SitebookError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir()).map_err(|e| {
            SitebookError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if Sitebook has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, SitebookError> {
    ProjectDirs::from("", "", "sitebook")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            SitebookError::Config(format!(
                "Could not determine a config directory; set {}",
                DATA_DIR_ENV
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SitebookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);
        let paths = SitebookPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());
        env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SitebookPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.backup_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SitebookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.payments_file(),
            temp_dir.path().join("data").join("labour_payments.json")
        );
    }
}
