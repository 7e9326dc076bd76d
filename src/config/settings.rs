//! User settings for Sitebook
//!
//! Project details, display language, remote sync endpoints and backup
//! retention. Field names are camelCase on disk so the settings block of a
//! full backup can be read back as-is.

use serde::{Deserialize, Serialize};

use super::paths::SitebookPaths;
use crate::error::SitebookError;
use crate::models::Money;

/// Display language for labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Self::En),
            "hi" | "hindi" => Some(Self::Hi),
            _ => None,
        }
    }
}

/// Backup retention settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRetention {
    /// Number of daily backups to keep
    pub daily_count: u32,
    /// Number of monthly backups to keep
    pub monthly_count: u32,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self {
            daily_count: 30,
            monthly_count: 12,
        }
    }
}

/// User settings for Sitebook
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Name of the project; also used as the remote sheet name
    #[serde(default = "default_project_name", alias = "schoolName")]
    pub project_name: String,

    #[serde(default)]
    pub location: String,

    /// Planned budget for the whole project
    #[serde(default)]
    pub budget: Money,

    #[serde(default)]
    pub language: Language,

    /// Push to the remote sheet after every mutation from the CLI
    #[serde(default)]
    pub auto_sync: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_email: Option<String>,

    /// Deployed Apps Script web-app URL that receives sync payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_sheet_url: Option<String>,

    /// Link to the spreadsheet itself, for humans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_sheet_link: Option<String>,

    #[serde(default)]
    pub backup_retention: BackupRetention,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_project_name() -> String {
    "Construction Project".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            project_name: default_project_name(),
            location: String::new(),
            budget: Money::zero(),
            language: Language::default(),
            auto_sync: false,
            sync_email: None,
            google_sheet_url: None,
            google_sheet_link: None,
            backup_retention: BackupRetention::default(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// The configured sync URL, if it is non-blank
    pub fn sync_url(&self) -> Option<&str> {
        self.google_sheet_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SitebookPaths) -> Result<Self, SitebookError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SitebookError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SitebookError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SitebookPaths) -> Result<(), SitebookError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SitebookError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SitebookError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.language, Language::En);
        assert!(!settings.auto_sync);
        assert!(settings.sync_url().is_none());
        assert_eq!(settings.backup_retention.daily_count, 30);
        assert_eq!(settings.backup_retention.monthly_count, 12);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SitebookPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.project_name = "Girls School Block B".into();
        settings.language = Language::Hi;
        settings.google_sheet_url = Some("https://script.google.com/macros/s/abc/exec".into());

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.project_name, "Girls School Block B");
        assert_eq!(loaded.language, Language::Hi);
        assert_eq!(
            loaded.sync_url(),
            Some("https://script.google.com/macros/s/abc/exec")
        );
    }

    #[test]
    fn test_reads_legacy_field_names() {
        let json = r#"{
            "schoolName": "EVS",
            "location": "Village",
            "budget": 2500000,
            "language": "hi",
            "autoSync": false,
            "googleSheetUrl": "  "
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.project_name, "EVS");
        assert_eq!(settings.budget, Money::from_rupees(2_500_000));
        assert!(settings.sync_url().is_none());
    }

    #[test]
    fn test_language_parse() {
        assert_eq!(Language::parse("HI"), Some(Language::Hi));
        assert_eq!(Language::parse("english"), Some(Language::En));
        assert_eq!(Language::parse("fr"), None);
    }
}
