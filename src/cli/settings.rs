//! Settings CLI commands

use clap::{Subcommand, ValueEnum};

use super::parse_money;
use crate::config::paths::SitebookPaths;
use crate::config::settings::{Language, Settings};
use crate::error::{SitebookError, SitebookResult};

/// A setting that can be changed from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SettingKey {
    ProjectName,
    Location,
    /// Planned budget in rupees
    Budget,
    /// en or hi
    Language,
    /// Apps Script web-app URL; "" clears it
    SyncUrl,
    /// Spreadsheet link shown after a push
    SheetLink,
    SyncEmail,
    /// on or off
    AutoSync,
    DailyBackups,
    MonthlyBackups,
}

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,
    /// Change a setting
    Set {
        #[arg(value_enum)]
        key: SettingKey,
        value: String,
    },
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_count(value: &str) -> SitebookResult<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| SitebookError::Validation(format!("Expected a whole number, got '{}'", value)))
}

/// Apply one `set` to the settings in memory
fn apply(settings: &mut Settings, key: SettingKey, value: &str) -> SitebookResult<()> {
    match key {
        SettingKey::ProjectName => {
            let name = value.trim();
            if name.is_empty() {
                return Err(SitebookError::Validation(
                    "Project name cannot be empty".into(),
                ));
            }
            settings.project_name = name.to_string();
        }
        SettingKey::Location => settings.location = value.trim().to_string(),
        SettingKey::Budget => settings.budget = parse_money(value)?,
        SettingKey::Language => {
            settings.language = Language::parse(value).ok_or_else(|| {
                SitebookError::Validation(format!("Unknown language: '{}'. Use en or hi", value))
            })?;
        }
        SettingKey::SyncUrl => settings.google_sheet_url = optional(value),
        SettingKey::SheetLink => settings.google_sheet_link = optional(value),
        SettingKey::SyncEmail => settings.sync_email = optional(value),
        SettingKey::AutoSync => {
            settings.auto_sync = match value.trim().to_lowercase().as_str() {
                "on" | "true" | "yes" | "1" => true,
                "off" | "false" | "no" | "0" => false,
                _ => {
                    return Err(SitebookError::Validation(format!(
                        "Expected on or off, got '{}'",
                        value
                    )))
                }
            };
        }
        SettingKey::DailyBackups => settings.backup_retention.daily_count = parse_count(value)?,
        SettingKey::MonthlyBackups => {
            settings.backup_retention.monthly_count = parse_count(value)?
        }
    }
    Ok(())
}

/// Handle a settings command
pub fn handle_settings_command(
    paths: &SitebookPaths,
    settings: &mut Settings,
    cmd: SettingsCommands,
) -> SitebookResult<()> {
    match cmd {
        SettingsCommands::Show => {
            let none = "(not set)";
            println!("Project:        {}", settings.project_name);
            println!("Location:       {}", settings.location);
            println!("Budget:         {}", settings.budget);
            println!("Language:       {:?}", settings.language);
            println!("Sync URL:       {}", settings.sync_url().unwrap_or(none));
            println!(
                "Sheet link:     {}",
                settings.google_sheet_link.as_deref().unwrap_or(none)
            );
            println!(
                "Sync email:     {}",
                settings.sync_email.as_deref().unwrap_or(none)
            );
            println!(
                "Auto-sync:      {}",
                if settings.auto_sync { "on" } else { "off" }
            );
            println!(
                "Backups kept:   {} daily, {} monthly",
                settings.backup_retention.daily_count, settings.backup_retention.monthly_count
            );
        }

        SettingsCommands::Set { key, value } => {
            apply(settings, key, &value)?;
            settings.save(paths)?;
            println!("Saved.");
        }
    }

    Ok(())
}
