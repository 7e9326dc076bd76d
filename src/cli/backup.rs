//! Backup CLI commands

use clap::Subcommand;
use std::path::PathBuf;

use crate::backup::{BackupManager, RestoreManager};
use crate::config::settings::Settings;
use crate::error::{SitebookError, SitebookResult};
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup
    Create,

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Restore from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show information about a specific backup
    Info {
        /// Backup filename or path
        backup: String,
    },

    /// Delete old backups according to retention policy
    Prune {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BackupCommands,
) -> SitebookResult<()> {
    let retention = settings.backup_retention.clone();
    let manager = BackupManager::new(storage.paths(), retention.clone());

    match cmd {
        BackupCommands::Create => {
            let (backup_path, deleted) = manager.create_backup_with_retention(storage)?;
            println!("Backup created: {}", file_label(&backup_path));
            println!("Location: {}", backup_path.display());
            if !deleted.is_empty() {
                println!("Pruned {} old backup(s).", deleted.len());
            }
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: sitebook backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, backup) in backups.iter().enumerate() {
                let age = chrono::Utc::now().signed_duration_since(backup.created_at);
                let monthly_marker = if backup.is_monthly { " [monthly]" } else { "" };

                if verbose {
                    println!(
                        "{}. {}{}\n   Created: {}\n   Size: {}\n   Age: {}\n",
                        i + 1,
                        backup.filename,
                        monthly_marker,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_size(backup.size_bytes),
                        format_duration(age),
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {}){}",
                        i + 1,
                        backup.filename,
                        format_duration(age),
                        format_size(backup.size_bytes),
                        monthly_marker,
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;

            let restore_manager = RestoreManager::new(storage);
            let validation = restore_manager.validate_backup(&backup_path)?;

            println!("Backup Information");
            println!("==================");
            println!("File: {}", backup_path.display());
            if let Some(date) = validation.backup_date {
                println!("Created: {}", date.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            println!("Status: {}", validation.summary());
            println!();

            if let Some(error) = validation.error {
                return Err(SitebookError::Import(error));
            }

            if !force {
                println!("WARNING: This will overwrite ALL current data!");
                println!("To proceed, run again with --force flag:");
                println!("  sitebook backup restore {} --force", backup);
                return Ok(());
            }

            println!("Creating backup of current data before restore...");
            let pre_restore = manager.create_backup(storage)?;
            println!("Pre-restore backup saved: {}", file_label(&pre_restore));
            println!();

            let result = restore_manager.restore_from_file(&backup_path)?;
            println!("Restore complete!");
            println!("{}", result.summary());
        }

        BackupCommands::Info { backup } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;
            let validation = RestoreManager::new(storage).validate_backup(&backup_path)?;
            let metadata = std::fs::metadata(&backup_path)?;

            println!("Backup Details");
            println!("==============");
            println!("File: {}", backup_path.display());
            println!("Size: {}", format_size(metadata.len()));
            match validation.backup_date {
                Some(date) => println!("Created: {}", date.format("%Y-%m-%d %H:%M:%S UTC")),
                None => println!("Created: unknown (older app backup)"),
            }
            if let Some(version) = &validation.schema_version {
                println!("Schema version: {}", version);
            }
            println!();

            if let Some(counts) = &validation.counts {
                println!("Contents:");
                println!("  Incomes:     {}", counts.income_count);
                println!("  Expenses:    {}", counts.expense_count);
                println!("  Vendors:     {}", counts.vendor_count);
                println!("  Workers:     {}", counts.labour_count);
                println!("  Attendance:  {}", counts.attendance_count);
                println!("  Payments:    {}", counts.payment_count);
                println!();
            }
            println!(
                "Status: {}",
                if validation.is_valid() {
                    "Valid"
                } else {
                    "Invalid"
                }
            );
            if let Some(error) = &validation.error {
                println!("  {}", error);
            }
        }

        BackupCommands::Prune { force } => {
            let backups = manager.list_backups()?;
            let (monthly, daily): (Vec<_>, Vec<_>) = backups.iter().partition(|b| b.is_monthly);

            let daily_to_delete = daily.len().saturating_sub(retention.daily_count as usize);
            let monthly_to_delete = monthly
                .len()
                .saturating_sub(retention.monthly_count as usize);
            let total_to_delete = daily_to_delete + monthly_to_delete;

            println!(
                "Retention policy: {} daily, {} monthly",
                retention.daily_count, retention.monthly_count
            );
            println!(
                "Current backups: {} daily, {} monthly",
                daily.len(),
                monthly.len()
            );

            if total_to_delete == 0 {
                println!("No backups to prune.");
                return Ok(());
            }

            println!(
                "To be deleted: {} daily, {} monthly ({} total)",
                daily_to_delete, monthly_to_delete, total_to_delete
            );
            println!();

            if !force {
                println!("To delete old backups, run again with --force flag:");
                println!("  sitebook backup prune --force");
                return Ok(());
            }

            let deleted = manager.enforce_retention()?;
            println!("Deleted {} backup(s).", deleted.len());
        }
    }

    Ok(())
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Resolve `latest`, a file name in the backup directory, or a path
fn resolve_backup_path(manager: &BackupManager, backup: &str) -> SitebookResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .get_latest_backup()?
            .map(|b| b.path)
            .ok_or_else(|| SitebookError::not_found("Backup", "latest"));
    }

    if let Some(info) = manager.get_backup(backup)? {
        return Ok(info.path);
    }

    let path = PathBuf::from(backup);
    if path.exists() {
        return Ok(path);
    }

    let with_ext = manager.backup_dir().join(format!("{}.json", backup));
    if with_ext.exists() {
        return Ok(with_ext);
    }

    Err(SitebookError::not_found("Backup", backup))
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds();

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
