//! CLI command handler for snapshot import
//!
//! Reads a JSON or YAML snapshot (including backups from the browser app),
//! validates it completely, and only then replaces the current records.

use std::path::Path;

use crate::backup::BackupManager;
use crate::config::settings::Settings;
use crate::error::{SitebookError, SitebookResult};
use crate::export::{import_from_json, import_from_yaml, ExportMetadata};
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    file: &Path,
    confirm: bool,
) -> SitebookResult<()> {
    if !file.exists() {
        return Err(SitebookError::Import(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let content = std::fs::read_to_string(file)
        .map_err(|e| SitebookError::Import(format!("Failed to read file: {}", e)))?;

    let is_yaml = file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    let export = if is_yaml {
        import_from_yaml(&content)?
    } else {
        import_from_json(&content)?
    };

    let incoming = ExportMetadata::describe(&export.records);
    let current = ExportMetadata::describe(&storage.records()?);

    println!("Import Preview: {}", file.display());
    println!("{}", "=".repeat(40));
    println!("                 current  incoming");
    for (label, now, new) in [
        ("Incomes", current.income_count, incoming.income_count),
        ("Expenses", current.expense_count, incoming.expense_count),
        ("Vendors", current.vendor_count, incoming.vendor_count),
        ("Workers", current.labour_count, incoming.labour_count),
        ("Attendance", current.attendance_count, incoming.attendance_count),
        ("Payments", current.payment_count, incoming.payment_count),
    ] {
        println!("  {:<12} {:>9} {:>9}", label, now, new);
    }
    println!();

    if !confirm {
        println!("WARNING: Importing replaces ALL current records and settings.");
        println!("To proceed, run again with --confirm:");
        println!("  sitebook import {} --confirm", file.display());
        return Ok(());
    }

    let manager = BackupManager::new(storage.paths(), settings.backup_retention.clone());
    let safety = manager.create_backup(storage)?;
    println!("Backup of current data saved: {}", safety.display());

    let count = export.apply(storage, "import")?;
    println!("Imported {} record(s).", count);

    Ok(())
}
