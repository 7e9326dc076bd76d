//! Sync CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::SitebookResult;
use crate::storage::Storage;
use crate::sync::{SheetSync, UreqTransport, APPS_SCRIPT_TEMPLATE, SETUP_STEPS};

/// Sync subcommands
#[derive(Subcommand)]
pub enum SyncCommands {
    /// Push every record to the Google Sheet
    Push,
    /// Print the Apps Script that receives pushes, with setup steps
    Script,
}

/// Handle a sync command
pub fn handle_sync_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SyncCommands,
) -> SitebookResult<()> {
    match cmd {
        SyncCommands::Push => {
            let report = SheetSync::new(storage, UreqTransport::default()).push(settings)?;
            println!(
                "Pushed {} record(s) to sheet '{}'.",
                report.records_sent, report.sheet_name
            );
            if report.newly_synced > 0 {
                println!("{} new entr(ies) marked as synced.", report.newly_synced);
            }
            if let Some(link) = &settings.google_sheet_link {
                println!("Open the sheet: {}", link);
            }
        }

        SyncCommands::Script => {
            println!("Setup");
            println!("=====");
            for (i, step) in SETUP_STEPS.iter().enumerate() {
                println!("{}. {}", i + 1, step);
            }
            println!();
            println!("{}", APPS_SCRIPT_TEMPLATE);
        }
    }

    Ok(())
}

/// Push after a change when auto-sync is on; a failed push only warns
pub fn auto_sync(storage: &Storage, settings: &Settings) {
    if !settings.auto_sync || settings.sync_url().is_none() {
        return;
    }
    match SheetSync::new(storage, UreqTransport::default()).push(settings) {
        Ok(report) => println!("Synced {} record(s) to the sheet.", report.records_sent),
        Err(e) => eprintln!("Warning: auto-sync failed: {}", e),
    }
}
