//! Report CLI commands
//!
//! Every report is computed from one [`Ledger`] pass over the current
//! records and either printed or written as CSV.

use clap::Subcommand;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config::settings::Settings;
use crate::error::SitebookResult;
use crate::ledger::Ledger;
use crate::reports::{DashboardReport, HistoryReport, LabourReport, PartnerReport};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Fund totals, budget use and spending by category
    Dashboard {
        /// Write as CSV to this file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// What each partner has put in
    Partners {
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Earned, paid and due for every worker
    Labour {
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Money-in history
    History {
        /// Filter by payer, remarks or amount
        search: Option<String>,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn write_csv(
    path: &Path,
    write: impl FnOnce(&mut File) -> SitebookResult<()>,
) -> SitebookResult<()> {
    let mut file = File::create(path)?;
    write(&mut file)?;
    println!("Report written to {}", path.display());
    Ok(())
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> SitebookResult<()> {
    let records = storage.records()?;
    let ledger = Ledger::from_records(&records);

    match cmd {
        ReportCommands::Dashboard { csv } => {
            let report = DashboardReport::generate(&records, &ledger, settings);
            match csv {
                Some(path) => write_csv(&path, |f| report.export_csv(f))?,
                None => print!("{}", report.format_terminal()),
            }
        }

        ReportCommands::Partners { csv } => {
            let report = PartnerReport::new(ledger.partners);
            match csv {
                Some(path) => write_csv(&path, |f| report.export_csv(f))?,
                None => print!("{}", report.format_terminal()),
            }
        }

        ReportCommands::Labour { csv } => {
            let report = LabourReport::new(ledger.labour);
            match csv {
                Some(path) => write_csv(&path, |f| report.export_csv(f))?,
                None => print!("{}", report.format_terminal()),
            }
        }

        ReportCommands::History { search, csv } => {
            let report = HistoryReport::new(&ledger.history, search.as_deref());
            match csv {
                Some(path) => write_csv(&path, |f| report.export_csv(f))?,
                None => print!("{}", report.format_terminal()),
            }
        }
    }

    Ok(())
}
