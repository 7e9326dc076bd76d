//! Income CLI commands
//!
//! Direct incomes plus the merged money-in history. Edit and delete take an
//! id from `income history`, so entries that mirror an expense or a labour
//! payment are refused with a pointer to the right command.

use clap::Subcommand;
use std::fs::File;
use std::path::PathBuf;

use super::{date_or_today, parse_day, parse_funding_source, parse_mode, parse_money, parse_opt};
use crate::display::{format_income_details, format_income_list};
use crate::error::{SitebookError, SitebookResult};
use crate::models::{IncomeId, IncomeSource};
use crate::reports::HistoryReport;
use crate::services::{CreateIncomeInput, IncomeService, IncomeUpdate};
use crate::storage::Storage;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record money put into the project
    Add {
        /// Amount in rupees (e.g., "5000" or "5000.50")
        amount: String,
        /// Who paid (mujahir, salik, pool, other)
        #[arg(short = 'b', long = "by")]
        paid_by: String,
        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Source (investment, loan, donation, other)
        #[arg(short, long)]
        source: Option<String>,
        /// Payment mode (cash, bank, upi, check)
        #[arg(short, long)]
        mode: Option<String>,
        /// Free-text remarks
        #[arg(short, long)]
        remarks: Option<String>,
    },
    /// List direct incomes
    List,
    /// Show one income
    Show {
        /// Income ID
        id: String,
    },
    /// Edit an income picked from the history
    Edit {
        /// History entry ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short = 'b', long = "by")]
        paid_by: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        source: Option<String>,
        #[arg(short, long)]
        mode: Option<String>,
        #[arg(short, long)]
        remarks: Option<String>,
    },
    /// Delete an income picked from the history
    Delete {
        /// History entry ID
        id: String,
    },
    /// Show all money in: direct incomes and partner-funded spending
    History {
        /// Filter by payer, remarks or amount
        search: Option<String>,
        /// Write the history as CSV to this file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn parse_income_source(s: &str) -> SitebookResult<IncomeSource> {
    IncomeSource::parse(s).ok_or_else(|| {
        SitebookError::Validation(format!(
            "Unknown income source: '{}'. Use investment, loan, donation or other",
            s
        ))
    })
}

/// Handle an income command
pub fn handle_income_command(storage: &Storage, cmd: IncomeCommands) -> SitebookResult<()> {
    let service = IncomeService::new(storage);

    match cmd {
        IncomeCommands::Add {
            amount,
            paid_by,
            date,
            source,
            mode,
            remarks,
        } => {
            let income = service.create(CreateIncomeInput {
                date: date_or_today(date.as_deref())?,
                amount: parse_money(&amount)?,
                paid_by: parse_funding_source(&paid_by)?,
                source: parse_opt(source.as_deref(), parse_income_source)?,
                mode: parse_opt(mode.as_deref(), parse_mode)?,
                remarks,
            })?;

            println!("Recorded income: {} from {}", income.amount, income.paid_by);
            println!("  Date: {}", income.date);
            println!("  ID: {}", income.id);
        }

        IncomeCommands::List => {
            println!("{}", format_income_list(&service.list()?));
        }

        IncomeCommands::Show { id } => {
            let income = service
                .get(&IncomeId::from(id.as_str()))?
                .ok_or_else(|| SitebookError::income_not_found(&id))?;
            print!("{}", format_income_details(&income));
        }

        IncomeCommands::Edit {
            id,
            amount,
            paid_by,
            date,
            source,
            mode,
            remarks,
        } => {
            let changes = IncomeUpdate {
                date: parse_opt(date.as_deref(), parse_day)?,
                amount: parse_opt(amount.as_deref(), parse_money)?,
                paid_by: parse_opt(paid_by.as_deref(), parse_funding_source)?,
                source: parse_opt(source.as_deref(), parse_income_source)?,
                mode: parse_opt(mode.as_deref(), parse_mode)?,
                remarks,
            };

            if changes.is_empty() {
                println!("No changes specified. Use --amount, --by, --date, --source, --mode or --remarks.");
                return Ok(());
            }

            let updated = service.update_from_history(&id, &changes)?;
            println!("Updated income: {} from {}", updated.amount, updated.paid_by);
        }

        IncomeCommands::Delete { id } => {
            let removed = service.delete_from_history(&id)?;
            println!(
                "Deleted income: {} from {} on {}",
                removed.amount, removed.paid_by, removed.date
            );
        }

        IncomeCommands::History { search, csv } => {
            let history = service.history()?;
            let report = HistoryReport::new(&history, search.as_deref());

            match csv {
                Some(path) => {
                    let mut file = File::create(&path)?;
                    report.export_csv(&mut file)?;
                    println!("History written to {}", path.display());
                }
                None => print!("{}", report.format_terminal()),
            }
        }
    }

    Ok(())
}
