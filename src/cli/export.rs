//! CLI commands for data export
//!
//! Full snapshots go to JSON or YAML; the sectioned report and the
//! per-collection tables go to CSV.

use crate::error::{SitebookError, SitebookResult};
use crate::export::{
    expense_table, export_full_json, export_full_yaml, export_report_csv, income_table,
    labour_summary_table, payment_table, write_csv_table, CsvTable, ExportMetadata,
};
use crate::ledger::labour_stats;
use crate::storage::Storage;
use clap::{Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Snapshot format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON, importable and compatible with backups
    Json,
    /// YAML, human-readable
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export every record and the settings
    All {
        /// Output file path
        output: PathBuf,

        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export the sectioned CSV report (income, expenses, labour payments)
    Report {
        /// Output file path
        output: PathBuf,
    },

    /// Export direct incomes to CSV
    Incomes { output: PathBuf },

    /// Export expenses to CSV
    Expenses { output: PathBuf },

    /// Export labour payments to CSV
    Payments { output: PathBuf },

    /// Export the per-worker wage summary to CSV
    Labour { output: PathBuf },

    /// Show what an export would contain without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> SitebookResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Json => export_full_json(storage, &mut writer, pretty)?,
                ExportFormat::Yaml => export_full_yaml(storage, &mut writer)?,
            }
            writer.flush()?;
            println!("Full data exported to: {}", output.display());
        }

        ExportCommands::Report { output } => {
            let mut writer = create_output(&output)?;
            export_report_csv(&storage.records()?, &mut writer)?;
            writer.flush()?;
            println!("Report exported to: {}", output.display());
        }

        ExportCommands::Incomes { output } => {
            let records = storage.records()?;
            write_table(&output, &income_table(&records.incomes))?;
        }

        ExportCommands::Expenses { output } => {
            let records = storage.records()?;
            write_table(&output, &expense_table(&records.expenses))?;
        }

        ExportCommands::Payments { output } => {
            let records = storage.records()?;
            write_table(&output, &payment_table(&records.payments, &records.labours))?;
        }

        ExportCommands::Labour { output } => {
            let records = storage.records()?;
            let stats = labour_stats(&records.labours, &records.attendance, &records.payments);
            write_table(&output, &labour_summary_table(&stats))?;
        }

        ExportCommands::Info => {
            let records = storage.records()?;
            let meta = ExportMetadata::describe(&records);

            println!("Export Information");
            println!("==================");
            println!("  Incomes:     {}", meta.income_count);
            println!("  Expenses:    {}", meta.expense_count);
            println!("  Vendors:     {}", meta.vendor_count);
            println!("  Workers:     {}", meta.labour_count);
            println!("  Attendance:  {}", meta.attendance_count);
            println!("  Payments:    {}", meta.payment_count);
            if let (Some(earliest), Some(latest)) = (&meta.earliest_date, &meta.latest_date) {
                println!("  Date range:  {} to {}", earliest, latest);
            }
        }
    }

    Ok(())
}

fn create_output(output: &Path) -> SitebookResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        SitebookError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    Ok(BufWriter::new(file))
}

fn write_table(output: &Path, table: &CsvTable) -> SitebookResult<()> {
    let mut writer = create_output(output)?;
    write_csv_table(table, &mut writer)?;
    writer.flush()?;
    println!("{} row(s) exported to: {}", table.rows.len(), output.display());
    Ok(())
}
