//! CSV export
//!
//! The full report is a single file with one section per record type,
//! prefixed with a UTF-8 byte order mark so spreadsheet apps pick the right
//! encoding for Devanagari remarks. Individual tables can also be exported
//! on their own.

use std::io::Write;

use crate::error::{SitebookError, SitebookResult};
use crate::ledger::{worker_names, LabourStats, UNKNOWN_WORKER};
use crate::models::{Expense, Income, LabourPayment, LabourProfile, Money, RecordSet};

const BOM: &str = "\u{feff}";

/// A header row plus data rows, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
}

fn export_err(e: impl std::fmt::Display) -> SitebookError {
    SitebookError::Export(e.to_string())
}

/// Amount as a plain number: `1500` for whole rupees, `1500.50` otherwise
fn amount_cell(amount: Money) -> String {
    if amount.paise_part() == 0 {
        amount.rupees().to_string()
    } else {
        amount.to_decimal_string()
    }
}

fn writer<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(inner)
}

fn write_table<W: Write>(wtr: &mut csv::Writer<W>, table: &CsvTable) -> SitebookResult<()> {
    wtr.write_record(table.headers).map_err(export_err)?;
    for row in &table.rows {
        wtr.write_record(row).map_err(export_err)?;
    }
    Ok(())
}

pub fn income_table(incomes: &[Income]) -> CsvTable {
    CsvTable {
        headers: &["Date", "Amount", "Source", "Paid By", "Mode", "Remarks"],
        rows: incomes
            .iter()
            .map(|i| {
                vec![
                    i.date.to_string(),
                    amount_cell(i.amount),
                    i.source.to_string(),
                    i.paid_by.to_string(),
                    i.mode.to_string(),
                    i.remarks.clone(),
                ]
            })
            .collect(),
    }
}

pub fn expense_table(expenses: &[Expense]) -> CsvTable {
    CsvTable {
        headers: &["Date", "Amount", "Category", "Paid To", "Source", "Mode", "Notes"],
        rows: expenses
            .iter()
            .map(|e| {
                vec![
                    e.date.to_string(),
                    amount_cell(e.amount),
                    e.category.to_string(),
                    e.paid_to.clone(),
                    e.paid_by.to_string(),
                    e.mode.to_string(),
                    e.notes.clone(),
                ]
            })
            .collect(),
    }
}

/// Labour payments with the worker resolved to a name
pub fn payment_table(payments: &[LabourPayment], labours: &[LabourProfile]) -> CsvTable {
    let names = worker_names(labours);
    CsvTable {
        headers: &["Date", "Labour Name", "Amount", "Paid From", "Mode"],
        rows: payments
            .iter()
            .map(|p| {
                vec![
                    p.date.to_string(),
                    names
                        .get(p.labour_id.as_str())
                        .copied()
                        .unwrap_or(UNKNOWN_WORKER)
                        .to_string(),
                    amount_cell(p.amount),
                    p.paid_by.to_string(),
                    p.mode.to_string(),
                ]
            })
            .collect(),
    }
}

/// Per-worker wage position
pub fn labour_summary_table(stats: &[LabourStats]) -> CsvTable {
    CsvTable {
        headers: &[
            "Name",
            "Work Type",
            "Daily Wage",
            "Days",
            "Overtime Hours",
            "Earned",
            "Paid",
            "Outstanding",
        ],
        rows: stats
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    s.work_type.clone(),
                    amount_cell(s.daily_wage),
                    s.present_days.to_string(),
                    s.overtime_hours.to_string(),
                    s.earned.to_decimal_string(),
                    s.paid.to_decimal_string(),
                    s.outstanding.to_decimal_string(),
                ]
            })
            .collect(),
    }
}

/// Write a single table, with a byte order mark
pub fn write_csv_table<W: Write>(table: &CsvTable, writer_out: &mut W) -> SitebookResult<()> {
    writer_out.write_all(BOM.as_bytes()).map_err(export_err)?;
    let mut wtr = writer(writer_out);
    write_table(&mut wtr, table)?;
    wtr.flush().map_err(export_err)
}

/// Write the full sectioned report: direct income, expenses, labour payments
pub fn export_report_csv<W: Write>(records: &RecordSet, writer_out: &mut W) -> SitebookResult<()> {
    let sections = [
        ("SECTION: DIRECT INCOME", income_table(&records.incomes)),
        ("SECTION: EXPENSES", expense_table(&records.expenses)),
        (
            "SECTION: LABOUR PAYMENTS",
            payment_table(&records.payments, &records.labours),
        ),
    ];

    writer_out.write_all(BOM.as_bytes()).map_err(export_err)?;
    for (index, (title, table)) in sections.iter().enumerate() {
        // a blank line between sections; an empty csv record would be `""`
        if index > 0 {
            writer_out.write_all(b"\n").map_err(export_err)?;
        }
        let mut wtr = writer(&mut *writer_out);
        wtr.write_record([*title]).map_err(export_err)?;
        write_table(&mut wtr, table)?;
        wtr.flush().map_err(export_err)?;
    }
    Ok(())
}
