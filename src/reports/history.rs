//! Money-in history report

use std::io::Write;

use crate::error::SitebookResult;
use crate::export::{write_csv_table, CsvTable};
use crate::ledger::{filter_history, HistoryEntry};
use crate::models::Money;

#[derive(Debug, Clone)]
pub struct HistoryReport {
    pub entries: Vec<HistoryEntry>,
    pub search: Option<String>,
    pub total: Money,
}

impl HistoryReport {
    /// Keep entries matching `search`, in history order
    pub fn new(history: &[HistoryEntry], search: Option<&str>) -> Self {
        let entries: Vec<HistoryEntry> = match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => filter_history(history, term).into_iter().cloned().collect(),
            None => history.to_vec(),
        };
        Self {
            total: entries.iter().map(|e| e.amount).sum(),
            search: search.map(str::to_string),
            entries,
        }
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Money In\n");
        if let Some(term) = &self.search {
            output.push_str(&format!("Search: {}\n", term));
        }
        output.push_str(&"=".repeat(138));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:<16} {:<16} {:>14} {:<6} {:<36} {}\n",
            "Date", "Kind", "Paid By", "Amount", "Mode", "Id", "Remarks"
        ));
        output.push_str(&"-".repeat(138));
        output.push('\n');

        for e in &self.entries {
            output.push_str(&format!(
                "{:<10} {:<16} {:<16} {:>14} {:<6} {:<36} {}\n",
                e.date,
                e.kind.label(),
                e.paid_by,
                e.amount,
                e.mode,
                e.id,
                e.remarks
            ));
        }

        output.push_str(&"-".repeat(138));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:<16} {:<16} {:>14}\n",
            "TOTAL",
            format!("{} entries", self.entries.len()),
            "",
            self.total
        ));

        output
    }

    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SitebookResult<()> {
        let rows = self
            .entries
            .iter()
            .map(|e| {
                vec![
                    e.date.to_string(),
                    e.kind.label().to_string(),
                    e.paid_by.to_string(),
                    e.amount.to_decimal_string(),
                    e.mode.to_string(),
                    e.source.clone(),
                    e.remarks.clone(),
                    e.id.clone(),
                ]
            })
            .collect();

        write_csv_table(
            &CsvTable {
                headers: &["Date", "Kind", "Paid By", "Amount", "Mode", "Source", "Remarks", "Id"],
                rows,
            },
            writer,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::models::{Expense, ExpenseCategory, Income, Partner, RecordSet};
    use chrono::NaiveDate;

    fn history() -> Vec<HistoryEntry> {
        let records = RecordSet {
            incomes: vec![Income::new(
                NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                Money::from_rupees(20_000),
                Partner::MasterMujahir.into(),
            )],
            expenses: vec![Expense::new(
                NaiveDate::from_ymd_opt(2025, 5, 4).unwrap(),
                Money::from_rupees(2_500),
                ExpenseCategory::Material,
                "Sand supplier",
                Partner::DrSalik.into(),
            )],
            ..Default::default()
        };
        Ledger::from_records(&records).history
    }

    #[test]
    fn test_history_report_all() {
        let report = HistoryReport::new(&history(), None);
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.total, Money::from_rupees(22_500));

        let text = report.format_terminal();
        assert!(text.contains("Spent on: Sand supplier (Material)"));
        assert!(text.contains("2 entries"));
    }

    #[test]
    fn test_history_report_search() {
        let report = HistoryReport::new(&history(), Some("salik"));
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.total, Money::from_rupees(2_500));

        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        assert!(csv.contains("2025-05-04,Spent (expense),Dr. Salik,2500.00,Cash,"));
    }

    #[test]
    fn test_blank_search_keeps_everything() {
        assert_eq!(HistoryReport::new(&history(), Some("  ")).entries.len(), 2);
    }
}
