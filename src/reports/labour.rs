//! Labour wage report
//!
//! Earned, paid and outstanding per worker, plus an optional ledger of one
//! worker's attendance and payments.

use std::io::Write;

use chrono::NaiveDate;

use crate::error::SitebookResult;
use crate::export::{labour_summary_table, write_csv_table};
use crate::ledger::LabourStats;
use crate::models::{Attendance, LabourPayment, Money};

#[derive(Debug, Clone)]
pub struct LabourReport {
    pub stats: Vec<LabourStats>,
    pub total_earned: Money,
    pub total_paid: Money,
    pub total_outstanding: Money,
}

impl LabourReport {
    pub fn new(stats: Vec<LabourStats>) -> Self {
        Self {
            total_earned: stats.iter().map(|s| s.earned).sum(),
            total_paid: stats.iter().map(|s| s.paid).sum(),
            total_outstanding: stats.iter().map(|s| s.outstanding).sum(),
            stats,
        }
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Labour Summary\n");
        output.push_str(&"=".repeat(92));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:<12} {:>10} {:>6} {:>6} {:>12} {:>12} {:>12}\n",
            "Name", "Work", "Wage", "Days", "OT h", "Earned", "Paid", "Due"
        ));
        output.push_str(&"-".repeat(92));
        output.push('\n');

        for s in &self.stats {
            output.push_str(&format!(
                "{:<18} {:<12} {:>10} {:>6} {:>6} {:>12} {:>12} {:>12}{}\n",
                s.name,
                s.work_type,
                s.daily_wage,
                s.present_days,
                s.overtime_hours,
                s.earned,
                s.paid,
                s.outstanding,
                if s.is_overpaid() { " (advance)" } else { "" }
            ));
        }

        output.push_str(&"-".repeat(92));
        output.push('\n');
        output.push_str(&format!(
            "{:<58} {:>12} {:>12} {:>12}\n",
            "TOTAL", self.total_earned, self.total_paid, self.total_outstanding
        ));

        output
    }

    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SitebookResult<()> {
        write_csv_table(&labour_summary_table(&self.stats), writer)
    }
}

/// One worker's day-by-day ledger
#[derive(Debug, Clone)]
pub struct WorkerStatement {
    pub stats: LabourStats,
    pub lines: Vec<StatementLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementLine {
    Attendance(Attendance),
    Payment(LabourPayment),
}

impl StatementLine {
    fn date(&self) -> NaiveDate {
        match self {
            Self::Attendance(a) => a.date,
            Self::Payment(p) => p.date,
        }
    }
}

impl WorkerStatement {
    /// Attendance and payments interleaved, oldest first
    pub fn new(stats: LabourStats, attendance: Vec<Attendance>, payments: Vec<LabourPayment>) -> Self {
        let mut lines: Vec<StatementLine> = attendance
            .into_iter()
            .map(StatementLine::Attendance)
            .chain(payments.into_iter().map(StatementLine::Payment))
            .collect();
        lines.sort_by_key(|l| l.date());
        Self { stats, lines }
    }

    pub fn format_terminal(&self) -> String {
        let s = &self.stats;
        let mut output = format!(
            "{} ({}) at {}/day\n",
            s.name, s.work_type, s.daily_wage
        );
        output.push_str(&"=".repeat(60));
        output.push('\n');

        for line in &self.lines {
            match line {
                StatementLine::Attendance(a) => {
                    let overtime = if a.overtime_hours > 0.0 {
                        format!(" +{}h OT", a.overtime_hours)
                    } else {
                        String::new()
                    };
                    output.push_str(&format!("{}  {}{}\n", a.date, a.status, overtime));
                }
                StatementLine::Payment(p) => {
                    output.push_str(&format!(
                        "{}  paid {} ({}, {} by {})\n",
                        p.date, p.amount, p.payment_type, p.mode, p.paid_by
                    ));
                }
            }
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Days {}  OT {}h  Earned {}  Paid {}  Due {}\n",
            s.present_days, s.overtime_hours, s.earned, s.paid, s.outstanding
        ));
        output
    }
}
