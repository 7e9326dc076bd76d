//! Dashboard
//!
//! Project-level position: money in, money out, balance, labour dues and
//! where the spending went.

use std::io::Write;

use serde::Serialize;

use crate::config::Settings;
use crate::error::SitebookResult;
use crate::export::{write_csv_table, CsvTable};
use crate::ledger::{FundTotals, HistoryEntry, Ledger};
use crate::models::{ExpenseCategory, Money, RecordSet};

const RECENT_ENTRIES: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub category: ExpenseCategory,
    pub amount: Money,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub project_name: String,
    pub location: String,
    pub budget: Money,
    pub totals: FundTotals,
    /// Total expense as a share of budget; `None` without a budget
    pub budget_used_percent: Option<f64>,
    pub categories: Vec<CategorySpend>,
    pub recent: Vec<HistoryEntry>,
    pub labour_count: usize,
}

fn percent_of(part: Money, whole: Money) -> f64 {
    if whole.is_positive() {
        part.paise() as f64 / whole.paise() as f64 * 100.0
    } else {
        0.0
    }
}

impl DashboardReport {
    pub fn generate(records: &RecordSet, ledger: &Ledger, settings: &Settings) -> Self {
        let expenses_total = ledger.totals.expenses_total;
        let mut categories: Vec<CategorySpend> = ExpenseCategory::all()
            .iter()
            .filter_map(|&category| {
                let matching: Vec<Money> = records
                    .expenses
                    .iter()
                    .filter(|e| e.category == category)
                    .map(|e| e.amount)
                    .collect();
                let amount: Money = matching.iter().sum();
                (!matching.is_empty()).then(|| CategorySpend {
                    category,
                    amount,
                    count: matching.len(),
                    percentage: percent_of(amount, expenses_total),
                })
            })
            .collect();
        categories.sort_by(|a, b| b.amount.cmp(&a.amount));

        let budget = settings.budget;
        Self {
            project_name: settings.project_name.clone(),
            location: settings.location.clone(),
            budget,
            budget_used_percent: budget
                .is_positive()
                .then(|| percent_of(ledger.totals.total_expense, budget)),
            totals: ledger.totals.clone(),
            categories,
            recent: ledger.history.iter().take(RECENT_ENTRIES).cloned().collect(),
            labour_count: records.labours.len(),
        }
    }

    pub fn format_terminal(&self) -> String {
        let t = &self.totals;
        let mut output = String::new();

        output.push_str(&self.project_name);
        if !self.location.is_empty() {
            output.push_str(&format!(" ({})", self.location));
        }
        output.push('\n');
        output.push_str(&"=".repeat(60));
        output.push('\n');

        let line = |label: &str, amount: Money| format!("{:<32} {:>16}\n", label, amount);
        output.push_str(&line("Direct income", t.direct_income));
        output.push_str(&line("Partner-paid expenses", t.partner_spent_expenses));
        output.push_str(&line("Partner-paid labour", t.partner_spent_labour));
        output.push_str(&line("Total income", t.total_income));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&line("Expenses", t.expenses_total));
        output.push_str(&line("Labour payments", t.labour_payments_total));
        output.push_str(&line("Total expense", t.total_expense));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&line("Balance", t.net_balance));
        output.push_str(&line("Labour earned", t.labour_earned));
        output.push_str(&line("Labour dues outstanding", t.labour_outstanding));
        output.push_str(&format!("{:<32} {:>16}\n", "Workers", self.labour_count));

        if let Some(used) = self.budget_used_percent {
            output.push_str(&format!(
                "\nBudget {} ({:.1}% used)\n",
                self.budget, used
            ));
        }

        if !self.categories.is_empty() {
            output.push_str("\nSpending by category\n");
            for c in &self.categories {
                output.push_str(&format!(
                    "  {:<20} {:>16} {:>5} {:>6.1}%\n",
                    c.category, c.amount, c.count, c.percentage
                ));
            }
        }

        if !self.recent.is_empty() {
            output.push_str("\nRecent money in\n");
            for e in &self.recent {
                output.push_str(&format!(
                    "  {} {:<16} {:>14}  {}\n",
                    e.date, e.paid_by, e.amount, e.remarks
                ));
            }
        }

        output
    }

    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SitebookResult<()> {
        let t = &self.totals;
        let rows = [
            ("Direct Income", t.direct_income),
            ("Partner Spent Expenses", t.partner_spent_expenses),
            ("Partner Spent Labour", t.partner_spent_labour),
            ("Total Income", t.total_income),
            ("Expenses", t.expenses_total),
            ("Labour Payments", t.labour_payments_total),
            ("Total Expense", t.total_expense),
            ("Balance", t.net_balance),
            ("Labour Earned", t.labour_earned),
            ("Labour Outstanding", t.labour_outstanding),
        ]
        .into_iter()
        .map(|(label, amount)| vec![label.to_string(), amount.to_decimal_string()])
        .chain(self.categories.iter().map(|c| {
            vec![
                format!("Category: {}", c.category),
                c.amount.to_decimal_string(),
            ]
        }))
        .collect();

        write_csv_table(
            &CsvTable {
                headers: &["Metric", "Amount"],
                rows,
            },
            writer,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, FundingSource, Income, Partner};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    fn records() -> RecordSet {
        RecordSet {
            incomes: vec![Income::new(day(1), Money::from_rupees(100_000), Partner::DrSalik.into())],
            expenses: vec![
                Expense::new(day(2), Money::from_rupees(30_000), ExpenseCategory::Material, "Cement", FundingSource::Pool),
                Expense::new(day(3), Money::from_rupees(10_000), ExpenseCategory::Food, "Dhaba", Partner::MasterMujahir.into()),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_dashboard_totals_and_categories() {
        let records = records();
        let ledger = Ledger::from_records(&records);
        let mut settings = Settings::default();
        settings.budget = Money::from_rupees(400_000);

        let report = DashboardReport::generate(&records, &ledger, &settings);
        assert_eq!(report.totals.total_income, Money::from_rupees(110_000));
        assert_eq!(report.totals.net_balance, Money::from_rupees(70_000));
        assert_eq!(report.budget_used_percent, Some(10.0));
        assert_eq!(report.categories[0].category, ExpenseCategory::Material);
        assert_eq!(report.categories[0].percentage, 75.0);
        assert_eq!(report.recent.len(), 2);

        let text = report.format_terminal();
        assert!(text.contains("Total income"));
        assert!(text.contains("₹70000.00"));
    }

    #[test]
    fn test_dashboard_csv() {
        let records = records();
        let ledger = Ledger::from_records(&records);
        let report = DashboardReport::generate(&records, &ledger, &Settings::default());
        assert!(report.budget_used_percent.is_none());

        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Total Income,110000.00\n"));
        assert!(text.contains("Category: Food,10000.00\n"));
    }
}
