//! Partner contribution report

use std::io::Write;

use crate::error::SitebookResult;
use crate::export::{write_csv_table, CsvTable};
use crate::ledger::PartnerBreakdown;

#[derive(Debug, Clone)]
pub struct PartnerReport {
    pub breakdown: PartnerBreakdown,
}

impl PartnerReport {
    pub fn new(breakdown: PartnerBreakdown) -> Self {
        Self { breakdown }
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Partner Contributions\n");
        output.push_str(&"=".repeat(86));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>16} {:>16} {:>16} {:>16}\n",
            "Partner", "Direct", "Spent", "Total", "Share"
        ));
        output.push_str(&"-".repeat(86));
        output.push('\n');

        for c in &self.breakdown.contributions {
            output.push_str(&format!(
                "{:<16} {:>16} {:>16} {:>16} {:>15.1}%\n",
                c.partner, c.direct, c.spent, c.total, c.share_percent
            ));
            output.push_str(&format!(
                "{:<16} {:>16} {:>16}\n",
                "",
                "expenses",
                c.spent_expenses.to_string()
            ));
            output.push_str(&format!(
                "{:<16} {:>16} {:>16}\n",
                "",
                "labour",
                c.spent_labour.to_string()
            ));
        }

        output.push_str(&"-".repeat(86));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>16} {:>16} {:>16}\n",
            "TOTAL", "", "", self.breakdown.grand_total
        ));

        output
    }

    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SitebookResult<()> {
        let rows = self
            .breakdown
            .contributions
            .iter()
            .map(|c| {
                vec![
                    c.partner.to_string(),
                    c.direct.to_decimal_string(),
                    c.spent_expenses.to_decimal_string(),
                    c.spent_labour.to_decimal_string(),
                    c.total.to_decimal_string(),
                    format!("{:.2}", c.share_percent),
                ]
            })
            .collect();

        write_csv_table(
            &CsvTable {
                headers: &[
                    "Partner",
                    "Direct",
                    "Spent Expenses",
                    "Spent Labour",
                    "Total",
                    "Share %",
                ],
                rows,
            },
            writer,
        )
    }
}
