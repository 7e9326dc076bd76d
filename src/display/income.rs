//! Income display formatting

use tabled::Tabled;

use super::{render, truncate};
use crate::models::Income;

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Paid By")]
    paid_by: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Remarks")]
    remarks: String,
    #[tabled(rename = "Id")]
    id: String,
}

pub fn format_income_list(incomes: &[Income]) -> String {
    if incomes.is_empty() {
        return "No income recorded.".to_string();
    }

    let rows = incomes
        .iter()
        .map(|i| IncomeRow {
            date: i.date.to_string(),
            amount: i.amount.to_string(),
            paid_by: i.paid_by.to_string(),
            source: i.source.to_string(),
            mode: i.mode.to_string(),
            remarks: truncate(&i.remarks, 30),
            id: i.id.to_string(),
        })
        .collect();
    render(rows)
}

pub fn format_income_details(income: &Income) -> String {
    let mut output = String::new();
    output.push_str(&format!("Income:   {}\n", income.id));
    output.push_str(&format!("Date:     {}\n", income.date));
    output.push_str(&format!("Amount:   {}\n", income.amount));
    output.push_str(&format!("Paid by:  {}\n", income.paid_by));
    output.push_str(&format!("Source:   {}\n", income.source));
    output.push_str(&format!("Mode:     {}\n", income.mode));
    if !income.remarks.is_empty() {
        output.push_str(&format!("Remarks:  {}\n", income.remarks));
    }
    output
}
