//! Expense and vendor display formatting

use tabled::Tabled;

use super::{render, truncate};
use crate::models::{Expense, Vendor};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Paid To")]
    paid_to: String,
    #[tabled(rename = "Paid By")]
    paid_by: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Id")]
    id: String,
}

#[derive(Tabled)]
struct VendorRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Mobile")]
    mobile: String,
    #[tabled(rename = "Id")]
    id: String,
}

fn category_label(expense: &Expense) -> String {
    match &expense.sub_category {
        Some(sub) => format!("{} / {}", expense.category, sub),
        None => expense.category.to_string(),
    }
}

pub fn format_expense_list(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses
        .iter()
        .map(|e| ExpenseRow {
            date: e.date.to_string(),
            amount: e.amount.to_string(),
            category: category_label(e),
            paid_to: truncate(&e.paid_to, 24),
            paid_by: e.paid_by.to_string(),
            mode: e.mode.to_string(),
            id: e.id.to_string(),
        })
        .collect();
    render(rows)
}

pub fn format_expense_details(expense: &Expense, vendor: Option<&Vendor>) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense:  {}\n", expense.id));
    output.push_str(&format!("Date:     {}\n", expense.date));
    output.push_str(&format!("Amount:   {}\n", expense.amount));
    output.push_str(&format!("Category: {}\n", category_label(expense)));
    output.push_str(&format!("Paid to:  {}\n", expense.paid_to));
    output.push_str(&format!("Paid by:  {}\n", expense.paid_by));
    output.push_str(&format!("Mode:     {}\n", expense.mode));
    match (vendor, &expense.vendor_id) {
        (Some(v), _) => output.push_str(&format!("Vendor:   {}\n", v.name)),
        (None, Some(id)) => output.push_str(&format!("Vendor:   {} (deleted)\n", id)),
        (None, None) => {}
    }
    if !expense.notes.is_empty() {
        output.push_str(&format!("Notes:    {}\n", expense.notes));
    }
    output
}

pub fn format_vendor_list(vendors: &[Vendor]) -> String {
    if vendors.is_empty() {
        return "No vendors found.".to_string();
    }

    let rows = vendors
        .iter()
        .map(|v| VendorRow {
            name: v.name.clone(),
            category: v.category.to_string(),
            mobile: v.mobile.clone().unwrap_or_default(),
            id: v.id.to_string(),
        })
        .collect();
    render(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, FundingSource, Money, VendorId};
    use chrono::NaiveDate;

    fn expense() -> Expense {
        let mut expense = Expense::new(
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            Money::from_rupees(4_200),
            ExpenseCategory::Material,
            "Verma Traders",
            FundingSource::Pool,
        );
        expense.sub_category = Some("Saria".into());
        expense
    }

    #[test]
    fn test_expense_list() {
        let table = format_expense_list(&[expense()]);
        assert!(table.contains("Material / Saria"));
        assert!(table.contains("Project Balance"));
        assert_eq!(format_expense_list(&[]), "No expenses found.");
    }

    #[test]
    fn test_expense_details_with_missing_vendor() {
        let mut e = expense();
        e.vendor_id = Some(VendorId::from("ven-gone"));
        let details = format_expense_details(&e, None);
        assert!(details.contains("Vendor:   ven-gone (deleted)"));

        let vendor = Vendor::new("Verma Traders", ExpenseCategory::Material);
        assert!(format_expense_details(&e, Some(&vendor)).contains("Vendor:   Verma Traders\n"));
    }

    #[test]
    fn test_vendor_list() {
        let mut vendor = Vendor::new("Verma Traders", ExpenseCategory::Material);
        vendor.mobile = Some("98100 00000".into());
        let table = format_vendor_list(&[vendor]);
        assert!(table.contains("98100 00000"));
    }
}
