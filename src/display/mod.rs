//! Display formatting for terminal output
//!
//! Record lists render as `tabled` tables; single records as aligned
//! key/value details.

pub mod expense;
pub mod income;
pub mod labour;

pub use expense::{format_expense_details, format_expense_list, format_vendor_list};
pub use income::{format_income_details, format_income_list};
pub use labour::{format_attendance_list, format_labour_list, format_payment_list};

use tabled::{settings::Style, Table, Tabled};

pub(crate) fn render<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Cut `s` to at most `max` characters, marking the cut with an ellipsis
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
