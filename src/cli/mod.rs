//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers print
//! their results and return errors for `main` to report.

pub mod backup;
pub mod expense;
pub mod export;
pub mod import;
pub mod income;
pub mod labour;
pub mod report;
pub mod settings;
pub mod sync;
pub mod vendor;

pub use backup::{handle_backup_command, BackupCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use import::handle_import_command;
pub use income::{handle_income_command, IncomeCommands};
pub use labour::{handle_labour_command, LabourCommands};
pub use report::{handle_report_command, ReportCommands};
pub use settings::{handle_settings_command, SettingsCommands};
pub use sync::{handle_sync_command, SyncCommands};
pub use vendor::{handle_vendor_command, VendorCommands};

use chrono::{Local, NaiveDate};

use crate::error::{SitebookError, SitebookResult};
use crate::models::{ExpenseCategory, FundingSource, Money, PaymentMode};

pub(crate) fn parse_day(s: &str) -> SitebookResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| SitebookError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", s)))
}

/// Parse `YYYY-MM-DD`, defaulting to today
pub(crate) fn date_or_today(date: Option<&str>) -> SitebookResult<NaiveDate> {
    match date {
        Some(s) => parse_day(s),
        None => Ok(Local::now().date_naive()),
    }
}

pub(crate) fn parse_money(amount: &str) -> SitebookResult<Money> {
    Money::parse(amount).map_err(|e| {
        SitebookError::Validation(format!(
            "Invalid amount: '{}'. Use a format like 1500 or 1500.50 ({})",
            amount, e
        ))
    })
}

pub(crate) fn parse_funding_source(s: &str) -> SitebookResult<FundingSource> {
    FundingSource::parse(s).ok_or_else(|| {
        SitebookError::Validation(format!(
            "Unknown payer: '{}'. Use mujahir, salik, pool or other",
            s
        ))
    })
}

pub(crate) fn parse_mode(s: &str) -> SitebookResult<PaymentMode> {
    PaymentMode::parse(s).ok_or_else(|| {
        SitebookError::Validation(format!(
            "Unknown payment mode: '{}'. Use cash, bank, upi or check",
            s
        ))
    })
}

pub(crate) fn parse_category(s: &str) -> SitebookResult<ExpenseCategory> {
    ExpenseCategory::parse(s).ok_or_else(|| {
        SitebookError::Validation(format!(
            "Unknown category: '{}'. Use material, labour, food, transport, utility, contractor or other",
            s
        ))
    })
}

/// Parse an optional value with `parse`
pub(crate) fn parse_opt<T>(
    value: Option<&str>,
    parse: impl Fn(&str) -> SitebookResult<T>,
) -> SitebookResult<Option<T>> {
    value.map(parse).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Partner;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(
            date_or_today(Some("2025-03-09")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
        );
        assert!(parse_day("09/03/2025").unwrap_err().is_validation());
        assert_eq!(parse_money("1500.50").unwrap(), Money::from_paise(150_050));
        assert!(parse_money("abc").unwrap_err().is_validation());
        assert_eq!(parse_opt(None, parse_mode).unwrap(), None);
        assert_eq!(
            parse_funding_source("Dr. Salik").unwrap(),
            FundingSource::Partner(Partner::DrSalik)
        );
    }
}
