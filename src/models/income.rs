//! Direct income model
//!
//! A direct cash or bank injection into the project fund. Money a partner
//! spends personally is not recorded here; it is recognized from the
//! expense and labour payment records instead.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::IncomeId;
use super::money::Money;
use super::partner::{FundingSource, PaymentMode};

/// Validation errors for incomes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    NonPositiveAmount,
}

impl fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Income amount must be greater than zero"),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// Nature of a fund injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IncomeSource {
    #[default]
    Investment,
    Loan,
    Donation,
    Other,
}

impl IncomeSource {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "investment" => Some(Self::Investment),
            "loan" => Some(Self::Loan),
            "donation" => Some(Self::Donation),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Investment => "Investment",
            Self::Loan => "Loan",
            Self::Donation => "Donation",
            Self::Other => "Other",
        };
        f.pad(label)
    }
}

/// A direct injection into the project fund
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: IncomeId,
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(default)]
    pub source: IncomeSource,
    pub paid_by: FundingSource,
    #[serde(default)]
    pub mode: PaymentMode,
    #[serde(default)]
    pub remarks: String,
    /// Whether the record has been pushed to the remote sheet
    #[serde(default)]
    pub synced: bool,
}

impl Income {
    pub fn new(date: NaiveDate, amount: Money, paid_by: FundingSource) -> Self {
        Self {
            id: IncomeId::new(),
            date,
            amount,
            source: IncomeSource::default(),
            paid_by,
            mode: PaymentMode::default(),
            remarks: String::new(),
            synced: false,
        }
    }

    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if !self.amount.is_positive() {
            return Err(IncomeValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Partner;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_new_income() {
        let income = Income::new(date(), Money::from_rupees(50000), Partner::DrSalik.into());
        assert_eq!(income.source, IncomeSource::Investment);
        assert_eq!(income.mode, PaymentMode::Cash);
        assert!(income.validate().is_ok());
    }

    #[test]
    fn test_zero_amount_rejected() {
        let income = Income::new(date(), Money::zero(), FundingSource::Pool);
        assert_eq!(income.validate(), Err(IncomeValidationError::NonPositiveAmount));
    }

    #[test]
    fn test_reads_original_record_shape() {
        let json = r#"{
            "id": "inc_1712345678901_ab12c",
            "date": "2025-02-01",
            "amount": 25000,
            "source": "Loan",
            "paidBy": "Master Mujahir",
            "mode": "UPI",
            "remarks": "Second instalment",
            "synced": true
        }"#;
        let income: Income = serde_json::from_str(json).unwrap();
        assert_eq!(income.amount, Money::from_rupees(25000));
        assert_eq!(income.source, IncomeSource::Loan);
        assert_eq!(income.paid_by, FundingSource::Partner(Partner::MasterMujahir));
        assert_eq!(income.mode, PaymentMode::Upi);
    }
}
