//! Expense and vendor models
//!
//! An expense is any cash outflow other than wages paid through the labour
//! register. `paid_by` records whose money was used.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, VendorId};
use super::money::Money;
use super::partner::{FundingSource, PaymentMode};

/// Validation errors for expenses and vendors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount,
    EmptyPayee,
    EmptyVendorName,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Expense amount must be greater than zero"),
            Self::EmptyPayee => write!(f, "Expense must name who was paid"),
            Self::EmptyVendorName => write!(f, "Vendor name cannot be empty"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ExpenseCategory {
    #[default]
    Material,
    Labour,
    Food,
    Transport,
    Utility,
    Contractor,
    Other,
}

impl ExpenseCategory {
    pub fn all() -> &'static [ExpenseCategory] {
        &[
            Self::Material,
            Self::Labour,
            Self::Food,
            Self::Transport,
            Self::Utility,
            Self::Contractor,
            Self::Other,
        ]
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "material" => Some(Self::Material),
            "labour" | "labor" => Some(Self::Labour),
            "food" => Some(Self::Food),
            "transport" => Some(Self::Transport),
            "utility" => Some(Self::Utility),
            "contractor" => Some(Self::Contractor),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Well-known sub-categories offered for this category
    ///
    /// Sub-categories are free text; these are suggestions only.
    pub fn suggested_subcategories(&self) -> &'static [&'static str] {
        match self {
            Self::Labour => &[
                "Mistry",
                "Majdoor",
                "Plumber",
                "Electrician",
                "Painter",
                "Carpenter",
            ],
            Self::Material => &[
                "Cement",
                "Saria",
                "Sand/Bajri",
                "Grit",
                "Bricks",
                "Tiles",
                "Paint",
                "Hardware",
                "Electrical",
                "Plumbing",
                "Other Material",
            ],
            Self::Food => &["Tea/Snacks", "Lunch", "Dinner", "Water", "Other Food"],
            Self::Transport | Self::Utility | Self::Contractor | Self::Other => &[],
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Material => "Material",
            Self::Labour => "Labour",
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Utility => "Utility",
            Self::Contractor => "Contractor",
            Self::Other => "Other",
        };
        f.pad(label)
    }
}

/// A supplier the project buys from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    #[serde(default)]
    pub category: ExpenseCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

impl Vendor {
    pub fn new(name: impl Into<String>, category: ExpenseCategory) -> Self {
        Self {
            id: VendorId::new(),
            name: name.into(),
            category,
            mobile: None,
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyVendorName);
        }
        Ok(())
    }
}

/// A cash outflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(default)]
    pub category: ExpenseCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    /// Who received the money
    #[serde(default)]
    pub paid_to: String,
    /// Whose money was used
    pub paid_by: FundingSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<VendorId>,
    #[serde(default)]
    pub mode: PaymentMode,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub synced: bool,
}

impl Expense {
    pub fn new(
        date: NaiveDate,
        amount: Money,
        category: ExpenseCategory,
        paid_to: impl Into<String>,
        paid_by: FundingSource,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            date,
            amount,
            category,
            sub_category: None,
            paid_to: paid_to.into(),
            paid_by,
            vendor_id: None,
            mode: PaymentMode::default(),
            notes: String::new(),
            synced: false,
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        if self.paid_to.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyPayee);
        }
        Ok(())
    }
}
