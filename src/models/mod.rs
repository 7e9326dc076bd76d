//! Core data models for Sitebook
//!
//! Flat record types for the construction ledger: direct incomes, expenses,
//! vendors, labour profiles, attendance and labour payments.

pub mod expense;
pub mod ids;
pub mod income;
pub mod labour;
pub mod money;
pub mod partner;
pub mod records;

pub use expense::{Expense, ExpenseCategory, ExpenseValidationError, Vendor};
pub use ids::{AttendanceId, ExpenseId, IncomeId, LabourId, PaymentId, VendorId};
pub use income::{Income, IncomeSource, IncomeValidationError};
pub use labour::{
    Attendance, AttendanceStatus, LabourPayment, LabourPaymentType, LabourProfile,
    LabourValidationError, STANDARD_DAY_HOURS,
};
pub use money::{Money, MoneyParseError};
pub use partner::{FundingSource, Partner, PaymentMode};
pub use records::RecordSet;
