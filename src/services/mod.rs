//! Service layer for Sitebook
//!
//! The service layer provides validation and persistence on top of the
//! storage layer. Every mutation is written to disk and audited before the
//! call returns.

pub mod data;
pub mod expense;
pub mod income;
pub mod labour;
pub mod vendor;

pub use data::DataService;
pub use expense::{CreateExpenseInput, ExpenseFilter, ExpenseService, ExpenseUpdate};
pub use income::{CreateIncomeInput, IncomeService, IncomeUpdate};
pub use labour::{LabourService, LabourUpdate, RecordPaymentInput};
pub use vendor::VendorService;
