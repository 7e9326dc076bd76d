//! Reports for Sitebook
//!
//! Each report is built from a computed [`Ledger`](crate::ledger::Ledger)
//! and renders either as terminal text or as CSV.

pub mod dashboard;
pub mod history;
pub mod labour;
pub mod partners;

pub use dashboard::{CategorySpend, DashboardReport};
pub use history::HistoryReport;
pub use labour::{LabourReport, StatementLine, WorkerStatement};
pub use partners::PartnerReport;
