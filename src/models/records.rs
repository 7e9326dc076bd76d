//! The complete set of record collections
//!
//! This is the unit that is backed up, exported, imported and pushed to the
//! remote sheet. Keys match the collection names used by existing backups.

use serde::{Deserialize, Serialize};

use super::expense::{Expense, Vendor};
use super::income::Income;
use super::labour::{Attendance, LabourPayment, LabourProfile};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub labours: Vec<LabourProfile>,
    #[serde(default)]
    pub attendance: Vec<Attendance>,
    #[serde(default)]
    pub payments: Vec<LabourPayment>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
}

impl RecordSet {
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Total number of records across all collections
    pub fn record_count(&self) -> usize {
        self.incomes.len()
            + self.expenses.len()
            + self.labours.len()
            + self.attendance.len()
            + self.payments.len()
            + self.vendors.len()
    }
}
