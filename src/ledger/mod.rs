//! Derived ledger computations
//!
//! Everything here is a pure function of a [`LedgerSnapshot`]. Nothing is
//! cached; callers recompute from the current records on every read.

pub mod history;
pub mod labour;
pub mod partners;
pub mod totals;

use serde::Serialize;

pub use history::{filter_history, find_entry, merged_history, HistoryEntry, HistoryKind};
pub use labour::{earnings, labour_stats, stats_for, worker_name, worker_names, LabourStats, UNKNOWN_WORKER};
pub use partners::{PartnerBreakdown, PartnerContribution};
pub use totals::FundTotals;

use crate::models::{Attendance, Expense, Income, LabourPayment, LabourProfile, RecordSet};

/// Borrowed view of the collections the ledger reads
#[derive(Debug, Clone, Copy)]
pub struct LedgerSnapshot<'a> {
    pub incomes: &'a [Income],
    pub expenses: &'a [Expense],
    pub labours: &'a [LabourProfile],
    pub attendance: &'a [Attendance],
    pub payments: &'a [LabourPayment],
}

impl<'a> LedgerSnapshot<'a> {
    pub fn empty() -> Self {
        Self {
            incomes: &[],
            expenses: &[],
            labours: &[],
            attendance: &[],
            payments: &[],
        }
    }
}

impl<'a> From<&'a RecordSet> for LedgerSnapshot<'a> {
    fn from(records: &'a RecordSet) -> Self {
        Self {
            incomes: &records.incomes,
            expenses: &records.expenses,
            labours: &records.labours,
            attendance: &records.attendance,
            payments: &records.payments,
        }
    }
}

/// All aggregates for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    pub labour: Vec<LabourStats>,
    pub totals: FundTotals,
    pub partners: PartnerBreakdown,
    pub history: Vec<HistoryEntry>,
}

impl Ledger {
    pub fn compute(snapshot: &LedgerSnapshot<'_>) -> Self {
        let labour = labour_stats(snapshot.labours, snapshot.attendance, snapshot.payments);
        let totals = FundTotals::from_stats(snapshot, &labour);
        Self {
            partners: PartnerBreakdown::compute(snapshot),
            history: merged_history(snapshot),
            labour,
            totals,
        }
    }

    pub fn from_records(records: &RecordSet) -> Self {
        Self::compute(&LedgerSnapshot::from(records))
    }
}
