//! Merged money-in history
//!
//! The income view shows direct incomes alongside every expense and labour
//! payment a partner covered personally. Only direct entries belong to the
//! income collection; the others point back at their originating records.

use chrono::NaiveDate;
use serde::Serialize;

use super::LedgerSnapshot;
use crate::error::{SitebookError, SitebookResult};
use crate::models::{FundingSource, Money, PaymentMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    Direct,
    SpentExpense,
    SpentLabour,
}

impl HistoryKind {
    /// Record type the entry was taken from
    pub fn origin(&self) -> &'static str {
        match self {
            Self::Direct => "Income",
            Self::SpentExpense => "Expense",
            Self::SpentLabour => "Labour payment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Direct => "Direct",
            Self::SpentExpense => "Spent (expense)",
            Self::SpentLabour => "Spent (labour)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Id of the originating record
    pub id: String,
    pub kind: HistoryKind,
    pub date: NaiveDate,
    pub amount: Money,
    pub paid_by: FundingSource,
    pub mode: PaymentMode,
    /// Income source for direct entries, otherwise the outflow kind
    pub source: String,
    pub remarks: String,
}

impl HistoryEntry {
    pub fn is_direct(&self) -> bool {
        self.kind == HistoryKind::Direct
    }

    /// Refuse mutation of entries that mirror another record type
    pub fn ensure_mutable(&self, action: &str) -> SitebookResult<()> {
        if self.is_direct() {
            return Ok(());
        }
        let origin = self.kind.origin();
        let section = match self.kind {
            HistoryKind::SpentLabour => "Labour",
            _ => "Expenses",
        };
        Err(SitebookError::DerivedEntry {
            origin,
            guidance: format!(
                "This entry was recorded as a {} paid by {}. To {} it, use the {} section.",
                origin.to_lowercase(),
                self.paid_by,
                action,
                section
            ),
        })
    }

    pub fn ensure_editable(&self) -> SitebookResult<()> {
        self.ensure_mutable("edit")
    }

    pub fn ensure_deletable(&self) -> SitebookResult<()> {
        self.ensure_mutable("delete")
    }
}

/// Build the merged feed, newest first
///
/// Entries with the same date keep their relative order: direct incomes,
/// then partner-funded expenses, then partner-funded labour payments, each
/// in collection order.
pub fn merged_history(snapshot: &LedgerSnapshot<'_>) -> Vec<HistoryEntry> {
    let direct = snapshot.incomes.iter().map(|income| HistoryEntry {
        id: income.id.to_string(),
        kind: HistoryKind::Direct,
        date: income.date,
        amount: income.amount,
        paid_by: income.paid_by,
        mode: income.mode,
        source: income.source.to_string(),
        remarks: income.remarks.clone(),
    });

    let spent_expenses = snapshot
        .expenses
        .iter()
        .filter(|e| e.paid_by.named_partner().is_some())
        .map(|expense| HistoryEntry {
            id: expense.id.to_string(),
            kind: HistoryKind::SpentExpense,
            date: expense.date,
            amount: expense.amount,
            paid_by: expense.paid_by,
            mode: expense.mode,
            source: "Direct Expense".to_string(),
            remarks: format!("Spent on: {} ({})", expense.paid_to, expense.category),
        });

    let spent_labour = snapshot
        .payments
        .iter()
        .filter(|p| p.paid_by.named_partner().is_some())
        .map(|payment| HistoryEntry {
            id: payment.id.to_string(),
            kind: HistoryKind::SpentLabour,
            date: payment.date,
            amount: payment.amount,
            paid_by: payment.paid_by,
            mode: payment.mode,
            source: "Labour Payment".to_string(),
            remarks: format!("Labour Payment ({})", payment.payment_type),
        });

    let mut entries: Vec<HistoryEntry> = direct.chain(spent_expenses).chain(spent_labour).collect();
    // sort_by is stable
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

/// Case-insensitive search over payer, remarks, source and amount
///
/// An empty term matches everything.
pub fn filter_history<'a>(entries: &'a [HistoryEntry], term: &str) -> Vec<&'a HistoryEntry> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|entry| {
            entry.paid_by.label().to_lowercase().contains(&needle)
                || entry.remarks.to_lowercase().contains(&needle)
                || entry.source.to_lowercase().contains(&needle)
                || entry.amount.to_decimal_string().contains(&needle)
                || entry.amount.rupees().to_string().contains(&needle)
        })
        .collect()
}

/// Find an entry by originating id
///
/// Ids are unique per collection only, so a direct income wins over a
/// derived entry with the same id.
pub fn find_entry<'a>(entries: &'a [HistoryEntry], id: &str) -> Option<&'a HistoryEntry> {
    let id = id.trim();
    entries
        .iter()
        .find(|e| e.is_direct() && e.id == id)
        .or_else(|| entries.iter().find(|e| e.id == id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Expense, ExpenseCategory, Income, LabourId, LabourPayment, LabourPaymentType, Partner,
    };

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    struct Fixture {
        incomes: Vec<Income>,
        expenses: Vec<Expense>,
        payments: Vec<LabourPayment>,
    }

    impl Fixture {
        fn new() -> Self {
            let mut income = Income::new(day(1), Money::from_rupees(50_000), Partner::MasterMujahir.into());
            income.remarks = "First instalment".into();

            let mut advance = LabourPayment::new(
                LabourId::from("w1"),
                day(10),
                Money::from_rupees(2_000),
                Partner::MasterMujahir.into(),
            );
            advance.payment_type = LabourPaymentType::Advance;

            Self {
                incomes: vec![income],
                expenses: vec![
                    Expense::new(day(5), Money::from_rupees(12_000), ExpenseCategory::Material, "Cement", Partner::DrSalik.into()),
                    Expense::new(day(6), Money::from_rupees(900), ExpenseCategory::Food, "Dhaba", FundingSource::Pool),
                ],
                payments: vec![
                    advance,
                    LabourPayment::new(LabourId::from("w1"), day(11), Money::from_rupees(400), FundingSource::Other),
                ],
            }
        }

        fn snapshot(&self) -> LedgerSnapshot<'_> {
            LedgerSnapshot {
                incomes: &self.incomes,
                expenses: &self.expenses,
                payments: &self.payments,
                ..LedgerSnapshot::empty()
            }
        }
    }

    #[test]
    fn test_history_length_and_order() {
        let fixture = Fixture::new();
        let history = merged_history(&fixture.snapshot());

        // 1 income + 1 partner-funded expense + 1 partner-funded payment
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].kind, HistoryKind::SpentLabour);
        assert_eq!(history[1].kind, HistoryKind::SpentExpense);
        assert_eq!(history[2].kind, HistoryKind::Direct);
        assert!(history.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn test_synthesized_remarks() {
        let fixture = Fixture::new();
        let history = merged_history(&fixture.snapshot());
        assert_eq!(history[0].remarks, "Labour Payment (Advance)");
        assert_eq!(history[1].remarks, "Spent on: Cement (Material)");
        assert_eq!(history[2].remarks, "First instalment");
    }

    #[test]
    fn test_same_date_keeps_collection_order() {
        let incomes = vec![Income::new(day(3), Money::from_rupees(10), Partner::DrSalik.into())];
        let expenses = vec![Expense::new(
            day(3),
            Money::from_rupees(20),
            ExpenseCategory::Other,
            "Misc",
            Partner::DrSalik.into(),
        )];
        let snapshot = LedgerSnapshot {
            incomes: &incomes,
            expenses: &expenses,
            ..LedgerSnapshot::empty()
        };
        let history = merged_history(&snapshot);
        assert_eq!(history[0].kind, HistoryKind::Direct);
        assert_eq!(history[1].kind, HistoryKind::SpentExpense);
    }

    #[test]
    fn test_derived_entries_refuse_mutation() {
        let fixture = Fixture::new();
        let history = merged_history(&fixture.snapshot());

        let err = history[1].ensure_deletable().unwrap_err();
        assert!(err.is_derived_entry());
        assert!(err.to_string().contains("Expenses section"));

        let err = history[0].ensure_editable().unwrap_err();
        assert!(err.to_string().contains("Labour section"));

        assert!(history[2].ensure_editable().is_ok());
    }

    #[test]
    fn test_filter_history() {
        let fixture = Fixture::new();
        let history = merged_history(&fixture.snapshot());

        assert_eq!(filter_history(&history, "").len(), 3);
        assert_eq!(filter_history(&history, "salik").len(), 1);
        assert_eq!(filter_history(&history, "CEMENT").len(), 1);
        assert_eq!(filter_history(&history, "50000").len(), 1);
        assert!(filter_history(&history, "nothing like this").is_empty());
    }

    #[test]
    fn test_find_entry_prefers_direct() {
        let fixture = Fixture::new();
        let history = merged_history(&fixture.snapshot());
        let id = fixture.incomes[0].id.to_string();
        assert!(find_entry(&history, &id).unwrap().is_direct());
        assert!(find_entry(&history, "missing").is_none());
    }
}
