//! Project-wide fund totals
//!
//! Money a partner spends personally enters the ledger twice: once as income
//! (it came into the project's scope) and once as expense (it was spent).
//! Net balance is therefore the pooled cash position only.

use serde::Serialize;

use super::labour::{labour_stats, LabourStats};
use super::LedgerSnapshot;
use crate::models::Money;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundTotals {
    /// Sum of all direct income records
    pub direct_income: Money,
    /// Expenses paid personally by a named partner
    pub partner_spent_expenses: Money,
    /// Labour payments paid personally by a named partner
    pub partner_spent_labour: Money,
    /// Direct income plus all partner-funded outflows
    pub total_income: Money,
    pub expenses_total: Money,
    /// All labour payments, whoever funded them and whether or not the
    /// worker still exists
    pub labour_payments_total: Money,
    pub total_expense: Money,
    pub net_balance: Money,
    pub labour_earned: Money,
    /// Sum of per-worker outstanding wages (may include overpayments)
    pub labour_outstanding: Money,
}

impl FundTotals {
    pub fn compute(snapshot: &LedgerSnapshot<'_>) -> Self {
        let stats = labour_stats(snapshot.labours, snapshot.attendance, snapshot.payments);
        Self::from_stats(snapshot, &stats)
    }

    /// Compute totals reusing already computed labour stats
    pub fn from_stats(snapshot: &LedgerSnapshot<'_>, stats: &[LabourStats]) -> Self {
        let direct_income: Money = snapshot.incomes.iter().map(|i| i.amount).sum();

        let partner_spent_expenses: Money = snapshot
            .expenses
            .iter()
            .filter(|e| e.paid_by.named_partner().is_some())
            .map(|e| e.amount)
            .sum();

        let partner_spent_labour: Money = snapshot
            .payments
            .iter()
            .filter(|p| p.paid_by.named_partner().is_some())
            .map(|p| p.amount)
            .sum();

        let expenses_total: Money = snapshot.expenses.iter().map(|e| e.amount).sum();
        let labour_payments_total: Money = snapshot.payments.iter().map(|p| p.amount).sum();

        let total_income = direct_income + partner_spent_expenses + partner_spent_labour;
        let total_expense = expenses_total + labour_payments_total;

        Self {
            direct_income,
            partner_spent_expenses,
            partner_spent_labour,
            total_income,
            expenses_total,
            labour_payments_total,
            total_expense,
            net_balance: total_income - total_expense,
            labour_earned: stats.iter().map(|s| s.earned).sum(),
            labour_outstanding: stats.iter().map(|s| s.outstanding).sum(),
        }
    }

    /// Partner-funded spending recognized as implicit income
    pub fn implicit_income(&self) -> Money {
        self.partner_spent_expenses + self.partner_spent_labour
    }
}
