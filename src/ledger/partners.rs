//! Per-partner contribution breakdown
//!
//! Splits the implicit-income rule by partner. Uses the same predicate as
//! [`FundTotals`](super::FundTotals), so when every direct income and every
//! partner-funded outflow names one of the partners, the partner totals add
//! up to total income exactly.

use serde::Serialize;

use super::LedgerSnapshot;
use crate::models::{Money, Partner};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerContribution {
    #[serde(serialize_with = "serialize_partner")]
    pub partner: Partner,
    /// Direct income records paid in by this partner
    pub direct: Money,
    pub spent_expenses: Money,
    pub spent_labour: Money,
    /// Out-of-pocket spending (expenses plus labour payments)
    pub spent: Money,
    pub total: Money,
    /// Share of the combined partner total, 0-100
    pub share_percent: f64,
}

fn serialize_partner<S: serde::Serializer>(partner: &Partner, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(partner.name())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerBreakdown {
    pub contributions: Vec<PartnerContribution>,
    pub grand_total: Money,
}

impl PartnerBreakdown {
    pub fn compute(snapshot: &LedgerSnapshot<'_>) -> Self {
        let mut contributions: Vec<PartnerContribution> = Partner::NAMED
            .iter()
            .map(|&partner| {
                let direct: Money = snapshot
                    .incomes
                    .iter()
                    .filter(|i| i.paid_by.is_partner(partner))
                    .map(|i| i.amount)
                    .sum();
                let spent_expenses: Money = snapshot
                    .expenses
                    .iter()
                    .filter(|e| e.paid_by.is_partner(partner))
                    .map(|e| e.amount)
                    .sum();
                let spent_labour: Money = snapshot
                    .payments
                    .iter()
                    .filter(|p| p.paid_by.is_partner(partner))
                    .map(|p| p.amount)
                    .sum();
                let spent = spent_expenses + spent_labour;

                PartnerContribution {
                    partner,
                    direct,
                    spent_expenses,
                    spent_labour,
                    spent,
                    total: direct + spent,
                    share_percent: 0.0,
                }
            })
            .collect();

        let grand_total: Money = contributions.iter().map(|c| c.total).sum();
        if grand_total.is_positive() {
            let denominator = grand_total.paise() as f64;
            for contribution in &mut contributions {
                contribution.share_percent = contribution.total.paise() as f64 / denominator * 100.0;
            }
        }

        Self {
            contributions,
            grand_total,
        }
    }

    pub fn get(&self, partner: Partner) -> Option<&PartnerContribution> {
        self.contributions.iter().find(|c| c.partner == partner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::FundTotals;
    use crate::models::{Expense, ExpenseCategory, FundingSource, Income, LabourId, LabourPayment};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    #[test]
    fn test_zero_totals_give_zero_share() {
        let breakdown = PartnerBreakdown::compute(&LedgerSnapshot::empty());
        assert_eq!(breakdown.contributions.len(), 2);
        for c in &breakdown.contributions {
            assert_eq!(c.share_percent, 0.0);
            assert!(!c.share_percent.is_nan());
        }
    }

    #[test]
    fn test_breakdown_matches_total_income() {
        let incomes = vec![
            Income::new(day(1), Money::from_rupees(60_000), Partner::MasterMujahir.into()),
            Income::new(day(1), Money::from_rupees(20_000), Partner::DrSalik.into()),
        ];
        let expenses = vec![
            Expense::new(day(2), Money::from_rupees(15_000), ExpenseCategory::Material, "Bricks", Partner::DrSalik.into()),
            Expense::new(day(2), Money::from_rupees(8_000), ExpenseCategory::Material, "Sand", FundingSource::Pool),
        ];
        let payments = vec![LabourPayment::new(
            LabourId::from("w1"),
            day(3),
            Money::from_rupees(5_000),
            Partner::DrSalik.into(),
        )];
        let snapshot = LedgerSnapshot {
            incomes: &incomes,
            expenses: &expenses,
            payments: &payments,
            ..LedgerSnapshot::empty()
        };

        let breakdown = PartnerBreakdown::compute(&snapshot);
        let mujahir = breakdown.get(Partner::MasterMujahir).unwrap();
        let salik = breakdown.get(Partner::DrSalik).unwrap();

        assert_eq!(mujahir.total, Money::from_rupees(60_000));
        assert_eq!(salik.direct, Money::from_rupees(20_000));
        assert_eq!(salik.spent, Money::from_rupees(20_000));
        assert_eq!(salik.total, Money::from_rupees(40_000));
        assert!((mujahir.share_percent - 60.0).abs() < 1e-9);
        assert!((salik.share_percent - 40.0).abs() < 1e-9);

        let totals = FundTotals::compute(&snapshot);
        assert_eq!(mujahir.total + salik.total, totals.total_income);
        assert_eq!(breakdown.grand_total, totals.total_income);
    }

    #[test]
    fn test_pool_and_other_never_counted_for_partners() {
        let incomes = vec![Income::new(day(1), Money::from_rupees(1_000), FundingSource::Other)];
        let snapshot = LedgerSnapshot {
            incomes: &incomes,
            ..LedgerSnapshot::empty()
        };
        let breakdown = PartnerBreakdown::compute(&snapshot);
        assert_eq!(breakdown.grand_total, Money::zero());
    }
}
