//! Labour earnings
//!
//! Attendance and payments are grouped by worker id in a single pass, then
//! folded over the worker list, so the cost is linear in the number of
//! records rather than workers times records.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{
    Attendance, LabourId, LabourPayment, LabourProfile, Money, STANDARD_DAY_HOURS,
};

/// Label used for records whose worker no longer exists
pub const UNKNOWN_WORKER: &str = "Unknown";

/// Derived wage position of one worker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabourStats {
    pub labour_id: LabourId,
    pub name: String,
    pub work_type: String,
    pub daily_wage: Money,
    /// Present days plus half of the half-days
    pub present_days: f64,
    pub overtime_hours: f64,
    pub earned: Money,
    pub paid: Money,
    /// `earned - paid`; negative when the worker has been overpaid
    pub outstanding: Money,
}

impl LabourStats {
    pub fn is_overpaid(&self) -> bool {
        self.outstanding.is_negative()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct AttendanceTally {
    present_days: f64,
    overtime_hours: f64,
}

/// Wage earned for a number of day-equivalents and overtime hours
///
/// Overtime is paid per hour at an eighth of the daily wage. The result is
/// rounded once to the nearest paisa.
pub fn earnings(daily_wage: Money, present_days: f64, overtime_hours: f64) -> Money {
    let wage = daily_wage.paise() as f64;
    let paise = present_days * wage + overtime_hours * (wage / STANDARD_DAY_HOURS);
    Money::from_paise(paise.round() as i64)
}

fn tally_attendance(attendance: &[Attendance]) -> HashMap<&str, AttendanceTally> {
    let mut tallies: HashMap<&str, AttendanceTally> = HashMap::new();
    for mark in attendance {
        let tally = tallies.entry(mark.labour_id.as_str()).or_default();
        tally.present_days += mark.status.day_weight();
        tally.overtime_hours += mark.overtime_hours;
    }
    tallies
}

fn tally_payments(payments: &[LabourPayment]) -> HashMap<&str, Money> {
    let mut paid: HashMap<&str, Money> = HashMap::new();
    for payment in payments {
        *paid.entry(payment.labour_id.as_str()).or_default() += payment.amount;
    }
    paid
}

fn build_stats(labour: &LabourProfile, tally: AttendanceTally, paid: Money) -> LabourStats {
    let earned = earnings(labour.daily_wage, tally.present_days, tally.overtime_hours);
    LabourStats {
        labour_id: labour.id.clone(),
        name: labour.name.clone(),
        work_type: labour.work_type.clone(),
        daily_wage: labour.daily_wage,
        present_days: tally.present_days,
        overtime_hours: tally.overtime_hours,
        earned,
        paid,
        outstanding: earned - paid,
    }
}

/// Compute the wage position of every worker, in worker order
///
/// Attendance and payments whose worker id matches no profile are ignored.
pub fn labour_stats(
    labours: &[LabourProfile],
    attendance: &[Attendance],
    payments: &[LabourPayment],
) -> Vec<LabourStats> {
    let tallies = tally_attendance(attendance);
    let paid = tally_payments(payments);

    labours
        .iter()
        .map(|labour| {
            let key = labour.id.as_str();
            build_stats(
                labour,
                tallies.get(key).copied().unwrap_or_default(),
                paid.get(key).copied().unwrap_or_default(),
            )
        })
        .collect()
}

/// Compute the wage position of a single worker
pub fn stats_for(
    labour: &LabourProfile,
    attendance: &[Attendance],
    payments: &[LabourPayment],
) -> LabourStats {
    let mut tally = AttendanceTally::default();
    for mark in attendance.iter().filter(|a| a.labour_id == labour.id) {
        tally.present_days += mark.status.day_weight();
        tally.overtime_hours += mark.overtime_hours;
    }
    let paid = payments
        .iter()
        .filter(|p| p.labour_id == labour.id)
        .map(|p| p.amount)
        .sum();
    build_stats(labour, tally, paid)
}

/// Index of worker names by id
pub fn worker_names(labours: &[LabourProfile]) -> HashMap<&str, &str> {
    labours
        .iter()
        .map(|l| (l.id.as_str(), l.name.as_str()))
        .collect()
}

/// Name of the worker with this id, or [`UNKNOWN_WORKER`]
pub fn worker_name<'a>(labours: &'a [LabourProfile], id: &LabourId) -> &'a str {
    labours
        .iter()
        .find(|l| &l.id == id)
        .map(|l| l.name.as_str())
        .unwrap_or(UNKNOWN_WORKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, FundingSource};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    fn worker(wage: i64) -> LabourProfile {
        LabourProfile::new("Ramesh", "Mistry", Money::from_rupees(wage))
    }

    #[test]
    fn test_no_records_means_zero() {
        let labour = worker(800);
        let stats = labour_stats(std::slice::from_ref(&labour), &[], &[]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].earned, Money::zero());
        assert_eq!(stats[0].paid, Money::zero());
        assert_eq!(stats[0].outstanding, Money::zero());
    }

    #[test]
    fn test_overtime_paid_at_an_eighth_of_daily_wage() {
        let labour = worker(800);
        let attendance =
            vec![Attendance::new(labour.id.clone(), day(1), AttendanceStatus::Present).with_overtime(4.0)];

        let stats = labour_stats(std::slice::from_ref(&labour), &attendance, &[]);
        assert_eq!(stats[0].earned, Money::from_rupees(1200));
        assert_eq!(stats[0].overtime_hours, 4.0);
    }

    #[test]
    fn test_two_half_days_make_one_day() {
        let labour = worker(650);
        let attendance = vec![
            Attendance::new(labour.id.clone(), day(1), AttendanceStatus::HalfDay),
            Attendance::new(labour.id.clone(), day(2), AttendanceStatus::HalfDay),
            Attendance::new(labour.id.clone(), day(3), AttendanceStatus::Absent),
        ];

        let stats = labour_stats(std::slice::from_ref(&labour), &attendance, &[]);
        assert_eq!(stats[0].present_days, 1.0);
        assert_eq!(stats[0].earned, Money::from_rupees(650));
    }

    #[test]
    fn test_duplicate_days_are_summed() {
        let labour = worker(500);
        let attendance = vec![
            Attendance::new(labour.id.clone(), day(1), AttendanceStatus::Present),
            Attendance::new(labour.id.clone(), day(1), AttendanceStatus::Present),
        ];

        let stats = stats_for(&labour, &attendance, &[]);
        assert_eq!(stats.earned, Money::from_rupees(1000));
    }

    #[test]
    fn test_overpayment_is_negative_outstanding() {
        let labour = worker(500);
        let attendance = vec![Attendance::new(labour.id.clone(), day(1), AttendanceStatus::Present)];
        let payments = vec![LabourPayment::new(
            labour.id.clone(),
            day(2),
            Money::from_rupees(700),
            FundingSource::Pool,
        )];

        let stats = stats_for(&labour, &attendance, &payments);
        assert_eq!(stats.outstanding, Money::from_rupees(-200));
        assert!(stats.is_overpaid());
    }

    #[test]
    fn test_orphaned_records_are_not_attributed() {
        let labour = worker(500);
        let ghost = LabourId::from("deleted-worker");
        let attendance = vec![Attendance::new(ghost.clone(), day(1), AttendanceStatus::Present)];
        let payments = vec![LabourPayment::new(
            ghost.clone(),
            day(1),
            Money::from_rupees(300),
            FundingSource::Pool,
        )];

        let stats = labour_stats(std::slice::from_ref(&labour), &attendance, &payments);
        assert_eq!(stats[0].paid, Money::zero());
        assert_eq!(stats[0].earned, Money::zero());
        assert_eq!(worker_name(std::slice::from_ref(&labour), &ghost), UNKNOWN_WORKER);
    }

    #[test]
    fn test_grouped_and_single_computation_agree() {
        let a = worker(800);
        let b = LabourProfile::new("Suresh", "Majdoor", Money::from_rupees(450));
        let attendance = vec![
            Attendance::new(a.id.clone(), day(1), AttendanceStatus::Present).with_overtime(1.5),
            Attendance::new(b.id.clone(), day(1), AttendanceStatus::HalfDay),
            Attendance::new(a.id.clone(), day(2), AttendanceStatus::HalfDay),
        ];
        let payments = vec![LabourPayment::new(
            b.id.clone(),
            day(3),
            Money::from_rupees(100),
            FundingSource::Pool,
        )];

        let labours = vec![a.clone(), b.clone()];
        let grouped = labour_stats(&labours, &attendance, &payments);
        assert_eq!(grouped[0], stats_for(&a, &attendance, &payments));
        assert_eq!(grouped[1], stats_for(&b, &attendance, &payments));
        // 1.5 days * 800 + 1.5h * 100
        assert_eq!(grouped[0].earned, Money::from_rupees(1350));
    }

    #[test]
    fn test_fractional_paise_round_once() {
        // 3 hours at 333/8 per hour = 124.875
        assert_eq!(earnings(Money::from_rupees(333), 0.0, 3.0), Money::from_paise(12488));
    }
}
