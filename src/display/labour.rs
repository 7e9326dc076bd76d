//! Labour display formatting

use tabled::Tabled;

use super::render;
use crate::ledger::{worker_names, UNKNOWN_WORKER};
use crate::models::{Attendance, LabourPayment, LabourProfile};

#[derive(Tabled)]
struct LabourRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Work Type")]
    work_type: String,
    #[tabled(rename = "Daily Wage")]
    daily_wage: String,
    #[tabled(rename = "Mobile")]
    mobile: String,
    #[tabled(rename = "Id")]
    id: String,
}

#[derive(Tabled)]
struct AttendanceRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Worker")]
    worker: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "OT Hours")]
    overtime: String,
    #[tabled(rename = "Id")]
    id: String,
}

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Worker")]
    worker: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Type")]
    payment_type: String,
    #[tabled(rename = "Paid From")]
    paid_by: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Id")]
    id: String,
}

pub fn format_labour_list(labours: &[LabourProfile]) -> String {
    if labours.is_empty() {
        return "No labourers found.".to_string();
    }

    let rows = labours
        .iter()
        .map(|l| LabourRow {
            name: l.name.clone(),
            work_type: l.work_type.clone(),
            daily_wage: l.daily_wage.to_string(),
            mobile: l.mobile.clone(),
            id: l.id.to_string(),
        })
        .collect();
    render(rows)
}

pub fn format_attendance_list(attendance: &[Attendance], labours: &[LabourProfile]) -> String {
    if attendance.is_empty() {
        return "No attendance marked.".to_string();
    }

    let names = worker_names(labours);
    let rows = attendance
        .iter()
        .map(|a| AttendanceRow {
            date: a.date.to_string(),
            worker: names
                .get(a.labour_id.as_str())
                .copied()
                .unwrap_or(UNKNOWN_WORKER)
                .to_string(),
            status: a.status.to_string(),
            overtime: if a.overtime_hours > 0.0 {
                a.overtime_hours.to_string()
            } else {
                String::new()
            },
            id: a.id.to_string(),
        })
        .collect();
    render(rows)
}

pub fn format_payment_list(payments: &[LabourPayment], labours: &[LabourProfile]) -> String {
    if payments.is_empty() {
        return "No labour payments found.".to_string();
    }

    let names = worker_names(labours);
    let rows = payments
        .iter()
        .map(|p| PaymentRow {
            date: p.date.to_string(),
            worker: names
                .get(p.labour_id.as_str())
                .copied()
                .unwrap_or(UNKNOWN_WORKER)
                .to_string(),
            amount: p.amount.to_string(),
            payment_type: p.payment_type.to_string(),
            paid_by: p.paid_by.to_string(),
            mode: p.mode.to_string(),
            id: p.id.to_string(),
        })
        .collect();
    render(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, FundingSource, LabourId, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_lists_resolve_names() {
        let worker = LabourProfile::new("Ganesh", "Painter", Money::from_rupees(650));
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();

        let attendance = vec![
            Attendance::new(worker.id.clone(), date, AttendanceStatus::HalfDay).with_overtime(1.5),
        ];
        let table = format_attendance_list(&attendance, std::slice::from_ref(&worker));
        assert!(table.contains("Ganesh"));
        assert!(table.contains("Half-Day"));
        assert!(table.contains("1.5"));

        let payments = vec![LabourPayment::new(
            LabourId::from("gone"),
            date,
            Money::from_rupees(200),
            FundingSource::Pool,
        )];
        let table = format_payment_list(&payments, std::slice::from_ref(&worker));
        assert!(table.contains("Unknown"));

        assert!(format_labour_list(&[worker]).contains("₹650.00"));
    }
}
