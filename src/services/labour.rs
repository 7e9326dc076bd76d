//! Labour service
//!
//! Worker profiles, daily attendance and wage payments. Deleting a worker
//! leaves their attendance and payments in place; those records stop
//! counting toward any worker but payments still count as project expense.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{SitebookError, SitebookResult};
use crate::ledger::{labour_stats, stats_for, LabourStats};
use crate::models::{
    Attendance, AttendanceId, AttendanceStatus, FundingSource, LabourId, LabourPayment,
    LabourPaymentType, LabourProfile, Money, PaymentId, PaymentMode,
};
use crate::storage::Storage;

pub struct LabourService<'a> {
    storage: &'a Storage,
}

/// Changes to a worker profile
#[derive(Debug, Clone, Default)]
pub struct LabourUpdate {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub work_type: Option<String>,
    pub daily_wage: Option<Money>,
}

impl LabourUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.mobile.is_none()
            && self.work_type.is_none()
            && self.daily_wage.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct RecordPaymentInput {
    pub labour_id: LabourId,
    pub date: NaiveDate,
    pub amount: Money,
    pub payment_type: LabourPaymentType,
    pub mode: Option<PaymentMode>,
    pub paid_by: FundingSource,
}

fn validation(e: impl ToString) -> SitebookError {
    SitebookError::Validation(e.to_string())
}

impl<'a> LabourService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    // --- Profiles ---

    pub fn create(
        &self,
        name: &str,
        work_type: &str,
        daily_wage: Money,
        mobile: Option<String>,
    ) -> SitebookResult<LabourProfile> {
        let mut labour = LabourProfile::new(name.trim(), work_type.trim(), daily_wage);
        labour.mobile = mobile.map(|m| m.trim().to_string()).unwrap_or_default();
        labour.validate().map_err(validation)?;

        self.storage.create_record(&self.storage.labours, &labour)?;
        debug!(id = %labour.id, name = %labour.name, "worker added");
        Ok(labour)
    }

    pub fn get(&self, id: &LabourId) -> SitebookResult<Option<LabourProfile>> {
        self.storage.labours.get(id)
    }

    /// Find a worker by id, then by case-insensitive name
    pub fn find(&self, identifier: &str) -> SitebookResult<Option<LabourProfile>> {
        if let Some(labour) = self.get(&LabourId::from(identifier))? {
            return Ok(Some(labour));
        }
        let name = identifier.trim().to_lowercase();
        Ok(self
            .storage
            .labours
            .find_by(|l| l.name.to_lowercase() == name)?
            .into_iter()
            .next())
    }

    /// Like [`find`](Self::find) but a missing worker is an error
    pub fn require(&self, identifier: &str) -> SitebookResult<LabourProfile> {
        self.find(identifier)?
            .ok_or_else(|| SitebookError::labour_not_found(identifier))
    }

    pub fn list(&self) -> SitebookResult<Vec<LabourProfile>> {
        self.storage.labours.get_all()
    }

    pub fn update(&self, id: &LabourId, changes: LabourUpdate) -> SitebookResult<LabourProfile> {
        let before = self
            .get(id)?
            .ok_or_else(|| SitebookError::labour_not_found(id.to_string()))?;

        let mut labour = before.clone();
        if let Some(name) = changes.name {
            labour.name = name.trim().to_string();
        }
        if let Some(mobile) = changes.mobile {
            labour.mobile = mobile.trim().to_string();
        }
        if let Some(work_type) = changes.work_type {
            labour.work_type = work_type.trim().to_string();
        }
        if let Some(wage) = changes.daily_wage {
            labour.daily_wage = wage;
        }
        labour.validate().map_err(validation)?;

        self.storage
            .update_record(&self.storage.labours, &before, &labour)?;
        Ok(labour)
    }

    /// Delete a worker profile without touching their attendance or payments
    pub fn delete(&self, id: &LabourId) -> SitebookResult<LabourProfile> {
        let removed = self
            .storage
            .delete_record(&self.storage.labours, id)?
            .ok_or_else(|| SitebookError::labour_not_found(id.to_string()))?;

        let orphaned_marks = self.storage.attendance.find_by(|a| &a.labour_id == id)?.len();
        let orphaned_payments = self.storage.payments.find_by(|p| &p.labour_id == id)?.len();
        if orphaned_marks > 0 || orphaned_payments > 0 {
            warn!(
                worker = %removed.name,
                attendance = orphaned_marks,
                payments = orphaned_payments,
                "deleted worker still has records"
            );
        }
        Ok(removed)
    }

    // --- Attendance ---

    pub fn mark_attendance(
        &self,
        labour_id: &LabourId,
        date: NaiveDate,
        status: AttendanceStatus,
        overtime_hours: f64,
    ) -> SitebookResult<Attendance> {
        let labour = self
            .get(labour_id)?
            .ok_or_else(|| SitebookError::labour_not_found(labour_id.to_string()))?;

        let mark = Attendance::new(labour.id.clone(), date, status).with_overtime(overtime_hours);
        mark.validate().map_err(validation)?;

        let existing = self
            .storage
            .attendance
            .find_by(|a| a.labour_id == labour.id && a.date == date)?;
        if !existing.is_empty() {
            warn!(
                worker = %labour.name,
                %date,
                existing = existing.len(),
                "attendance already marked for this day; both records will count"
            );
        }

        self.storage.create_record(&self.storage.attendance, &mark)?;
        Ok(mark)
    }

    pub fn update_attendance(
        &self,
        id: &AttendanceId,
        status: Option<AttendanceStatus>,
        overtime_hours: Option<f64>,
    ) -> SitebookResult<Attendance> {
        let before = self
            .storage
            .attendance
            .get(id)?
            .ok_or_else(|| SitebookError::attendance_not_found(id.to_string()))?;

        let mut mark = before.clone();
        if let Some(status) = status {
            mark.status = status;
        }
        if let Some(hours) = overtime_hours {
            mark.overtime_hours = hours;
        }
        mark.validate().map_err(validation)?;

        self.storage
            .update_record(&self.storage.attendance, &before, &mark)?;
        Ok(mark)
    }

    pub fn delete_attendance(&self, id: &AttendanceId) -> SitebookResult<Attendance> {
        self.storage
            .delete_record(&self.storage.attendance, id)?
            .ok_or_else(|| SitebookError::attendance_not_found(id.to_string()))
    }

    /// Attendance of every worker on one day
    pub fn attendance_on(&self, date: NaiveDate) -> SitebookResult<Vec<Attendance>> {
        self.storage.attendance.find_by(|a| a.date == date)
    }

    /// Attendance of one worker, newest first
    pub fn attendance_for(&self, labour_id: &LabourId) -> SitebookResult<Vec<Attendance>> {
        let mut marks = self.storage.attendance.find_by(|a| &a.labour_id == labour_id)?;
        marks.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(marks)
    }

    // --- Payments ---

    pub fn record_payment(&self, input: RecordPaymentInput) -> SitebookResult<LabourPayment> {
        let labour = self
            .get(&input.labour_id)?
            .ok_or_else(|| SitebookError::labour_not_found(input.labour_id.to_string()))?;

        let mut payment = LabourPayment::new(labour.id, input.date, input.amount, input.paid_by);
        payment.payment_type = input.payment_type;
        if let Some(mode) = input.mode {
            payment.mode = mode;
        }
        payment.validate().map_err(validation)?;

        self.storage.create_record(&self.storage.payments, &payment)?;
        debug!(id = %payment.id, worker = %labour.name, amount = %payment.amount, "wage paid");
        Ok(payment)
    }

    pub fn update_payment(
        &self,
        id: &PaymentId,
        amount: Option<Money>,
        date: Option<NaiveDate>,
        paid_by: Option<FundingSource>,
    ) -> SitebookResult<LabourPayment> {
        let before = self
            .storage
            .payments
            .get(id)?
            .ok_or_else(|| SitebookError::payment_not_found(id.to_string()))?;

        let mut payment = before.clone();
        if let Some(amount) = amount {
            payment.amount = amount;
        }
        if let Some(date) = date {
            payment.date = date;
        }
        if let Some(paid_by) = paid_by {
            payment.paid_by = paid_by;
        }
        payment.validate().map_err(validation)?;

        self.storage
            .update_record(&self.storage.payments, &before, &payment)?;
        Ok(payment)
    }

    pub fn delete_payment(&self, id: &PaymentId) -> SitebookResult<LabourPayment> {
        self.storage
            .delete_record(&self.storage.payments, id)?
            .ok_or_else(|| SitebookError::payment_not_found(id.to_string()))
    }

    /// All payments, newest first; optionally for one worker
    pub fn payments(&self, labour_id: Option<&LabourId>) -> SitebookResult<Vec<LabourPayment>> {
        let mut payments = self
            .storage
            .payments
            .find_by(|p| labour_id.map_or(true, |id| &p.labour_id == id))?;
        payments.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(payments)
    }

    // --- Derived ---

    pub fn stats(&self) -> SitebookResult<Vec<LabourStats>> {
        Ok(labour_stats(
            &self.storage.labours.get_all()?,
            &self.storage.attendance.get_all()?,
            &self.storage.payments.get_all()?,
        ))
    }

    pub fn stats_for(&self, labour: &LabourProfile) -> SitebookResult<LabourStats> {
        Ok(stats_for(
            labour,
            &self.storage.attendance.find_by(|a| a.labour_id == labour.id)?,
            &self.storage.payments.find_by(|p| p.labour_id == labour.id)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SitebookPaths;
    use crate::ledger::{FundTotals, LedgerSnapshot};
    use crate::models::Partner;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SitebookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn payment(labour_id: &LabourId, rupees: i64) -> RecordPaymentInput {
        RecordPaymentInput {
            labour_id: labour_id.clone(),
            date: day(7),
            amount: Money::from_rupees(rupees),
            payment_type: LabourPaymentType::Advance,
            mode: None,
            paid_by: FundingSource::Pool,
        }
    }

    #[test]
    fn test_profile_validation() {
        let (_temp, storage) = create_test_storage();
        let service = LabourService::new(&storage);

        assert!(service.create("", "Mistry", Money::from_rupees(800), None).unwrap_err().is_validation());
        assert!(service.create("Ramesh", "Mistry", Money::zero(), None).unwrap_err().is_validation());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_attendance_and_payments_feed_stats() {
        let (_temp, storage) = create_test_storage();
        let service = LabourService::new(&storage);
        let worker = service.create("Ramesh", "Mistry", Money::from_rupees(800), None).unwrap();

        service.mark_attendance(&worker.id, day(1), AttendanceStatus::Present, 4.0).unwrap();
        service.mark_attendance(&worker.id, day(2), AttendanceStatus::HalfDay, 0.0).unwrap();
        service.record_payment(payment(&worker.id, 1_000)).unwrap();

        let stats = service.stats_for(&worker).unwrap();
        assert_eq!(stats.earned, Money::from_rupees(1_600));
        assert_eq!(stats.paid, Money::from_rupees(1_000));
        assert_eq!(stats.outstanding, Money::from_rupees(600));
        assert_eq!(service.stats().unwrap(), vec![stats]);
    }

    #[test]
    fn test_negative_overtime_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = LabourService::new(&storage);
        let worker = service.create("Suresh", "Majdoor", Money::from_rupees(500), None).unwrap();

        let err = service
            .mark_attendance(&worker.id, day(1), AttendanceStatus::Present, -1.0)
            .unwrap_err();
        assert!(err.is_validation());
        let err = service
            .mark_attendance(&worker.id, day(1), AttendanceStatus::Present, f64::NAN)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_duplicate_attendance_is_kept() {
        let (_temp, storage) = create_test_storage();
        let service = LabourService::new(&storage);
        let worker = service.create("Suresh", "Majdoor", Money::from_rupees(500), None).unwrap();

        service.mark_attendance(&worker.id, day(3), AttendanceStatus::Present, 0.0).unwrap();
        service.mark_attendance(&worker.id, day(3), AttendanceStatus::Present, 0.0).unwrap();

        assert_eq!(service.attendance_on(day(3)).unwrap().len(), 2);
        assert_eq!(service.stats_for(&worker).unwrap().earned, Money::from_rupees(1_000));
    }

    #[test]
    fn test_unknown_worker_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = LabourService::new(&storage);
        let ghost = LabourId::from("ghost");

        assert!(service
            .mark_attendance(&ghost, day(1), AttendanceStatus::Present, 0.0)
            .unwrap_err()
            .is_not_found());
        assert!(service.record_payment(payment(&ghost, 100)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_does_not_cascade() {
        let (_temp, storage) = create_test_storage();
        let service = LabourService::new(&storage);
        let worker = service.create("Ramesh", "Mistry", Money::from_rupees(800), None).unwrap();
        service.mark_attendance(&worker.id, day(1), AttendanceStatus::Present, 0.0).unwrap();
        let mut partner_paid = payment(&worker.id, 700);
        partner_paid.paid_by = Partner::DrSalik.into();
        service.record_payment(partner_paid).unwrap();

        service.delete(&worker.id).unwrap();

        assert_eq!(storage.attendance.count().unwrap(), 1);
        assert_eq!(storage.payments.count().unwrap(), 1);
        assert!(service.stats().unwrap().is_empty());

        let records = storage.records().unwrap();
        let totals = FundTotals::compute(&LedgerSnapshot::from(&records));
        assert_eq!(totals.total_expense, Money::from_rupees(700));
        assert_eq!(totals.total_income, Money::from_rupees(700));
    }

    #[test]
    fn test_find_by_name_and_update() {
        let (_temp, storage) = create_test_storage();
        let service = LabourService::new(&storage);
        let worker = service.create("Ramesh Kumar", "Mistry", Money::from_rupees(800), None).unwrap();

        assert_eq!(service.require("ramesh kumar").unwrap().id, worker.id);
        assert!(service.require("nobody").unwrap_err().is_not_found());

        let updated = service
            .update(
                &worker.id,
                LabourUpdate {
                    daily_wage: Some(Money::from_rupees(900)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.daily_wage, Money::from_rupees(900));
    }
}
