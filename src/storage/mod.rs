//! Storage layer for Sitebook
//!
//! One JSON file per record collection under `<base>/data`, written
//! atomically, plus the audit log.

pub mod file_io;
pub mod repository;

pub use file_io::{read_json, write_bytes_atomic, write_json_atomic};
pub use repository::{Record, Repository};

use serde::Serialize;
use tracing::debug;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::SitebookPaths;
use crate::error::SitebookResult;
use crate::models::{Attendance, Expense, Income, LabourPayment, LabourProfile, RecordSet, Vendor};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SitebookPaths,
    pub incomes: Repository<Income>,
    pub expenses: Repository<Expense>,
    pub vendors: Repository<Vendor>,
    pub labours: Repository<LabourProfile>,
    pub attendance: Repository<Attendance>,
    pub payments: Repository<LabourPayment>,
    audit: AuditLogger,
}

impl Storage {
    /// Create a storage coordinator; call [`Storage::load_all`] to read the files
    pub fn new(paths: SitebookPaths) -> SitebookResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            incomes: Repository::new(paths.incomes_file()),
            expenses: Repository::new(paths.expenses_file()),
            vendors: Repository::new(paths.vendors_file()),
            labours: Repository::new(paths.labours_file()),
            attendance: Repository::new(paths.attendance_file()),
            payments: Repository::new(paths.payments_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Create and load in one step
    pub fn open(paths: SitebookPaths) -> SitebookResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &SitebookPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> SitebookResult<()> {
        self.incomes.load()?;
        self.expenses.load()?;
        self.vendors.load()?;
        self.labours.load()?;
        self.attendance.load()?;
        self.payments.load()?;
        debug!(base = %self.paths.base_dir().display(), "loaded all collections");
        Ok(())
    }

    pub fn save_all(&self) -> SitebookResult<()> {
        self.incomes.save()?;
        self.expenses.save()?;
        self.vendors.save()?;
        self.labours.save()?;
        self.attendance.save()?;
        self.payments.save()?;
        Ok(())
    }

    /// Copy of every collection as it is now
    pub fn records(&self) -> SitebookResult<RecordSet> {
        Ok(RecordSet {
            incomes: self.incomes.get_all()?,
            expenses: self.expenses.get_all()?,
            labours: self.labours.get_all()?,
            attendance: self.attendance.get_all()?,
            payments: self.payments.get_all()?,
            vendors: self.vendors.get_all()?,
        })
    }

    /// Replace every collection and persist, with one audit entry
    pub fn replace_all(&self, records: RecordSet, reason: &str) -> SitebookResult<()> {
        let summary = format!(
            "{} incomes, {} expenses, {} labours, {} attendance, {} payments, {} vendors",
            records.incomes.len(),
            records.expenses.len(),
            records.labours.len(),
            records.attendance.len(),
            records.payments.len(),
            records.vendors.len()
        );

        self.incomes.replace_all(records.incomes)?;
        self.expenses.replace_all(records.expenses)?;
        self.labours.replace_all(records.labours)?;
        self.attendance.replace_all(records.attendance)?;
        self.payments.replace_all(records.payments)?;
        self.vendors.replace_all(records.vendors)?;
        self.save_all()?;

        self.audit.log(&AuditEntry::replace(reason, summary))
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> SitebookResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> SitebookResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> SitebookResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Insert a new record, persist its collection and audit it
    pub fn create_record<T: Record>(&self, repo: &Repository<T>, record: &T) -> SitebookResult<()> {
        repo.upsert(record.clone())?;
        repo.save()?;
        self.log_create(T::ENTITY, record.id().to_string(), record.audit_name(), record)
    }

    /// Replace an existing record, persist and audit the change
    pub fn update_record<T: Record>(
        &self,
        repo: &Repository<T>,
        before: &T,
        after: &T,
    ) -> SitebookResult<()> {
        repo.upsert(after.clone())?;
        repo.save()?;
        self.log_update(T::ENTITY, after.id().to_string(), after.audit_name(), before, after)
    }

    /// Remove a record by id, returning it if it existed
    pub fn delete_record<T: Record>(&self, repo: &Repository<T>, id: &T::Id) -> SitebookResult<Option<T>> {
        let removed = repo.delete(id)?;
        if let Some(record) = &removed {
            repo.save()?;
            self.log_delete(T::ENTITY, id.to_string(), record.audit_name(), record)?;
        }
        Ok(removed)
    }

    /// Check if storage has been initialized (has a settings file)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{FundingSource, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SitebookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_test_storage();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("backups").exists());
        assert!(!storage.is_initialized());
        assert!(storage.records().unwrap().is_empty());
    }

    #[test]
    fn test_create_record_persists_and_audits() {
        let (temp_dir, storage) = create_test_storage();
        let income = Income::new(
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            Money::from_rupees(1000),
            FundingSource::Pool,
        );

        storage.create_record(&storage.incomes, &income).unwrap();

        let reopened =
            Storage::open(SitebookPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(reopened.incomes.get_all().unwrap(), vec![income]);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::Income);
    }

    #[test]
    fn test_replace_all() {
        let (_temp_dir, storage) = create_test_storage();
        let mut records = RecordSet::default();
        records.vendors.push(Vendor::new("Gupta Traders", Default::default()));

        storage.replace_all(records.clone(), "import").unwrap();
        assert_eq!(storage.records().unwrap(), records);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries[0].operation, Operation::Replace);
    }
}
