//! Generic JSON-backed collection repository
//!
//! Each record collection lives in its own file as a JSON array. Records are
//! kept in insertion order, which the ledger relies on for stable ordering of
//! same-day history entries.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::audit::EntityType;
use crate::error::{SitebookError, SitebookResult};
use crate::models::{
    Attendance, AttendanceId, Expense, ExpenseId, Income, IncomeId, LabourId, LabourPayment,
    LabourProfile, PaymentId, Vendor, VendorId,
};

use super::file_io::{read_json, write_json_atomic};

/// A record type stored in its own collection
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: PartialEq + Display + Clone;

    const ENTITY: EntityType;

    fn id(&self) -> &Self::Id;

    /// Short label for audit entries
    fn audit_name(&self) -> Option<String> {
        None
    }
}

impl Record for Income {
    type Id = IncomeId;
    const ENTITY: EntityType = EntityType::Income;

    fn id(&self) -> &IncomeId {
        &self.id
    }

    fn audit_name(&self) -> Option<String> {
        Some(self.paid_by.label().to_string())
    }
}

impl Record for Expense {
    type Id = ExpenseId;
    const ENTITY: EntityType = EntityType::Expense;

    fn id(&self) -> &ExpenseId {
        &self.id
    }

    fn audit_name(&self) -> Option<String> {
        Some(self.paid_to.clone())
    }
}

impl Record for Vendor {
    type Id = VendorId;
    const ENTITY: EntityType = EntityType::Vendor;

    fn id(&self) -> &VendorId {
        &self.id
    }

    fn audit_name(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl Record for LabourProfile {
    type Id = LabourId;
    const ENTITY: EntityType = EntityType::Labour;

    fn id(&self) -> &LabourId {
        &self.id
    }

    fn audit_name(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl Record for Attendance {
    type Id = AttendanceId;
    const ENTITY: EntityType = EntityType::Attendance;

    fn id(&self) -> &AttendanceId {
        &self.id
    }
}

impl Record for LabourPayment {
    type Id = PaymentId;
    const ENTITY: EntityType = EntityType::LabourPayment;

    fn id(&self) -> &PaymentId {
        &self.id
    }
}

pub struct Repository<T: Record> {
    path: PathBuf,
    records: RwLock<Vec<T>>,
}

impl<T: Record> Repository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> SitebookResult<RwLockReadGuard<'_, Vec<T>>> {
        self.records
            .read()
            .map_err(|e| SitebookError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> SitebookResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.records
            .write()
            .map_err(|e| SitebookError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    pub fn load(&self) -> SitebookResult<()> {
        let loaded: Vec<T> = read_json(&self.path)?;
        *self.write()? = loaded;
        Ok(())
    }

    pub fn save(&self) -> SitebookResult<()> {
        let records = self.read()?;
        write_json_atomic(&self.path, &*records)
    }

    pub fn get(&self, id: &T::Id) -> SitebookResult<Option<T>> {
        Ok(self.read()?.iter().find(|r| r.id() == id).cloned())
    }

    /// All records in insertion order
    pub fn get_all(&self) -> SitebookResult<Vec<T>> {
        Ok(self.read()?.clone())
    }

    pub fn count(&self) -> SitebookResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn find_by<F>(&self, predicate: F) -> SitebookResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.read()?.iter().filter(|r| predicate(r)).cloned().collect())
    }

    /// Append a record, or replace the record with the same id in place
    pub fn upsert(&self, record: T) -> SitebookResult<Option<T>> {
        let mut records = self.write()?;
        if let Some(index) = records.iter().position(|r| r.id() == record.id()) {
            return Ok(Some(std::mem::replace(&mut records[index], record)));
        }
        records.push(record);
        Ok(None)
    }

    pub fn delete(&self, id: &T::Id) -> SitebookResult<Option<T>> {
        let mut records = self.write()?;
        Ok(records
            .iter()
            .position(|r| r.id() == id)
            .map(|index| records.remove(index)))
    }

    pub fn replace_all(&self, records: Vec<T>) -> SitebookResult<()> {
        *self.write()? = records;
        Ok(())
    }
}
