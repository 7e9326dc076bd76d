//! Whole-dataset operations

use tracing::info;

use crate::error::SitebookResult;
use crate::ledger::Ledger;
use crate::models::RecordSet;
use crate::storage::Storage;

pub struct DataService<'a> {
    storage: &'a Storage,
}

impl<'a> DataService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Recompute every aggregate from the records as they are now
    pub fn ledger(&self) -> SitebookResult<Ledger> {
        Ok(Ledger::from_records(&self.storage.records()?))
    }

    /// Delete every record of every collection; settings are kept
    pub fn reset_all(&self) -> SitebookResult<usize> {
        let removed = self.storage.records()?.record_count();
        self.storage.replace_all(RecordSet::default(), "reset")?;
        info!(removed, "all records deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SitebookPaths;
    use crate::models::{FundingSource, Income, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_reset_all() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(SitebookPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let income = Income::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            Money::from_rupees(10),
            FundingSource::Pool,
        );
        storage.create_record(&storage.incomes, &income).unwrap();

        let service = DataService::new(&storage);
        assert_eq!(service.ledger().unwrap().totals.total_income, Money::from_rupees(10));
        assert_eq!(service.reset_all().unwrap(), 1);
        assert!(storage.records().unwrap().is_empty());

        let reopened =
            Storage::open(SitebookPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        assert!(reopened.records().unwrap().is_empty());
    }
}
