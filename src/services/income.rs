//! Income service
//!
//! CRUD for direct income records, plus the money-in history view that
//! merges partner-funded expenses and labour payments into the feed.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{SitebookError, SitebookResult};
use crate::ledger::{filter_history, find_entry, merged_history, HistoryEntry, LedgerSnapshot};
use crate::models::{FundingSource, Income, IncomeId, IncomeSource, Money, PaymentMode};
use crate::storage::Storage;

pub struct IncomeService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new income record
#[derive(Debug, Clone)]
pub struct CreateIncomeInput {
    pub date: NaiveDate,
    pub amount: Money,
    pub paid_by: FundingSource,
    pub source: Option<IncomeSource>,
    pub mode: Option<PaymentMode>,
    pub remarks: Option<String>,
}

/// Changes to an income record; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct IncomeUpdate {
    pub date: Option<NaiveDate>,
    pub amount: Option<Money>,
    pub paid_by: Option<FundingSource>,
    pub source: Option<IncomeSource>,
    pub mode: Option<PaymentMode>,
    pub remarks: Option<String>,
}

impl IncomeUpdate {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.amount.is_none()
            && self.paid_by.is_none()
            && self.source.is_none()
            && self.mode.is_none()
            && self.remarks.is_none()
    }

    fn apply(&self, income: &mut Income) {
        if let Some(date) = self.date {
            income.date = date;
        }
        if let Some(amount) = self.amount {
            income.amount = amount;
        }
        if let Some(paid_by) = self.paid_by {
            income.paid_by = paid_by;
        }
        if let Some(source) = self.source {
            income.source = source;
        }
        if let Some(mode) = self.mode {
            income.mode = mode;
        }
        if let Some(remarks) = &self.remarks {
            income.remarks = remarks.trim().to_string();
        }
    }
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: CreateIncomeInput) -> SitebookResult<Income> {
        let mut income = Income::new(input.date, input.amount, input.paid_by);
        if let Some(source) = input.source {
            income.source = source;
        }
        if let Some(mode) = input.mode {
            income.mode = mode;
        }
        if let Some(remarks) = input.remarks {
            income.remarks = remarks.trim().to_string();
        }

        income
            .validate()
            .map_err(|e| SitebookError::Validation(e.to_string()))?;

        self.storage.create_record(&self.storage.incomes, &income)?;
        debug!(id = %income.id, amount = %income.amount, "income recorded");

        Ok(income)
    }

    pub fn get(&self, id: &IncomeId) -> SitebookResult<Option<Income>> {
        self.storage.incomes.get(id)
    }

    /// All incomes, newest first
    pub fn list(&self) -> SitebookResult<Vec<Income>> {
        let mut incomes = self.storage.incomes.get_all()?;
        incomes.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(incomes)
    }

    pub fn update(&self, id: &IncomeId, changes: &IncomeUpdate) -> SitebookResult<Income> {
        let before = self
            .get(id)?
            .ok_or_else(|| SitebookError::income_not_found(id.to_string()))?;

        let mut income = before.clone();
        changes.apply(&mut income);
        income
            .validate()
            .map_err(|e| SitebookError::Validation(e.to_string()))?;

        self.storage
            .update_record(&self.storage.incomes, &before, &income)?;
        Ok(income)
    }

    pub fn delete(&self, id: &IncomeId) -> SitebookResult<Income> {
        self.storage
            .delete_record(&self.storage.incomes, id)?
            .ok_or_else(|| SitebookError::income_not_found(id.to_string()))
    }

    /// Merged money-in history, newest first
    pub fn history(&self) -> SitebookResult<Vec<HistoryEntry>> {
        let records = self.storage.records()?;
        Ok(merged_history(&LedgerSnapshot::from(&records)))
    }

    /// History entries matching a search term
    pub fn search_history(&self, term: &str) -> SitebookResult<Vec<HistoryEntry>> {
        let history = self.history()?;
        Ok(filter_history(&history, term).into_iter().cloned().collect())
    }

    fn history_entry(&self, id: &str) -> SitebookResult<HistoryEntry> {
        let history = self.history()?;
        find_entry(&history, id)
            .cloned()
            .ok_or_else(|| SitebookError::not_found("History entry", id))
    }

    /// Edit an entry picked from the history view
    ///
    /// Only direct incomes can be edited here; entries mirroring an expense
    /// or a labour payment are refused before anything is written.
    pub fn update_from_history(&self, entry_id: &str, changes: &IncomeUpdate) -> SitebookResult<Income> {
        let entry = self.history_entry(entry_id)?;
        entry.ensure_editable()?;
        self.update(&IncomeId::from(entry.id.as_str()), changes)
    }

    /// Delete an entry picked from the history view
    pub fn delete_from_history(&self, entry_id: &str) -> SitebookResult<Income> {
        let entry = self.history_entry(entry_id)?;
        entry.ensure_deletable()?;
        self.delete(&IncomeId::from(entry.id.as_str()))
    }

    /// Mark every income as pushed to the remote sheet
    pub fn mark_all_synced(&self) -> SitebookResult<usize> {
        let mut incomes = self.storage.incomes.get_all()?;
        let pending = incomes.iter().filter(|i| !i.synced).count();
        if pending == 0 {
            return Ok(0);
        }
        for income in &mut incomes {
            income.synced = true;
        }
        self.storage.incomes.replace_all(incomes)?;
        self.storage.incomes.save()?;
        Ok(pending)
    }
}
