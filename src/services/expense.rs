//! Expense service
//!
//! CRUD for expenses with filtering by category, payer and date range.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{SitebookError, SitebookResult};
use crate::models::{
    Expense, ExpenseCategory, ExpenseId, FundingSource, Money, PaymentMode, VendorId,
};
use crate::storage::Storage;

pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Filter options for listing expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub category: Option<ExpenseCategory>,
    pub paid_by: Option<FundingSource>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive match on payee, sub-category and notes
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn paid_by(mut self, paid_by: FundingSource) -> Self {
        self.paid_by = Some(paid_by);
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, expense: &Expense) -> bool {
        if self.category.is_some_and(|c| c != expense.category) {
            return false;
        }
        if self.paid_by.is_some_and(|p| p != expense.paid_by) {
            return false;
        }
        if self.start_date.is_some_and(|start| expense.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| expense.date > end) {
            return false;
        }
        if let Some(term) = &self.search {
            let term = term.trim().to_lowercase();
            let haystack = format!(
                "{} {} {}",
                expense.paid_to,
                expense.sub_category.as_deref().unwrap_or_default(),
                expense.notes
            )
            .to_lowercase();
            if !haystack.contains(&term) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub date: NaiveDate,
    pub amount: Money,
    pub category: ExpenseCategory,
    pub sub_category: Option<String>,
    /// Payee; falls back to the vendor's name when empty
    pub paid_to: String,
    pub paid_by: FundingSource,
    pub vendor_id: Option<VendorId>,
    pub mode: Option<PaymentMode>,
    pub notes: Option<String>,
}

/// Changes to an expense; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub date: Option<NaiveDate>,
    pub amount: Option<Money>,
    pub category: Option<ExpenseCategory>,
    /// `Some(None)` clears the sub-category
    pub sub_category: Option<Option<String>>,
    pub paid_to: Option<String>,
    pub paid_by: Option<FundingSource>,
    pub mode: Option<PaymentMode>,
    pub notes: Option<String>,
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: CreateExpenseInput) -> SitebookResult<Expense> {
        let mut paid_to = input.paid_to.trim().to_string();
        if paid_to.is_empty() {
            if let Some(vendor_id) = &input.vendor_id {
                if let Some(vendor) = self.storage.vendors.get(vendor_id)? {
                    paid_to = vendor.name;
                }
            }
        }

        let mut expense = Expense::new(input.date, input.amount, input.category, paid_to, input.paid_by);
        expense.sub_category = clean_optional(input.sub_category);
        expense.vendor_id = input.vendor_id;
        if let Some(mode) = input.mode {
            expense.mode = mode;
        }
        if let Some(notes) = input.notes {
            expense.notes = notes.trim().to_string();
        }

        expense
            .validate()
            .map_err(|e| SitebookError::Validation(e.to_string()))?;

        self.storage.create_record(&self.storage.expenses, &expense)?;
        debug!(id = %expense.id, paid_by = %expense.paid_by, "expense recorded");

        Ok(expense)
    }

    pub fn get(&self, id: &ExpenseId) -> SitebookResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Expenses matching the filter, newest first
    pub fn list(&self, filter: &ExpenseFilter) -> SitebookResult<Vec<Expense>> {
        let mut expenses = self.storage.expenses.find_by(|e| filter.matches(e))?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }
        Ok(expenses)
    }

    pub fn update(&self, id: &ExpenseId, changes: ExpenseUpdate) -> SitebookResult<Expense> {
        let before = self
            .get(id)?
            .ok_or_else(|| SitebookError::expense_not_found(id.to_string()))?;

        let mut expense = before.clone();
        if let Some(date) = changes.date {
            expense.date = date;
        }
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(category) = changes.category {
            expense.category = category;
        }
        if let Some(sub_category) = changes.sub_category {
            expense.sub_category = clean_optional(sub_category);
        }
        if let Some(paid_to) = changes.paid_to {
            expense.paid_to = paid_to.trim().to_string();
        }
        if let Some(paid_by) = changes.paid_by {
            expense.paid_by = paid_by;
        }
        if let Some(mode) = changes.mode {
            expense.mode = mode;
        }
        if let Some(notes) = changes.notes {
            expense.notes = notes.trim().to_string();
        }

        expense
            .validate()
            .map_err(|e| SitebookError::Validation(e.to_string()))?;

        self.storage
            .update_record(&self.storage.expenses, &before, &expense)?;
        Ok(expense)
    }

    pub fn delete(&self, id: &ExpenseId) -> SitebookResult<Expense> {
        self.storage
            .delete_record(&self.storage.expenses, id)?
            .ok_or_else(|| SitebookError::expense_not_found(id.to_string()))
    }

    /// Total spent per category, largest first
    pub fn totals_by_category(&self) -> SitebookResult<Vec<(ExpenseCategory, Money)>> {
        let expenses = self.storage.expenses.get_all()?;
        let mut totals: Vec<(ExpenseCategory, Money)> = ExpenseCategory::all()
            .iter()
            .map(|&category| {
                let total: Money = expenses
                    .iter()
                    .filter(|e| e.category == category)
                    .map(|e| e.amount)
                    .sum();
                (category, total)
            })
            .filter(|(_, total)| !total.is_zero())
            .collect();
        totals.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(totals)
    }

    pub fn mark_all_synced(&self) -> SitebookResult<usize> {
        let mut expenses = self.storage.expenses.get_all()?;
        let pending = expenses.iter().filter(|e| !e.synced).count();
        if pending == 0 {
            return Ok(0);
        }
        for expense in &mut expenses {
            expense.synced = true;
        }
        self.storage.expenses.replace_all(expenses)?;
        self.storage.expenses.save()?;
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SitebookPaths;
    use crate::models::{Partner, Vendor};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SitebookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    fn input(d: u32, rupees: i64, category: ExpenseCategory, paid_to: &str) -> CreateExpenseInput {
        CreateExpenseInput {
            date: day(d),
            amount: Money::from_rupees(rupees),
            category,
            sub_category: None,
            paid_to: paid_to.into(),
            paid_by: FundingSource::Pool,
            vendor_id: None,
            mode: None,
            notes: None,
        }
    }

    #[test]
    fn test_create_validates() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        assert!(service
            .create(input(1, 0, ExpenseCategory::Food, "Dhaba"))
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(input(1, 100, ExpenseCategory::Food, "   "))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_payee_falls_back_to_vendor_name() {
        let (_temp, storage) = create_test_storage();
        let vendor = Vendor::new("Gupta Cement Store", ExpenseCategory::Material);
        storage.create_record(&storage.vendors, &vendor).unwrap();

        let service = ExpenseService::new(&storage);
        let mut new_expense = input(2, 8_000, ExpenseCategory::Material, "");
        new_expense.vendor_id = Some(vendor.id.clone());
        new_expense.sub_category = Some("Cement".into());

        let expense = service.create(new_expense).unwrap();
        assert_eq!(expense.paid_to, "Gupta Cement Store");
        assert_eq!(expense.sub_category.as_deref(), Some("Cement"));
    }

    #[test]
    fn test_list_filters() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        service.create(input(1, 500, ExpenseCategory::Food, "Tea stall")).unwrap();
        service.create(input(5, 9_000, ExpenseCategory::Material, "Brick kiln")).unwrap();
        let mut partner_paid = input(9, 1_200, ExpenseCategory::Transport, "Tractor");
        partner_paid.paid_by = Partner::DrSalik.into();
        service.create(partner_paid).unwrap();

        let all = service.list(&ExpenseFilter::new()).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].date, day(9));

        let food = service.list(&ExpenseFilter::new().category(ExpenseCategory::Food)).unwrap();
        assert_eq!(food.len(), 1);

        let salik = service
            .list(&ExpenseFilter::new().paid_by(Partner::DrSalik.into()))
            .unwrap();
        assert_eq!(salik[0].paid_to, "Tractor");

        let ranged = service.list(&ExpenseFilter::new().date_range(day(2), day(8))).unwrap();
        assert_eq!(ranged.len(), 1);

        let searched = service.list(&ExpenseFilter::new().search("KILN")).unwrap();
        assert_eq!(searched.len(), 1);

        assert_eq!(service.list(&ExpenseFilter::new().limit(2)).unwrap().len(), 2);
    }

    #[test]
    fn test_update_and_totals() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service.create(input(1, 500, ExpenseCategory::Food, "Tea stall")).unwrap();
        service.create(input(2, 700, ExpenseCategory::Material, "Sand")).unwrap();

        let updated = service
            .update(
                &expense.id,
                ExpenseUpdate {
                    category: Some(ExpenseCategory::Material),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.category, ExpenseCategory::Material);

        let totals = service.totals_by_category().unwrap();
        assert_eq!(totals, vec![(ExpenseCategory::Material, Money::from_rupees(1_200))]);
    }

    #[test]
    fn test_delete_missing() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        assert!(service.delete(&ExpenseId::from("nope")).unwrap_err().is_not_found());
    }
}
