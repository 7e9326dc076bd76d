//! Vendor service

use crate::error::{SitebookError, SitebookResult};
use crate::models::{ExpenseCategory, Vendor, VendorId};
use crate::storage::Storage;

pub struct VendorService<'a> {
    storage: &'a Storage,
}

impl<'a> VendorService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(
        &self,
        name: &str,
        category: ExpenseCategory,
        mobile: Option<String>,
    ) -> SitebookResult<Vendor> {
        let mut vendor = Vendor::new(name.trim(), category);
        vendor.mobile = mobile
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        vendor
            .validate()
            .map_err(|e| SitebookError::Validation(e.to_string()))?;

        self.storage.create_record(&self.storage.vendors, &vendor)?;
        Ok(vendor)
    }

    /// Find a vendor by id, then by case-insensitive name
    pub fn find(&self, identifier: &str) -> SitebookResult<Option<Vendor>> {
        if let Some(vendor) = self.storage.vendors.get(&VendorId::from(identifier))? {
            return Ok(Some(vendor));
        }
        let name = identifier.trim().to_lowercase();
        Ok(self
            .storage
            .vendors
            .find_by(|v| v.name.to_lowercase() == name)?
            .into_iter()
            .next())
    }

    /// Vendors sorted by name
    pub fn list(&self) -> SitebookResult<Vec<Vendor>> {
        let mut vendors = self.storage.vendors.get_all()?;
        vendors.sort_by_key(|v| v.name.to_lowercase());
        Ok(vendors)
    }

    pub fn update(
        &self,
        id: &VendorId,
        name: Option<String>,
        category: Option<ExpenseCategory>,
        mobile: Option<String>,
    ) -> SitebookResult<Vendor> {
        let before = self
            .storage
            .vendors
            .get(id)?
            .ok_or_else(|| SitebookError::vendor_not_found(id.to_string()))?;

        let mut vendor = before.clone();
        if let Some(name) = name {
            vendor.name = name.trim().to_string();
        }
        if let Some(category) = category {
            vendor.category = category;
        }
        if let Some(mobile) = mobile {
            let mobile = mobile.trim().to_string();
            vendor.mobile = (!mobile.is_empty()).then_some(mobile);
        }

        vendor
            .validate()
            .map_err(|e| SitebookError::Validation(e.to_string()))?;

        self.storage
            .update_record(&self.storage.vendors, &before, &vendor)?;
        Ok(vendor)
    }

    /// Delete a vendor; expenses keep their dangling vendor reference
    pub fn delete(&self, id: &VendorId) -> SitebookResult<Vendor> {
        self.storage
            .delete_record(&self.storage.vendors, id)?
            .ok_or_else(|| SitebookError::vendor_not_found(id.to_string()))
    }
}
