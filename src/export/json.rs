//! Full-state JSON export and import
//!
//! The snapshot keeps the record collections at the top level next to
//! `settings`, which is the shape older backup files already have, so those
//! import without conversion. Export metadata is optional on the way in.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::{SitebookError, SitebookResult};
use crate::models::RecordSet;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

fn default_schema_version() -> String {
    EXPORT_SCHEMA_VERSION.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullExport {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,

    #[serde(flatten)]
    pub records: RecordSet,

    #[serde(default)]
    pub settings: Settings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExportMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub income_count: usize,
    pub expense_count: usize,
    pub labour_count: usize,
    pub attendance_count: usize,
    pub payment_count: usize,
    pub vendor_count: usize,
    pub earliest_date: Option<String>,
    pub latest_date: Option<String>,
}

impl ExportMetadata {
    pub fn describe(records: &RecordSet) -> Self {
        let dates = records
            .incomes
            .iter()
            .map(|i| i.date)
            .chain(records.expenses.iter().map(|e| e.date))
            .chain(records.attendance.iter().map(|a| a.date))
            .chain(records.payments.iter().map(|p| p.date));
        let (earliest, latest) = dates.fold((None, None), |(lo, hi), d| {
            (
                Some(lo.map_or(d, |lo: chrono::NaiveDate| lo.min(d))),
                Some(hi.map_or(d, |hi: chrono::NaiveDate| hi.max(d))),
            )
        });

        Self {
            income_count: records.incomes.len(),
            expense_count: records.expenses.len(),
            labour_count: records.labours.len(),
            attendance_count: records.attendance.len(),
            payment_count: records.payments.len(),
            vendor_count: records.vendors.len(),
            earliest_date: earliest.map(|d| d.to_string()),
            latest_date: latest.map(|d| d.to_string()),
        }
    }
}

fn check_unique<I>(kind: &str, ids: I) -> Result<(), String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.clone()) {
            return Err(format!("Duplicate {} id {}", kind, id));
        }
    }
    Ok(())
}

impl FullExport {
    pub fn new(records: RecordSet, settings: Settings) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Some(Utc::now()),
            app_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            metadata: Some(ExportMetadata::describe(&records)),
            records,
            settings,
        }
    }

    pub fn from_storage(storage: &Storage) -> SitebookResult<Self> {
        let settings = Settings::load_or_create(storage.paths())?;
        Ok(Self::new(storage.records()?, settings))
    }

    /// Check every record before anything is written
    pub fn validate(&self) -> Result<(), String> {
        let major = self.schema_version.split('.').next().unwrap_or_default();
        let supported = EXPORT_SCHEMA_VERSION.split('.').next().unwrap_or_default();
        if major != supported {
            return Err(format!(
                "Unsupported schema version {} (expected {}.x)",
                self.schema_version, supported
            ));
        }

        let r = &self.records;
        for income in &r.incomes {
            income
                .validate()
                .map_err(|e| format!("Income {}: {}", income.id, e))?;
        }
        for expense in &r.expenses {
            expense
                .validate()
                .map_err(|e| format!("Expense {}: {}", expense.id, e))?;
        }
        for vendor in &r.vendors {
            vendor
                .validate()
                .map_err(|e| format!("Vendor {}: {}", vendor.id, e))?;
        }
        for labour in &r.labours {
            labour
                .validate()
                .map_err(|e| format!("Labour {}: {}", labour.id, e))?;
        }
        for mark in &r.attendance {
            mark.validate()
                .map_err(|e| format!("Attendance {}: {}", mark.id, e))?;
        }
        for payment in &r.payments {
            payment
                .validate()
                .map_err(|e| format!("Labour payment {}: {}", payment.id, e))?;
        }

        check_unique("income", r.incomes.iter().map(|x| x.id.to_string()))?;
        check_unique("expense", r.expenses.iter().map(|x| x.id.to_string()))?;
        check_unique("vendor", r.vendors.iter().map(|x| x.id.to_string()))?;
        check_unique("labour", r.labours.iter().map(|x| x.id.to_string()))?;
        check_unique("attendance", r.attendance.iter().map(|x| x.id.to_string()))?;
        check_unique("payment", r.payments.iter().map(|x| x.id.to_string()))?;

        Ok(())
    }

    /// Replace all records and settings with the contents of this export
    pub fn apply(self, storage: &Storage, reason: &str) -> SitebookResult<usize> {
        self.validate().map_err(SitebookError::Import)?;
        let count = self.records.record_count();
        storage.replace_all(self.records, reason)?;
        self.settings.save(storage.paths())?;
        Ok(count)
    }
}

pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W, pretty: bool) -> SitebookResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| SitebookError::Export(e.to_string()))
}

/// Parse and validate a JSON snapshot; nothing is written
pub fn import_from_json(json_str: &str) -> SitebookResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| SitebookError::Import(e.to_string()))?;

    export.validate().map_err(SitebookError::Import)?;

    Ok(export)
}
