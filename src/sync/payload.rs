//! The document posted to the sheet endpoint

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::RecordSet;

/// `{sheetName, timestamp, data}` as the receiving script expects it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayload {
    pub sheet_name: String,
    /// Local wall-clock time, informational only
    pub timestamp: String,
    pub data: RecordSet,
}

impl SyncPayload {
    pub fn new(sheet_name: impl Into<String>, data: RecordSet) -> Self {
        Self::at(sheet_name, data, Local::now())
    }

    pub fn at(sheet_name: impl Into<String>, data: RecordSet, now: DateTime<Local>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            timestamp: now.format("%-d/%-m/%Y, %-I:%M:%S %P").to_string(),
            data,
        }
    }
}
