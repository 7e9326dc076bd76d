//! One-way push of the ledger to a Google Sheet
//!
//! The whole record set is posted to the Apps Script web app configured in
//! settings. Nothing is read back; the sheet is a mirror for people who
//! don't use the CLI.

mod payload;
mod script;
mod transport;

pub use payload::SyncPayload;
pub use script::{APPS_SCRIPT_TEMPLATE, SETUP_STEPS};
pub use transport::{MemoryTransport, SyncTransport, UreqTransport, DEFAULT_TIMEOUT};

use tracing::{info, warn};

use crate::config::Settings;
use crate::error::{SitebookError, SitebookResult};
use crate::services::{ExpenseService, IncomeService};
use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub sheet_name: String,
    pub records_sent: usize,
    /// Incomes and expenses whose `synced` flag flipped
    pub newly_synced: usize,
}

pub struct SheetSync<'a, T: SyncTransport> {
    storage: &'a Storage,
    transport: T,
}

impl<'a, T: SyncTransport> SheetSync<'a, T> {
    pub fn new(storage: &'a Storage, transport: T) -> Self {
        Self { storage, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Post the full record set; local records change only after a successful post
    pub fn push(&self, settings: &Settings) -> SitebookResult<SyncReport> {
        let url = settings.sync_url().ok_or_else(|| {
            SitebookError::Config(
                "Google Sheet script URL is not set. Configure it with `sitebook settings set sync-url <URL>`"
                    .into(),
            )
        })?;

        let records = self.storage.records()?;
        let records_sent = records.record_count();
        let payload = SyncPayload::new(settings.project_name.clone(), records);
        let body = serde_json::to_value(&payload)?;

        if let Err(e) = self.transport.post_json(url, &body) {
            warn!(error = %e, "sheet sync failed");
            return Err(e);
        }

        let newly_synced = IncomeService::new(self.storage).mark_all_synced()?
            + ExpenseService::new(self.storage).mark_all_synced()?;
        info!(records = records_sent, "ledger pushed to sheet");

        Ok(SyncReport {
            sheet_name: payload.sheet_name,
            records_sent,
            newly_synced,
        })
    }
}
