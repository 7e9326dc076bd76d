//! HTTP seam for the sheet push

use std::cell::RefCell;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::{SitebookError, SitebookResult};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends one JSON document to a URL; the response body is ignored
pub trait SyncTransport {
    fn post_json(&self, url: &str, body: &Value) -> SitebookResult<()>;
}

/// Blocking HTTP transport
pub struct UreqTransport {
    timeout: Duration,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

/// Only a transport failure counts as a failed push
///
/// The sheet script's reply is never inspected, so a 4xx or 5xx status is
/// logged and otherwise treated like any other answer.
fn post_outcome(result: Result<ureq::Response, ureq::Error>) -> SitebookResult<()> {
    match result {
        Ok(response) => {
            debug!(status = response.status(), "sync endpoint responded");
            Ok(())
        }
        Err(ureq::Error::Status(code, _)) => {
            debug!(status = code, "sync endpoint replied with an error status");
            Ok(())
        }
        Err(ureq::Error::Transport(t)) => Err(SitebookError::Sync(t.to_string())),
    }
}

impl SyncTransport for UreqTransport {
    fn post_json(&self, url: &str, body: &Value) -> SitebookResult<()> {
        post_outcome(
            ureq::post(url)
                .timeout(self.timeout)
                .set("Content-Type", "application/json")
                .send_json(body),
        )
    }
}

/// Keeps posted documents in memory
#[derive(Default)]
pub struct MemoryTransport {
    sent: RefCell<Vec<(String, Value)>>,
    failure: Option<String>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every post fails with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: RefCell::default(),
            failure: Some(reason.into()),
        }
    }

    pub fn sent(&self) -> Vec<(String, Value)> {
        self.sent.borrow().clone()
    }
}

impl SyncTransport for MemoryTransport {
    fn post_json(&self, url: &str, body: &Value) -> SitebookResult<()> {
        if let Some(reason) = &self.failure {
            return Err(SitebookError::Sync(reason.clone()));
        }
        self.sent.borrow_mut().push((url.to_string(), body.clone()));
        Ok(())
    }
}
