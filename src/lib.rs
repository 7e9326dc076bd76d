//! Sitebook - bookkeeping for a construction site
//!
//! Tracks the money two partners put into a building project, what was
//! spent on materials and services, and the attendance and wages of the
//! daily labourers. Every balance is recomputed from the raw records.
//!
//! # Architecture
//!
//! - `config`: Paths and settings
//! - `error`: Error type shared by every layer
//! - `models`: Record types and money
//! - `storage`: JSON file storage, one file per collection
//! - `audit`: Audit log of every mutation
//! - `ledger`: Labour earnings, fund totals, partner shares, merged history
//! - `services`: Validated CRUD on top of storage
//! - `reports`: Dashboard, partner, labour and history reports
//! - `export`: CSV, JSON and YAML export; JSON/YAML import
//! - `backup`: Rolling backups and restore
//! - `sync`: One-way push to a Google Sheet
//! - `display`, `cli`: Terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use sitebook::config::SitebookPaths;
//! use sitebook::services::DataService;
//! use sitebook::storage::Storage;
//!
//! let storage = Storage::open(SitebookPaths::new()?)?;
//! let ledger = DataService::new(&storage).ledger()?;
//! println!("Cash in hand: {}", ledger.totals.net_balance);
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod sync;

pub use error::{SitebookError, SitebookResult};

use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static TRACING: Once = Once::new();

/// Install the diagnostics subscriber; later calls do nothing
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or debug
/// output for this crate when `verbose` is true.
pub fn init_tracing(verbose: bool) {
    TRACING.call_once(|| {
        let default = if verbose { "sitebook=debug" } else { "sitebook=warn" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init();
    });
}
