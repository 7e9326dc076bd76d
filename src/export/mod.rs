//! Export module for Sitebook
//!
//! - CSV: sectioned report and single tables for spreadsheets
//! - JSON: full snapshot, also the backup and import format
//! - YAML: the same snapshot, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{
    export_report_csv, expense_table, income_table, labour_summary_table, payment_table,
    write_csv_table, CsvTable,
};
pub use json::{export_full_json, import_from_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
