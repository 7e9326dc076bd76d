//! YAML export
//!
//! Same snapshot as the JSON export, in a form that is easier to read and
//! hand-edit.

use std::io::Write;

use crate::error::{SitebookError, SitebookResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

fn export_err(e: impl std::fmt::Display) -> SitebookError {
    SitebookError::Export(e.to_string())
}

pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> SitebookResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# Sitebook export: {}", export.settings.project_name).map_err(export_err)?;
    if let Some(exported_at) = export.exported_at {
        writeln!(writer, "# Generated: {}", exported_at.to_rfc3339()).map_err(export_err)?;
    }
    if let Some(version) = &export.app_version {
        writeln!(writer, "# App Version: {}", version).map_err(export_err)?;
    }
    writeln!(writer, "#").map_err(export_err)?;
    writeln!(writer, "# Import with `sitebook import <file> --confirm` to restore this ledger.")
        .map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(export_err)
}

/// Parse and validate a YAML snapshot; nothing is written
pub fn import_from_yaml(yaml_str: &str) -> SitebookResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| SitebookError::Import(e.to_string()))?;

    export.validate().map_err(SitebookError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SitebookPaths;
    use crate::models::{LabourProfile, Money};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SitebookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_yaml_export() {
        let (_temp_dir, storage) = create_test_storage();
        let worker = LabourProfile::new("Suresh", "Helper", Money::from_rupees(500));
        storage.create_record(&storage.labours, &worker).unwrap();

        let mut out = Vec::new();
        export_full_yaml(&storage, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# Sitebook export: Construction Project"));
        assert!(text.contains("Suresh"));

        // comment lines are ignored by the parser
        let imported = import_from_yaml(&text).unwrap();
        assert_eq!(imported.records.labours, vec![worker]);
    }

    #[test]
    fn test_invalid_yaml_is_import_error() {
        let err = import_from_yaml("labours: [{id: l1, name: '', dailyWage: 500}]").unwrap_err();
        assert!(matches!(err, SitebookError::Import(_)));
    }
}
