//! File I/O utilities with atomic writes
//!
//! Every collection file is written to a temp file and renamed into place,
//! so a crash leaves either the old or the new contents.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SitebookError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, SitebookError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| SitebookError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| SitebookError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Read JSON from a file, returning an error if file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, SitebookError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(SitebookError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)
        .map_err(|e| SitebookError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| SitebookError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// This ensures that the file is either completely written or not modified at all,
/// preventing corruption on crashes or power failures.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SitebookError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SitebookError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Create temp file in same directory (important for atomic rename)
    let temp_path = path.with_extension("json.tmp");

    // Write to temp file
    let file = File::create(&temp_path)
        .map_err(|e| SitebookError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| SitebookError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| SitebookError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SitebookError::Storage(format!("Failed to sync data: {}", e)))?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| {
        // Try to clean up temp file if rename fails
        let _ = fs::remove_file(&temp_path);
        SitebookError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Write bytes to a file atomically
///
/// Used for exports that are not JSON (CSV, YAML).
pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), SitebookError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            SitebookError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = std::path::PathBuf::from(temp_name);

    let mut file = File::create(&temp_path)
        .map_err(|e| SitebookError::Storage(format!("Failed to create temp file: {}", e)))?;
    file.write_all(bytes)
        .and_then(|_| file.sync_all())
        .map_err(|e| SitebookError::Storage(format!("Failed to write {}: {}", path.display(), e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SitebookError::Storage(format!("Failed to rename temp file: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct StoredRow {
        name: String,
        daily_wage: i64,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let data: StoredRow = read_json(&path).unwrap();
        assert_eq!(data, StoredRow::default());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("labours.json");

        let data = StoredRow {
            name: "Ramesh".to_string(),
            daily_wage: 800,
        };

        write_json_atomic(&path, &data).unwrap();
        assert!(path.exists());

        let loaded: StoredRow = read_json(&path).unwrap();
        assert_eq!(data, loaded);
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("labours.json");
        let temp_path = temp_dir.path().join("labours.json.tmp");

        let data = StoredRow {
            name: "Ramesh".to_string(),
            daily_wage: 800,
        };

        write_json_atomic(&path, &data).unwrap();

        assert!(path.exists());
        assert!(!temp_path.exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("labours.json");

        let data = StoredRow {
            name: "Ramesh".to_string(),
            daily_wage: 800,
        };

        write_json_atomic(&path, &data).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_bytes_atomic() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.csv");

        write_bytes_atomic(&path, b"a,b\n1,2\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n1,2\n");
        assert!(!temp_dir.path().join("report.csv.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<StoredRow, _>(&path).unwrap_err();
        assert!(matches!(err, SitebookError::Storage(_)));
    }

    #[test]
    fn test_read_json_required() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("labours.json");

        // Should fail for nonexistent
        assert!(read_json_required::<StoredRow, _>(&path).is_err());

        // Write and then read should work
        let data = StoredRow {
            name: "Ramesh".to_string(),
            daily_wage: 800,
        };
        write_json_atomic(&path, &data).unwrap();

        let loaded: StoredRow = read_json_required(&path).unwrap();
        assert_eq!(data, loaded);
    }
}
