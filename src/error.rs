//! Custom error types for Sitebook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Sitebook operations
#[derive(Error, Debug)]
pub enum SitebookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A history entry that mirrors an expense or labour payment was edited
    /// or deleted from the income view
    #[error("{guidance}")]
    DerivedEntry {
        origin: &'static str,
        guidance: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Remote sync errors
    #[error("Sync failed: {0}")]
    Sync(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SitebookError {
    /// Create a "not found" error for any entity type
    pub fn not_found(entity_type: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for incomes
    pub fn income_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Income", identifier)
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Expense", identifier)
    }

    /// Create a "not found" error for labour profiles
    pub fn labour_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Labour", identifier)
    }

    /// Create a "not found" error for attendance records
    pub fn attendance_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Attendance", identifier)
    }

    /// Create a "not found" error for labour payments
    pub fn payment_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Labour payment", identifier)
    }

    /// Create a "not found" error for vendors
    pub fn vendor_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Vendor", identifier)
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error refused a mutation of a derived history entry
    pub fn is_derived_entry(&self) -> bool {
        matches!(self, Self::DerivedEntry { .. })
    }
}

impl From<std::io::Error> for SitebookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SitebookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Sitebook operations
pub type SitebookResult<T> = Result<T, SitebookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SitebookError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = SitebookError::labour_not_found("lab-1234");
        assert_eq!(err.to_string(), "Labour not found: lab-1234");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_derived_entry_displays_guidance() {
        let err = SitebookError::DerivedEntry {
            origin: "Expenses",
            guidance: "Edit this in Expenses".into(),
        };
        assert_eq!(err.to_string(), "Edit this in Expenses");
        assert!(err.is_derived_entry());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SitebookError = io_err.into();
        assert!(matches!(err, SitebookError::Io(_)));
    }
}
