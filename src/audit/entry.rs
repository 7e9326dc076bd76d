//! Audit entry data structures

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    /// Whole-collection replacement (import, restore, reset)
    Replace,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Replace => "REPLACE",
        };
        f.pad(label)
    }
}

/// Record types that appear in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Income,
    Expense,
    Vendor,
    Labour,
    Attendance,
    LabourPayment,
    Settings,
    /// Every collection at once
    Dataset,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityType::Income => "Income",
            EntityType::Expense => "Expense",
            EntityType::Vendor => "Vendor",
            EntityType::Labour => "Labour",
            EntityType::Attendance => "Attendance",
            EntityType::LabourPayment => "LabourPayment",
            EntityType::Settings => "Settings",
            EntityType::Dataset => "Dataset",
        };
        f.pad(label)
    }
}

/// A single line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,

    /// Short description, e.g. the worker name or payee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn base(operation: Operation, entity_type: EntityType, entity_id: String) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name: None,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            entity_name,
            after: serde_json::to_value(entity).ok(),
            ..Self::base(Operation::Create, entity_type, entity_id.into())
        }
    }

    /// Update entry; the diff summary is derived from the two states
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Self {
        let before = serde_json::to_value(before).ok();
        let after = serde_json::to_value(after).ok();
        let diff_summary = match (&before, &after) {
            (Some(b), Some(a)) => super::diff::summarize_changes(b, a),
            _ => None,
        };
        Self {
            entity_name,
            before,
            after,
            diff_summary,
            ..Self::base(Operation::Update, entity_type, entity_id.into())
        }
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            entity_name,
            before: serde_json::to_value(entity).ok(),
            ..Self::base(Operation::Delete, entity_type, entity_id.into())
        }
    }

    /// Summary entry for a bulk replacement
    pub fn replace(reason: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            entity_name: Some(reason.into()),
            diff_summary: Some(summary.into()),
            ..Self::base(Operation::Replace, EntityType::Dataset, "*".to_string())
        }
    }

    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_entry() {
        let data = json!({"name": "Ramesh", "dailyWage": 800});
        let entry = AuditEntry::create(EntityType::Labour, "lab-1", Some("Ramesh".into()), &data);

        assert_eq!(entry.operation, Operation::Create);
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_update_entry_carries_diff() {
        let before = json!({"amount": 500, "remarks": "cash"});
        let after = json!({"amount": 750, "remarks": "cash"});
        let entry = AuditEntry::update(EntityType::Income, "inc-1", None, &before, &after);

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.diff_summary.as_deref(), Some("amount: 500 -> 750"));
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(EntityType::Expense, "exp-1", None, &json!({"amount": 1}));
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_entity_type_serializes_snake_case() {
        let entry = AuditEntry::create(EntityType::LabourPayment, "pay-1", None, &json!({}));
        let line = serde_json::to_string(&entry).unwrap();
        assert!(line.contains("\"labour_payment\""));

        let parsed: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed.entity_type, EntityType::LabourPayment);
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::replace("import", "42 records");
        let formatted = entry.format_human_readable();
        assert!(formatted.contains("REPLACE Dataset *"));
        assert!(formatted.contains("(import)"));
        assert!(formatted.contains("42 records"));
    }
}
