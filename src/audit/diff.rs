//! Field-level change summaries for audit entries

use serde_json::Value;

const MAX_TEXT_CHARS: usize = 50;

/// Describe what changed between two serialized records
///
/// Only top-level fields are compared. Returns `None` when nothing changed.
pub fn summarize_changes(before: &Value, after: &Value) -> Option<String> {
    let changes: Vec<String> = match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            let mut changes: Vec<String> = old
                .iter()
                .filter_map(|(key, old_val)| match new.get(key) {
                    Some(new_val) if new_val == old_val => None,
                    Some(new_val) => Some(format!("{}: {} -> {}", key, render(old_val), render(new_val))),
                    None => Some(format!("{}: {} -> (removed)", key, render(old_val))),
                })
                .collect();
            changes.extend(
                new.iter()
                    .filter(|(key, _)| !old.contains_key(*key))
                    .map(|(key, val)| format!("{}: (added) -> {}", key, render(val))),
            );
            changes
        }
        _ if before != after => vec![format!("{} -> {}", render(before), render(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_TEXT_CHARS => {
            let head: String = s.chars().take(MAX_TEXT_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
