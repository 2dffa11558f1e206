use chrono::{DateTime, Utc};

use crate::errors::{ExportError, ExportResult};

/// A host entity that exposes named field values for export.
///
/// The host data layer decides how a field becomes a human-readable
/// string; the export procedure only consumes the result.
pub trait Record {
    /// Value of `field` as it should appear in a CSV cell.
    fn display_value(&self, field: &str) -> ExportResult<String>;
}

/// Dynamic rows: any JSON object can act as a record, with cell values
/// rendered through [`display_from_json`].
impl Record for serde_json::Value {
    fn display_value(&self, field: &str) -> ExportResult<String> {
        match self.get(field) {
            Some(value) => Ok(display_from_json(value)),
            None => Err(ExportError::unknown_field(field)),
        }
    }
}

/// Render a JSON value the way it should read in a spreadsheet cell:
/// strings unquoted, null empty, nested structures as compact JSON.
pub fn display_from_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

// Helpers for hosts implementing `Record` on typed structs.

pub fn display_value_of<T: std::fmt::Display>(value: &T) -> String {
    value.to_string()
}

pub fn display_optional<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

pub fn display_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
