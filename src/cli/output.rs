//! Output formatting for CLI commands

use serde::Serialize;

use crate::notification::{render_record, NotificationRecord};

/// Format output as pretty JSON
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// Format records as JSON or rendered text based on --json flag
pub fn format_records(records: &[NotificationRecord], json: bool) -> String {
    if json {
        format_json(&records)
    } else if records.is_empty() {
        "暂无通知记录".to_string()
    } else {
        records
            .iter()
            .map(render_record)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
