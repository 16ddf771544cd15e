// Data models for the to-do list

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, SubsecRound};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};

/// Format used for due dates on the command line and for table output
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single to-do record
///
/// Field names match the on-disk layout (`Id`, `Content`, ...), so files
/// written by earlier versions of the tool load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    pub id: u64,
    pub content: String,
    pub done: bool,
    pub tag: String,
    pub due_date: DateTime<FixedOffset>,
    /// Set at creation, never refreshed by later updates
    pub updated_at: DateTime<FixedOffset>,
}

impl Task {
    /// Create a new, not-yet-done task
    pub fn new(
        id: u64,
        content: impl Into<String>,
        tag: impl Into<String>,
        due_date: DateTime<FixedOffset>,
        updated_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            done: false,
            tag: tag.into(),
            due_date,
            updated_at,
        }
    }
}

/// Parse a `yyyy-mm-dd hh:mm:ss` timestamp, interpreted as UTC
pub fn parse_due_date(value: &str) -> Result<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
        .map_err(|e| eyre!("Invalid duedate {:?} (expected yyyy-mm-dd hh:mm:ss): {}", value, e))?;
    Ok(naive.and_utc().fixed_offset())
}

/// Render a timestamp the way the table shows it
pub fn format_timestamp(ts: &DateTime<FixedOffset>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time, truncated to whole seconds
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset().trunc_subsecs(0)
}
