use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{ActivityStatus, FileType, NoteType};

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_optional_datetime(
    value: Option<String>,
    field: &str,
) -> Result<Option<DateTime<Utc>>> {
    match value {
        Some(raw) => parse_datetime(&raw, field).map(Some),
        None => Ok(None),
    }
}

pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_optional_date(value: Option<String>, field: &str) -> Result<Option<NaiveDate>> {
    match value {
        Some(raw) => parse_date(&raw, field).map(Some),
        None => Ok(None),
    }
}

pub fn date_to_sql(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_note_type(value: &str) -> Result<NoteType> {
    match value {
        "intention" => Ok(NoteType::Intention),
        "reflection" => Ok(NoteType::Reflection),
        "daily" => Ok(NoteType::Daily),
        "general" => Ok(NoteType::General),
        other => Err(anyhow!("unknown note type {other}")),
    }
}

pub fn parse_file_type(value: &str) -> Result<FileType> {
    match value {
        "image" => Ok(FileType::Image),
        "video" => Ok(FileType::Video),
        other => Err(anyhow!("unknown file type {other}")),
    }
}

pub fn parse_activity_status(value: &str) -> Result<ActivityStatus> {
    match value {
        "active" => Ok(ActivityStatus::Active),
        "paused" => Ok(ActivityStatus::Paused),
        "completed" => Ok(ActivityStatus::Completed),
        other => Err(anyhow!("unknown activity status {other}")),
    }
}

/// Linked activity ids persist as a JSON array column, matching the hosted
/// store's array field.
pub fn parse_linked_ids(value: &str) -> Result<Vec<String>> {
    serde_json::from_str(value).with_context(|| "failed to parse linked_activity_ids")
}

pub fn linked_ids_to_sql(ids: &[String]) -> Result<String> {
    serde_json::to_string(ids).with_context(|| "failed to serialize linked_activity_ids")
}
