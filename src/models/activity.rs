use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ActivityStatus {
    Active,
    Paused,
    Completed,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Active => "active",
            ActivityStatus::Paused => "paused",
            ActivityStatus::Completed => "completed",
        }
    }
}

/// A timed activity session. `end_time == None` denotes a session still in
/// progress. `log_date` is the local calendar day the session started on and
/// is the field day views query by, so sessions that run past midnight stay
/// on the day they began.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySession {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: ActivityStatus,
    pub log_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ActivitySession {
    pub fn is_in_progress(&self) -> bool {
        self.end_time.is_none()
    }
}
