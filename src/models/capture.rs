use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum NoteType {
    Intention,
    Reflection,
    Daily,
    General,
}

impl NoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Intention => "intention",
            NoteType::Reflection => "reflection",
            NoteType::Daily => "daily",
            NoteType::General => "general",
        }
    }
}

/// A voice note. Belongs to exactly one owner and one log date; may be
/// linked to zero or more activity sessions (every session that was active
/// when the note was recorded).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capture {
    pub id: String,
    pub owner_id: String,
    pub note_type: NoteType,
    pub transcription: Option<String>,
    pub file_url: Option<String>,
    pub log_date: NaiveDate,
    pub linked_activity_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Capture {
    pub fn is_linked(&self) -> bool {
        !self.linked_activity_ids.is_empty()
    }
}
