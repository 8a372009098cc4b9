use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FileType {
    Image,
    Video,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::Video => "video",
        }
    }
}

/// A photo or video. `original_date` is when the moment happened (EXIF or
/// user-entered), `log_date` is the day the user filed it under, and
/// `created_at` is the upload time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub owner_id: String,
    pub file_url: String,
    pub file_type: FileType,
    pub caption: Option<String>,
    pub original_date: Option<NaiveDate>,
    pub log_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl MediaItem {
    /// The date a media item counts toward for cycle assignment and radial
    /// positioning: `original_date`, else `log_date`, else the upload date.
    /// Every caller that feeds media dates into the resolver or the wheel
    /// must go through this helper; picking a different field silently
    /// misplaces the item on the wrong day or cycle.
    pub fn effective_date(&self) -> NaiveDate {
        self.original_date
            .or(self.log_date)
            .unwrap_or_else(|| self.created_at.date_naive())
    }
}
