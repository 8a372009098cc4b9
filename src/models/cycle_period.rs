use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One menstrual cycle instance, bounded by a start date and an optional
/// end date. `end_date == None` marks the single currently-open period for
/// an owner. The engine never mutates periods; they are closed by the store
/// when the next period starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclePeriod {
    pub id: String,
    pub owner_id: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CyclePeriod {
    pub fn is_open(&self) -> bool {
        self.end_date.is_none()
    }
}

/// Sort periods descending by start date, most recent first. The resolver
/// and length estimator require this ordering.
pub fn sort_most_recent_first(periods: &mut [CyclePeriod]) {
    periods.sort_by(|a, b| b.start_date.cmp(&a.start_date));
}
