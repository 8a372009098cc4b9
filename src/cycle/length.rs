use crate::models::CyclePeriod;

/// Baseline cycle length used when an owner has no closed periods yet.
pub const DEFAULT_CYCLE_LENGTH_DAYS: i64 = 28;

/// How many recent closed periods feed the rolling average for the length
/// of the still-open period.
const ROLLING_AVERAGE_WINDOW: usize = 3;

/// Effective length of a period in days.
///
/// A closed period has its actual span. An open period has no true length
/// yet, so the average of the most recent closed periods (up to
/// [`ROLLING_AVERAGE_WINDOW`]) stands in, rounded to the nearest day; with
/// no closed history the default applies. `all_periods` must be sorted
/// descending by start date so the window picks the most recent ones.
pub fn cycle_length_days(period: &CyclePeriod, all_periods: &[CyclePeriod]) -> i64 {
    if let Some(end) = period.end_date {
        return (end - period.start_date).num_days();
    }

    let recent: Vec<i64> = all_periods
        .iter()
        .filter_map(|p| p.end_date.map(|end| (end - p.start_date).num_days()))
        .take(ROLLING_AVERAGE_WINDOW)
        .collect();

    if recent.is_empty() {
        return DEFAULT_CYCLE_LENGTH_DAYS;
    }

    let total: i64 = recent.iter().sum();
    (total as f64 / recent.len() as f64).round() as i64
}

/// Day count for the all-time wheel: every event across every cycle renders
/// on one wheel, so it is sized by the longest closed cycle, open periods
/// counting as the default, never below the default.
pub fn all_time_wheel_length(periods: &[CyclePeriod]) -> i64 {
    periods
        .iter()
        .map(|p| match p.end_date {
            Some(end) => (end - p.start_date).num_days(),
            None => DEFAULT_CYCLE_LENGTH_DAYS,
        })
        .fold(DEFAULT_CYCLE_LENGTH_DAYS, i64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn period(start: &str, end: Option<&str>) -> CyclePeriod {
        CyclePeriod {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: "owner-1".to_string(),
            start_date: start.parse().unwrap(),
            end_date: end.map(|e| e.parse().unwrap()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn closed_period_uses_actual_span() {
        let p = period("2024-01-01", Some("2024-01-29"));
        assert_eq!(cycle_length_days(&p, &[p.clone()]), 28);
    }

    #[test]
    fn open_period_averages_three_most_recent_closed() {
        // Most recent first: 27, 30, 29 days, then an older one the window
        // must not reach.
        let open = period("2024-04-01", None);
        let all = vec![
            open.clone(),
            period("2024-03-05", Some("2024-04-01")), // 27
            period("2024-02-04", Some("2024-03-05")), // 30
            period("2024-01-06", Some("2024-02-04")), // 29
            period("2023-12-01", Some("2024-01-06")), // 36, outside window
        ];

        // round((27 + 30 + 29) / 3) == round(28.67) == 29
        assert_eq!(cycle_length_days(&open, &all), 29);
    }

    #[test]
    fn open_period_with_no_history_defaults_to_28() {
        let open = period("2024-04-01", None);
        assert_eq!(cycle_length_days(&open, &[open.clone()]), 28);
    }

    #[test]
    fn all_time_length_is_longest_closed_cycle_min_28() {
        let periods = vec![
            period("2024-03-01", None),
            period("2024-01-29", Some("2024-03-01")), // 32
            period("2024-01-01", Some("2024-01-29")), // 28
        ];
        assert_eq!(all_time_wheel_length(&periods), 32);

        let short = vec![period("2024-01-01", Some("2024-01-21"))]; // 20
        assert_eq!(all_time_wheel_length(&short), 28);

        assert_eq!(all_time_wheel_length(&[]), 28);
    }
}
