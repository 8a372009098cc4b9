use anyhow::Result;
use chrono::NaiveDate;
use log::debug;

use crate::cycle::{cycle_length_days, resolve_cycle_day};
use crate::models::{Capture, CyclePeriod, MediaItem, NoteType};
use crate::wheel::geometry::WheelGeometry;
use crate::wheel::position::{
    polar_position, radial_fraction, time_of_day_hours, Track, WheelMode, WheelPoint,
};

/// What family of event a data point represents. Drives the dot color and
/// the track within a day's slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    Intention,
    Reflection,
    General,
    Media,
}

impl PointKind {
    pub fn from_note_type(note_type: NoteType) -> Self {
        match note_type {
            NoteType::Intention => PointKind::Intention,
            NoteType::Reflection => PointKind::Reflection,
            NoteType::Daily | NoteType::General => PointKind::General,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PointKind::Intention => "#D4A574",
            PointKind::Reflection => "#A274D4",
            PointKind::General => "#D47474",
            PointKind::Media => "#74D4A5",
        }
    }

    pub fn track(&self) -> Track {
        match self {
            PointKind::Media => Track::Media,
            _ => Track::Voice,
        }
    }
}

/// The row a data point was derived from. The capture/media distinction is
/// resolved exactly once, here; downstream code matches on the variant
/// instead of re-discriminating on field shapes.
#[derive(Debug, Clone)]
pub enum PointSource {
    Capture(Capture),
    Media(MediaItem),
}

/// One plottable event on the cycle wheel. Derived fresh on every query,
/// never cached or mutated.
///
/// `position` is a 0-24 decimal hour in single-cycle mode and a 0-1 radial
/// fraction in all-time mode; `wheel_point` applies the matching radius
/// rule.
#[derive(Debug, Clone)]
pub struct DataPoint {
    pub id: String,
    pub kind: PointKind,
    pub cycle_day: i64,
    pub position: f64,
    pub color: &'static str,
    pub source: PointSource,
}

impl DataPoint {
    pub fn wheel_point(
        &self,
        cycle_length: i64,
        geometry: &WheelGeometry,
        mode: WheelMode,
    ) -> Result<WheelPoint> {
        polar_position(
            self.cycle_day,
            self.position,
            cycle_length,
            geometry,
            self.kind.track(),
            mode,
        )
    }
}

/// Data points for one cycle's wheel.
///
/// Days are counted from the viewed period's own start date; points landing
/// outside `1..=cycle_length` (media filed against neighboring cycles) are
/// dropped rather than drawn into the wrong wedge. Positions are the
/// event's clock time in decimal hours.
pub fn single_cycle_points(
    period: &CyclePeriod,
    all_periods: &[CyclePeriod],
    captures: &[Capture],
    media: &[MediaItem],
) -> Vec<DataPoint> {
    let cycle_length = cycle_length_days(period, all_periods);
    let mut points = Vec::with_capacity(captures.len() + media.len());

    for capture in captures {
        let cycle_day = day_offset(period.start_date, capture.log_date);
        if cycle_day < 1 || cycle_day > cycle_length {
            debug!(
                "capture {} on {} falls outside cycle starting {}, skipping",
                capture.id, capture.log_date, period.start_date
            );
            continue;
        }
        let kind = PointKind::from_note_type(capture.note_type);
        points.push(DataPoint {
            id: capture.id.clone(),
            kind,
            cycle_day,
            position: time_of_day_hours(capture.created_at),
            color: kind.color(),
            source: PointSource::Capture(capture.clone()),
        });
    }

    for item in media {
        let cycle_day = day_offset(period.start_date, item.effective_date());
        if cycle_day < 1 || cycle_day > cycle_length {
            debug!(
                "media {} on {} falls outside cycle starting {}, skipping",
                item.id,
                item.effective_date(),
                period.start_date
            );
            continue;
        }
        points.push(DataPoint {
            id: item.id.clone(),
            kind: PointKind::Media,
            cycle_day,
            position: time_of_day_hours(item.created_at),
            color: PointKind::Media.color(),
            source: PointSource::Media(item.clone()),
        });
    }

    points
}

/// Data points for the all-time wheel: every event across every cycle on
/// one continuum.
///
/// `periods` must be sorted most recent first. Events whose date resolves
/// to no known period are excluded (they predate the logged history);
/// positions are radial fractions between the earliest and latest event
/// dates. The result is sorted ascending by the date each point was
/// positioned with, outer ring first.
pub fn all_time_points(
    periods: &[CyclePeriod],
    captures: &[Capture],
    media: &[MediaItem],
) -> Vec<DataPoint> {
    let all_dates: Vec<NaiveDate> = captures
        .iter()
        .map(|c| c.log_date)
        .chain(media.iter().map(|m| m.effective_date()))
        .collect();

    let (Some(&earliest), Some(&latest)) =
        (all_dates.iter().min(), all_dates.iter().max())
    else {
        return Vec::new();
    };

    let mut dated: Vec<(NaiveDate, DataPoint)> =
        Vec::with_capacity(captures.len() + media.len());

    for capture in captures {
        let Some(resolved) = resolve_cycle_day(periods, capture.log_date) else {
            debug!(
                "capture {} on {} belongs to no known cycle, skipping",
                capture.id, capture.log_date
            );
            continue;
        };
        let kind = PointKind::from_note_type(capture.note_type);
        dated.push((
            capture.log_date,
            DataPoint {
                id: capture.id.clone(),
                kind,
                cycle_day: resolved.cycle_day,
                position: radial_fraction(capture.log_date, earliest, latest),
                color: kind.color(),
                source: PointSource::Capture(capture.clone()),
            },
        ));
    }

    for item in media {
        let date = item.effective_date();
        let Some(resolved) = resolve_cycle_day(periods, date) else {
            debug!(
                "media {} on {} belongs to no known cycle, skipping",
                item.id, date
            );
            continue;
        };
        dated.push((
            date,
            DataPoint {
                id: item.id.clone(),
                kind: PointKind::Media,
                cycle_day: resolved.cycle_day,
                position: radial_fraction(date, earliest, latest),
                color: PointKind::Media.color(),
                source: PointSource::Media(item.clone()),
            },
        ));
    }

    dated.sort_by_key(|(date, _)| *date);
    dated.into_iter().map(|(_, point)| point).collect()
}

fn day_offset(cycle_start: NaiveDate, event_date: NaiveDate) -> i64 {
    (event_date - cycle_start).num_days() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn period(id: &str, start: &str, end: Option<&str>) -> CyclePeriod {
        CyclePeriod {
            id: id.to_string(),
            owner_id: "owner-1".to_string(),
            start_date: start.parse().unwrap(),
            end_date: end.map(|e| e.parse().unwrap()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn capture(id: &str, note_type: NoteType, log_date: &str, created_at: DateTime<Utc>) -> Capture {
        Capture {
            id: id.to_string(),
            owner_id: "owner-1".to_string(),
            note_type,
            transcription: None,
            file_url: None,
            log_date: log_date.parse().unwrap(),
            linked_activity_ids: Vec::new(),
            created_at,
        }
    }

    fn media(
        id: &str,
        original_date: Option<&str>,
        log_date: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            owner_id: "owner-1".to_string(),
            file_url: format!("https://example.test/{id}.jpg"),
            file_type: crate::models::FileType::Image,
            caption: None,
            original_date: original_date.map(|d| d.parse().unwrap()),
            log_date: log_date.map(|d| d.parse().unwrap()),
            created_at,
        }
    }

    fn at(date: &str, hour: u32, minute: u32) -> DateTime<Utc> {
        let d: NaiveDate = date.parse().unwrap();
        Utc.from_utc_datetime(&d.and_hms_opt(hour, minute, 0).unwrap())
    }

    #[test]
    fn single_cycle_positions_are_clock_hours() {
        let p = period("p1", "2024-01-01", Some("2024-01-29"));
        let captures = vec![capture(
            "c1",
            NoteType::Intention,
            "2024-01-03",
            at("2024-01-03", 14, 30),
        )];

        let points = single_cycle_points(&p, &[p.clone()], &captures, &[]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].cycle_day, 3);
        assert!((points[0].position - 14.5).abs() < 1e-9);
        assert_eq!(points[0].kind, PointKind::Intention);
        assert_eq!(points[0].color, "#D4A574");
    }

    #[test]
    fn single_cycle_drops_out_of_range_events() {
        let p = period("p1", "2024-02-01", Some("2024-02-29"));
        let media_items = vec![
            media("before", Some("2024-01-20"), None, at("2024-02-05", 9, 0)),
            media("inside", Some("2024-02-10"), None, at("2024-02-11", 9, 0)),
        ];

        let points = single_cycle_points(&p, &[p.clone()], &[], &media_items);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].id, "inside");
        assert_eq!(points[0].cycle_day, 10);
    }

    #[test]
    fn media_cycle_day_follows_date_priority() {
        // original_date wins over log_date and created_at.
        let periods = vec![period("p1", "2024-03-01", None)];
        let item = media(
            "m1",
            Some("2024-03-01"),
            Some("2024-03-05"),
            at("2024-03-10", 12, 0),
        );

        let points = all_time_points(&periods, &[], &[item]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].cycle_day, 1);
    }

    #[test]
    fn all_time_fraction_spans_event_range() {
        let periods = vec![period("p1", "2024-01-01", None)];
        let captures = vec![
            capture("first", NoteType::General, "2024-01-01", at("2024-01-01", 8, 0)),
            capture("mid", NoteType::General, "2024-01-11", at("2024-01-11", 8, 0)),
            capture("last", NoteType::General, "2024-01-21", at("2024-01-21", 8, 0)),
        ];

        let points = all_time_points(&periods, &captures, &[]);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].position, 0.0);
        assert!((points[1].position - 0.5).abs() < 1e-9);
        assert_eq!(points[2].position, 1.0);
        // Sorted ascending by date: earliest (outer ring) first.
        assert_eq!(points[0].id, "first");
        assert_eq!(points[2].id, "last");
    }

    #[test]
    fn all_time_excludes_events_before_history() {
        let periods = vec![period("p1", "2024-02-01", None)];
        let captures = vec![
            capture("orphan", NoteType::General, "2024-01-15", at("2024-01-15", 8, 0)),
            capture("kept", NoteType::General, "2024-02-10", at("2024-02-10", 8, 0)),
        ];

        let points = all_time_points(&periods, &captures, &[]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].id, "kept");
    }

    #[test]
    fn all_time_empty_input_yields_no_points() {
        let periods = vec![period("p1", "2024-01-01", None)];
        assert!(all_time_points(&periods, &[], &[]).is_empty());
    }

    #[test]
    fn single_day_of_data_pins_fraction_to_middle() {
        let periods = vec![period("p1", "2024-01-01", None)];
        let captures = vec![capture(
            "only",
            NoteType::General,
            "2024-01-05",
            at("2024-01-05", 8, 0),
        )];

        let points = all_time_points(&periods, &captures, &[]);
        assert_eq!(points[0].position, 0.5);
    }

    #[test]
    fn wheel_point_uses_kind_track() {
        let g = WheelGeometry::default();
        let p = period("p1", "2024-01-01", Some("2024-01-29"));
        let rows = vec![capture(
            "c1",
            NoteType::General,
            "2024-01-02",
            at("2024-01-02", 12, 0),
        )];
        let items = vec![media("m1", Some("2024-01-02"), None, at("2024-01-02", 12, 0))];

        let points = single_cycle_points(&p, &[p.clone()], &rows, &items);
        let voice = points[0]
            .wheel_point(28, &g, WheelMode::SingleCycle)
            .unwrap();
        let media_pt = points[1]
            .wheel_point(28, &g, WheelMode::SingleCycle)
            .unwrap();
        assert!((voice.x - media_pt.x).abs() > 1e-6 || (voice.y - media_pt.y).abs() > 1e-6);
    }
}
