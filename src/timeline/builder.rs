use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{ActivitySession, Capture, MediaItem, NoteType};

/// Already-fetched rows for a single day, handed to the builder as one
/// consistent snapshot. The builder never re-fetches or re-validates.
#[derive(Debug, Clone)]
pub struct DaySnapshot {
    pub date: NaiveDate,
    pub activities: Vec<ActivitySession>,
    pub captures: Vec<Capture>,
    pub media: Vec<MediaItem>,
}

/// One merged, chronologically-placed entry in a day's narrative.
#[derive(Debug, Clone)]
pub enum TimelineItem {
    Activity {
        session: ActivitySession,
        linked_captures: Vec<Capture>,
    },
    Capture {
        capture: Capture,
    },
    Media {
        media: MediaItem,
    },
}

impl TimelineItem {
    /// Timestamp used solely for sort order: an activity sorts by its start
    /// time, captures and media by their creation time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            TimelineItem::Activity { session, .. } => session.start_time,
            TimelineItem::Capture { capture } => capture.created_at,
            TimelineItem::Media { media } => media.created_at,
        }
    }
}

/// A day's narrative. The intention and reflection render in their own
/// slots above and below the chronological list, so they come back
/// separately rather than as timeline items.
#[derive(Debug, Clone)]
pub struct DayTimeline {
    pub date: NaiveDate,
    pub intention: Option<Capture>,
    pub reflection: Option<Capture>,
    pub items: Vec<TimelineItem>,
}

/// Merge a day's activity sessions, captures, and media into one
/// chronologically ascending timeline.
///
/// The earliest intention-typed capture becomes the day's intention, the
/// earliest reflection-typed capture the reflection; every other capture is
/// a daily capture. Each activity session carries the daily captures whose
/// link set names it — a capture linked to several sessions appears under
/// each of them (accepted fan-out, not deduplicated). Daily captures with an
/// empty link set become standalone items. Media items sort by their upload
/// time, which is deliberately distinct from the date priority used for
/// cycle assignment.
pub fn build_day_timeline(snapshot: &DaySnapshot) -> DayTimeline {
    let intention = earliest_of_type(&snapshot.captures, NoteType::Intention);
    let reflection = earliest_of_type(&snapshot.captures, NoteType::Reflection);

    let daily: Vec<&Capture> = snapshot
        .captures
        .iter()
        .filter(|c| {
            intention.map_or(true, |i| i.id != c.id)
                && reflection.map_or(true, |r| r.id != c.id)
        })
        .collect();

    let mut items: Vec<TimelineItem> = Vec::new();

    let mut activities: Vec<&ActivitySession> = snapshot.activities.iter().collect();
    activities.sort_by_key(|s| s.start_time);
    for session in activities {
        let linked_captures: Vec<Capture> = daily
            .iter()
            .filter(|c| c.linked_activity_ids.iter().any(|id| id == &session.id))
            .map(|c| (*c).clone())
            .collect();
        items.push(TimelineItem::Activity {
            session: session.clone(),
            linked_captures,
        });
    }

    for capture in &daily {
        if !capture.is_linked() {
            items.push(TimelineItem::Capture {
                capture: (*capture).clone(),
            });
        }
    }

    for media in &snapshot.media {
        items.push(TimelineItem::Media {
            media: media.clone(),
        });
    }

    // Stable, so same-timestamp items keep the activity -> capture -> media
    // emission order.
    items.sort_by_key(|item| item.timestamp());

    DayTimeline {
        date: snapshot.date,
        intention: intention.cloned(),
        reflection: reflection.cloned(),
        items,
    }
}

fn earliest_of_type(captures: &[Capture], note_type: NoteType) -> Option<&Capture> {
    captures
        .iter()
        .filter(|c| c.note_type == note_type)
        .min_by_key(|c| c.created_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityStatus, FileType};
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, hour, minute, 0).unwrap()
    }

    fn day() -> NaiveDate {
        "2024-03-15".parse().unwrap()
    }

    fn capture(id: &str, note_type: NoteType, created_at: DateTime<Utc>, links: &[&str]) -> Capture {
        Capture {
            id: id.to_string(),
            owner_id: "owner-1".to_string(),
            note_type,
            transcription: Some(format!("note {id}")),
            file_url: None,
            log_date: day(),
            linked_activity_ids: links.iter().map(|s| s.to_string()).collect(),
            created_at,
        }
    }

    fn activity(id: &str, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> ActivitySession {
        ActivitySession {
            id: id.to_string(),
            owner_id: "owner-1".to_string(),
            name: format!("activity {id}"),
            description: None,
            start_time: start,
            end_time: end,
            status: if end.is_some() {
                ActivityStatus::Completed
            } else {
                ActivityStatus::Active
            },
            log_date: day(),
            created_at: start,
            updated_at: end.unwrap_or(start),
        }
    }

    fn media(id: &str, created_at: DateTime<Utc>) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            owner_id: "owner-1".to_string(),
            file_url: format!("https://example.test/{id}.jpg"),
            file_type: FileType::Image,
            caption: None,
            original_date: Some(day()),
            log_date: None,
            created_at,
        }
    }

    #[test]
    fn orders_items_and_nests_linked_captures() {
        let snapshot = DaySnapshot {
            date: day(),
            activities: vec![activity("a1", at(9, 0), Some(at(10, 0)))],
            captures: vec![
                capture("unlinked", NoteType::Daily, at(8, 0), &[]),
                capture("linked", NoteType::Daily, at(9, 30), &["a1"]),
            ],
            media: vec![media("m1", at(11, 0))],
        };

        let timeline = build_day_timeline(&snapshot);
        assert_eq!(timeline.items.len(), 3);

        match &timeline.items[0] {
            TimelineItem::Capture { capture } => assert_eq!(capture.id, "unlinked"),
            other => panic!("expected standalone capture first, got {other:?}"),
        }
        match &timeline.items[1] {
            TimelineItem::Activity {
                session,
                linked_captures,
            } => {
                assert_eq!(session.id, "a1");
                assert_eq!(linked_captures.len(), 1);
                assert_eq!(linked_captures[0].id, "linked");
            }
            other => panic!("expected activity second, got {other:?}"),
        }
        match &timeline.items[2] {
            TimelineItem::Media { media } => assert_eq!(media.id, "m1"),
            other => panic!("expected media last, got {other:?}"),
        }
    }

    #[test]
    fn linked_captures_are_nested_not_top_level() {
        let snapshot = DaySnapshot {
            date: day(),
            activities: vec![activity("a1", at(9, 0), Some(at(10, 0)))],
            captures: vec![capture("linked", NoteType::Daily, at(9, 30), &["a1"])],
            media: vec![],
        };

        let timeline = build_day_timeline(&snapshot);
        assert_eq!(timeline.items.len(), 1);
        assert!(matches!(timeline.items[0], TimelineItem::Activity { .. }));
    }

    #[test]
    fn capture_linked_to_two_activities_fans_out() {
        let snapshot = DaySnapshot {
            date: day(),
            activities: vec![
                activity("a1", at(9, 0), Some(at(10, 0))),
                activity("a2", at(9, 15), None),
            ],
            captures: vec![capture("shared", NoteType::Daily, at(9, 30), &["a1", "a2"])],
            media: vec![],
        };

        let timeline = build_day_timeline(&snapshot);
        let nested: Vec<&str> = timeline
            .items
            .iter()
            .filter_map(|item| match item {
                TimelineItem::Activity {
                    linked_captures, ..
                } => Some(linked_captures.iter().map(|c| c.id.as_str())),
                _ => None,
            })
            .flatten()
            .collect();

        // Appears once per linking activity, never at top level.
        assert_eq!(nested, vec!["shared", "shared"]);
        assert_eq!(timeline.items.len(), 2);
    }

    #[test]
    fn picks_earliest_intention_and_reflection() {
        let snapshot = DaySnapshot {
            date: day(),
            activities: vec![],
            captures: vec![
                capture("late-intent", NoteType::Intention, at(10, 0), &[]),
                capture("early-intent", NoteType::Intention, at(7, 0), &[]),
                capture("reflect", NoteType::Reflection, at(21, 0), &[]),
            ],
            media: vec![],
        };

        let timeline = build_day_timeline(&snapshot);
        assert_eq!(timeline.intention.as_ref().unwrap().id, "early-intent");
        assert_eq!(timeline.reflection.as_ref().unwrap().id, "reflect");

        // The unchosen intention is an ordinary daily item.
        assert_eq!(timeline.items.len(), 1);
        match &timeline.items[0] {
            TimelineItem::Capture { capture } => assert_eq!(capture.id, "late-intent"),
            other => panic!("expected capture, got {other:?}"),
        }
    }

    #[test]
    fn empty_snapshot_builds_empty_timeline() {
        let snapshot = DaySnapshot {
            date: day(),
            activities: vec![],
            captures: vec![],
            media: vec![],
        };

        let timeline = build_day_timeline(&snapshot);
        assert!(timeline.intention.is_none());
        assert!(timeline.reflection.is_none());
        assert!(timeline.items.is_empty());
    }

    #[test]
    fn activities_sort_by_start_time_even_if_given_unordered() {
        let snapshot = DaySnapshot {
            date: day(),
            activities: vec![
                activity("later", at(14, 0), None),
                activity("earlier", at(9, 0), Some(at(10, 0))),
            ],
            captures: vec![],
            media: vec![],
        };

        let timeline = build_day_timeline(&snapshot);
        let ids: Vec<&str> = timeline
            .items
            .iter()
            .filter_map(|item| match item {
                TimelineItem::Activity { session, .. } => Some(session.id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec!["earlier", "later"]);
    }
}
