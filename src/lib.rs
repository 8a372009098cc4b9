//! Cycle-and-timeline aggregation engine for a personal life-logging app.
//!
//! The engine is pure and stateless: every entry point is a deterministic
//! function over an already-fetched, single-owner snapshot of cycle periods,
//! voice captures, media items, and activity sessions. It assigns events to
//! cycles ([`cycle`]), classifies cycle days into phases, maps events onto
//! the cycle wheel ([`wheel`]), and merges the three event streams into
//! per-day timelines ([`timeline`]). The [`db`] module is the local SQLite
//! store that supplies those snapshots.

pub mod cycle;
pub mod db;
pub mod models;
pub mod timeline;
pub mod wheel;

pub use cycle::{
    all_time_wheel_length, cycle_length_days, phase_for_day, resolve_cycle_day, CyclePhase,
    ResolvedDay, DEFAULT_CYCLE_LENGTH_DAYS,
};
pub use db::Database;
pub use models::cycle_period::sort_most_recent_first;
pub use models::{
    ActivitySession, ActivityStatus, Capture, CyclePeriod, FileType, MediaItem, NoteType,
};
pub use timeline::{build_day_timeline, DaySnapshot, DayTimeline, TimelineItem};
pub use wheel::{
    all_time_points, polar_position, single_cycle_points, DataPoint, PointKind, PointSource,
    Track, WheelGeometry, WheelMode, WheelPoint,
};
