pub mod builder;

pub use builder::{build_day_timeline, DaySnapshot, DayTimeline, TimelineItem};
