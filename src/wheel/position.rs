use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, Timelike, Utc};

use crate::wheel::geometry::WheelGeometry;

/// Which of the two tracks inside a day's angular slice a point sits on.
/// Voice-type events render at 1/3 of the slice width, media at 2/3, so the
/// two families stay visually separate within the same day wedge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Voice,
    Media,
}

/// Radius rule for a point's `position` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelMode {
    /// `position` is a 0-24 decimal hour: midnight at the inner radius,
    /// the following midnight at the outer radius.
    SingleCycle,
    /// `position` is a 0-1 radial fraction across all known events,
    /// inverted: 0 (earliest) at the outer radius, 1 (latest) at the inner.
    AllTime,
}

/// A point in the wheel's cartesian coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelPoint {
    pub x: f64,
    pub y: f64,
}

/// Clock time of a timestamp as decimal hours, e.g. 14:30 -> 14.5.
pub fn time_of_day_hours(timestamp: DateTime<Utc>) -> f64 {
    f64::from(timestamp.hour()) + f64::from(timestamp.minute()) / 60.0
}

/// Normalized position of `date` on the all-time continuum between the
/// earliest and latest known event dates. A single day of data has no span,
/// so the fraction pins to the middle instead of dividing by zero.
pub fn radial_fraction(date: NaiveDate, earliest: NaiveDate, latest: NaiveDate) -> f64 {
    let span = (latest - earliest).num_days();
    if span == 0 {
        return 0.5;
    }
    (date - earliest).num_days() as f64 / span as f64
}

/// Map a (cycle day, position) pair to wheel coordinates.
///
/// Day 1 starts at the 12-o'clock position and days progress clockwise;
/// `track` picks the sub-offset within the day's slice and `mode` picks the
/// radius rule for `position`. Output coordinates are always finite.
pub fn polar_position(
    cycle_day: i64,
    position: f64,
    cycle_length: i64,
    geometry: &WheelGeometry,
    track: Track,
    mode: WheelMode,
) -> Result<WheelPoint> {
    if cycle_length < 1 {
        bail!("cycle length must be >= 1, got {cycle_length}");
    }
    if cycle_day < 1 {
        bail!("cycle day must be >= 1, got {cycle_day}");
    }

    let angle_per_day = std::f64::consts::TAU / cycle_length as f64;
    let base_angle = (cycle_day - 1) as f64 * angle_per_day - std::f64::consts::FRAC_PI_2;
    let track_offset = match track {
        Track::Voice => angle_per_day / 3.0,
        Track::Media => angle_per_day * 2.0 / 3.0,
    };
    let angle = base_angle + track_offset;

    let radius = match mode {
        WheelMode::SingleCycle => {
            geometry.inner_radius + (position / 24.0) * geometry.radius_range()
        }
        WheelMode::AllTime => geometry.outer_radius - position * geometry.radius_range(),
    };

    Ok(WheelPoint {
        x: geometry.center_x + radius * angle.cos(),
        y: geometry.center_y + radius * angle.sin(),
    })
}
