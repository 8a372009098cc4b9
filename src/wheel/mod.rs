pub mod geometry;
pub mod points;
pub mod position;

pub use geometry::WheelGeometry;
pub use points::{all_time_points, single_cycle_points, DataPoint, PointKind, PointSource};
pub use position::{
    polar_position, radial_fraction, time_of_day_hours, Track, WheelMode, WheelPoint,
};
