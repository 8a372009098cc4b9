pub mod length;
pub mod phase;
pub mod resolver;

pub use length::{all_time_wheel_length, cycle_length_days, DEFAULT_CYCLE_LENGTH_DAYS};
pub use phase::{phase_for_day, CyclePhase};
pub use resolver::{resolve_cycle_day, ResolvedDay};
