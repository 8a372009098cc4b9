pub mod activity;
pub mod capture;
pub mod cycle_period;
pub mod media_item;

pub use activity::{ActivitySession, ActivityStatus};
pub use capture::{Capture, NoteType};
pub use cycle_period::CyclePeriod;
pub use media_item::{FileType, MediaItem};
