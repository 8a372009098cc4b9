use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Named biological stage, derived purely from the day-within-cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl CyclePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CyclePhase::Menstrual => "menstrual",
            CyclePhase::Follicular => "follicular",
            CyclePhase::Ovulation => "ovulation",
            CyclePhase::Luteal => "luteal",
        }
    }

    /// Overlay color for the phase segments on the cycle wheel.
    pub fn color(&self) -> &'static str {
        match self {
            CyclePhase::Menstrual => "#3b82f6",
            CyclePhase::Follicular => "#22c55e",
            CyclePhase::Ovulation => "#eab308",
            CyclePhase::Luteal => "#f97316",
        }
    }
}

/// Classify a 1-based cycle day into a phase.
///
/// Fixed ranges against a 28-day baseline: 1-5 menstrual, 6-13 follicular,
/// 14-15 ovulation, 16-28 luteal. Days past 28 extend the luteal phase, a
/// deliberate simplification for longer cycles. A day below 1 is a caller
/// error and fails rather than being coerced.
pub fn phase_for_day(cycle_day: i64) -> Result<CyclePhase> {
    if cycle_day < 1 {
        bail!("cycle day must be >= 1, got {cycle_day}");
    }

    Ok(match cycle_day {
        1..=5 => CyclePhase::Menstrual,
        6..=13 => CyclePhase::Follicular,
        14..=15 => CyclePhase::Ovulation,
        _ => CyclePhase::Luteal,
    })
}
