use chrono::NaiveDate;

use crate::models::CyclePeriod;

/// The period a date belongs to, with its 1-based day offset within that
/// period. Day 1 is the period's start date.
#[derive(Debug, Clone)]
pub struct ResolvedDay<'a> {
    pub period: &'a CyclePeriod,
    pub cycle_day: i64,
}

/// Find the period owning `date` and the day-within-cycle.
///
/// `periods` must be sorted descending by `start_date` (most recent first,
/// see [`crate::models::cycle_period::sort_most_recent_first`]); results are
/// undefined otherwise. A closed period claims `start_date <= date <
/// end_date` — the end date is exclusive, so the day a new period starts is
/// day 1 of the new period, not the last day of the old one. Returns `None`
/// for dates before the earliest logged period.
///
/// If overlapping closed periods both claim a date (a data-integrity
/// condition the engine cannot correct), the first match in the given order
/// wins, i.e. the most recent period.
pub fn resolve_cycle_day<'a>(
    periods: &'a [CyclePeriod],
    date: NaiveDate,
) -> Option<ResolvedDay<'a>> {
    for (i, period) in periods.iter().enumerate() {
        match period.end_date {
            Some(end) => {
                if date >= period.start_date && date < end {
                    return Some(ResolvedDay {
                        period,
                        cycle_day: day_within(period, date),
                    });
                }
            }
            None => {
                if date < period.start_date {
                    continue;
                }
                // An open period's start can be logged retroactively, behind
                // dates the previous closed period already claims. Those
                // dates stay with the closed period.
                if let Some(previous) = periods.get(i + 1) {
                    if let Some(previous_end) = previous.end_date {
                        if date < previous_end {
                            continue;
                        }
                    }
                }
                return Some(ResolvedDay {
                    period,
                    cycle_day: day_within(period, date),
                });
            }
        }
    }

    None
}

fn day_within(period: &CyclePeriod, date: NaiveDate) -> i64 {
    (date - period.start_date).num_days() + 1
}
