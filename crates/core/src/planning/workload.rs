//! Workload aggregator - planned labor-hours per day
//!
//! An intervention belongs to the business-local calendar day its
//! `start_time` falls on; it is never split across midnight even when the
//! window spans two days. Durations are the planned `end - start`, whatever
//! the status; real start/end times are display-only and never enter load
//! math.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use vitraplan_domain::dates::{date_range_inclusive, local_date_of};
use vitraplan_domain::{Intervention, Result};

/// Planned hours bucketed to a single day.
pub fn planned_hours_for_date(date: NaiveDate, interventions: &[Intervention], tz: Tz) -> f64 {
    interventions
        .iter()
        .filter(|intervention| local_date_of(intervention.start_time, tz) == date)
        .map(Intervention::planned_duration_hours)
        .sum()
}

/// Planned hours for every day of the inclusive `[start, end]` range, with
/// the same start-time bucketing applied per date.
///
/// # Errors
/// Returns `VitraError::Validation` when `end < start`.
pub fn planned_hours_for_range(
    start: NaiveDate,
    end: NaiveDate,
    interventions: &[Intervention],
    tz: Tz,
) -> Result<BTreeMap<NaiveDate, f64>> {
    Ok(date_range_inclusive(start, end)?
        .into_iter()
        .map(|date| (date, planned_hours_for_date(date, interventions, tz)))
        .collect())
}
