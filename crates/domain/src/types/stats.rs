//! Derived planning statistics
//!
//! [`DailyStats`] is recomputed on every query and never persisted; it feeds
//! the calendar load badges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Load classification of a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayLoadStatus {
    Ok,
    Warning,
    Overload,
}

impl_domain_status_conversions!(DayLoadStatus {
    Ok => "ok",
    Warning => "warning",
    Overload => "overload",
});

impl DayLoadStatus {
    /// Classify a day from planned hours against capacity and tolerance.
    ///
    /// `Ok` while `planned <= capacity`, `Warning` inside the tolerance band,
    /// `Overload` beyond it. Non-decreasing in `planned` for fixed capacity
    /// and tolerance.
    pub fn classify(planned_hours: f64, capacity_hours: f64, tolerance_hours: f64) -> Self {
        if planned_hours > capacity_hours + tolerance_hours {
            Self::Overload
        } else if planned_hours > capacity_hours {
            Self::Warning
        } else {
            Self::Ok
        }
    }
}

/// Capacity of a single day: total labor-hours plus head count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayCapacity {
    /// Sum of daily contributions of all present employees
    pub hours: f64,
    /// Employees with a non-zero contribution that day
    pub present_employees: u32,
}

impl DayCapacity {
    /// An empty day (no roster, or everyone absent).
    pub const ZERO: Self = Self { hours: 0.0, present_employees: 0 };
}

/// Planning statistics for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub capacity_hours: f64,
    pub planned_hours: f64,
    /// Hours of allowed overage before `Overload`
    pub tolerance: f64,
    pub present_employees: u32,
    pub status: DayLoadStatus,
}
