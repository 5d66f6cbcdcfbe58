//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

/// IANA name of the business timezone. All calendar-day bucketing happens in
/// this zone regardless of device locale.
pub const BUSINESS_TIMEZONE: &str = "Europe/Brussels";

/// Days in a contract week; daily capacity is `weekly_hours / DAYS_PER_WEEK`.
pub const DAYS_PER_WEEK: f64 = 7.0;

/// Hours of permitted overbooking before a day is flagged overload, used when
/// no tolerance is configured.
pub const DEFAULT_OVERTIME_TOLERANCE_HOURS: f64 = 3.0;

/// Contracted hours assigned to a new employee when none are provided.
pub const DEFAULT_WEEKLY_HOURS: f64 = 38.0;

/// Display color assigned to a new employee when none is provided.
pub const DEFAULT_EMPLOYEE_COLOR: &str = "#3B82F6";
