//! Roster types: employees and their approved absences

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DAYS_PER_WEEK;
use crate::impl_domain_status_conversions;

/// Role of an account on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl_domain_status_conversions!(Role {
    Admin => "admin",
    Employee => "employee",
});

/// An employee under a weekly-hours contract
///
/// Employees are created by an admin and never hard-deleted; accounts that
/// leave the company are disabled by setting `weekly_hours` to zero, which
/// removes them from capacity without losing history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    /// Display color for calendar badges, e.g. `#3B82F6`
    pub color: String,
    pub role: Role,
    /// Contracted hours per 7-day week; must be finite and `>= 0`
    pub weekly_hours: f64,
}

impl Employee {
    /// Capacity contribution of this employee for a single day.
    pub fn daily_capacity(&self) -> f64 {
        self.weekly_hours / DAYS_PER_WEEK
    }
}

/// Input for creating an employee account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    /// Defaults to [`crate::constants::DEFAULT_EMPLOYEE_COLOR`]
    #[serde(default)]
    pub color: Option<String>,
    pub role: Role,
    /// Defaults to [`crate::constants::DEFAULT_WEEKLY_HOURS`]
    #[serde(default)]
    pub weekly_hours: Option<f64>,
}

/// Partial update to an employee record (admin edit)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub weekly_hours: Option<f64>,
}

impl EmployeeUpdate {
    /// Apply the update in place.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(full_name) = &self.full_name {
            employee.full_name = Some(full_name.clone());
        }
        if let Some(color) = &self.color {
            employee.color = color.clone();
        }
        if let Some(role) = self.role {
            employee.role = role;
        }
        if let Some(weekly_hours) = self.weekly_hours {
            employee.weekly_hours = weekly_hours;
        }
    }
}

/// An approved absence over an inclusive range of business-local calendar days
///
/// The day bounds carry their natural time-of-day boundaries (start of day /
/// end of day in business-local time), so a one-day absence is
/// `start_date == end_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Absence {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Free text, e.g. "Maladie"
    #[serde(default)]
    pub reason: Option<String>,
}

impl Absence {
    /// Whether `date` falls inside the inclusive `[start_date, end_date]`
    /// interval.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether this absence shares at least one day with `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }
}

/// Input for creating an absence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsenceDraft {
    pub employee_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
}
