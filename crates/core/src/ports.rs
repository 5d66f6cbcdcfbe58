//! Port interfaces for the backing store and the identity collaborator
//!
//! The core never talks to the network or a database directly: every read and
//! write of roster and scheduling data goes through one of these traits.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;
use vitraplan_domain::{Absence, Employee, EmployeeUpdate, Intervention, Result};

/// Read/write access to the employee roster
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// List every employee, active or not.
    async fn list_employees(&self) -> Result<Vec<Employee>>;

    /// Look up a single employee.
    async fn find_employee(&self, id: Uuid) -> Result<Option<Employee>>;

    /// Persist a new employee.
    async fn create_employee(&self, employee: Employee) -> Result<()>;

    /// Apply a partial update and return the stored record.
    ///
    /// Implementations return `NotFound` when the employee does not exist.
    async fn update_employee(&self, id: Uuid, update: EmployeeUpdate) -> Result<Employee>;
}

/// Read/write access to approved absences
#[async_trait]
pub trait AbsenceRepository: Send + Sync {
    /// Absences sharing at least one day with the inclusive `[start, end]`
    /// range, across all employees.
    async fn absences_overlapping(&self, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<Absence>>;

    /// All absences of a single employee.
    async fn absences_for_employee(&self, employee_id: Uuid) -> Result<Vec<Absence>>;

    /// Persist a new absence.
    async fn create_absence(&self, absence: Absence) -> Result<()>;
}

/// Read/write access to scheduled interventions
#[async_trait]
pub trait InterventionRepository: Send + Sync {
    /// Interventions whose `start_time` falls in `[start, end)`.
    ///
    /// Day bucketing happens in the core; this window is only a prefilter.
    async fn interventions_starting_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Intervention>>;

    /// Look up a single intervention.
    async fn find_intervention(&self, id: Uuid) -> Result<Option<Intervention>>;

    /// Persist a new intervention.
    async fn create_intervention(&self, intervention: Intervention) -> Result<()>;

    /// Replace the stored record (status moves, real times, billing edits).
    async fn update_intervention(&self, intervention: Intervention) -> Result<()>;
}

/// Identity lookup owned by the authentication collaborator
///
/// Replaces the legacy "scan the full employee list by email" pattern: the
/// caller's profile comes from the token, in one place.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the authenticated caller's employee profile.
    async fn caller_profile(&self, token: &str) -> Result<Employee>;
}
