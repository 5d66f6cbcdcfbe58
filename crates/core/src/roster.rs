//! Roster service - employee and absence write surface

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use vitraplan_domain::constants::{DEFAULT_EMPLOYEE_COLOR, DEFAULT_WEEKLY_HOURS};
use vitraplan_domain::{
    Absence, AbsenceDraft, BusinessContext, Employee, EmployeeDraft, EmployeeUpdate, Result,
    VitraError,
};

use crate::ports::{AbsenceRepository, EmployeeRepository};

/// Admin write surface over the roster: employees and their absences.
pub struct RosterService {
    employees: Arc<dyn EmployeeRepository>,
    absences: Arc<dyn AbsenceRepository>,
}

impl RosterService {
    /// Create a new roster service.
    pub fn new(employees: Arc<dyn EmployeeRepository>, absences: Arc<dyn AbsenceRepository>) -> Self {
        Self { employees, absences }
    }

    /// Record an approved absence.
    ///
    /// The referenced employee must exist, the day range must be ordered, and
    /// the range must not overlap an existing absence of the same employee -
    /// an employee is either present or absent on a day, never both twice.
    pub async fn create_absence(
        &self,
        ctx: &BusinessContext,
        draft: AbsenceDraft,
    ) -> Result<Absence> {
        ctx.require_admin()?;

        if draft.end_date < draft.start_date {
            return Err(VitraError::Validation(format!(
                "Absence ends {} before it starts {}",
                draft.end_date, draft.start_date
            )));
        }

        let employee = self
            .employees
            .find_employee(draft.employee_id)
            .await?
            .ok_or_else(|| VitraError::NotFound(format!("Employee {}", draft.employee_id)))?;

        let existing = self.absences.absences_for_employee(employee.id).await?;
        if existing.iter().any(|absence| absence.overlaps(draft.start_date, draft.end_date)) {
            return Err(VitraError::Validation(format!(
                "Absence {} - {} overlaps an existing absence",
                draft.start_date, draft.end_date
            )));
        }

        let absence = Absence {
            id: Uuid::new_v4(),
            employee_id: draft.employee_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            reason: draft.reason,
        };
        self.absences.create_absence(absence.clone()).await?;

        info!(employee_id = %absence.employee_id, start = %absence.start_date, end = %absence.end_date, "created absence");
        Ok(absence)
    }

    /// Create an employee account.
    pub async fn create_employee(
        &self,
        ctx: &BusinessContext,
        draft: EmployeeDraft,
    ) -> Result<Employee> {
        ctx.require_admin()?;

        if draft.email.trim().is_empty() {
            return Err(VitraError::Validation("Employee email is required".to_string()));
        }
        let weekly_hours = draft.weekly_hours.unwrap_or(DEFAULT_WEEKLY_HOURS);
        validate_weekly_hours(weekly_hours)?;

        let employee = Employee {
            id: Uuid::new_v4(),
            email: draft.email,
            full_name: draft.full_name,
            color: draft.color.unwrap_or_else(|| DEFAULT_EMPLOYEE_COLOR.to_string()),
            role: draft.role,
            weekly_hours,
        };
        self.employees.create_employee(employee.clone()).await?;

        info!(employee_id = %employee.id, "created employee");
        Ok(employee)
    }

    /// Apply an admin edit (hours, role, color, name) to an employee.
    pub async fn update_employee(
        &self,
        ctx: &BusinessContext,
        id: Uuid,
        update: EmployeeUpdate,
    ) -> Result<Employee> {
        ctx.require_admin()?;

        if let Some(weekly_hours) = update.weekly_hours {
            validate_weekly_hours(weekly_hours)?;
        }

        let employee = self.employees.update_employee(id, update).await?;
        info!(employee_id = %employee.id, "updated employee");
        Ok(employee)
    }
}

fn validate_weekly_hours(weekly_hours: f64) -> Result<()> {
    if !weekly_hours.is_finite() || weekly_hours < 0.0 {
        return Err(VitraError::Validation(format!(
            "Weekly hours must be a finite number >= 0, got {weekly_hours}"
        )));
    }
    Ok(())
}
