//! Capacity model - available labor-hours per day
//!
//! Each employee contributes `weekly_hours / 7` on a day unless an approved
//! absence covers it. Evaluation is independent per date; nothing carries
//! over between days.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use vitraplan_domain::dates::date_range_inclusive;
use vitraplan_domain::{Absence, DayCapacity, Employee, Result};

/// Available labor for a single day.
///
/// An employee with an absence covering `date` contributes nothing and is not
/// counted present; overlapping absences for one employee still zero the
/// contribution exactly once. Employees with zero contracted hours are never
/// counted present.
pub fn capacity_for_date(
    date: NaiveDate,
    employees: &[Employee],
    absences: &[Absence],
) -> DayCapacity {
    let mut capacity = DayCapacity::ZERO;

    for employee in employees {
        if employee.weekly_hours <= 0.0 {
            continue;
        }
        let absent =
            absences.iter().any(|absence| absence.employee_id == employee.id && absence.covers(date));
        if absent {
            continue;
        }

        capacity.hours += employee.daily_capacity();
        capacity.present_employees += 1;
    }

    capacity
}

/// Available labor for every day of the inclusive `[start, end]` range,
/// evaluated independently per date.
///
/// # Errors
/// Returns `VitraError::Validation` when `end < start`.
pub fn capacity_for_range(
    start: NaiveDate,
    end: NaiveDate,
    employees: &[Employee],
    absences: &[Absence],
) -> Result<BTreeMap<NaiveDate, DayCapacity>> {
    Ok(date_range_inclusive(start, end)?
        .into_iter()
        .map(|date| (date, capacity_for_date(date, employees, absences)))
        .collect())
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use vitraplan_domain::Role;

    use super::*;

    fn employee(weekly_hours: f64) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            email: format!("{}@example.com", Uuid::new_v4()),
            full_name: None,
            color: "#3B82F6".to_string(),
            role: Role::Employee,
            weekly_hours,
        }
    }

    fn absence_for(employee_id: Uuid, start: &str, end: &str) -> Absence {
        Absence {
            id: Uuid::new_v4(),
            employee_id,
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
            reason: Some("Maladie".to_string()),
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn two_employee_roster() {
        // 35/7 + 40/7 = 10.714... hours, both present
        let roster = vec![employee(35.0), employee(40.0)];
        let capacity = capacity_for_date(date("2024-06-10"), &roster, &[]);

        assert!((capacity.hours - (35.0 / 7.0 + 40.0 / 7.0)).abs() < 1e-9);
        assert_eq!(capacity.present_employees, 2);
    }

    #[test]
    fn capacity_is_additive_over_disjoint_rosters() {
        let group_a = vec![employee(35.0), employee(20.0)];
        let group_b = vec![employee(40.0)];
        let both: Vec<Employee> = group_a.iter().chain(group_b.iter()).cloned().collect();

        let day = date("2024-06-10");
        let split = capacity_for_date(day, &group_a, &[]).hours
            + capacity_for_date(day, &group_b, &[]).hours;
        let merged = capacity_for_date(day, &both, &[]).hours;

        assert!((split - merged).abs() < 1e-9);
    }

    #[test]
    fn absence_zeroes_contribution_and_presence() {
        let absent = employee(38.0);
        let working = employee(35.0);
        let absences = vec![absence_for(absent.id, "2024-06-10", "2024-06-12")];

        let capacity = capacity_for_date(date("2024-06-11"), &[absent, working], &absences);

        assert!((capacity.hours - 5.0).abs() < 1e-9);
        assert_eq!(capacity.present_employees, 1);
    }

    #[test]
    fn overlapping_absences_subtract_once() {
        let person = employee(35.0);
        let other = employee(35.0);
        let absences = vec![
            absence_for(person.id, "2024-06-10", "2024-06-12"),
            absence_for(person.id, "2024-06-11", "2024-06-15"),
        ];

        let capacity = capacity_for_date(date("2024-06-11"), &[person, other], &absences);

        // Never "negatively present": the other employee's 5h remain intact
        assert!((capacity.hours - 5.0).abs() < 1e-9);
        assert_eq!(capacity.present_employees, 1);
    }

    #[test]
    fn zero_hour_contract_is_not_present() {
        let disabled = employee(0.0);
        let capacity = capacity_for_date(date("2024-06-10"), &[disabled], &[]);

        assert_eq!(capacity.hours, 0.0);
        assert_eq!(capacity.present_employees, 0);
    }

    #[test]
    fn range_is_evaluated_per_date() {
        let person = employee(35.0);
        let absences = vec![absence_for(person.id, "2024-06-11", "2024-06-11")];

        let by_date =
            capacity_for_range(date("2024-06-10"), date("2024-06-12"), &[person], &absences)
                .unwrap();

        assert_eq!(by_date.len(), 3);
        assert!((by_date[&date("2024-06-10")].hours - 5.0).abs() < 1e-9);
        assert_eq!(by_date[&date("2024-06-11")].hours, 0.0);
        assert!((by_date[&date("2024-06-12")].hours - 5.0).abs() < 1e-9);
    }
}
