//! Shared fixtures for core integration tests

pub mod repositories;

use chrono::{DateTime, Utc};
use chrono_tz::Europe::Brussels;
use uuid::Uuid;
use vitraplan_domain::dates::{local_to_instant, parse_local_date_time};
use vitraplan_domain::{
    Absence, BusinessContext, Employee, Intervention, InterventionStatus, RawCalendarEvent,
    RawEventStatus, Role,
};

/// Admin context in the Brussels business timezone.
pub fn admin_ctx(tolerance_hours: f64) -> BusinessContext {
    BusinessContext::new(Brussels, tolerance_hours, Role::Admin)
}

/// Non-admin context in the Brussels business timezone.
pub fn employee_ctx() -> BusinessContext {
    BusinessContext::new(Brussels, 3.0, Role::Employee)
}

/// Instant for a Brussels-local `"YYYY-MM-DD HH:MM"` string.
pub fn brussels(local: &str) -> DateTime<Utc> {
    let naive = parse_local_date_time(local).unwrap();
    local_to_instant(naive.date(), naive.time(), Brussels).unwrap()
}

pub fn employee(weekly_hours: f64) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        email: format!("{}@example.com", Uuid::new_v4()),
        full_name: Some("Test Employee".to_string()),
        color: "#3B82F6".to_string(),
        role: Role::Employee,
        weekly_hours,
    }
}

pub fn absence(employee_id: Uuid, start: &str, end: &str) -> Absence {
    Absence {
        id: Uuid::new_v4(),
        employee_id,
        start_date: start.parse().unwrap(),
        end_date: end.parse().unwrap(),
        reason: Some("Congé".to_string()),
    }
}

/// Planned intervention over a Brussels-local window.
pub fn intervention(start_local: &str, end_local: &str) -> Intervention {
    Intervention {
        id: Uuid::new_v4(),
        title: "Vitres".to_string(),
        description: None,
        start_time: brussels(start_local),
        end_time: brussels(end_local),
        status: InterventionStatus::Planned,
        price_estimated: None,
        is_invoice: false,
        real_start_time: None,
        real_end_time: None,
        client_id: None,
        employee_ids: vec![],
        items: vec![],
    }
}

/// Raw imported event over a Brussels-local window.
pub fn raw_event(summary: &str, start_local: &str, end_local: &str) -> RawCalendarEvent {
    RawCalendarEvent {
        id: Uuid::new_v4(),
        source: "google".to_string(),
        external_id: format!("ext-{}", Uuid::new_v4()),
        calendar_id: Some("primary".to_string()),
        summary: summary.to_string(),
        description: None,
        location: None,
        start_time: brussels(start_local),
        end_time: brussels(end_local),
        all_day: false,
        status: RawEventStatus::Raw,
        assigned_employee_ids: vec![],
        linked_intervention_id: None,
    }
}
