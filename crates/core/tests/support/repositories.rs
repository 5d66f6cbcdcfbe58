//! Mock repository implementations for testing
//!
//! In-memory mocks for all core ports, enabling deterministic tests without
//! a backend. The raw-event mock serializes its conditional writes behind a
//! mutex, the way the backend of record does, so race outcomes are faithful.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Europe::Brussels;
use uuid::Uuid;
use vitraplan_core::ports::{AbsenceRepository, EmployeeRepository, InterventionRepository};
use vitraplan_core::triage::ports::{ClientDirectory, EventParser, ParseInput, RawEventRepository};
use vitraplan_domain::dates::local_date_of;
use vitraplan_domain::{
    Absence, AiParsedEvent, Client, Employee, EmployeeUpdate, Intervention, RawCalendarEvent,
    RawEventStatus, Result as DomainResult, VitraError,
};

/// In-memory mock for `EmployeeRepository`.
#[derive(Default)]
pub struct MockEmployeeRepository {
    employees: Mutex<Vec<Employee>>,
}

impl MockEmployeeRepository {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees: Mutex::new(employees) }
    }
}

#[async_trait]
impl EmployeeRepository for MockEmployeeRepository {
    async fn list_employees(&self) -> DomainResult<Vec<Employee>> {
        Ok(self.employees.lock().unwrap().clone())
    }

    async fn find_employee(&self, id: Uuid) -> DomainResult<Option<Employee>> {
        Ok(self.employees.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn create_employee(&self, employee: Employee) -> DomainResult<()> {
        self.employees.lock().unwrap().push(employee);
        Ok(())
    }

    async fn update_employee(&self, id: Uuid, update: EmployeeUpdate) -> DomainResult<Employee> {
        let mut employees = self.employees.lock().unwrap();
        let employee = employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| VitraError::NotFound(format!("Employee {id}")))?;
        update.apply_to(employee);
        Ok(employee.clone())
    }
}

/// In-memory mock for `AbsenceRepository`.
#[derive(Default)]
pub struct MockAbsenceRepository {
    absences: Mutex<Vec<Absence>>,
}

impl MockAbsenceRepository {
    pub fn new(absences: Vec<Absence>) -> Self {
        Self { absences: Mutex::new(absences) }
    }
}

#[async_trait]
impl AbsenceRepository for MockAbsenceRepository {
    async fn absences_overlapping(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Absence>> {
        Ok(self
            .absences
            .lock()
            .unwrap()
            .iter()
            .filter(|absence| absence.overlaps(start, end))
            .cloned()
            .collect())
    }

    async fn absences_for_employee(&self, employee_id: Uuid) -> DomainResult<Vec<Absence>> {
        Ok(self
            .absences
            .lock()
            .unwrap()
            .iter()
            .filter(|absence| absence.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn create_absence(&self, absence: Absence) -> DomainResult<()> {
        self.absences.lock().unwrap().push(absence);
        Ok(())
    }
}

/// In-memory mock for `InterventionRepository`.
#[derive(Default)]
pub struct MockInterventionRepository {
    interventions: Mutex<Vec<Intervention>>,
}

impl MockInterventionRepository {
    pub fn new(interventions: Vec<Intervention>) -> Self {
        Self { interventions: Mutex::new(interventions) }
    }

    /// Everything created so far, for assertions.
    pub fn stored(&self) -> Vec<Intervention> {
        self.interventions.lock().unwrap().clone()
    }
}

#[async_trait]
impl InterventionRepository for MockInterventionRepository {
    async fn interventions_starting_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Intervention>> {
        Ok(self
            .interventions
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.start_time >= start && i.start_time < end)
            .cloned()
            .collect())
    }

    async fn find_intervention(&self, id: Uuid) -> DomainResult<Option<Intervention>> {
        Ok(self.interventions.lock().unwrap().iter().find(|i| i.id == id).cloned())
    }

    async fn create_intervention(&self, intervention: Intervention) -> DomainResult<()> {
        self.interventions.lock().unwrap().push(intervention);
        Ok(())
    }

    async fn update_intervention(&self, intervention: Intervention) -> DomainResult<()> {
        let mut interventions = self.interventions.lock().unwrap();
        let stored = interventions
            .iter_mut()
            .find(|i| i.id == intervention.id)
            .ok_or_else(|| VitraError::NotFound(format!("Intervention {}", intervention.id)))?;
        *stored = intervention;
        Ok(())
    }
}

/// In-memory mock for `RawEventRepository` with compare-and-swap writes.
#[derive(Default)]
pub struct MockRawEventRepository {
    events: Mutex<HashMap<Uuid, RawCalendarEvent>>,
}

impl MockRawEventRepository {
    pub fn new(events: Vec<RawCalendarEvent>) -> Self {
        Self { events: Mutex::new(events.into_iter().map(|e| (e.id, e)).collect()) }
    }

    /// Current stored state of one event, for assertions.
    pub fn stored(&self, id: Uuid) -> Option<RawCalendarEvent> {
        self.events.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl RawEventRepository for MockRawEventRepository {
    async fn find_event(&self, id: Uuid) -> DomainResult<Option<RawCalendarEvent>> {
        Ok(self.events.lock().unwrap().get(&id).cloned())
    }

    async fn events_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        statuses: &[RawEventStatus],
    ) -> DomainResult<Vec<RawCalendarEvent>> {
        let mut events: Vec<RawCalendarEvent> = self
            .events
            .lock()
            .unwrap()
            .values()
            .filter(|event| {
                let day = local_date_of(event.start_time, Brussels);
                start <= day && day <= end && statuses.contains(&event.status)
            })
            .cloned()
            .collect();
        events.sort_by_key(|event| event.start_time);
        Ok(events)
    }

    async fn set_assignment(
        &self,
        id: Uuid,
        expected: &[RawEventStatus],
        employee_ids: &[Uuid],
        next: RawEventStatus,
    ) -> DomainResult<RawCalendarEvent> {
        let mut events = self.events.lock().unwrap();
        let event =
            events.get_mut(&id).ok_or_else(|| VitraError::NotFound(format!("Raw event {id}")))?;

        if !expected.contains(&event.status) {
            return Err(VitraError::InvalidTransition(format!(
                "Event is {} (expected one of {expected:?})",
                event.status
            )));
        }

        event.assigned_employee_ids = employee_ids.to_vec();
        event.status = next;
        Ok(event.clone())
    }

    async fn mark_terminal(
        &self,
        id: Uuid,
        expected: &[RawEventStatus],
        next: RawEventStatus,
        linked_intervention_id: Option<Uuid>,
    ) -> DomainResult<RawCalendarEvent> {
        let mut events = self.events.lock().unwrap();
        let event =
            events.get_mut(&id).ok_or_else(|| VitraError::NotFound(format!("Raw event {id}")))?;

        if !expected.contains(&event.status) {
            return Err(VitraError::InvalidTransition(format!(
                "Event is {} (expected one of {expected:?})",
                event.status
            )));
        }

        event.status = next;
        event.linked_intervention_id = linked_intervention_id;
        Ok(event.clone())
    }
}

/// In-memory mock for `ClientDirectory`.
#[derive(Default)]
pub struct MockClientDirectory {
    clients: Mutex<Vec<Client>>,
}

impl MockClientDirectory {
    pub fn new(clients: Vec<Client>) -> Self {
        Self { clients: Mutex::new(clients) }
    }

    pub fn stored(&self) -> Vec<Client> {
        self.clients.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClientDirectory for MockClientDirectory {
    async fn find_client_by_name(&self, name: &str) -> DomainResult<Option<Client>> {
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .find(|client| client.name.to_lowercase() == name.to_lowercase())
            .cloned())
    }

    async fn create_client(&self, client: Client) -> DomainResult<()> {
        self.clients.lock().unwrap().push(client);
        Ok(())
    }
}

/// Stub `EventParser` returning a canned proposal or a canned failure.
pub struct StubEventParser {
    outcome: DomainResult<AiParsedEvent>,
}

impl StubEventParser {
    pub fn returning(proposal: AiParsedEvent) -> Self {
        Self { outcome: Ok(proposal) }
    }

    pub fn unavailable(message: &str) -> Self {
        Self { outcome: Err(VitraError::AiUnavailable(message.to_string())) }
    }
}

#[async_trait]
impl EventParser for StubEventParser {
    async fn parse_event(&self, _input: &ParseInput) -> DomainResult<AiParsedEvent> {
        self.outcome.clone()
    }
}
