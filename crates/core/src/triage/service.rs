//! Triage service - assignment, ignoring, conversion, AI propose/confirm

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;
use vitraplan_domain::dates::{instant_to_local, local_to_instant};
use vitraplan_domain::{
    AiParsedEvent, BusinessContext, Client, Intervention, InterventionStatus, RawCalendarEvent,
    RawEventStatus, Result, VitraError,
};

use super::ports::{ClientDirectory, EventParser, ParseInput, RawEventRepository};
use super::transitions::{next_status, TriageOp};
use crate::ports::{EmployeeRepository, InterventionRepository};

/// Statuses a state-changing triage operation may start from. Used as the
/// `expected` set of the conditional repository writes, so a concurrent
/// terminal transition surfaces as `InvalidTransition` on the loser's side.
const TRIAGEABLE: [RawEventStatus; 2] = [RawEventStatus::Raw, RawEventStatus::Assigned];

/// Outcome of a conversion: the terminal event plus the intervention it
/// produced.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub event: RawCalendarEvent,
    pub intervention: Intervention,
}

/// Governs the lifecycle of imported calendar entries.
///
/// All operations are admin-gated and surface `InvalidTransition`, `NotFound`
/// and `AiUnavailable` to the caller unchanged; retry policy belongs to the
/// UI.
pub struct TriageService {
    events: Arc<dyn RawEventRepository>,
    employees: Arc<dyn EmployeeRepository>,
    interventions: Arc<dyn InterventionRepository>,
    clients: Arc<dyn ClientDirectory>,
    parser: Arc<dyn EventParser>,
}

impl TriageService {
    /// Create a new triage service.
    pub fn new(
        events: Arc<dyn RawEventRepository>,
        employees: Arc<dyn EmployeeRepository>,
        interventions: Arc<dyn InterventionRepository>,
        clients: Arc<dyn ClientDirectory>,
        parser: Arc<dyn EventParser>,
    ) -> Self {
        Self { events, employees, interventions, clients, parser }
    }

    /// Fetch a single event.
    pub async fn event(&self, ctx: &BusinessContext, id: Uuid) -> Result<RawCalendarEvent> {
        ctx.require_admin()?;
        self.load(id).await
    }

    /// Events still awaiting triage (raw or assigned) over a day range.
    pub async fn pending_events(
        &self,
        ctx: &BusinessContext,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawCalendarEvent>> {
        ctx.require_admin()?;
        self.events.events_in_range(start, end, &TRIAGEABLE).await
    }

    /// Replace the event's assigned employee set.
    ///
    /// An empty `employee_ids` unassigns: the event reverts to `Raw`. Every
    /// referenced employee must exist.
    pub async fn assign(
        &self,
        ctx: &BusinessContext,
        event_id: Uuid,
        employee_ids: Vec<Uuid>,
    ) -> Result<RawCalendarEvent> {
        ctx.require_admin()?;
        let event = self.load(event_id).await?;
        let next = next_status(event.status, TriageOp::Assign { employee_count: employee_ids.len() })?;

        for employee_id in &employee_ids {
            if self.employees.find_employee(*employee_id).await?.is_none() {
                return Err(VitraError::NotFound(format!("Employee {employee_id}")));
            }
        }

        let updated = self.events.set_assignment(event.id, &TRIAGEABLE, &employee_ids, next).await?;
        info!(event_id = %event.id, employees = employee_ids.len(), status = %updated.status, "assigned raw event");
        Ok(updated)
    }

    /// Exclude the event from planning views. Terminal.
    pub async fn ignore(&self, ctx: &BusinessContext, event_id: Uuid) -> Result<RawCalendarEvent> {
        ctx.require_admin()?;
        let event = self.load(event_id).await?;
        let next = next_status(event.status, TriageOp::Ignore)?;

        let updated = self.events.mark_terminal(event.id, &TRIAGEABLE, next, None).await?;
        info!(event_id = %event.id, "ignored raw event");
        Ok(updated)
    }

    /// Convert the event into a planned intervention built from its own
    /// summary, description and time window. Terminal.
    pub async fn convert(&self, ctx: &BusinessContext, event_id: Uuid) -> Result<Conversion> {
        ctx.require_admin()?;
        let event = self.load(event_id).await?;
        let next = next_status(event.status, TriageOp::Convert)?;

        let intervention = Intervention {
            id: Uuid::new_v4(),
            title: event.summary.clone(),
            description: event.description.clone(),
            start_time: event.start_time,
            end_time: event.end_time,
            status: InterventionStatus::Planned,
            price_estimated: None,
            is_invoice: false,
            real_start_time: None,
            real_end_time: None,
            client_id: None,
            employee_ids: event.assigned_employee_ids.clone(),
            items: Vec::new(),
        };
        intervention.validate()?;

        self.commit_conversion(event, next, intervention).await
    }

    /// Send the event's free text to the text-understanding collaborator and
    /// return its structured proposal. Read-only: never mutates the event,
    /// cancellation is safe and retrying is idempotent.
    pub async fn ai_parse(&self, ctx: &BusinessContext, event_id: Uuid) -> Result<AiParsedEvent> {
        ctx.require_admin()?;
        let event = self.load(event_id).await?;

        let (date, start_time) = instant_to_local(event.start_time, ctx.timezone);
        let (_, end_time) = instant_to_local(event.end_time, ctx.timezone);

        let external_id = if event.external_id.is_empty() {
            event.id.to_string()
        } else {
            event.external_id.clone()
        };

        let input = ParseInput {
            external_id,
            summary: event.summary.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            date,
            start_time,
            end_time,
        };

        self.parser.parse_event(&input).await
    }

    /// Convert the event using a (possibly user-edited) structured proposal:
    /// the client, billing lines and invoice flag come from the proposal
    /// instead of being re-derived from raw text. Terminal, same
    /// preconditions as [`TriageService::convert`].
    pub async fn ai_confirm(
        &self,
        ctx: &BusinessContext,
        event_id: Uuid,
        proposal: AiParsedEvent,
    ) -> Result<Conversion> {
        ctx.require_admin()?;
        let event = self.load(event_id).await?;
        let next = next_status(event.status, TriageOp::Convert)?;

        let client_name = proposal.client_name.trim();
        if client_name.is_empty() {
            return Err(VitraError::Validation(
                "Client name is required to confirm a parsed event".to_string(),
            ));
        }

        let start_time = local_to_instant(proposal.date, proposal.start_time, ctx.timezone)?;
        let end_time = local_to_instant(proposal.date, proposal.end_time, ctx.timezone)?;
        if end_time <= start_time {
            return Err(VitraError::Validation(format!(
                "Proposed window must end after it starts ({} >= {})",
                proposal.start_time, proposal.end_time
            )));
        }

        let client = self.resolve_client(client_name, &proposal).await?;

        let title = if proposal.original_summary.trim().is_empty() {
            event.summary.clone()
        } else {
            proposal.original_summary.clone()
        };

        let intervention = Intervention {
            id: Uuid::new_v4(),
            title,
            description: non_empty(&proposal.full_description),
            start_time,
            end_time,
            status: InterventionStatus::Planned,
            price_estimated: (proposal.total_price > 0.0).then_some(proposal.total_price),
            is_invoice: proposal.is_invoice,
            real_start_time: None,
            real_end_time: None,
            client_id: Some(client.id),
            employee_ids: event.assigned_employee_ids.clone(),
            items: proposal
                .services
                .iter()
                .map(|service| vitraplan_domain::BillingItem {
                    label: service.description.clone(),
                    price: service.price,
                })
                .collect(),
        };
        intervention.validate()?;

        self.commit_conversion(event, next, intervention).await
    }

    async fn load(&self, id: Uuid) -> Result<RawCalendarEvent> {
        self.events
            .find_event(id)
            .await?
            .ok_or_else(|| VitraError::NotFound(format!("Raw event {id}")))
    }

    /// Persist the intervention, then commit the terminal status through the
    /// conditional update. A lost race surfaces as `InvalidTransition`; the
    /// backend of record garbage-collects the unlinked intervention.
    async fn commit_conversion(
        &self,
        event: RawCalendarEvent,
        next: RawEventStatus,
        intervention: Intervention,
    ) -> Result<Conversion> {
        self.interventions.create_intervention(intervention.clone()).await?;

        let updated =
            self.events.mark_terminal(event.id, &TRIAGEABLE, next, Some(intervention.id)).await?;

        info!(event_id = %event.id, intervention_id = %intervention.id, "converted raw event");
        Ok(Conversion { event: updated, intervention })
    }

    /// Find the proposal's client by name (case-insensitive) or create it.
    async fn resolve_client(&self, name: &str, proposal: &AiParsedEvent) -> Result<Client> {
        if let Some(existing) = self.clients.find_client_by_name(name).await? {
            return Ok(existing);
        }

        let client = Client {
            id: Uuid::new_v4(),
            name: name.to_string(),
            street: non_empty(&proposal.client_street),
            zip_code: non_empty(&proposal.client_zip),
            city: non_empty(&proposal.client_city),
            phone: non_empty(&proposal.client_phone),
            email: non_empty(&proposal.client_email),
            notes: non_empty(&proposal.client_notes),
        };
        self.clients.create_client(client.clone()).await?;
        Ok(client)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
