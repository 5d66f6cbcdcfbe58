//! Port interfaces for raw-event triage

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;
use vitraplan_domain::{AiParsedEvent, Client, RawCalendarEvent, RawEventStatus, Result};

/// Repository for imported calendar events
///
/// The two write methods are conditional updates keyed on the current status:
/// implementations must compare the stored status against `expected` and the
/// write must be atomic with that comparison (the backend of record
/// serializes concurrent triage). A stored status outside `expected` yields
/// `InvalidTransition` - never a silent overwrite.
#[async_trait]
pub trait RawEventRepository: Send + Sync {
    /// Look up a single event.
    async fn find_event(&self, id: Uuid) -> Result<Option<RawCalendarEvent>>;

    /// Events whose start falls on a business-local day in `[start, end]`,
    /// filtered to the given status set.
    async fn events_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        statuses: &[RawEventStatus],
    ) -> Result<Vec<RawCalendarEvent>>;

    /// Replace the assigned employee set and move to `next` (`Raw` or
    /// `Assigned`), provided the stored status is in `expected`.
    async fn set_assignment(
        &self,
        id: Uuid,
        expected: &[RawEventStatus],
        employee_ids: &[Uuid],
        next: RawEventStatus,
    ) -> Result<RawCalendarEvent>;

    /// Commit a terminal status (`Converted` or `Ignored`), provided the
    /// stored status is in `expected`. `linked_intervention_id` accompanies
    /// `Converted`.
    async fn mark_terminal(
        &self,
        id: Uuid,
        expected: &[RawEventStatus],
        next: RawEventStatus,
        linked_intervention_id: Option<Uuid>,
    ) -> Result<RawCalendarEvent>;
}

/// Client lookup and creation for the confirm flow
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// Find a client by exact name, case-insensitively.
    async fn find_client_by_name(&self, name: &str) -> Result<Option<Client>>;

    /// Persist a new client.
    async fn create_client(&self, client: Client) -> Result<()>;
}

/// Free-text input handed to the text-understanding collaborator
///
/// Times are business-local so the proposal's window reads the way the
/// calendar displays it.
#[derive(Debug, Clone)]
pub struct ParseInput {
    pub external_id: String,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Text-understanding collaborator turning free text into a structured
/// proposal
///
/// Read-only from the triage point of view: parsing never mutates the event,
/// so cancelling or retrying a parse is always safe.
#[async_trait]
pub trait EventParser: Send + Sync {
    /// Propose a structured intervention from the event's free text.
    ///
    /// # Errors
    /// `AiUnavailable` when the collaborator is unreachable or unconfigured.
    /// A low-confidence parse is not an error - it is a proposal the user
    /// edits before confirming.
    async fn parse_event(&self, input: &ParseInput) -> Result<AiParsedEvent>;
}
