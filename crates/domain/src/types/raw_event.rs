//! Imported external calendar entries awaiting triage

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::impl_domain_status_conversions;

/// Triage state of an imported calendar entry
///
/// `Converted` and `Ignored` are absorbing: once an event reaches either, no
/// triage operation may move it out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawEventStatus {
    Raw,
    Assigned,
    Converted,
    Ignored,
}

impl_domain_status_conversions!(RawEventStatus {
    Raw => "raw",
    Assigned => "assigned",
    Converted => "converted",
    Ignored => "ignored",
});

impl RawEventStatus {
    /// Whether the status is absorbing.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Converted | Self::Ignored)
    }
}

/// An unprocessed entry imported from an external calendar
///
/// `(source, calendar_id, external_id)` is the idempotency key the import job
/// upserts on; re-imports refresh the payload fields without touching triage
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCalendarEvent {
    pub id: Uuid,
    /// Import source, e.g. `google`
    pub source: String,
    pub external_id: String,
    #[serde(default)]
    pub calendar_id: Option<String>,
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
    pub status: RawEventStatus,
    #[serde(default)]
    pub assigned_employee_ids: Vec<Uuid>,
    /// Set once the event is converted into an intervention
    #[serde(default)]
    pub linked_intervention_id: Option<Uuid>,
}

/// A service line proposed by the parse step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub description: String,
    #[serde(default)]
    pub price: f64,
}

/// Structured proposal produced by the text-understanding collaborator
///
/// The user may edit any field before confirming; a low-confidence parse is
/// an editable proposal, not an error. Times are business-local, paired with
/// `date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiParsedEvent {
    /// External id of the source event (falls back to the internal id)
    pub external_id: String,
    /// Summary of the raw event, kept as the intervention title
    pub original_summary: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub client_name: String,
    #[serde(default)]
    pub client_street: String,
    #[serde(default)]
    pub client_zip: String,
    #[serde(default)]
    pub client_city: String,
    #[serde(default)]
    pub client_phone: String,
    #[serde(default)]
    pub client_email: String,
    /// Constraints extracted out of the description (access, time windows)
    #[serde(default)]
    pub client_notes: String,
    #[serde(default)]
    pub is_invoice: bool,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub full_description: String,
    /// Ordered service lines with prices
    #[serde(default)]
    pub services: Vec<ServiceItem>,
}
