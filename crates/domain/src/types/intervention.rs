//! Clients and scheduled interventions (billable field work)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, VitraError};
use crate::impl_domain_status_conversions;

/// A client the business works for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Access constraints, time windows, warnings
    #[serde(default)]
    pub notes: Option<String>,
}

impl Client {
    /// Street/zip/city joined for display, `None` when nothing is known.
    pub fn full_address(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.street, &self.zip_code, &self.city]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Lifecycle of an intervention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionStatus {
    Planned,
    InProgress,
    Done,
}

impl_domain_status_conversions!(InterventionStatus {
    Planned => "planned",
    InProgress => "in_progress",
    Done => "done",
});

/// A line item billed on an intervention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingItem {
    pub label: String,
    pub price: f64,
}

/// A scheduled, billable unit of field work tied to a client
///
/// `start_time`/`end_time` are instants; day bucketing always interprets them
/// in the business timezone. `real_start_time`/`real_end_time` record what
/// actually happened once the status moves; they are display-only and never
/// enter load calculations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intervention {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: InterventionStatus,
    #[serde(default)]
    pub price_estimated: Option<f64>,
    #[serde(default)]
    pub is_invoice: bool,
    #[serde(default)]
    pub real_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub real_end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub client_id: Option<Uuid>,
    #[serde(default)]
    pub employee_ids: Vec<Uuid>,
    /// Ordered billing line items
    #[serde(default)]
    pub items: Vec<BillingItem>,
}

impl Intervention {
    /// Check the structural invariants of a well-formed intervention.
    ///
    /// # Errors
    /// Returns `VitraError::Validation` when `end_time <= start_time` or the
    /// title is blank.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(VitraError::Validation("Intervention title is required".to_string()));
        }
        if self.end_time <= self.start_time {
            return Err(VitraError::Validation(format!(
                "Intervention must end after it starts ({} >= {})",
                self.start_time, self.end_time
            )));
        }
        Ok(())
    }

    /// Planned duration in hours, from the scheduled window.
    pub fn planned_duration_hours(&self) -> f64 {
        let seconds = (self.end_time - self.start_time).num_seconds();
        seconds as f64 / 3600.0
    }
}
