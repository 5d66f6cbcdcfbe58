//! Domain types and models

pub mod intervention;
pub mod raw_event;
pub mod roster;
pub mod stats;

// Re-export the commonly used types for convenience
pub use intervention::{BillingItem, Client, Intervention, InterventionStatus};
pub use raw_event::{AiParsedEvent, RawCalendarEvent, RawEventStatus, ServiceItem};
pub use roster::{Absence, AbsenceDraft, Employee, EmployeeDraft, EmployeeUpdate, Role};
pub use stats::{DailyStats, DayCapacity, DayLoadStatus};
