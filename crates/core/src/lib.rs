//! # VitraPlan Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The capacity model and workload aggregator (pure reductions)
//! - The planning stats service and raw-event triage state machine
//! - Port/adapter interfaces (traits) for every external collaborator
//!
//! ## Architecture Principles
//! - Only depends on `vitraplan-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod planning;
pub mod ports;
pub mod roster;
pub mod triage;

// Re-export specific items to avoid ambiguity
pub use planning::capacity::{capacity_for_date, capacity_for_range};
pub use planning::workload::{planned_hours_for_date, planned_hours_for_range};
pub use planning::PlanningService;
pub use ports::{
    AbsenceRepository, EmployeeRepository, IdentityProvider, InterventionRepository,
};
pub use roster::RosterService;
pub use triage::ports::{ClientDirectory, EventParser, ParseInput, RawEventRepository};
pub use triage::transitions::{next_status, TriageOp};
pub use triage::{Conversion, TriageService};
