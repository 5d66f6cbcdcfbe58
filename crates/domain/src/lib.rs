//! # VitraPlan Domain
//!
//! Business domain types and models for VitraPlan.
//!
//! This crate contains:
//! - Domain data types (Employee, Intervention, RawCalendarEvent, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures and the per-request business context
//! - Business-calendar utilities (Europe/Brussels aware date arithmetic)
//!
//! ## Architecture
//! - No dependencies on other VitraPlan crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures; no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
// Re-export the business-calendar utilities
pub use utils::dates;
