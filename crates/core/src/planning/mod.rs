//! Daily/range capacity and workload aggregation
//!
//! The only place the application makes a judgment call from raw data: how
//! many hours are planned against how many hours of labor exist, and whether
//! a day is fine, tight, or overloaded.

pub mod capacity;
pub mod service;
pub mod workload;

pub use service::PlanningService;
