//! Triage transition table
//!
//! One place enumerates every legal `(state, operation) -> state` mapping, so
//! illegal transitions are rejected here and nowhere else.

use std::fmt;

use vitraplan_domain::{RawEventStatus, Result, VitraError};

/// A state-changing triage operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageOp {
    /// Replace the assigned employee set. Assigning the empty set is the
    /// defined way to unassign: the event reverts to `Raw`.
    Assign { employee_count: usize },
    /// Exclude the event from planning views.
    Ignore,
    /// Turn the event into a structured intervention.
    Convert,
}

impl fmt::Display for TriageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign { .. } => write!(f, "assign"),
            Self::Ignore => write!(f, "ignore"),
            Self::Convert => write!(f, "convert"),
        }
    }
}

/// Resolve the status an event moves to under `op`.
///
/// `Converted` and `Ignored` are absorbing: every operation on them fails.
///
/// # Errors
/// Returns `VitraError::InvalidTransition` for any illegal pair.
pub fn next_status(current: RawEventStatus, op: TriageOp) -> Result<RawEventStatus> {
    match (current, op) {
        (RawEventStatus::Raw | RawEventStatus::Assigned, TriageOp::Assign { employee_count }) => {
            Ok(if employee_count == 0 { RawEventStatus::Raw } else { RawEventStatus::Assigned })
        }
        (RawEventStatus::Raw | RawEventStatus::Assigned, TriageOp::Ignore) => {
            Ok(RawEventStatus::Ignored)
        }
        (RawEventStatus::Raw | RawEventStatus::Assigned, TriageOp::Convert) => {
            Ok(RawEventStatus::Converted)
        }
        (current, op) => Err(VitraError::InvalidTransition(format!(
            "Cannot {op} an event already {current}"
        ))),
    }
}
