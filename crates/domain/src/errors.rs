//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for VitraPlan
///
/// Serialized with a `type`/`message` tag pair so the UI layer can render a
/// toast from the kind without inspecting the text.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum VitraError {
    /// Malformed date or date-time input rejected at the boundary.
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    /// A triage operation attempted on an event whose state forbids it.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Referenced employee/intervention/raw event/client does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A structural invariant was violated.
    #[error("Validation failure: {0}")]
    Validation(String),

    /// The text-understanding collaborator is unreachable or unconfigured.
    /// Distinct from a low-confidence parse, which is not an error.
    #[error("AI service unavailable: {0}")]
    AiUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for VitraPlan operations
pub type Result<T> = std::result::Result<T, VitraError>;
