//! Infra-local error type and conversions into the domain taxonomy

use thiserror::Error;
use vitraplan_domain::VitraError;

/// Errors raised inside the infrastructure layer before they cross into the
/// domain taxonomy.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfraError> for VitraError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Http(source) => Self::Network(source.to_string()),
            InfraError::Url(message) | InfraError::Config(message) => Self::Config(message),
        }
    }
}
