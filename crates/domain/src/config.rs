//! Configuration structures
//!
//! [`AppConfig`] is the deserialized shape of the configuration file /
//! environment variables (loaded by the infra crate). [`BusinessContext`] is
//! the per-request view of it: every core operation receives one explicitly
//! instead of reading ambient global state.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{BUSINESS_TIMEZONE, DEFAULT_OVERTIME_TOLERANCE_HOURS};
use crate::errors::{Result, VitraError};
use crate::types::roster::Role;

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend REST store connection
    pub backend: BackendConfig,
    /// Text-understanding collaborator
    #[serde(default)]
    pub ai: AiConfig,
    /// Business rules (timezone, overload tolerance)
    #[serde(default)]
    pub business: BusinessConfig,
}

/// Backend REST store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend API, e.g. `https://api.example.com`
    pub base_url: String,
    /// Bearer token injected on every request (session storage is owned by
    /// the authentication collaborator)
    #[serde(default)]
    pub token: Option<String>,
}

/// Text-understanding collaborator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiConfig {
    /// API key; when absent, `ai_parse` fails with `AiUnavailable`
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model override; the adapter supplies a default when empty
    #[serde(default)]
    pub model: Option<String>,
}

/// Business rules configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessConfig {
    /// IANA timezone name the business calendar lives in
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Hours of allowed overage before a day is flagged overload
    #[serde(default = "default_tolerance")]
    pub overtime_tolerance_hours: f64,
}

fn default_timezone() -> String {
    BUSINESS_TIMEZONE.to_string()
}

fn default_tolerance() -> f64 {
    DEFAULT_OVERTIME_TOLERANCE_HOURS
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            overtime_tolerance_hours: default_tolerance(),
        }
    }
}

impl BusinessConfig {
    /// Resolve the configured timezone name against the IANA database.
    ///
    /// # Errors
    /// Returns `VitraError::Config` for an unknown timezone name.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| VitraError::Config(format!("Unknown timezone: {}", self.timezone)))
    }
}

/// Per-request business context
///
/// Carries the active business timezone, the overload tolerance, and the
/// authenticated caller's role. Passed explicitly into each core operation.
#[derive(Debug, Clone, Copy)]
pub struct BusinessContext {
    /// Timezone all calendar-day bucketing happens in
    pub timezone: Tz,
    /// Hours of allowed overage before overload
    pub tolerance_hours: f64,
    /// Role of the authenticated caller
    pub caller_role: Role,
}

impl BusinessContext {
    /// Create a context from explicit parts.
    pub fn new(timezone: Tz, tolerance_hours: f64, caller_role: Role) -> Self {
        Self { timezone, tolerance_hours, caller_role }
    }

    /// Build a context for a caller from the business configuration.
    ///
    /// # Errors
    /// Returns `VitraError::Config` if the configured timezone is unknown.
    pub fn from_config(config: &BusinessConfig, caller_role: Role) -> Result<Self> {
        Ok(Self::new(config.tz()?, config.overtime_tolerance_hours, caller_role))
    }

    /// Reject callers that are not admins.
    ///
    /// # Errors
    /// Returns `VitraError::Auth` for non-admin callers.
    pub fn require_admin(&self) -> Result<()> {
        if self.caller_role == Role::Admin {
            Ok(())
        } else {
            Err(VitraError::Auth("Operation reserved to admins".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_business_config_points_at_brussels() {
        let config = BusinessConfig::default();
        assert_eq!(config.timezone, "Europe/Brussels");
        assert_eq!(config.overtime_tolerance_hours, 3.0);
        assert_eq!(config.tz().unwrap(), chrono_tz::Europe::Brussels);
    }

    #[test]
    fn unknown_timezone_is_a_config_error() {
        let config = BusinessConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..BusinessConfig::default()
        };
        assert!(matches!(config.tz(), Err(VitraError::Config(_))));
    }

    #[test]
    fn require_admin_rejects_employees() {
        let config = BusinessConfig::default();
        let admin = BusinessContext::from_config(&config, Role::Admin).unwrap();
        let employee = BusinessContext::from_config(&config, Role::Employee).unwrap();

        assert!(admin.require_admin().is_ok());
        assert!(matches!(employee.require_admin(), Err(VitraError::Auth(_))));
    }
}
