//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//!
//! ## Environment Variables
//! - `VITRAPLAN_BACKEND_URL`: Base URL of the backend API (required)
//! - `VITRAPLAN_BACKEND_TOKEN`: Bearer token for the backend (optional)
//! - `VITRAPLAN_AI_API_KEY`: Anthropic API key (optional; AI parse reports
//!   `AiUnavailable` without it)
//! - `VITRAPLAN_AI_MODEL`: Model override (optional)
//! - `VITRAPLAN_BUSINESS_TIMEZONE`: IANA timezone name (default
//!   Europe/Brussels)
//! - `VITRAPLAN_TOLERANCE_HOURS`: Overload tolerance in hours (default 3.0)
//!
//! ## File Locations
//! The loader probes `vitraplan.toml` then `config.toml` in the working
//! directory and its parent.

use std::path::{Path, PathBuf};

use vitraplan_domain::{
    AiConfig, AppConfig, BackendConfig, BusinessConfig, Result, VitraError,
};

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `VitraError::Config` if neither source yields a usable
/// configuration.
pub fn load() -> Result<AppConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `VitraError::Config` if `VITRAPLAN_BACKEND_URL` is missing or a
/// numeric variable does not parse.
pub fn load_from_env() -> Result<AppConfig> {
    let base_url = env_var("VITRAPLAN_BACKEND_URL")?;
    let token = std::env::var("VITRAPLAN_BACKEND_TOKEN").ok();

    let api_key = std::env::var("VITRAPLAN_AI_API_KEY").ok();
    let model = std::env::var("VITRAPLAN_AI_MODEL").ok();

    let mut business = BusinessConfig::default();
    if let Ok(timezone) = std::env::var("VITRAPLAN_BUSINESS_TIMEZONE") {
        business.timezone = timezone;
    }
    if let Ok(tolerance) = std::env::var("VITRAPLAN_TOLERANCE_HOURS") {
        business.overtime_tolerance_hours = tolerance.parse::<f64>().map_err(|e| {
            VitraError::Config(format!("Invalid tolerance hours: {e}"))
        })?;
    }
    // Fail fast on an unknown timezone instead of at the first query
    business.tz()?;

    Ok(AppConfig {
        backend: BackendConfig { base_url, token },
        ai: AiConfig { api_key, model },
        business,
    })
}

/// Load configuration from a TOML file
///
/// If `path` is `None`, probes the locations listed in the module docs.
///
/// # Errors
/// Returns `VitraError::Config` if no file is found or it does not parse.
pub fn load_from_file(path: Option<&Path>) -> Result<AppConfig> {
    let path = match path {
        Some(explicit) => explicit.to_path_buf(),
        None => probe_config_paths().ok_or_else(|| {
            VitraError::Config("No configuration file found".to_string())
        })?,
    };

    let contents = std::fs::read_to_string(&path).map_err(|e| {
        VitraError::Config(format!("Cannot read {}: {e}", path.display()))
    })?;

    let config: AppConfig = toml::from_str(&contents).map_err(|e| {
        VitraError::Config(format!("Invalid configuration in {}: {e}", path.display()))
    })?;

    // Same fail-fast check as the env path
    config.business.tz()?;

    tracing::info!(path = %path.display(), "Configuration loaded from file");
    Ok(config)
}

fn probe_config_paths() -> Option<PathBuf> {
    const CANDIDATES: [&str; 4] =
        ["vitraplan.toml", "config.toml", "../vitraplan.toml", "../config.toml"];

    CANDIDATES.iter().map(PathBuf::from).find(|candidate| candidate.is_file())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| VitraError::Config(format!("{name} is not set")))
}
