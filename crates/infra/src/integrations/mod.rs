//! Third-party service integrations

pub mod anthropic;
