//! # VitraPlan Infra
//!
//! Adapters for every external collaborator the core depends on:
//! - A retrying HTTP client
//! - The backend REST store implementing the core repository ports
//! - The Anthropic messages-API adapter behind the `EventParser` port
//! - Configuration loading and tracing initialization
//!
//! ## Architecture
//! - Implements the traits declared in `vitraplan-core`
//! - Converts transport failures into the domain error taxonomy at the
//!   boundary

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod observability;

pub use api::BackendApiClient;
pub use errors::InfraError;
pub use http::HttpClient;
pub use integrations::anthropic::AnthropicParser;
pub use observability::init_tracing;
