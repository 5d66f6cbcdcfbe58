//! Anthropic messages-API adapter behind the `EventParser` port

mod client;
mod types;

pub use client::AnthropicParser;
