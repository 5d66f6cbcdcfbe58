//! Wire types for the Anthropic messages API

use serde::{Deserialize, Serialize};
use vitraplan_core::triage::ports::ParseInput;
use vitraplan_domain::{AiParsedEvent, ServiceItem};

/// Messages API request payload
#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Messages API response payload (the fields we read)
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub text: String,
}

/// JSON object the model is instructed to emit
#[derive(Debug, Deserialize)]
pub struct ParsedEventPayload {
    pub client_name: String,
    #[serde(default)]
    pub client_street: String,
    #[serde(default)]
    pub client_zip: String,
    #[serde(default)]
    pub client_city: String,
    #[serde(default)]
    pub client_phone: String,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub client_notes: String,
    #[serde(default)]
    pub is_invoice: bool,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub services_json: Vec<ServiceLine>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceLine {
    pub description: String,
    #[serde(default)]
    pub price: f64,
}

impl ParsedEventPayload {
    /// Combine the model's extraction with the fixed fields of the source
    /// event (ids, summary, time window) into the domain proposal.
    pub fn into_proposal(self, input: &ParseInput) -> AiParsedEvent {
        AiParsedEvent {
            external_id: input.external_id.clone(),
            original_summary: input.summary.clone(),
            date: input.date,
            start_time: input.start_time,
            end_time: input.end_time,
            client_name: self.client_name,
            client_street: self.client_street,
            client_zip: self.client_zip,
            client_city: self.client_city,
            client_phone: self.client_phone,
            client_email: self.client_email,
            client_notes: self.client_notes,
            is_invoice: self.is_invoice,
            total_price: self.total_price,
            full_description: self.full_description,
            services: self
                .services_json
                .into_iter()
                .map(|line| ServiceItem { description: line.description, price: line.price })
                .collect(),
        }
    }
}
