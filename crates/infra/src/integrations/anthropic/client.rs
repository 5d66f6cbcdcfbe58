//! Anthropic API client for raw-event parsing

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info};
use vitraplan_core::triage::ports::{EventParser, ParseInput};
use vitraplan_domain::{AiConfig, AiParsedEvent, Result, VitraError};

use super::types::{Message, MessagesRequest, MessagesResponse, ParsedEventPayload};
use crate::http::HttpClient;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-haiku-4-5";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Extraction contract the model answers against. The invoice keywords
/// (`Fac`, `TVAC`, `HTVA`) and the `Service (XX€)` price format are how the
/// business writes its calendar entries.
const SYSTEM_PROMPT: &str = "\
You assist a window-cleaning company in Belgium. You receive a raw calendar \
event (title, description, location, times) and extract structured data.

Answer ONLY with a valid JSON object - no markdown, no comments, no extra text.

Expected structure:
{
  \"client_name\": \"Full client name\",
  \"client_street\": \"Street and number\",
  \"client_zip\": \"Postal code\",
  \"client_city\": \"City\",
  \"client_phone\": \"Phone number or empty\",
  \"client_email\": \"Email or empty\",
  \"client_notes\": \"Important constraints (time windows, access, warnings) or empty\",
  \"is_invoice\": true when the title contains 'Fac' or 'TVAC' or 'HTVA', false otherwise,
  \"total_price\": total amount in euros (float) or 0.0,
  \"full_description\": \"Complete description of the services\",
  \"services_json\": [
    {\"description\": \"Service name\", \"price\": 0.0}
  ]
}

Rules:
- Extract the address from the location or the description
- Extract prices from the description (format: 'Service (XX\u{20ac})')
- total_price = sum of all service prices
- Use 0.0 when no price is known
- client_notes = constraints (e.g. 'not before 11am', 'mind the sills')
- Move constraint notes out of full_description into client_notes";

/// Anthropic messages-API client proposing structured interventions from
/// free text.
pub struct AnthropicParser {
    http_client: HttpClient,
    api_key: Option<String>,
    model: String,
    api_url: String,
}

impl AnthropicParser {
    /// Create a new parser from the AI configuration.
    pub fn new(config: &AiConfig, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_key: config.api_key.clone(),
            model: config.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    /// Create a new parser with a custom API URL (for testing)
    #[cfg(test)]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    fn build_user_content(input: &ParseInput) -> String {
        format!(
            "Title: {}\nDescription: {}\nLocation: {}\nDate: {}\nStart time: {}\nEnd time: {}",
            input.summary,
            input.description.as_deref().unwrap_or(""),
            input.location.as_deref().unwrap_or(""),
            input.date.format("%Y-%m-%d"),
            input.start_time.format("%H:%M"),
            input.end_time.format("%H:%M"),
        )
    }
}

#[async_trait]
impl EventParser for AnthropicParser {
    async fn parse_event(&self, input: &ParseInput) -> Result<AiParsedEvent> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                VitraError::AiUnavailable("Anthropic API key is not configured".to_string())
            })?;

        info!(external_id = %input.external_id, "parsing raw event with Anthropic");

        let request_payload = MessagesRequest {
            model: self.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            system: SYSTEM_PROMPT.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: Self::build_user_content(input),
            }],
        };

        let request_builder = self
            .http_client
            .request(Method::POST, &self.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request_payload);

        // Transport failures mean the collaborator is unreachable
        let response = self.http_client.send(request_builder).await.map_err(|err| {
            VitraError::AiUnavailable(format!("Anthropic API unreachable: {err}"))
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), "received Anthropic API response");

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VitraError::AiUnavailable(format!(
                "Anthropic API returned {status}: {message}"
            )));
        }

        let messages_response: MessagesResponse = response.json().await.map_err(|err| {
            VitraError::Internal(format!("Failed to decode Anthropic response: {err}"))
        })?;

        let text = messages_response
            .content
            .iter()
            .find(|block| block.block_type == "text")
            .map(|block| block.text.trim())
            .ok_or_else(|| {
                VitraError::Internal("Anthropic response contained no text block".to_string())
            })?;

        // A malformed model answer is a quality failure of this request, not
        // unavailability; surface it distinctly.
        let payload: ParsedEventPayload = serde_json::from_str(text).map_err(|err| {
            VitraError::Internal(format!(
                "AI response was not valid JSON: {err}. Content: {}",
                text.chars().take(200).collect::<String>()
            ))
        })?;

        Ok(payload.into_proposal(input))
    }
}
