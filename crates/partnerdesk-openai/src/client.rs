// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI chat-completions API.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! authentication, and transient error retry, and implements
//! [`CompletionProvider`] for the rest of the workspace.

use std::time::Duration;

use async_trait::async_trait;
use partnerdesk_config::OpenAiConfig;
use partnerdesk_core::completion::{ChatRequest, ChatResponse, CompletionProvider};
use partnerdesk_core::DeskError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse, WireMessage, WireTool};

/// Base URL for the OpenAI chat-completions endpoint.
const API_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Sampling temperature for support conversations.
const TEMPERATURE: f32 = 0.7;

/// HTTP client for chat-completions API communication.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    model: String,
    max_tokens: u32,
    max_retries: u32,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new chat-completions client from configuration.
    ///
    /// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
    /// Construction fails fast without a key so a misconfigured deployment
    /// surfaces at startup rather than on the first user message.
    pub fn new(config: &OpenAiConfig) -> Result<Self, DeskError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                DeskError::Config(
                    "no OpenAI API key: set openai.api_key or OPENAI_API_KEY".to_string(),
                )
            })?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| DeskError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| DeskError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let base_url = match &config.base_url {
            Some(url) => format!("{}/chat/completions", url.trim_end_matches('/')),
            None => API_BASE_URL.to_string(),
        };

        Ok(Self {
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            max_retries: 1,
            base_url,
        })
    }

    /// Returns the configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Overrides the full endpoint URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a chat-completions request and returns the parsed response.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    pub async fn complete_chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, DeskError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&self.base_url)
                .json(request)
                .send()
                .await
                .map_err(|e| DeskError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| DeskError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                return serde_json::from_str(&body).map_err(|e| DeskError::Provider {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(DeskError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let error_msg = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "OpenAI API error ({}): {}",
                    api_err.error.error_type.as_deref().unwrap_or("unknown"),
                    api_err.error.message
                )
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(DeskError::Provider {
                message: error_msg,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| DeskError::Provider {
            message: "completion request failed after retries".into(),
            source: None,
        }))
    }

    fn to_wire_request(&self, request: &ChatRequest) -> ChatCompletionRequest {
        let tools = if request.tools.is_empty() {
            None
        } else {
            Some(request.tools.iter().map(WireTool::from).collect())
        };
        let tool_choice = tools.as_ref().map(|_| "auto".to_string());
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: request.messages.iter().map(WireMessage::from).collect(),
            tools,
            tool_choice,
            max_tokens: request.max_tokens.unwrap_or(self.max_tokens),
            temperature: request.temperature.unwrap_or(TEMPERATURE),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, DeskError> {
        let wire = self.to_wire_request(&request);
        let response = self.complete_chat(&wire).await?;
        Ok(ChatResponse::from(response))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
