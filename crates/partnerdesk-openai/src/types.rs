// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat-completions API request/response wire types.
//!
//! Conversions to and from the provider-neutral types in
//! `partnerdesk_core::completion` live here so the rest of the workspace
//! never sees the OpenAI wire shape.

use partnerdesk_core::completion::{ChatMessage, ChatResponse, ChatRole, ToolCall, ToolDefinition};
use serde::{Deserialize, Serialize};

// --- Request types ---

/// A request to the chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier (e.g., "gpt-4o").
    pub model: String,

    /// Conversation messages in wire order.
    pub messages: Vec<WireMessage>,

    /// Tool definitions available for the model to call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<WireTool>>,

    /// Tool selection strategy; "auto" lets the model decide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,

    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,
}

/// A single message in the chat-completions wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    /// Role: "system", "user", "assistant", or "tool".
    pub role: String,

    /// Text content. Absent on assistant messages that only carry tool calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Tool calls issued by an assistant message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,

    /// For role "tool": the id of the call this message answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// A tool definition in the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireTool {
    /// Always "function".
    #[serde(rename = "type")]
    pub tool_type: String,

    /// The function declaration.
    pub function: WireFunctionDef,
}

/// A function declaration within a tool definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunctionDef {
    /// Function name (unique identifier).
    pub name: String,
    /// Human-readable description of what the function does.
    pub description: String,
    /// JSON Schema describing the function's parameters.
    pub parameters: serde_json::Value,
}

/// A tool call in assistant messages and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireToolCall {
    /// Provider-assigned call id, echoed back in the tool result message.
    pub id: String,

    /// Always "function".
    #[serde(rename = "type")]
    pub call_type: String,

    /// The invoked function and its arguments.
    pub function: WireFunctionCall,
}

/// The function invocation within a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunctionCall {
    /// Name of the function being called.
    pub name: String,
    /// Arguments as a JSON-encoded string.
    pub arguments: String,
}

// --- Response types ---

/// A response from the chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion choices; only the first is used.
    pub choices: Vec<Choice>,
}

/// A single completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ResponseMessage,

    /// Why generation stopped ("stop", "tool_calls", "length", ...).
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The assistant message within a completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Generated text, if any.
    #[serde(default)]
    pub content: Option<String>,

    /// Tool calls requested by the model, if any.
    #[serde(default)]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

/// Error payload returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// The error detail object.
    pub error: ApiErrorDetail,
}

/// Detail of an API error.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Human-readable error message.
    pub message: String,
    /// Error category (e.g., "invalid_request_error").
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

// --- Conversions ---

fn role_str(role: ChatRole) -> &'static str {
    match role {
        ChatRole::System => "system",
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
        ChatRole::Tool => "tool",
    }
}

impl From<&ChatMessage> for WireMessage {
    fn from(msg: &ChatMessage) -> Self {
        let tool_calls = if msg.tool_calls.is_empty() {
            None
        } else {
            Some(msg.tool_calls.iter().map(WireToolCall::from).collect())
        };
        Self {
            role: role_str(msg.role).to_string(),
            content: msg.content.clone(),
            tool_calls,
            tool_call_id: msg.tool_call_id.clone(),
        }
    }
}

impl From<&ToolCall> for WireToolCall {
    fn from(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            call_type: "function".to_string(),
            function: WireFunctionCall {
                name: call.name.clone(),
                arguments: call.arguments.clone(),
            },
        }
    }
}

impl From<WireToolCall> for ToolCall {
    fn from(call: WireToolCall) -> Self {
        Self {
            id: call.id,
            name: call.function.name,
            arguments: call.function.arguments,
        }
    }
}

impl From<&ToolDefinition> for WireTool {
    fn from(def: &ToolDefinition) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: WireFunctionDef {
                name: def.name.clone(),
                description: def.description.clone(),
                parameters: def.parameters.clone(),
            },
        }
    }
}

impl From<ChatCompletionResponse> for ChatResponse {
    fn from(mut response: ChatCompletionResponse) -> Self {
        if response.choices.is_empty() {
            return Self {
                content: None,
                tool_calls: Vec::new(),
            };
        }
        let message = response.choices.remove(0).message;
        Self {
            content: message.content,
            tool_calls: message
                .tool_calls
                .unwrap_or_default()
                .into_iter()
                .map(ToolCall::from)
                .collect(),
        }
    }
}
