// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The completion-service boundary: request/response types and the
//! [`CompletionProvider`] trait.
//!
//! The agent treats the language model as an opaque service that accepts a
//! message list plus tool definitions and answers with either final text or
//! a batch of tool calls. Any provider implementing this shape is
//! substitutable; the production implementation lives in
//! `partnerdesk-openai`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DeskError;

/// A tool definition advertised to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (unique identifier).
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema describing the tool's parameters.
    pub parameters: serde_json::Value,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call id; tool results must echo it back.
    pub id: String,
    /// Name of the tool the model chose. Untrusted -- may not match any
    /// registered tool.
    pub name: String,
    /// JSON-encoded argument object.
    pub arguments: String,
}

/// Role of a chat message at the completion-service boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    /// A tool result fed back to the model.
    Tool,
}

/// A single message in the completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tool calls attached to an assistant message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// For `Tool` role messages: the id of the call this result answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// An assistant message carrying tool calls (content may be absent).
    pub fn assistant_tool_calls(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content,
            tool_calls,
            tool_call_id: None,
        }
    }

    /// A tool result answering the call with the given id.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Tool,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }
}

/// A completion request: full message list, available tools, generation knobs.
///
/// `max_tokens` and `temperature` left unset fall back to the provider's
/// configured defaults.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<ToolDefinition>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// A completion response: final text, tool calls, or both.
#[derive(Debug, Clone, Default)]
pub struct ChatResponse {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

impl ChatResponse {
    /// True when the model requested at least one tool invocation.
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Adapter for language-model completion services.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends a completion request and returns the model's next message.
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, DeskError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_message_constructors() {
        let sys = ChatMessage::system("You are helpful.");
        assert_eq!(sys.role, ChatRole::System);
        assert_eq!(sys.content.as_deref(), Some("You are helpful."));

        let tool = ChatMessage::tool_result("call_1", "{\"result\":\"ok\"}");
        assert_eq!(tool.role, ChatRole::Tool);
        assert_eq!(tool.tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn assistant_tool_call_message_keeps_order() {
        let calls = vec![
            ToolCall {
                id: "a".into(),
                name: "generate_widget_code".into(),
                arguments: "{}".into(),
            },
            ToolCall {
                id: "b".into(),
                name: "search_integration_docs".into(),
                arguments: "{}".into(),
            },
        ];
        let msg = ChatMessage::assistant_tool_calls(None, calls.clone());
        assert_eq!(msg.tool_calls, calls);
    }

    #[test]
    fn chat_role_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&ChatRole::Tool).unwrap(), "\"tool\"");
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn response_has_tool_calls() {
        let mut resp = ChatResponse::default();
        assert!(!resp.has_tool_calls());
        resp.tool_calls.push(ToolCall {
            id: "x".into(),
            name: "escalate_to_dev_team".into(),
            arguments: "{}".into(),
        });
        assert!(resp.has_tool_calls());
    }
}
