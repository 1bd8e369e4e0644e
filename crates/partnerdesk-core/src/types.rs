// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Partnerdesk workspace.
//!
//! Conversations and messages mirror the support schema: a conversation is a
//! long-lived support thread with lifecycle status and escalation/resolution
//! history; messages are append-only and never edited or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a support conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a support conversation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    Active,
    Resolved,
    Escalated,
    Abandoned,
}

/// Priority of a support conversation or escalation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

/// High-level topic a conversation is about.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ConversationTopic {
    Onboarding,
    WidgetInstall,
    ApiIntegration,
    PosSetup,
    Troubleshooting,
}

/// Author role of a message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// Rendering hint for message content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Text,
    Code,
    Error,
    Action,
}

/// A partner's detected technology stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStack {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cms: Option<String>,
}

impl TechStack {
    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.framework.is_none()
            && self.language.is_none()
            && self.pos_system.is_none()
            && self.cms.is_none()
    }
}

/// Progress flags for a partner's integration setup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationProgress {
    #[serde(default)]
    pub widget_installed: bool,
    #[serde(default)]
    pub api_key_generated: bool,
    #[serde(default)]
    pub webhook_configured: bool,
    #[serde(default)]
    pub pos_connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_step: Option<String>,
}

/// A support conversation between a partner (or anonymous visitor) and the
/// assistant, optionally taken over by an admin.
///
/// Invariant: escalation fields are populated iff the conversation has been
/// escalated at some point; resolution fields iff it has been resolved.
/// History fields are never cleared -- the last transition wins on `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub partner_id: Option<String>,
    pub partner_email: Option<String>,
    pub partner_name: Option<String>,
    /// Anonymous visitor correlation key.
    pub session_id: String,
    pub page_url: Option<String>,
    /// Onboarding wizard step (1-4) when the conversation started there.
    pub onboarding_step: Option<u8>,
    pub topic: Option<ConversationTopic>,
    pub tech_stack: Option<TechStack>,
    pub integration_progress: Option<IntegrationProgress>,
    pub status: ConversationStatus,
    pub priority: Priority,
    pub escalated_at: Option<DateTime<Utc>>,
    pub escalated_to: Option<String>,
    pub escalation_reason: Option<String>,
    pub resolution: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    /// Satisfaction rating (1-5), settable regardless of status.
    pub helpful_rating: Option<u8>,
    pub feedback: Option<String>,
    pub assigned_admin_id: Option<String>,
    pub assigned_admin_name: Option<String>,
    pub admin_takeover: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single message within a conversation. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportMessage {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub role: MessageRole,
    pub content: String,
    pub content_type: ContentType,
    pub code_snippet: Option<String>,
    pub code_language: Option<String>,
    /// Tool names invoked to produce this message (assistant messages only).
    pub tools_used: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// Infers the content type for a message: `code` when a snippet is attached,
/// `text` otherwise, unless the caller supplied an explicit override.
pub fn infer_content_type(
    explicit: Option<ContentType>,
    code_snippet: Option<&str>,
) -> ContentType {
    match explicit {
        Some(ct) => ct,
        None if code_snippet.is_some() => ContentType::Code,
        None => ContentType::Text,
    }
}
