// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation lifecycle service.
//!
//! Wraps the SQLite queries with domain rules (status transitions, rating
//! bounds, content-type inference) and publishes live events for every
//! message and status change. All writes go through the single serialized
//! connection, so concurrent callers cannot interleave partial updates.

use std::sync::Arc;

use chrono::Utc;
use partnerdesk_core::{
    infer_content_type, ContentType, Conversation, ConversationId, ConversationStatus,
    ConversationTopic, DeskError, IntegrationProgress, MessageId, MessageRole, Priority,
    SupportMessage, TechStack,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::Database;
use crate::events::{ChatEvent, Subscription, SubscriptionHub};
use crate::queries;

/// Fields a caller may provide when opening a conversation. Only the
/// session id is required; anonymous visitors have nothing else yet.
#[derive(Debug, Clone, Default)]
pub struct ConversationInit {
    pub session_id: String,
    pub partner_id: Option<String>,
    pub partner_email: Option<String>,
    pub partner_name: Option<String>,
    pub page_url: Option<String>,
    pub onboarding_step: Option<u8>,
    pub topic: Option<ConversationTopic>,
    pub tech_stack: Option<TechStack>,
    pub integration_progress: Option<IntegrationProgress>,
}

impl ConversationInit {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Self::default()
        }
    }
}

/// A message to append to a conversation.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub role: MessageRole,
    pub content: String,
    /// Explicit content type; inferred from `code_snippet` when `None`.
    pub content_type: Option<ContentType>,
    pub code_snippet: Option<String>,
    pub code_language: Option<String>,
    pub tools_used: Option<Vec<String>>,
}

impl NewMessage {
    pub fn text(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            content_type: None,
            code_snippet: None,
            code_language: None,
            tools_used: None,
        }
    }
}

/// Partial context update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ContextUpdate {
    pub topic: Option<ConversationTopic>,
    pub tech_stack: Option<TechStack>,
    pub integration_progress: Option<IntegrationProgress>,
    pub priority: Option<Priority>,
}

/// Storage-backed chat service with live event fan-out.
#[derive(Clone)]
pub struct ChatService {
    db: Database,
    hub: Arc<SubscriptionHub>,
}

impl ChatService {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            hub: Arc::new(SubscriptionHub::new()),
        }
    }

    /// Subscribe to live events on a conversation.
    pub fn subscribe(&self, conversation_id: &str) -> Subscription {
        self.hub.subscribe(conversation_id)
    }

    /// Open a new conversation. Starts active at normal priority.
    pub async fn start_conversation(
        &self,
        init: ConversationInit,
    ) -> Result<Conversation, DeskError> {
        let now = Utc::now();
        let convo = Conversation {
            id: ConversationId(Uuid::new_v4().to_string()),
            partner_id: init.partner_id,
            partner_email: init.partner_email,
            partner_name: init.partner_name,
            session_id: init.session_id,
            page_url: init.page_url,
            onboarding_step: init.onboarding_step,
            topic: init.topic,
            tech_stack: init.tech_stack,
            integration_progress: init.integration_progress,
            status: ConversationStatus::Active,
            priority: Priority::Normal,
            escalated_at: None,
            escalated_to: None,
            escalation_reason: None,
            resolution: None,
            resolved_at: None,
            helpful_rating: None,
            feedback: None,
            assigned_admin_id: None,
            assigned_admin_name: None,
            admin_takeover: false,
            created_at: now,
            updated_at: now,
        };
        queries::conversations::insert_conversation(&self.db, &convo).await?;
        info!(conversation_id = %convo.id, session_id = %convo.session_id, "conversation started");
        Ok(convo)
    }

    /// Load an existing conversation by id.
    pub async fn resume_conversation(&self, id: &str) -> Result<Conversation, DeskError> {
        queries::conversations::get_conversation(&self.db, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Full message history, oldest first.
    pub async fn conversation_messages(
        &self,
        id: &str,
    ) -> Result<Vec<SupportMessage>, DeskError> {
        queries::messages::get_messages_for_conversation(&self.db, id).await
    }

    /// Append a message, bump the conversation's activity timestamp, and
    /// notify subscribers.
    pub async fn send_message(
        &self,
        conversation_id: &str,
        new: NewMessage,
    ) -> Result<SupportMessage, DeskError> {
        let now = Utc::now();
        let touched = queries::conversations::touch(&self.db, conversation_id, now).await?;
        if touched == 0 {
            return Err(not_found(conversation_id));
        }

        let message = SupportMessage {
            id: MessageId(Uuid::new_v4().to_string()),
            conversation_id: ConversationId(conversation_id.to_string()),
            role: new.role,
            content: new.content,
            content_type: infer_content_type(new.content_type, new.code_snippet.as_deref()),
            code_snippet: new.code_snippet,
            code_language: new.code_language,
            tools_used: new.tools_used,
            created_at: now,
        };
        queries::messages::insert_message(&self.db, &message).await?;
        debug!(conversation_id, message_id = %message.id, role = %message.role, "message stored");

        self.hub
            .publish(conversation_id, ChatEvent::MessageInserted(message.clone()));
        Ok(message)
    }

    /// Merge new context into the conversation. `None` fields keep their
    /// stored values.
    pub async fn update_context(
        &self,
        conversation_id: &str,
        update: ContextUpdate,
    ) -> Result<(), DeskError> {
        let count = queries::conversations::update_context(
            &self.db,
            conversation_id,
            update.topic,
            update.tech_stack.as_ref(),
            update.integration_progress.as_ref(),
            update.priority,
            Utc::now(),
        )
        .await?;
        require_row(count, conversation_id)
    }

    /// Close out a conversation. Escalation history is preserved.
    pub async fn resolve_conversation(
        &self,
        conversation_id: &str,
        resolution: Option<String>,
    ) -> Result<(), DeskError> {
        let count =
            queries::conversations::mark_resolved(&self.db, conversation_id, resolution, Utc::now())
                .await?;
        require_row(count, conversation_id)?;
        info!(conversation_id, "conversation resolved");
        self.publish_status(conversation_id, ConversationStatus::Resolved);
        Ok(())
    }

    /// Hand a conversation to the human team. Raises priority to high.
    pub async fn escalate_conversation(
        &self,
        conversation_id: &str,
        reason: impl Into<String>,
        escalated_to: Option<String>,
    ) -> Result<(), DeskError> {
        let reason = reason.into();
        let count = queries::conversations::mark_escalated(
            &self.db,
            conversation_id,
            reason.clone(),
            escalated_to,
            Utc::now(),
        )
        .await?;
        require_row(count, conversation_id)?;
        info!(conversation_id, reason, "conversation escalated");
        self.publish_status(conversation_id, ConversationStatus::Escalated);
        Ok(())
    }

    /// Record a satisfaction rating. Allowed in any status.
    pub async fn rate_conversation(
        &self,
        conversation_id: &str,
        rating: u8,
        feedback: Option<String>,
    ) -> Result<(), DeskError> {
        if !(1..=5).contains(&rating) {
            return Err(DeskError::Internal(format!(
                "helpful_rating must be between 1 and 5, got {rating}"
            )));
        }
        let count =
            queries::conversations::set_rating(&self.db, conversation_id, rating, feedback, Utc::now())
                .await?;
        require_row(count, conversation_id)
    }

    /// Assign a human admin to take the conversation over.
    pub async fn assign_admin(
        &self,
        conversation_id: &str,
        admin_id: impl Into<String>,
        admin_name: impl Into<String>,
    ) -> Result<(), DeskError> {
        let admin_id = admin_id.into();
        let count = queries::conversations::assign_admin(
            &self.db,
            conversation_id,
            admin_id.clone(),
            admin_name.into(),
            Utc::now(),
        )
        .await?;
        require_row(count, conversation_id)?;
        info!(conversation_id, admin_id, "admin takeover");
        Ok(())
    }

    /// Conversations still needing attention, most recently active first.
    pub async fn active_conversations(&self) -> Result<Vec<Conversation>, DeskError> {
        queries::conversations::list_active(&self.db).await
    }

    fn publish_status(&self, conversation_id: &str, status: ConversationStatus) {
        self.hub.publish(
            conversation_id,
            ChatEvent::StatusChanged {
                conversation_id: ConversationId(conversation_id.to_string()),
                status,
            },
        );
    }
}

fn not_found(id: &str) -> DeskError {
    DeskError::NotFound {
        entity: "conversation",
        id: id.to_string(),
    }
}

fn require_row(count: usize, id: &str) -> Result<(), DeskError> {
    if count == 0 {
        Err(not_found(id))
    } else {
        Ok(())
    }
}
