// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Partnerdesk support assistant.
//!
//! This crate provides the shared error type, the conversation/message
//! domain model, and the completion-service boundary used by the agent.
//! All other workspace crates depend on it.

pub mod completion;
pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use completion::{
    ChatMessage, ChatRequest, ChatResponse, ChatRole, CompletionProvider, ToolCall,
    ToolDefinition,
};
pub use error::DeskError;
pub use types::{
    infer_content_type, Conversation, ConversationId, ConversationStatus, ConversationTopic,
    ContentType,
    IntegrationProgress, MessageId, MessageRole, Priority, SupportMessage, TechStack,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_types_are_exported_at_root() {
        let _id = ConversationId("c-1".into());
        let _status = ConversationStatus::Active;
        let _role = MessageRole::Assistant;
        let _msg = ChatMessage::user("hello");
    }

    #[test]
    fn completion_provider_is_object_safe() {
        fn _assert(_p: &dyn CompletionProvider) {}
    }
}
