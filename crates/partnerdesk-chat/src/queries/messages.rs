// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message persistence. Messages are append-only.

use partnerdesk_core::{ConversationId, DeskError, MessageId, SupportMessage};
use rusqlite::params;

use crate::database::{map_tr_err, Database};
use crate::queries::{format_timestamp, parse_json, parse_text_enum, parse_timestamp, to_json};

/// Insert a new message.
pub async fn insert_message(db: &Database, msg: &SupportMessage) -> Result<(), DeskError> {
    let m = msg.clone();
    let tools_used = m.tools_used.as_ref().map(to_json).transpose()?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO messages (id, conversation_id, role, content, content_type,
                     code_snippet, code_language, tools_used, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    m.id.0,
                    m.conversation_id.0,
                    m.role.to_string(),
                    m.content,
                    m.content_type.to_string(),
                    m.code_snippet,
                    m.code_language,
                    tools_used,
                    format_timestamp(m.created_at),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get a conversation's messages in chronological order.
///
/// Ties on `created_at` fall back to insertion order, so same-millisecond
/// messages still come back in the order they were appended.
pub async fn get_messages_for_conversation(
    db: &Database,
    conversation_id: &str,
) -> Result<Vec<SupportMessage>, DeskError> {
    let conversation_id = conversation_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, conversation_id, role, content, content_type,
                        code_snippet, code_language, tools_used, created_at
                 FROM messages WHERE conversation_id = ?1
                 ORDER BY created_at ASC, rowid ASC",
            )?;
            let rows = stmt.query_map(params![conversation_id], |row| {
                let role: String = row.get(2)?;
                let content_type: String = row.get(4)?;
                let tools_used: Option<String> = row.get(7)?;
                let created_at: String = row.get(8)?;
                Ok(SupportMessage {
                    id: MessageId(row.get(0)?),
                    conversation_id: ConversationId(row.get(1)?),
                    role: parse_text_enum(2, role)?,
                    content: row.get(3)?,
                    content_type: parse_text_enum(4, content_type)?,
                    code_snippet: row.get(5)?,
                    code_language: row.get(6)?,
                    tools_used: tools_used.map(|s| parse_json(7, s)).transpose()?,
                    created_at: parse_timestamp(8, created_at)?,
                })
            })?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::conversations::insert_conversation;
    use chrono::{DateTime, TimeZone, Utc};
    use partnerdesk_core::{
        ContentType, Conversation, ConversationStatus, MessageRole, Priority,
    };
    use tempfile::tempdir;

    fn ts(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, secs).unwrap()
    }

    async fn setup_db_with_conversation() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("test.db")).await.unwrap();
        let convo = Conversation {
            id: ConversationId("c-1".to_string()),
            partner_id: None,
            partner_email: None,
            partner_name: None,
            session_id: "sess-1".to_string(),
            page_url: None,
            onboarding_step: None,
            topic: None,
            tech_stack: None,
            integration_progress: None,
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
            created_at: ts(0),
            updated_at: ts(0),
        };
        insert_conversation(&db, &convo).await.unwrap();
        (db, dir)
    }

    fn make_msg(id: &str, role: MessageRole, content: &str, secs: u32) -> SupportMessage {
        SupportMessage {
            id: MessageId(id.to_string()),
            conversation_id: ConversationId("c-1".to_string()),
            role,
            content: content.to_string(),
            content_type: ContentType::Text,
            code_snippet: None,
            code_language: None,
            tools_used: None,
            created_at: ts(secs),
        }
    }

    #[tokio::test]
    async fn insert_and_get_messages_in_order() {
        let (db, _dir) = setup_db_with_conversation().await;

        let m1 = make_msg("m1", MessageRole::User, "the widget won't load", 1);
        let m2 = make_msg("m2", MessageRole::Assistant, "let's check your embed", 2);
        insert_message(&db, &m1).await.unwrap();
        insert_message(&db, &m2).await.unwrap();

        let messages = get_messages_for_conversation(&db, "c-1").await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id.0, "m1");
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].id.0, "m2");
    }

    #[tokio::test]
    async fn same_timestamp_keeps_insertion_order() {
        let (db, _dir) = setup_db_with_conversation().await;
        for id in ["m1", "m2", "m3"] {
            insert_message(&db, &make_msg(id, MessageRole::User, "ping", 1))
                .await
                .unwrap();
        }
        let messages = get_messages_for_conversation(&db, "c-1").await.unwrap();
        let ids: Vec<&str> = messages.iter().map(|m| m.id.0.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
    }

    #[tokio::test]
    async fn code_fields_and_tools_roundtrip() {
        let (db, _dir) = setup_db_with_conversation().await;
        let msg = SupportMessage {
            content_type: ContentType::Code,
            code_snippet: Some("<BookingWidget />".to_string()),
            code_language: Some("tsx".to_string()),
            tools_used: Some(vec!["generate_widget_code".to_string()]),
            ..make_msg("m1", MessageRole::Assistant, "here you go", 1)
        };
        insert_message(&db, &msg).await.unwrap();

        let got = &get_messages_for_conversation(&db, "c-1").await.unwrap()[0];
        assert_eq!(got.content_type, ContentType::Code);
        assert_eq!(got.code_language.as_deref(), Some("tsx"));
        assert_eq!(
            got.tools_used.as_deref(),
            Some(&["generate_widget_code".to_string()][..])
        );
    }

    #[tokio::test]
    async fn empty_conversation_has_no_messages() {
        let (db, _dir) = setup_db_with_conversation().await;
        let messages = get_messages_for_conversation(&db, "c-1").await.unwrap();
        assert!(messages.is_empty());
    }
}
