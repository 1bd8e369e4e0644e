// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation CRUD and state-transition queries.
//!
//! Update queries return the affected row count; the service layer maps a
//! count of zero to `DeskError::NotFound`.

use chrono::{DateTime, Utc};
use partnerdesk_core::{
    Conversation, ConversationId, ConversationTopic, DeskError, IntegrationProgress, Priority,
    TechStack,
};
use rusqlite::params;

use crate::database::{map_tr_err, Database};
use crate::queries::{format_timestamp, parse_json, parse_text_enum, parse_timestamp, to_json};

const COLUMNS: &str = "id, partner_id, partner_email, partner_name, session_id, page_url,
     onboarding_step, topic, tech_stack, integration_progress, status, priority,
     escalated_at, escalated_to, escalation_reason, resolution, resolved_at,
     helpful_rating, feedback, assigned_admin_id, assigned_admin_name,
     admin_takeover, created_at, updated_at";

fn row_to_conversation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Conversation> {
    let topic: Option<String> = row.get(7)?;
    let tech_stack: Option<String> = row.get(8)?;
    let integration_progress: Option<String> = row.get(9)?;
    let status: String = row.get(10)?;
    let priority: String = row.get(11)?;
    let escalated_at: Option<String> = row.get(12)?;
    let resolved_at: Option<String> = row.get(16)?;
    let created_at: String = row.get(22)?;
    let updated_at: String = row.get(23)?;

    Ok(Conversation {
        id: ConversationId(row.get(0)?),
        partner_id: row.get(1)?,
        partner_email: row.get(2)?,
        partner_name: row.get(3)?,
        session_id: row.get(4)?,
        page_url: row.get(5)?,
        onboarding_step: row.get(6)?,
        topic: topic.map(|s| parse_text_enum(7, s)).transpose()?,
        tech_stack: tech_stack.map(|s| parse_json(8, s)).transpose()?,
        integration_progress: integration_progress
            .map(|s| parse_json(9, s))
            .transpose()?,
        status: parse_text_enum(10, status)?,
        priority: parse_text_enum(11, priority)?,
        escalated_at: escalated_at.map(|s| parse_timestamp(12, s)).transpose()?,
        escalated_to: row.get(13)?,
        escalation_reason: row.get(14)?,
        resolution: row.get(15)?,
        resolved_at: resolved_at.map(|s| parse_timestamp(16, s)).transpose()?,
        helpful_rating: row.get(17)?,
        feedback: row.get(18)?,
        assigned_admin_id: row.get(19)?,
        assigned_admin_name: row.get(20)?,
        admin_takeover: row.get(21)?,
        created_at: parse_timestamp(22, created_at)?,
        updated_at: parse_timestamp(23, updated_at)?,
    })
}

/// Insert a new conversation row.
pub async fn insert_conversation(db: &Database, convo: &Conversation) -> Result<(), DeskError> {
    let c = convo.clone();
    let tech_stack = c.tech_stack.as_ref().map(to_json).transpose()?;
    let integration_progress = c.integration_progress.as_ref().map(to_json).transpose()?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO conversations (
                     id, partner_id, partner_email, partner_name, session_id, page_url,
                     onboarding_step, topic, tech_stack, integration_progress, status,
                     priority, escalated_at, escalated_to, escalation_reason, resolution,
                     resolved_at, helpful_rating, feedback, assigned_admin_id,
                     assigned_admin_name, admin_takeover, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                         ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24)",
                params![
                    c.id.0,
                    c.partner_id,
                    c.partner_email,
                    c.partner_name,
                    c.session_id,
                    c.page_url,
                    c.onboarding_step,
                    c.topic.map(|t| t.to_string()),
                    tech_stack,
                    integration_progress,
                    c.status.to_string(),
                    c.priority.to_string(),
                    c.escalated_at.map(format_timestamp),
                    c.escalated_to,
                    c.escalation_reason,
                    c.resolution,
                    c.resolved_at.map(format_timestamp),
                    c.helpful_rating,
                    c.feedback,
                    c.assigned_admin_id,
                    c.assigned_admin_name,
                    c.admin_takeover,
                    format_timestamp(c.created_at),
                    format_timestamp(c.updated_at),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch a single conversation by id.
pub async fn get_conversation(db: &Database, id: &str) -> Result<Option<Conversation>, DeskError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM conversations WHERE id = ?1"
            ))?;
            let mut rows = stmt.query_map(params![id], row_to_conversation)?;
            match rows.next() {
                Some(row) => Ok(Some(row?)),
                None => Ok(None),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Partial context update. `None` fields keep their stored value.
pub async fn update_context(
    db: &Database,
    id: &str,
    topic: Option<ConversationTopic>,
    tech_stack: Option<&TechStack>,
    integration_progress: Option<&IntegrationProgress>,
    priority: Option<Priority>,
    now: DateTime<Utc>,
) -> Result<usize, DeskError> {
    let id = id.to_string();
    let tech_stack = tech_stack.map(to_json).transpose()?;
    let integration_progress = integration_progress.map(to_json).transpose()?;
    db.connection()
        .call(move |conn| {
            let count = conn.execute(
                "UPDATE conversations SET
                     topic = COALESCE(?2, topic),
                     tech_stack = COALESCE(?3, tech_stack),
                     integration_progress = COALESCE(?4, integration_progress),
                     priority = COALESCE(?5, priority),
                     updated_at = ?6
                 WHERE id = ?1",
                params![
                    id,
                    topic.map(|t| t.to_string()),
                    tech_stack,
                    integration_progress,
                    priority.map(|p| p.to_string()),
                    format_timestamp(now),
                ],
            )?;
            Ok(count)
        })
        .await
        .map_err(map_tr_err)
}

/// Mark a conversation resolved. Escalation history is left intact.
pub async fn mark_resolved(
    db: &Database,
    id: &str,
    resolution: Option<String>,
    now: DateTime<Utc>,
) -> Result<usize, DeskError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let count = conn.execute(
                "UPDATE conversations SET
                     status = 'resolved', resolution = ?2, resolved_at = ?3, updated_at = ?3
                 WHERE id = ?1",
                params![id, resolution, format_timestamp(now)],
            )?;
            Ok(count)
        })
        .await
        .map_err(map_tr_err)
}

/// Mark a conversation escalated and raise its priority to high.
pub async fn mark_escalated(
    db: &Database,
    id: &str,
    reason: String,
    escalated_to: Option<String>,
    now: DateTime<Utc>,
) -> Result<usize, DeskError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let count = conn.execute(
                "UPDATE conversations SET
                     status = 'escalated', priority = 'high', escalation_reason = ?2,
                     escalated_to = ?3, escalated_at = ?4, updated_at = ?4
                 WHERE id = ?1",
                params![id, reason, escalated_to, format_timestamp(now)],
            )?;
            Ok(count)
        })
        .await
        .map_err(map_tr_err)
}

/// Record a satisfaction rating, allowed in any status.
pub async fn set_rating(
    db: &Database,
    id: &str,
    rating: u8,
    feedback: Option<String>,
    now: DateTime<Utc>,
) -> Result<usize, DeskError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let count = conn.execute(
                "UPDATE conversations SET
                     helpful_rating = ?2, feedback = ?3, updated_at = ?4
                 WHERE id = ?1",
                params![id, rating, feedback, format_timestamp(now)],
            )?;
            Ok(count)
        })
        .await
        .map_err(map_tr_err)
}

/// Assign a human admin and flag the takeover.
pub async fn assign_admin(
    db: &Database,
    id: &str,
    admin_id: String,
    admin_name: String,
    now: DateTime<Utc>,
) -> Result<usize, DeskError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let count = conn.execute(
                "UPDATE conversations SET
                     assigned_admin_id = ?2, assigned_admin_name = ?3,
                     admin_takeover = 1, updated_at = ?4
                 WHERE id = ?1",
                params![id, admin_id, admin_name, format_timestamp(now)],
            )?;
            Ok(count)
        })
        .await
        .map_err(map_tr_err)
}

/// Bump `updated_at`, used when a message lands in the conversation.
pub async fn touch(db: &Database, id: &str, now: DateTime<Utc>) -> Result<usize, DeskError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let count = conn.execute(
                "UPDATE conversations SET updated_at = ?2 WHERE id = ?1",
                params![id, format_timestamp(now)],
            )?;
            Ok(count)
        })
        .await
        .map_err(map_tr_err)
}

/// All conversations still needing attention, most recently active first.
pub async fn list_active(db: &Database) -> Result<Vec<Conversation>, DeskError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM conversations
                 WHERE status IN ('active', 'escalated')
                 ORDER BY updated_at DESC"
            ))?;
            let rows = stmt.query_map([], row_to_conversation)?;
            let mut conversations = Vec::new();
            for row in rows {
                conversations.push(row?);
            }
            Ok(conversations)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use partnerdesk_core::ConversationStatus;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("test.db")).await.unwrap();
        (db, dir)
    }

    fn ts(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, secs).unwrap()
    }

    fn make_convo(id: &str) -> Conversation {
        Conversation {
            id: ConversationId(id.to_string()),
            partner_id: Some("partner-1".to_string()),
            partner_email: None,
            partner_name: Some("Acme Yoga".to_string()),
            session_id: "sess-1".to_string(),
            page_url: Some("/onboarding/widget".to_string()),
            onboarding_step: Some(2),
            topic: Some(ConversationTopic::WidgetInstall),
            tech_stack: Some(TechStack {
                framework: Some("react".to_string()),
                ..TechStack::default()
            }),
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
        }
    }

    #[tokio::test]
    async fn insert_and_get_roundtrip() {
        let (db, _dir) = setup_db().await;
        let convo = make_convo("c-1");
        insert_conversation(&db, &convo).await.unwrap();

        let got = get_conversation(&db, "c-1").await.unwrap().unwrap();
        assert_eq!(got.id.0, "c-1");
        assert_eq!(got.topic, Some(ConversationTopic::WidgetInstall));
        assert_eq!(got.status, ConversationStatus::Active);
        assert_eq!(got.priority, Priority::Normal);
        assert_eq!(
            got.tech_stack.unwrap().framework.as_deref(),
            Some("react")
        );
        assert_eq!(got.onboarding_step, Some(2));
        assert_eq!(got.created_at, ts(0));
        assert!(!got.admin_takeover);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_conversation(&db, "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_context_keeps_unset_fields() {
        let (db, _dir) = setup_db().await;
        insert_conversation(&db, &make_convo("c-1")).await.unwrap();

        let count = update_context(
            &db,
            "c-1",
            None,
            None,
            Some(&IntegrationProgress {
                widget_installed: true,
                ..IntegrationProgress::default()
            }),
            Some(Priority::High),
            ts(5),
        )
        .await
        .unwrap();
        assert_eq!(count, 1);

        let got = get_conversation(&db, "c-1").await.unwrap().unwrap();
        // Untouched fields survive the partial update.
        assert_eq!(got.topic, Some(ConversationTopic::WidgetInstall));
        assert_eq!(got.tech_stack.unwrap().framework.as_deref(), Some("react"));
        assert!(got.integration_progress.unwrap().widget_installed);
        assert_eq!(got.priority, Priority::High);
        assert_eq!(got.updated_at, ts(5));
    }

    #[tokio::test]
    async fn escalate_then_resolve_keeps_history() {
        let (db, _dir) = setup_db().await;
        insert_conversation(&db, &make_convo("c-1")).await.unwrap();

        mark_escalated(&db, "c-1", "stuck on webhooks".to_string(), None, ts(1))
            .await
            .unwrap();
        mark_resolved(&db, "c-1", Some("fixed signature check".to_string()), ts(2))
            .await
            .unwrap();

        let got = get_conversation(&db, "c-1").await.unwrap().unwrap();
        assert_eq!(got.status, ConversationStatus::Resolved);
        assert_eq!(got.escalation_reason.as_deref(), Some("stuck on webhooks"));
        assert_eq!(got.escalated_at, Some(ts(1)));
        assert_eq!(got.resolved_at, Some(ts(2)));
        assert_eq!(got.priority, Priority::High);
    }

    #[tokio::test]
    async fn update_on_missing_row_affects_nothing() {
        let (db, _dir) = setup_db().await;
        let count = mark_resolved(&db, "ghost", None, ts(0)).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn list_active_filters_and_orders() {
        let (db, _dir) = setup_db().await;
        for id in ["c-1", "c-2", "c-3"] {
            insert_conversation(&db, &make_convo(id)).await.unwrap();
        }
        mark_resolved(&db, "c-2", None, ts(1)).await.unwrap();
        mark_escalated(&db, "c-3", "needs a human".to_string(), None, ts(2))
            .await
            .unwrap();
        touch(&db, "c-1", ts(3)).await.unwrap();

        let active = list_active(&db).await.unwrap();
        let ids: Vec<&str> = active.iter().map(|c| c.id.0.as_str()).collect();
        assert_eq!(ids, vec!["c-1", "c-3"]);
    }

    #[tokio::test]
    async fn rating_and_admin_assignment() {
        let (db, _dir) = setup_db().await;
        insert_conversation(&db, &make_convo("c-1")).await.unwrap();

        set_rating(&db, "c-1", 4, Some("helpful".to_string()), ts(1))
            .await
            .unwrap();
        assign_admin(&db, "c-1", "admin-9".to_string(), "Sam".to_string(), ts(2))
            .await
            .unwrap();

        let got = get_conversation(&db, "c-1").await.unwrap().unwrap();
        assert_eq!(got.helpful_rating, Some(4));
        assert_eq!(got.feedback.as_deref(), Some("helpful"));
        assert_eq!(got.assigned_admin_id.as_deref(), Some("admin-9"));
        assert!(got.admin_takeover);
    }
}
