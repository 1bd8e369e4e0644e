// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive support chat over stdin/stdout.

use std::sync::Arc;

use chrono::Utc;
use partnerdesk_agent::{AgentContext, SupportAgent};
use partnerdesk_chat::{ChatService, ConversationInit, Database, NewMessage};
use partnerdesk_config::DeskConfig;
use partnerdesk_core::{CompletionProvider, DeskError, MessageRole};
use partnerdesk_kb::SearchEngine;
use partnerdesk_openai::OpenAiClient;
use partnerdesk_tools::{StatusClient, ToolExecutor};
use partnerdesk_triggers::TriggerEngine;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

/// Runs an interactive chat session until EOF or an exit command.
pub async fn run(
    config: &DeskConfig,
    conversation: Option<String>,
    partner_id: Option<String>,
) -> Result<(), DeskError> {
    let db = Database::open(&config.storage.database_path).await?;
    let service = ChatService::new(db);

    let search = Arc::new(SearchEngine::with_seed());
    let status = StatusClient::new(&config.status_api)?;
    let executor = ToolExecutor::new(search, status);
    let provider: Arc<dyn CompletionProvider> = Arc::new(OpenAiClient::new(&config.openai)?);
    let agent = SupportAgent::new(provider, executor, config.agent.max_tool_rounds)
        .with_context(AgentContext {
            partner_id: partner_id.clone(),
            ..AgentContext::default()
        });

    let convo = match conversation {
        Some(id) => service.resume_conversation(&id).await?,
        None => {
            let init = ConversationInit {
                partner_id,
                ..ConversationInit::new(format!("cli-{}", std::process::id()))
            };
            service.start_conversation(init).await?
        }
    };
    info!(conversation_id = %convo.id, "chat session open");

    let triggers = TriggerEngine::new(config.triggers.clone(), Utc::now());
    println!("{}", triggers.contextual_greeting());
    println!("(conversation {}; type 'exit' to quit)\n", convo.id);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"you> ").await.map_err(io_err)?;
        stdout.flush().await.map_err(io_err)?;

        let line = match lines.next_line().await.map_err(io_err)? {
            Some(line) => line.trim().to_string(),
            None => break,
        };
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        // History is everything before this turn's user message.
        let history = service.conversation_messages(&convo.id.0).await?;
        service
            .send_message(&convo.id.0, NewMessage::text(MessageRole::User, &line))
            .await?;

        let reply = agent.chat(&history, &line).await?;
        service
            .send_message(
                &convo.id.0,
                NewMessage {
                    code_snippet: reply.code_snippet.clone(),
                    code_language: reply.code_language.clone(),
                    tools_used: (!reply.tools_used.is_empty()).then(|| reply.tools_used.clone()),
                    ..NewMessage::text(MessageRole::Assistant, &reply.content)
                },
            )
            .await?;

        println!("\n{}\n", reply.content);
        if let (Some(code), Some(language)) = (&reply.code_snippet, &reply.code_language) {
            println!("--- {language} ---\n{code}\n---\n");
        }

        if reply.should_escalate {
            let reason = reply
                .escalation_reason
                .unwrap_or_else(|| "assistant requested escalation".to_string());
            service
                .escalate_conversation(&convo.id.0, reason, None)
                .await?;
            println!("(this conversation has been escalated to the support team)\n");
        }
    }

    Ok(())
}

/// Prints conversations still needing attention, most recent first.
pub async fn list_active(config: &DeskConfig) -> Result<(), DeskError> {
    let db = Database::open(&config.storage.database_path).await?;
    let service = ChatService::new(db);

    let active = service.active_conversations().await?;
    if active.is_empty() {
        println!("No active conversations.");
        return Ok(());
    }
    for convo in active {
        let topic = convo
            .topic
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        let who = convo.partner_name.as_deref().unwrap_or("anonymous");
        println!(
            "{}  [{} / {}]  topic={topic}  partner={who}  updated={}",
            convo.id,
            convo.status,
            convo.priority,
            convo.updated_at.format("%Y-%m-%d %H:%M"),
        );
    }
    Ok(())
}

fn io_err(err: std::io::Error) -> DeskError {
    DeskError::Internal(format!("terminal i/o failed: {err}"))
}
