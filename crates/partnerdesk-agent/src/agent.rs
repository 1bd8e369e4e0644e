// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The tool-calling conversation loop.
//!
//! Each `chat()` call composes the system prompt, history, and new user
//! message, then alternates completion requests and tool rounds until the
//! model stops requesting tools or the round cap is hit.

use std::sync::Arc;

use partnerdesk_core::completion::{ChatMessage, ChatRequest, CompletionProvider};
use partnerdesk_core::types::{MessageRole, SupportMessage};
use partnerdesk_core::DeskError;
use partnerdesk_tools::ToolExecutor;
use tracing::{debug, info, warn};

use crate::context::AgentContext;

const SYSTEM_PROMPT: &str = "You are a technical integration specialist for Daily Event Insurance. You help partners with onboarding, POS system integrations, API endpoint management, widget installation, and troubleshooting.

Your expertise:
- Widget installation (JavaScript embed, React component, Vue component)
- REST API integration (quotes, policies, webhooks)
- POS system integrations (Mindbody, Pike13, ClubReady, Mariana Tek, Square)
- Booking platform connections (Calendly, Acuity, custom systems)
- Troubleshooting integration issues
- Code snippet generation for partner's tech stack

Guidelines:
- Be technical but accessible - explain concepts clearly
- Provide code examples when helpful, using the partner's tech stack
- If you detect an error, explain what went wrong and how to fix it
- For complex custom integrations, use the escalate_to_dev_team tool
- Always confirm their tech stack before providing code
- Use tools to generate code, check integration status, and look up documentation
- Keep responses concise but thorough";

const EMPTY_RESPONSE_FALLBACK: &str =
    "I apologize, but I couldn't generate a response. Please try again.";

const ROUND_CAP_NOTE: &str = "I've hit my limit for automated steps on this one. Let me escalate it to the team so a specialist can follow up.";

/// The agent's answer for one conversation turn.
///
/// `should_escalate` is advisory: the agent never talks to the chat
/// service itself, the caller acts on the flag.
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub content: String,
    /// Names of tools invoked, in execution order (repeats allowed).
    pub tools_used: Vec<String>,
    /// Last code artifact produced during the turn, if any.
    pub code_snippet: Option<String>,
    pub code_language: Option<String>,
    pub should_escalate: bool,
    pub escalation_reason: Option<String>,
}

/// Tool-calling support agent.
pub struct SupportAgent {
    provider: Arc<dyn CompletionProvider>,
    executor: ToolExecutor,
    context: AgentContext,
    max_tool_rounds: u32,
}

impl SupportAgent {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        executor: ToolExecutor,
        max_tool_rounds: u32,
    ) -> Self {
        Self {
            provider,
            executor,
            context: AgentContext::default(),
            max_tool_rounds,
        }
    }

    /// Sets the initial conversation context.
    pub fn with_context(mut self, context: AgentContext) -> Self {
        self.context = context;
        self
    }

    /// Shallow-merges updates into the working context for later turns.
    pub fn update_context(&mut self, updates: AgentContext) {
        self.context.merge(updates);
    }

    pub fn context(&self) -> &AgentContext {
        &self.context
    }

    /// Runs one conversation turn: prior history plus the new user message
    /// in, final assistant text (and any tool artifacts) out.
    pub async fn chat(
        &self,
        history: &[SupportMessage],
        user_message: &str,
    ) -> Result<AgentReply, DeskError> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(self.system_message()));
        for prior in history {
            messages.push(match prior.role {
                MessageRole::User => ChatMessage::user(prior.content.clone()),
                MessageRole::Assistant => ChatMessage::assistant(prior.content.clone()),
                MessageRole::System => ChatMessage::system(prior.content.clone()),
            });
        }
        messages.push(ChatMessage::user(user_message));

        let tools = self.executor.definitions();

        let mut tools_used: Vec<String> = Vec::new();
        let mut code_snippet: Option<String> = None;
        let mut code_language: Option<String> = None;
        let mut should_escalate = false;
        let mut escalation_reason: Option<String> = None;
        let mut partial_content: Option<String> = None;

        for round in 0..self.max_tool_rounds {
            let response = self
                .provider
                .complete(ChatRequest {
                    messages: messages.clone(),
                    tools: tools.clone(),
                    max_tokens: None,
                    temperature: None,
                })
                .await?;

            if !response.has_tool_calls() {
                let content = response
                    .content
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| EMPTY_RESPONSE_FALLBACK.to_string());
                info!(rounds = round, tools = tools_used.len(), "agent turn complete");
                return Ok(AgentReply {
                    content,
                    tools_used,
                    code_snippet,
                    code_language,
                    should_escalate,
                    escalation_reason,
                });
            }

            debug!(round, calls = response.tool_calls.len(), "tool round");
            if let Some(content) = &response.content {
                if !content.trim().is_empty() {
                    partial_content = Some(content.clone());
                }
            }
            messages.push(ChatMessage::assistant_tool_calls(
                response.content.clone(),
                response.tool_calls.clone(),
            ));

            // Tool results must keep positional correspondence with the
            // model's call ids, so execution stays in model order.
            for call in &response.tool_calls {
                tools_used.push(call.name.clone());
                let outcome = self.executor.execute_call(call).await;

                if let Some(code) = &outcome.code {
                    code_snippet = Some(code.clone());
                    code_language = outcome.language.clone();
                }
                if let Some(signal) = &outcome.escalation {
                    should_escalate = true;
                    escalation_reason = Some(signal.reason.clone());
                }

                messages.push(ChatMessage::tool_result(
                    call.id.clone(),
                    outcome.to_model_json(),
                ));
            }
        }

        // Round cap hit against a model that keeps requesting tools.
        warn!(
            max_tool_rounds = self.max_tool_rounds,
            "tool round cap reached, advising escalation"
        );
        let content = match partial_content {
            Some(text) => format!("{text}\n\n{ROUND_CAP_NOTE}"),
            None => ROUND_CAP_NOTE.to_string(),
        };
        Ok(AgentReply {
            content,
            tools_used,
            code_snippet,
            code_language,
            should_escalate: true,
            escalation_reason: escalation_reason
                .or_else(|| Some("tool round limit reached".to_string())),
        })
    }

    fn system_message(&self) -> String {
        let context_block = self.context.render();
        if context_block.is_empty() {
            SYSTEM_PROMPT.to_string()
        } else {
            format!("{SYSTEM_PROMPT}\n\n{context_block}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use partnerdesk_config::StatusApiConfig;
    use partnerdesk_core::completion::{ChatResponse, ToolCall};
    use partnerdesk_core::types::ConversationTopic;
    use partnerdesk_kb::SearchEngine;
    use partnerdesk_tools::StatusClient;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Plays back a fixed sequence of responses and records requests.
    struct ScriptedProvider {
        responses: Mutex<VecDeque<ChatResponse>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<ChatResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, DeskError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| DeskError::Provider {
                    message: "script exhausted".to_string(),
                    source: None,
                })
        }
    }

    /// Requests the same tool forever; used to exercise the round cap.
    struct RelentlessToolCaller;

    #[async_trait]
    impl CompletionProvider for RelentlessToolCaller {
        async fn complete(&self, _request: ChatRequest) -> Result<ChatResponse, DeskError> {
            Ok(ChatResponse {
                content: None,
                tool_calls: vec![tool_call("c1", "search_integration_docs", r#"{"query":"widget"}"#)],
            })
        }
    }

    fn tool_call(id: &str, name: &str, arguments: &str) -> ToolCall {
        ToolCall {
            id: id.to_string(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        }
    }

    fn text_response(content: &str) -> ChatResponse {
        ChatResponse {
            content: Some(content.to_string()),
            tool_calls: Vec::new(),
        }
    }

    fn executor() -> ToolExecutor {
        let status = StatusClient::new(&StatusApiConfig {
            base_url: None,
            timeout_secs: 2,
            fallback_to_mock: true,
        })
        .unwrap();
        ToolExecutor::new(Arc::new(SearchEngine::with_seed()), status)
    }

    fn agent(provider: impl CompletionProvider + 'static) -> SupportAgent {
        SupportAgent::new(Arc::new(provider), executor(), 6)
    }

    #[tokio::test]
    async fn plain_answer_passes_through() {
        let reply = agent(ScriptedProvider::new(vec![text_response("Just paste the script tag.")]))
            .chat(&[], "How do I install the widget?")
            .await
            .unwrap();
        assert_eq!(reply.content, "Just paste the script tag.");
        assert!(reply.tools_used.is_empty());
        assert!(!reply.should_escalate);
    }

    #[tokio::test]
    async fn empty_model_content_gets_the_fallback_text() {
        let reply = agent(ScriptedProvider::new(vec![ChatResponse::default()]))
            .chat(&[], "hello")
            .await
            .unwrap();
        assert_eq!(reply.content, EMPTY_RESPONSE_FALLBACK);
    }

    #[tokio::test]
    async fn tool_round_collects_artifacts_then_finishes() {
        let provider = ScriptedProvider::new(vec![
            ChatResponse {
                content: None,
                tool_calls: vec![tool_call(
                    "c1",
                    "generate_widget_code",
                    r#"{"framework":"react","partnerId":"abc123"}"#,
                )],
            },
            text_response("Here's your React component."),
        ]);
        let reply = agent(provider).chat(&[], "widget code please").await.unwrap();
        assert_eq!(reply.content, "Here's your React component.");
        assert_eq!(reply.tools_used, vec!["generate_widget_code"]);
        assert_eq!(reply.code_language.as_deref(), Some("tsx"));
        assert!(reply.code_snippet.unwrap().contains(r#"partnerId="abc123""#));
    }

    #[tokio::test]
    async fn last_code_artifact_wins_within_a_round() {
        let provider = ScriptedProvider::new(vec![
            ChatResponse {
                content: None,
                tool_calls: vec![
                    tool_call(
                        "c1",
                        "generate_widget_code",
                        r#"{"framework":"react","partnerId":"p1"}"#,
                    ),
                    tool_call(
                        "c2",
                        "generate_api_snippet",
                        r#"{"language":"python","endpoint":"create_quote"}"#,
                    ),
                ],
            },
            text_response("done"),
        ]);
        let reply = agent(provider).chat(&[], "both please").await.unwrap();
        assert_eq!(reply.code_language.as_deref(), Some("python"));
        assert_eq!(
            reply.tools_used,
            vec!["generate_widget_code", "generate_api_snippet"]
        );
    }

    #[tokio::test]
    async fn escalation_reason_matches_the_tool_argument() {
        let provider = ScriptedProvider::new(vec![
            ChatResponse {
                content: None,
                tool_calls: vec![
                    tool_call(
                        "c1",
                        "search_integration_docs",
                        r#"{"query":"custom oauth"}"#,
                    ),
                    tool_call(
                        "c2",
                        "escalate_to_dev_team",
                        r#"{"reason":"Custom OAuth flow needed","summary":"partner has bespoke SSO"}"#,
                    ),
                ],
            },
            text_response("I've escalated this to our dev team."),
        ]);
        let reply = agent(provider).chat(&[], "help").await.unwrap();
        assert!(reply.should_escalate);
        assert_eq!(
            reply.escalation_reason.as_deref(),
            Some("Custom OAuth flow needed")
        );
        assert_eq!(reply.tools_used.len(), 2);
    }

    #[tokio::test]
    async fn round_cap_terminates_a_relentless_model() {
        let agent = SupportAgent::new(Arc::new(RelentlessToolCaller), executor(), 4);
        let reply = agent.chat(&[], "loop forever").await.unwrap();
        assert_eq!(reply.tools_used.len(), 4); // one call per round
        assert!(reply.should_escalate);
        assert_eq!(
            reply.escalation_reason.as_deref(),
            Some("tool round limit reached")
        );
        assert!(reply.content.contains("escalate"));
    }

    #[tokio::test]
    async fn unknown_tool_from_model_does_not_abort_the_turn() {
        let provider = ScriptedProvider::new(vec![
            ChatResponse {
                content: None,
                tool_calls: vec![tool_call("c1", "not_a_real_tool", "{}")],
            },
            text_response("recovered"),
        ]);
        let reply = agent(provider).chat(&[], "hi").await.unwrap();
        assert_eq!(reply.content, "recovered");
        assert_eq!(reply.tools_used, vec!["not_a_real_tool"]);
    }

    #[tokio::test]
    async fn context_and_history_are_rendered_into_the_request() {
        let provider = ScriptedProvider::new(vec![text_response("ok")]);
        let provider = Arc::new(provider);
        let agent = SupportAgent::new(provider.clone(), executor(), 6).with_context(AgentContext {
            partner_id: Some("p-7".to_string()),
            topic: Some(ConversationTopic::PosSetup),
            ..Default::default()
        });

        let history = vec![SupportMessage {
            id: partnerdesk_core::types::MessageId("m1".to_string()),
            conversation_id: partnerdesk_core::types::ConversationId("c1".to_string()),
            role: MessageRole::Assistant,
            content: "Welcome!".to_string(),
            content_type: partnerdesk_core::types::ContentType::Text,
            code_snippet: None,
            code_language: None,
            tools_used: None,
            created_at: chrono::Utc::now(),
        }];
        agent.chat(&history, "connect mindbody").await.unwrap();

        let requests = provider.requests.lock().unwrap();
        let messages = &requests[0].messages;
        let system = messages[0].content.as_deref().unwrap();
        assert!(system.contains("Current context:"));
        assert!(system.contains("- Partner ID: p-7"));
        assert!(system.contains("- Topic: pos_setup"));
        assert_eq!(messages[1].content.as_deref(), Some("Welcome!"));
        assert_eq!(
            messages.last().unwrap().content.as_deref(),
            Some("connect mindbody")
        );
        assert!(!requests[0].tools.is_empty());
    }
}
