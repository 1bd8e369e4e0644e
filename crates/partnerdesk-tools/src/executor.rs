// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Total dispatch from tool calls to concrete handlers.
//!
//! The executor never fails: unknown names and malformed arguments from the
//! model produce diagnostic results, so one bad tool call cannot abort a
//! conversation turn.

use std::sync::Arc;

use partnerdesk_core::completion::{ToolCall, ToolDefinition};
use partnerdesk_core::types::Priority;
use partnerdesk_kb::SearchEngine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::registry::{self, ToolName};
use crate::status::StatusClient;
use crate::{api, docs, escalate, pos, widget};

/// The outcome of a single tool execution.
///
/// Serialized (minus the escalation signal) as the tool-result message fed
/// back to the model.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutcome {
    /// Human/model-readable result text.
    pub result: String,
    /// Generated code artifact, if the tool produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Language tag for the code artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Escalation side channel, consumed by the agent, never sent to the model.
    #[serde(skip)]
    pub escalation: Option<EscalationSignal>,
}

impl ToolOutcome {
    /// A text-only outcome.
    pub fn message(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            code: None,
            language: None,
            escalation: None,
        }
    }

    /// Renders the model-facing JSON for this outcome.
    pub fn to_model_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"result\":{:?}}}", self.result))
    }
}

/// Escalation details raised by `escalate_to_dev_team`.
#[derive(Debug, Clone)]
pub struct EscalationSignal {
    pub reason: String,
    pub priority: Priority,
    pub summary: String,
}

/// Executes tool calls against the knowledge base and status endpoint.
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    search: Arc<SearchEngine>,
    status: StatusClient,
}

impl ToolExecutor {
    pub fn new(search: Arc<SearchEngine>, status: StatusClient) -> Self {
        Self { search, status }
    }

    /// Returns the tool schema to advertise to the completion service.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        registry::tool_definitions()
    }

    /// Executes a tool call as received from the model.
    ///
    /// The name and argument string both come from the untrusted model
    /// channel; parse failures degrade to diagnostic results.
    pub async fn execute_call(&self, call: &ToolCall) -> ToolOutcome {
        let Ok(name) = call.name.parse::<ToolName>() else {
            warn!(tool = %call.name, "model requested unknown tool");
            return ToolOutcome::message(format!("Unknown tool: {}", call.name));
        };
        let args: Value = match serde_json::from_str(&call.arguments) {
            Ok(value) => value,
            Err(err) => {
                warn!(tool = %name, error = %err, "unparseable tool arguments");
                return ToolOutcome::message(format!("Invalid arguments for {name}: {err}"));
            }
        };
        self.execute(name, args).await
    }

    /// Executes a known tool with parsed JSON arguments.
    pub async fn execute(&self, name: ToolName, args: Value) -> ToolOutcome {
        debug!(tool = %name, "executing tool");
        match name {
            ToolName::GenerateWidgetCode => {
                dispatch(name, args, widget::generate_widget_code)
            }
            ToolName::GenerateApiSnippet => dispatch(name, args, api::generate_api_snippet),
            ToolName::GetPosIntegrationGuide => {
                dispatch(name, args, pos::get_pos_integration_guide)
            }
            ToolName::CheckIntegrationStatus => match parse_args(name, args) {
                Ok(status_args) => match self.status.check(&status_args).await {
                    Ok(result) => ToolOutcome::message(result),
                    Err(err) => ToolOutcome::message(format!(
                        "Integration status lookup failed: {err}"
                    )),
                },
                Err(outcome) => outcome,
            },
            ToolName::SearchIntegrationDocs => match parse_args(name, args) {
                Ok(search_args) => docs::search_integration_docs(&self.search, search_args),
                Err(outcome) => outcome,
            },
            ToolName::EscalateToDevTeam => dispatch(name, args, escalate::escalate_to_dev_team),
        }
    }
}

fn parse_args<T: for<'de> Deserialize<'de>>(
    name: ToolName,
    args: Value,
) -> Result<T, ToolOutcome> {
    serde_json::from_value(args).map_err(|err| {
        warn!(tool = %name, error = %err, "invalid tool arguments");
        ToolOutcome::message(format!("Invalid arguments for {name}: {err}"))
    })
}

fn dispatch<T: for<'de> Deserialize<'de>>(
    name: ToolName,
    args: Value,
    handler: fn(T) -> ToolOutcome,
) -> ToolOutcome {
    match parse_args(name, args) {
        Ok(parsed) => handler(parsed),
        Err(outcome) => outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partnerdesk_config::StatusApiConfig;
    use serde_json::json;
    use strum::IntoEnumIterator;

    fn executor() -> ToolExecutor {
        let status = StatusClient::new(&StatusApiConfig {
            base_url: None,
            timeout_secs: 2,
            fallback_to_mock: true,
        })
        .unwrap();
        ToolExecutor::new(Arc::new(SearchEngine::with_seed()), status)
    }

    fn call(name: &str, arguments: &str) -> ToolCall {
        ToolCall {
            id: "call_test".to_string(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        }
    }

    #[tokio::test]
    async fn every_registered_tool_executes_without_panicking() {
        let executor = executor();
        for name in ToolName::iter() {
            let outcome = executor.execute(name, json!({})).await;
            assert!(!outcome.result.is_empty(), "empty outcome for {name}");
        }
    }

    #[tokio::test]
    async fn unknown_tool_name_is_benign() {
        let outcome = executor().execute_call(&call("launch_missiles", "{}")).await;
        assert_eq!(outcome.result, "Unknown tool: launch_missiles");
        assert!(outcome.escalation.is_none());
    }

    #[tokio::test]
    async fn malformed_argument_json_is_benign() {
        let outcome = executor()
            .execute_call(&call("generate_widget_code", "{not json"))
            .await;
        assert!(outcome.result.contains("Invalid arguments"));
    }

    #[tokio::test]
    async fn missing_required_fields_are_benign() {
        let outcome = executor()
            .execute_call(&call("generate_widget_code", "{}"))
            .await;
        assert!(outcome
            .result
            .contains("Invalid arguments for generate_widget_code"));
    }

    #[tokio::test]
    async fn widget_call_round_trips_through_the_executor() {
        let outcome = executor()
            .execute_call(&call(
                "generate_widget_code",
                r#"{"framework":"react","partnerId":"abc123"}"#,
            ))
            .await;
        assert_eq!(outcome.language.as_deref(), Some("tsx"));
        assert!(outcome.code.unwrap().contains(r#"partnerId="abc123""#));
    }

    #[tokio::test]
    async fn escalation_signal_survives_dispatch() {
        let outcome = executor()
            .execute_call(&call(
                "escalate_to_dev_team",
                r#"{"reason":"weird bug","summary":"widget 500s","priority":"urgent"}"#,
            ))
            .await;
        let signal = outcome.escalation.expect("escalation signal");
        assert_eq!(signal.reason, "weird bug");
        assert_eq!(signal.priority, Priority::Urgent);
    }

    #[test]
    fn model_json_omits_empty_fields_and_escalation() {
        let outcome = escalate::escalate_to_dev_team(escalate::EscalateArgs {
            reason: "r".to_string(),
            priority: None,
            summary: "s".to_string(),
        });
        let json = outcome.to_model_json();
        assert!(json.contains("\"result\""));
        assert!(!json.contains("escalation"));
        assert!(!json.contains("\"code\""));
    }
}
