// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative catalog of the tools the support agent can call.
//!
//! Tool names form a closed sum type so the executor is total over them;
//! only names arriving from the untrusted model output channel go through
//! the string parse with a benign fallback.

use partnerdesk_core::completion::ToolDefinition;
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::{Display, EnumIter, EnumString};

/// Every tool the agent can invoke.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    GenerateWidgetCode,
    GenerateApiSnippet,
    GetPosIntegrationGuide,
    CheckIntegrationStatus,
    SearchIntegrationDocs,
    EscalateToDevTeam,
}

/// Returns the full tool schema advertised to the completion service.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: ToolName::GenerateWidgetCode.to_string(),
            description:
                "Generate widget embed code for the partner's website based on their tech stack"
                    .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "framework": {
                        "type": "string",
                        "enum": ["vanilla", "react", "vue", "angular", "nextjs"],
                        "description": "The partner's frontend framework",
                    },
                    "partnerId": {
                        "type": "string",
                        "description": "The partner's ID for widget configuration",
                    },
                    "customizations": {
                        "type": "object",
                        "properties": {
                            "primaryColor": { "type": "string" },
                            "position": {
                                "type": "string",
                                "enum": ["bottom-right", "bottom-left", "inline"],
                            },
                            "autoOpen": { "type": "boolean" },
                        },
                    },
                },
                "required": ["framework", "partnerId"],
            }),
        },
        ToolDefinition {
            name: ToolName::GenerateApiSnippet.to_string(),
            description:
                "Generate API integration code snippet for quotes, policies, or webhooks"
                    .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "language": {
                        "type": "string",
                        "enum": ["javascript", "typescript", "python", "php", "curl"],
                        "description": "Programming language for the snippet",
                    },
                    "endpoint": {
                        "type": "string",
                        "enum": [
                            "create_quote",
                            "get_quote",
                            "create_policy",
                            "get_policy",
                            "setup_webhook",
                            "verify_webhook",
                        ],
                        "description": "The API endpoint to generate code for",
                    },
                    "includeAuth": {
                        "type": "boolean",
                        "description": "Whether to include authentication headers",
                    },
                },
                "required": ["language", "endpoint"],
            }),
        },
        ToolDefinition {
            name: ToolName::GetPosIntegrationGuide.to_string(),
            description: "Get step-by-step integration guide for a specific POS system"
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "posSystem": {
                        "type": "string",
                        "enum": ["mindbody", "pike13", "clubready", "mariana_tek", "square"],
                        "description": "The POS system to get the guide for",
                    },
                    "integrationType": {
                        "type": "string",
                        "enum": ["webhook", "api", "oauth"],
                        "description": "Type of integration method",
                    },
                },
                "required": ["posSystem"],
            }),
        },
        ToolDefinition {
            name: ToolName::CheckIntegrationStatus.to_string(),
            description: "Check the current status of a partner's integration setup".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "partnerId": {
                        "type": "string",
                        "description": "The partner's ID to check",
                    },
                    "integrationType": {
                        "type": "string",
                        "enum": ["widget", "api", "pos", "webhook"],
                        "description": "Type of integration to check",
                    },
                },
                "required": ["partnerId"],
            }),
        },
        ToolDefinition {
            name: ToolName::SearchIntegrationDocs.to_string(),
            description: "Search the integration documentation for relevant information"
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query for documentation",
                    },
                    "category": {
                        "type": "string",
                        "enum": ["widget", "api", "pos", "webhook", "troubleshooting"],
                        "description": "Category to search in",
                    },
                },
                "required": ["query"],
            }),
        },
        ToolDefinition {
            name: ToolName::EscalateToDevTeam.to_string(),
            description: "Escalate a complex issue to the development team with context"
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "reason": {
                        "type": "string",
                        "description": "Reason for escalation",
                    },
                    "priority": {
                        "type": "string",
                        "enum": ["low", "normal", "high", "urgent"],
                        "description": "Priority level for the escalation",
                    },
                    "summary": {
                        "type": "string",
                        "description": "Summary of the issue and attempted solutions",
                    },
                },
                "required": ["reason", "summary"],
            }),
        },
    ]
}
