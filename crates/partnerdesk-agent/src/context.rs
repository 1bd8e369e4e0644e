// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-conversation working state rendered into the system prompt.

use partnerdesk_core::types::{ConversationTopic, IntegrationProgress, TechStack};
use serde::{Deserialize, Serialize};

/// Everything the agent knows about the partner it is talking to.
///
/// All fields are optional; only populated ones are rendered into the
/// prompt. Updated shallowly between turns as the conversation reveals
/// more context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentContext {
    pub partner_id: Option<String>,
    pub partner_name: Option<String>,
    pub topic: Option<ConversationTopic>,
    pub tech_stack: Option<TechStack>,
    pub integration_context: Option<IntegrationProgress>,
    /// Current onboarding wizard step (1-4).
    pub onboarding_step: Option<u8>,
}

impl AgentContext {
    /// Shallow merge: fields set in `updates` replace the current values,
    /// unset fields are left alone.
    pub fn merge(&mut self, updates: AgentContext) {
        if updates.partner_id.is_some() {
            self.partner_id = updates.partner_id;
        }
        if updates.partner_name.is_some() {
            self.partner_name = updates.partner_name;
        }
        if updates.topic.is_some() {
            self.topic = updates.topic;
        }
        if updates.tech_stack.is_some() {
            self.tech_stack = updates.tech_stack;
        }
        if updates.integration_context.is_some() {
            self.integration_context = updates.integration_context;
        }
        if updates.onboarding_step.is_some() {
            self.onboarding_step = updates.onboarding_step;
        }
    }

    /// Renders the context block for the system prompt.
    ///
    /// Each populated field becomes a `- Label: value` line under a
    /// "Current context:" header. An entirely empty context renders as an
    /// empty string so the prompt never carries a dangling header.
    pub fn render(&self) -> String {
        let mut parts = vec!["Current context:".to_string()];

        if let Some(id) = &self.partner_id {
            parts.push(format!("- Partner ID: {id}"));
        }
        if let Some(name) = &self.partner_name {
            parts.push(format!("- Partner Name: {name}"));
        }
        if let Some(topic) = self.topic {
            parts.push(format!("- Topic: {topic}"));
        }
        if let Some(step) = self.onboarding_step {
            parts.push(format!("- Onboarding Step: {step}/4"));
        }
        if let Some(stack) = &self.tech_stack {
            let rendered = serde_json::to_string(stack).unwrap_or_default();
            parts.push(format!("- Tech Stack: {rendered}"));
        }
        if let Some(progress) = &self.integration_context {
            let rendered = serde_json::to_string(progress).unwrap_or_default();
            parts.push(format!("- Integration Status: {rendered}"));
        }

        if parts.len() > 1 {
            parts.join("\n")
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_context_renders_empty_string() {
        assert_eq!(AgentContext::default().render(), "");
    }

    #[test]
    fn only_populated_fields_are_rendered() {
        let context = AgentContext {
            partner_id: Some("p-1".to_string()),
            topic: Some(ConversationTopic::WidgetInstall),
            onboarding_step: Some(2),
            ..Default::default()
        };
        let rendered = context.render();
        assert!(rendered.starts_with("Current context:"));
        assert!(rendered.contains("- Partner ID: p-1"));
        assert!(rendered.contains("- Topic: widget_install"));
        assert!(rendered.contains("- Onboarding Step: 2/4"));
        assert!(!rendered.contains("Partner Name"));
        assert!(!rendered.contains("Tech Stack"));
    }

    #[test]
    fn tech_stack_renders_as_json() {
        let context = AgentContext {
            tech_stack: Some(TechStack {
                framework: Some("react".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(context.render().contains(r#"- Tech Stack: {"framework":"react"}"#));
    }

    #[test]
    fn merge_is_shallow_and_keeps_unset_fields() {
        let mut context = AgentContext {
            partner_id: Some("p-1".to_string()),
            topic: Some(ConversationTopic::Onboarding),
            ..Default::default()
        };
        context.merge(AgentContext {
            topic: Some(ConversationTopic::Troubleshooting),
            onboarding_step: Some(3),
            ..Default::default()
        });
        assert_eq!(context.partner_id.as_deref(), Some("p-1"));
        assert_eq!(context.topic, Some(ConversationTopic::Troubleshooting));
        assert_eq!(context.onboarding_step, Some(3));
    }
}
