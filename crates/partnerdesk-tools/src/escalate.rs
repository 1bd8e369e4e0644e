// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Escalation to the development team.
//!
//! Pure formatting plus a side-channel signal the agent turns into a real
//! escalation through the chat service.

use partnerdesk_core::types::Priority;
use serde::Deserialize;

use crate::executor::{EscalationSignal, ToolOutcome};

/// Arguments for `escalate_to_dev_team`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalateArgs {
    pub reason: String,
    #[serde(default)]
    pub priority: Option<String>,
    pub summary: String,
}

/// Priority-dependent review SLA shown to the partner.
fn sla_text(priority: Priority) -> &'static str {
    match priority {
        Priority::Urgent => "1 hour",
        Priority::High => "4 hours",
        Priority::Normal | Priority::Low => "24 hours",
    }
}

/// Formats the escalation confirmation and raises the escalation signal.
pub fn escalate_to_dev_team(args: EscalateArgs) -> ToolOutcome {
    let priority = args
        .priority
        .as_deref()
        .and_then(|p| p.parse::<Priority>().ok())
        .unwrap_or(Priority::Normal);

    let result = format!(
        "Escalation created successfully.\n\n**Priority:** {priority}\n**Reason:** {}\n**Summary:** {}\n\nA developer will review this within {}.\n\nYou'll receive an email when there's an update. In the meantime, I'm here to help with any other questions.",
        args.reason,
        args.summary,
        sla_text(priority),
    );

    ToolOutcome {
        result,
        code: None,
        language: None,
        escalation: Some(EscalationSignal {
            reason: args.reason,
            priority,
            summary: args.summary,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(priority: Option<&str>) -> EscalateArgs {
        EscalateArgs {
            reason: "Custom OAuth flow".to_string(),
            priority: priority.map(str::to_string),
            summary: "Partner needs a bespoke token exchange".to_string(),
        }
    }

    #[test]
    fn urgent_gets_one_hour_sla() {
        let outcome = escalate_to_dev_team(args(Some("urgent")));
        assert!(outcome.result.contains("within 1 hour."));
        assert_eq!(
            outcome.escalation.as_ref().unwrap().priority,
            Priority::Urgent
        );
    }

    #[test]
    fn high_gets_four_hours() {
        let outcome = escalate_to_dev_team(args(Some("high")));
        assert!(outcome.result.contains("within 4 hours."));
    }

    #[test]
    fn missing_or_unknown_priority_defaults_to_normal() {
        for priority in [None, Some("catastrophic")] {
            let outcome = escalate_to_dev_team(args(priority));
            assert!(outcome.result.contains("within 24 hours."));
            assert_eq!(
                outcome.escalation.as_ref().unwrap().priority,
                Priority::Normal
            );
        }
    }

    #[test]
    fn signal_carries_the_reason_verbatim() {
        let outcome = escalate_to_dev_team(args(None));
        let signal = outcome.escalation.unwrap();
        assert_eq!(signal.reason, "Custom OAuth flow");
        assert_eq!(signal.summary, "Partner needs a bespoke token exchange");
    }
}
