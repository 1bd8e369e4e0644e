// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trigger and browser-signal types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What kind of behavior fired a trigger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    Idle,
    ExitIntent,
    ScrollDepth,
    FormError,
    Error,
}

/// How urgently the UI should surface a trigger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TriggerPriority {
    Low,
    Medium,
    High,
}

/// A proactive chat prompt produced by the engine. Ephemeral, never
/// persisted; lives only for the current page visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProactiveTrigger {
    pub kind: TriggerKind,
    pub message: String,
    pub suggested_actions: Vec<String>,
    pub priority: TriggerPriority,
    pub timestamp: DateTime<Utc>,
}

/// A browser-side signal fed into the engine by the host UI layer. The
/// engine itself never touches the DOM; the host translates raw events
/// into these.
#[derive(Debug, Clone)]
pub enum BrowserSignal {
    /// Any of mousedown, mousemove, keydown, touchstart, click. Resets the
    /// idle timer.
    Activity,
    /// Pointer left the document; `client_y <= 0` means through the top edge.
    PointerLeave { client_y: i32 },
    /// A scroll happened. Also counts as activity for the idle timer.
    Scroll {
        scroll_top: f64,
        scroll_height: f64,
        viewport_height: f64,
    },
    /// A form field failed native validation.
    FormInvalid {
        field_name: Option<String>,
        validation_message: String,
    },
    /// An uncaught window-level exception.
    UncaughtError,
    /// An unhandled promise rejection.
    UnhandledRejection,
}

/// Details of a form validation failure, for manual reporting from forms
/// validated programmatically rather than natively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormErrorContext {
    pub form_id: Option<String>,
    pub field_name: Option<String>,
    pub error_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&TriggerKind::ExitIntent).unwrap(),
            "\"exit_intent\""
        );
        assert_eq!(TriggerKind::ScrollDepth.to_string(), "scroll_depth");
        assert_eq!(TriggerPriority::Medium.to_string(), "medium");
    }
}
