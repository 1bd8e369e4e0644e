// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Behavioral trigger state machine.
//!
//! Pure and deterministic: the host feeds in [`BrowserSignal`]s and a clock
//! reading, the engine decides what (if anything) to emit. Each passive
//! detector fires at most once per route visit; all dedup state resets on
//! navigation. The engine holds no timers itself. The host calls
//! [`TriggerEngine::poll`] on its own schedule and the idle deadline is
//! evaluated against the supplied clock, which keeps route changes from
//! racing a stale timer.

use chrono::{DateTime, Duration, Timelike, Utc};
use partnerdesk_config::TriggerConfig;
use tracing::debug;

use crate::context::{page_context, PageContext};
use crate::trigger::{
    BrowserSignal, FormErrorContext, ProactiveTrigger, TriggerKind, TriggerPriority,
};

const EXIT_ACTIONS: [&str; 3] = ["Save my progress", "Email me instructions", "I'll be back later"];
const SCROLL_MESSAGE: &str =
    "You've scrolled quite a bit! Need help finding something specific?";

/// One-shot flags, one per passive detector.
#[derive(Debug, Default, Clone, Copy)]
struct Fired {
    idle: bool,
    exit_intent: bool,
    scroll_depth: bool,
    form_error: bool,
    error: bool,
}

/// Converts browser signals into at-most-once-per-route proactive prompts.
pub struct TriggerEngine {
    config: TriggerConfig,
    route: String,
    context: &'static PageContext,
    fired: Fired,
    last_activity: DateTime<Utc>,
    is_idle: bool,
    has_exit_intent: bool,
    scroll_depth: f64,
    active: Option<ProactiveTrigger>,
    log: Vec<ProactiveTrigger>,
}

impl TriggerEngine {
    /// Creates an engine observing the root route, with the idle timer
    /// armed from `now`.
    pub fn new(config: TriggerConfig, now: DateTime<Utc>) -> Self {
        Self {
            config,
            route: "/".to_string(),
            context: page_context("/"),
            fired: Fired::default(),
            last_activity: now,
            is_idle: false,
            has_exit_intent: false,
            scroll_depth: 0.0,
            active: None,
            log: Vec::new(),
        }
    }

    /// Route change: clear all per-route dedup state and re-arm the idle
    /// timer. The active trigger and log survive navigation.
    pub fn navigate(&mut self, route: &str, now: DateTime<Utc>) {
        self.route = route.to_string();
        self.context = page_context(route);
        self.fired = Fired::default();
        self.last_activity = now;
        self.is_idle = false;
        self.has_exit_intent = false;
        self.scroll_depth = 0.0;
        debug!(route, "trigger state reset");
    }

    /// Feed one browser signal in. Returns the trigger it produced, if any.
    pub fn observe(
        &mut self,
        signal: BrowserSignal,
        now: DateTime<Utc>,
    ) -> Option<ProactiveTrigger> {
        if !self.config.enabled {
            return None;
        }
        match signal {
            BrowserSignal::Activity => {
                self.last_activity = now;
                self.is_idle = false;
                None
            }
            BrowserSignal::PointerLeave { client_y } => {
                if !self.config.exit_intent_enabled || client_y > 0 || self.fired.exit_intent {
                    return None;
                }
                self.fired.exit_intent = true;
                self.has_exit_intent = true;
                Some(self.emit(
                    TriggerKind::ExitIntent,
                    self.context.exit_message.to_string(),
                    EXIT_ACTIONS.iter().map(|s| s.to_string()).collect(),
                    TriggerPriority::High,
                    now,
                ))
            }
            BrowserSignal::Scroll {
                scroll_top,
                scroll_height,
                viewport_height,
            } => {
                self.last_activity = now;
                self.is_idle = false;
                let doc_height = scroll_height - viewport_height;
                // Content that fits the viewport counts as depth zero.
                self.scroll_depth = if doc_height > 0.0 {
                    scroll_top / doc_height * 100.0
                } else {
                    0.0
                };
                if self.scroll_depth < self.config.scroll_depth_threshold
                    || self.fired.scroll_depth
                {
                    return None;
                }
                self.fired.scroll_depth = true;
                Some(self.emit(
                    TriggerKind::ScrollDepth,
                    SCROLL_MESSAGE.to_string(),
                    vec!["Yes, help me find...".to_string(), "Just browsing".to_string()],
                    TriggerPriority::Low,
                    now,
                ))
            }
            BrowserSignal::FormInvalid {
                validation_message, ..
            } => {
                if self.fired.form_error {
                    return None;
                }
                self.fired.form_error = true;
                let detail = if validation_message.is_empty() {
                    "Form validation failed".to_string()
                } else {
                    validation_message
                };
                Some(self.emit(
                    TriggerKind::FormError,
                    format!("Having trouble with the form? I can help with: {detail}"),
                    vec![
                        "Help me fix this".to_string(),
                        "What info do you need?".to_string(),
                    ],
                    TriggerPriority::High,
                    now,
                ))
            }
            BrowserSignal::UncaughtError => {
                if self.fired.error {
                    return None;
                }
                self.fired.error = true;
                Some(self.emit(
                    TriggerKind::Error,
                    "Something went wrong. Need help troubleshooting?".to_string(),
                    vec![
                        "Yes, help me fix this".to_string(),
                        "Report this issue".to_string(),
                    ],
                    TriggerPriority::High,
                    now,
                ))
            }
            BrowserSignal::UnhandledRejection => {
                if self.fired.error {
                    return None;
                }
                self.fired.error = true;
                Some(self.emit(
                    TriggerKind::Error,
                    "An unexpected error occurred. I can help diagnose the issue.".to_string(),
                    vec![
                        "Diagnose the problem".to_string(),
                        "Contact support".to_string(),
                    ],
                    TriggerPriority::High,
                    now,
                ))
            }
        }
    }

    /// Check the idle deadline against the clock. The host calls this
    /// periodically; the idle trigger fires once per route when the timeout
    /// elapses without activity.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<ProactiveTrigger> {
        if !self.config.enabled || self.fired.idle {
            return None;
        }
        let timeout = Duration::seconds(self.config.idle_timeout_secs as i64);
        if now - self.last_activity < timeout {
            return None;
        }
        self.fired.idle = true;
        self.is_idle = true;
        Some(self.emit(
            TriggerKind::Idle,
            self.context.idle_message.to_string(),
            self.context.help_prompts.iter().map(|s| s.to_string()).collect(),
            TriggerPriority::Medium,
            now,
        ))
    }

    /// Manual entry point for forms validated programmatically. Always
    /// emits; per-route dedup only applies to the passive detectors.
    pub fn report_form_error(
        &mut self,
        error: &FormErrorContext,
        now: DateTime<Utc>,
    ) -> ProactiveTrigger {
        self.emit(
            TriggerKind::FormError,
            format!("Form error: {}", error.error_message),
            vec!["Help me fix this".to_string(), "Skip this step".to_string()],
            TriggerPriority::High,
            now,
        )
    }

    /// Manual entry point for application-level errors.
    pub fn report_custom_error(
        &mut self,
        message: impl Into<String>,
        suggested_actions: Option<Vec<String>>,
        priority: Option<TriggerPriority>,
        now: DateTime<Utc>,
    ) -> ProactiveTrigger {
        self.emit(
            TriggerKind::Error,
            message.into(),
            suggested_actions.unwrap_or_else(|| vec!["Get help".to_string()]),
            priority.unwrap_or(TriggerPriority::Medium),
            now,
        )
    }

    /// Clears the active trigger. The log keeps its history.
    pub fn dismiss_trigger(&mut self) {
        self.active = None;
    }

    /// Clears the active trigger and the whole log.
    pub fn clear_triggers(&mut self) {
        self.active = None;
        self.log.clear();
    }

    pub fn active_trigger(&self) -> Option<&ProactiveTrigger> {
        self.active.as_ref()
    }

    pub fn trigger_log(&self) -> &[ProactiveTrigger] {
        &self.log
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn current_context(&self) -> &'static PageContext {
        self.context
    }

    pub fn suggested_prompts(&self) -> &'static [&'static str] {
        self.context.help_prompts
    }

    pub fn is_idle(&self) -> bool {
        self.is_idle
    }

    pub fn has_exit_intent(&self) -> bool {
        self.has_exit_intent
    }

    pub fn scroll_depth(&self) -> f64 {
        self.scroll_depth
    }

    /// Route greeting prefixed with a salutation for the given local hour.
    pub fn contextual_greeting_at(&self, hour: u32) -> String {
        let salutation = if hour < 12 {
            "Good morning! "
        } else if hour < 17 {
            "Good afternoon! "
        } else {
            "Good evening! "
        };
        format!("{salutation}{}", self.context.greeting)
    }

    /// Route greeting for the current local wall-clock time.
    pub fn contextual_greeting(&self) -> String {
        self.contextual_greeting_at(chrono::Local::now().hour())
    }

    fn emit(
        &mut self,
        kind: TriggerKind,
        message: String,
        suggested_actions: Vec<String>,
        priority: TriggerPriority,
        now: DateTime<Utc>,
    ) -> ProactiveTrigger {
        let trigger = ProactiveTrigger {
            kind,
            message,
            suggested_actions,
            priority,
            timestamp: now,
        };
        debug!(kind = %trigger.kind, priority = %trigger.priority, "trigger emitted");
        self.log.push(trigger.clone());
        self.active = Some(trigger.clone());
        trigger
    }
}
