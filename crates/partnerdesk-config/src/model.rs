// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Partnerdesk.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Partnerdesk configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeskConfig {
    /// Assistant identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Completion-service (OpenAI-compatible) settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Conversation storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Partner integration-status lookup settings.
    #[serde(default)]
    pub status_api: StatusApiConfig,

    /// Proactive trigger engine settings.
    #[serde(default)]
    pub triggers: TriggerConfig,
}

/// Assistant identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum tool rounds per chat turn before the loop bails out and
    /// advises escalation.
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            max_tool_rounds: default_max_tool_rounds(),
        }
    }
}

fn default_agent_name() -> String {
    "partnerdesk".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_tool_rounds() -> u32 {
    6
}

/// Completion-service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` requires the environment variable override; client
    /// construction fails fast without one.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier for chat completions.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Base URL override (for self-hosted gateways and tests).
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            base_url: None,
        }
    }
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

/// Conversation storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|d| d.join("partnerdesk/partnerdesk.db"))
        .and_then(|p| p.to_str().map(str::to_string))
        .unwrap_or_else(|| "partnerdesk.db".to_string())
}

/// Partner integration-status lookup configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StatusApiConfig {
    /// Base URL of the integration-status endpoint. `None` disables live
    /// lookups entirely (mock data only, when enabled).
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds for status lookups.
    #[serde(default = "default_status_timeout_secs")]
    pub timeout_secs: u64,

    /// Fall back to canned status data when the live lookup fails.
    /// When `false`, lookup failures surface to the caller.
    #[serde(default = "default_fallback_to_mock")]
    pub fallback_to_mock: bool,
}

impl Default for StatusApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_status_timeout_secs(),
            fallback_to_mock: default_fallback_to_mock(),
        }
    }
}

fn default_status_timeout_secs() -> u64 {
    5
}

fn default_fallback_to_mock() -> bool {
    true
}

/// Proactive trigger engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerConfig {
    /// Master switch for all behavioral detectors.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds of inactivity before the idle nudge fires.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// Whether the exit-intent detector is active.
    #[serde(default = "default_true")]
    pub exit_intent_enabled: bool,

    /// Scroll depth percentage (0-100) that fires the scroll nudge.
    #[serde(default = "default_scroll_depth_threshold")]
    pub scroll_depth_threshold: f64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            idle_timeout_secs: default_idle_timeout_secs(),
            exit_intent_enabled: true,
            scroll_depth_threshold: default_scroll_depth_threshold(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_idle_timeout_secs() -> u64 {
    30
}

fn default_scroll_depth_threshold() -> f64 {
    75.0
}
