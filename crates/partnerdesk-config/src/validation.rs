// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and threshold ranges.

use crate::diagnostic::ConfigError;
use crate::model::DeskConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &DeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.agent.max_tool_rounds == 0 || config.agent.max_tool_rounds > 12 {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.max_tool_rounds must be between 1 and 12, got {}",
                config.agent.max_tool_rounds
            ),
        });
    }

    if config.openai.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "openai.max_tokens must be positive".to_string(),
        });
    }

    if config.status_api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "status_api.timeout_secs must be positive".to_string(),
        });
    }

    if let Some(url) = &config.status_api.base_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!("status_api.base_url must be an http(s) URL, got `{url}`"),
            });
        }
    }

    if !(0.0..=100.0).contains(&config.triggers.scroll_depth_threshold) {
        errors.push(ConfigError::Validation {
            message: format!(
                "triggers.scroll_depth_threshold must be between 0 and 100, got {}",
                config.triggers.scroll_depth_threshold
            ),
        });
    }

    if config.triggers.idle_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "triggers.idle_timeout_secs must be positive".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
