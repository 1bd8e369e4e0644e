// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./partnerdesk.toml` >
//! `~/.config/partnerdesk/partnerdesk.toml` > `/etc/partnerdesk/partnerdesk.toml`
//! with environment variable overrides via the `PARTNERDESK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::DeskConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/partnerdesk/partnerdesk.toml` (system-wide)
/// 3. `~/.config/partnerdesk/partnerdesk.toml` (user XDG config)
/// 4. `./partnerdesk.toml` (local directory)
/// 5. `PARTNERDESK_*` environment variables
pub fn load_config() -> Result<DeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DeskConfig::default()))
        .merge(Toml::file("/etc/partnerdesk/partnerdesk.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("partnerdesk/partnerdesk.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("partnerdesk.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<DeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `PARTNERDESK_OPENAI_API_KEY` must map to
/// `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("PARTNERDESK_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("status_api_", "status_api.", 1)
            .replacen("triggers_", "triggers.", 1);
        mapped.into()
    })
}
