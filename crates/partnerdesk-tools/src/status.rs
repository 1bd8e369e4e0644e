// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Partner integration-status lookup.
//!
//! Tries the live status endpoint first; failures fall back to canned demo
//! data only when the config enables it, so real deployments can surface
//! auth and network problems instead of masking them.

use std::time::Duration;

use partnerdesk_config::StatusApiConfig;
use partnerdesk_core::DeskError;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::warn;

/// Arguments for `check_integration_status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusArgs {
    pub partner_id: String,
    #[serde(default)]
    pub integration_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    #[serde(default)]
    integrations: Vec<IntegrationRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntegrationRecord {
    integration_type: String,
    status: String,
    #[serde(default)]
    last_tested_at: Option<String>,
    #[serde(default)]
    test_result: Option<Value>,
    #[serde(default)]
    went_live_at: Option<String>,
}

/// Client for the partner integration-status endpoint.
#[derive(Debug, Clone)]
pub struct StatusClient {
    http: reqwest::Client,
    base_url: Option<String>,
    fallback_to_mock: bool,
}

impl StatusClient {
    /// Builds a client from configuration. A missing base URL disables live
    /// lookups entirely.
    pub fn new(config: &StatusApiConfig) -> Result<Self, DeskError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DeskError::Provider {
                message: format!("failed to build status HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            fallback_to_mock: config.fallback_to_mock,
        })
    }

    /// Looks up a partner's integration status, formatted as pretty JSON.
    ///
    /// Live lookup failures (network, non-2xx, empty result) fall back to
    /// mock data when `fallback_to_mock` is set; otherwise the failure is
    /// returned to the caller.
    pub async fn check(&self, args: &StatusArgs) -> Result<String, DeskError> {
        match self.fetch_live(&args.partner_id).await {
            Ok(Some(status)) => Ok(render(status, args.integration_type.as_deref())),
            Ok(None) => self.fallback(args, "status endpoint returned no integrations"),
            Err(err) => {
                warn!(partner_id = %args.partner_id, error = %err, "live status lookup failed");
                self.fallback(args, &err.to_string())
            }
        }
    }

    async fn fetch_live(&self, partner_id: &str) -> Result<Option<Value>, DeskError> {
        let Some(base) = &self.base_url else {
            return Err(DeskError::Config(
                "status_api.base_url is not configured".to_string(),
            ));
        };
        let url = format!(
            "{}/api/admin/partner-integrations?partnerId={partner_id}",
            base.trim_end_matches('/')
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| DeskError::Provider {
                message: format!("status lookup request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        if !response.status().is_success() {
            return Err(DeskError::Provider {
                message: format!("status lookup returned {}", response.status()),
                source: None,
            });
        }

        let envelope: StatusEnvelope =
            response.json().await.map_err(|e| DeskError::Provider {
                message: format!("malformed status response: {e}"),
                source: Some(Box::new(e)),
            })?;
        if envelope.integrations.is_empty() {
            return Ok(None);
        }

        let mut status = Map::new();
        status.insert("partnerId".to_string(), json!(partner_id));
        for record in envelope.integrations {
            status.insert(
                record.integration_type.clone(),
                json!({
                    "status": record.status,
                    "configured": record.status != "pending",
                    "lastTestedAt": record.last_tested_at,
                    "testResult": record.test_result,
                    "wentLiveAt": record.went_live_at,
                }),
            );
        }
        Ok(Some(Value::Object(status)))
    }

    fn fallback(&self, args: &StatusArgs, cause: &str) -> Result<String, DeskError> {
        if !self.fallback_to_mock {
            return Err(DeskError::Provider {
                message: format!("integration status unavailable: {cause}"),
                source: None,
            });
        }
        Ok(render(
            mock_status(&args.partner_id),
            args.integration_type.as_deref(),
        ))
    }
}

/// Canned status payload used for demos and development.
fn mock_status(partner_id: &str) -> Value {
    json!({
        "partnerId": partner_id,
        "widget": { "installed": true, "lastPing": "2 hours ago", "version": "1.2.3" },
        "api": { "keyGenerated": true, "lastRequest": "5 minutes ago", "requestsToday": 42 },
        "webhook": {
            "configured": true,
            "endpoint": "https://...",
            "lastDelivery": "1 hour ago",
            "successRate": "98%"
        },
        "pos": { "connected": false, "system": null },
    })
}

/// Narrows to a single integration type when requested, then pretty-prints.
fn render(status: Value, integration_type: Option<&str>) -> String {
    let narrowed = match integration_type {
        Some(kind) => json!({ kind: status.get(kind).cloned().unwrap_or(Value::Null) }),
        None => status,
    };
    serde_json::to_string_pretty(&narrowed).unwrap_or_else(|_| narrowed.to_string())
}
