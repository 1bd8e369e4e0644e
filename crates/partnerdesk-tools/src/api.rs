// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! API integration snippet generation.
//!
//! Each endpoint has a canonical method, path template, and example body;
//! snippets substitute these into the target language's idiomatic request.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::executor::ToolOutcome;

/// Arguments for `generate_api_snippet`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSnippetArgs {
    pub language: String,
    pub endpoint: String,
    /// Auth header is included unless this is explicitly false.
    #[serde(default)]
    pub include_auth: Option<bool>,
}

struct EndpointSpec {
    method: &'static str,
    path: &'static str,
    body: Option<Value>,
}

fn endpoint_spec(endpoint: &str) -> Option<EndpointSpec> {
    let spec = match endpoint {
        "create_quote" => EndpointSpec {
            method: "POST",
            path: "/api/v1/quotes",
            body: Some(json!({
                "eventType": "fitness_class",
                "eventDate": "2025-02-15",
                "participants": 20,
                "coverageType": "liability",
                "customerEmail": "customer@example.com",
            })),
        },
        "get_quote" => EndpointSpec {
            method: "GET",
            path: "/api/v1/quotes/{quote_id}",
            body: None,
        },
        "create_policy" => EndpointSpec {
            method: "POST",
            path: "/api/v1/policies",
            body: Some(json!({ "quoteId": "qt_xxx", "paymentMethodId": "pm_xxx" })),
        },
        "get_policy" => EndpointSpec {
            method: "GET",
            path: "/api/v1/policies/{policy_id}",
            body: None,
        },
        "setup_webhook" => EndpointSpec {
            method: "POST",
            path: "/api/v1/webhooks",
            body: Some(json!({
                "url": "https://your-site.com/webhook",
                "events": ["policy.created", "policy.updated"],
            })),
        },
        "verify_webhook" => EndpointSpec {
            method: "GET",
            path: "/api/v1/webhooks/{webhook_id}/verify",
            body: None,
        },
        _ => return None,
    };
    Some(spec)
}

const SUPPORTED_ENDPOINTS: &str =
    "create_quote, get_quote, create_policy, get_policy, setup_webhook, verify_webhook";

/// Serializes a value with four-space indentation for embedding in snippets.
fn pretty_json(value: &Value) -> String {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

/// Generates a request snippet for one of the fixed API endpoints.
///
/// Unknown endpoints degrade to a supported-list message; languages without
/// a template get a one-line endpoint reference comment.
pub fn generate_api_snippet(args: ApiSnippetArgs) -> ToolOutcome {
    let Some(spec) = endpoint_spec(&args.endpoint) else {
        return ToolOutcome::message(format!(
            "Unknown endpoint: {}. Supported: {SUPPORTED_ENDPOINTS}",
            args.endpoint
        ));
    };
    let include_auth = args.include_auth != Some(false);

    let code = match args.language.as_str() {
        "javascript" | "typescript" => {
            let auth = if include_auth {
                "\n    'Authorization': `Bearer ${process.env.DAILYEVENT_API_KEY}`,"
            } else {
                ""
            };
            let body = spec
                .body
                .as_ref()
                .map(|b| format!("\n  body: JSON.stringify({}),", pretty_json(b)))
                .unwrap_or_default();
            format!(
                "const response = await fetch('https://api.dailyevent.com{path}', {{\n  method: '{method}',\n  headers: {{\n    'Content-Type': 'application/json',{auth}\n  }},{body}\n}});\n\nconst data = await response.json();\nconsole.log(data);",
                path = spec.path,
                method = spec.method,
            )
        }
        "python" => {
            let auth = if include_auth {
                "\n        'Authorization': f'Bearer {os.environ[\"DAILYEVENT_API_KEY\"]}',"
            } else {
                ""
            };
            let body = spec
                .body
                .as_ref()
                .map(|b| format!("\n    json={},", pretty_json(b)))
                .unwrap_or_default();
            format!(
                "import requests\n\nresponse = requests.{method}(\n    'https://api.dailyevent.com{path}',\n    headers={{\n        'Content-Type': 'application/json',{auth}\n    }},{body}\n)\n\nprint(response.json())",
                method = spec.method.to_lowercase(),
                path = spec.path,
            )
        }
        "curl" => {
            let auth = if include_auth {
                " \\\n  -H 'Authorization: Bearer $DAILYEVENT_API_KEY'"
            } else {
                ""
            };
            let body = spec
                .body
                .as_ref()
                .map(|b| format!(" \\\n  -d '{b}'"))
                .unwrap_or_default();
            format!(
                "curl -X {method} 'https://api.dailyevent.com{path}' \\\n  -H 'Content-Type: application/json'{auth}{body}",
                method = spec.method,
                path = spec.path,
            )
        }
        _ => format!("// API endpoint: {} {}", spec.method, spec.path),
    };

    let language = if args.language == "typescript" {
        "typescript".to_string()
    } else {
        args.language.clone()
    };

    ToolOutcome {
        result: format!(
            "Generated {} code for {} endpoint",
            args.language, args.endpoint
        ),
        code: Some(code),
        language: Some(language),
        escalation: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(language: &str, endpoint: &str, include_auth: Option<bool>) -> ApiSnippetArgs {
        ApiSnippetArgs {
            language: language.to_string(),
            endpoint: endpoint.to_string(),
            include_auth,
        }
    }

    #[test]
    fn javascript_create_quote_includes_body_and_auth() {
        let outcome = generate_api_snippet(args("javascript", "create_quote", None));
        let code = outcome.code.unwrap();
        assert!(code.contains("method: 'POST'"));
        assert!(code.contains("/api/v1/quotes"));
        assert!(code.contains("Authorization"));
        assert!(code.contains("fitness_class"));
    }

    #[test]
    fn auth_header_omitted_when_explicitly_disabled() {
        let outcome = generate_api_snippet(args("curl", "get_quote", Some(false)));
        let code = outcome.code.unwrap();
        assert!(!code.contains("Authorization"));
        assert!(code.contains("curl -X GET"));
        assert!(code.contains("/api/v1/quotes/{quote_id}"));
    }

    #[test]
    fn python_get_endpoints_have_no_body() {
        let outcome = generate_api_snippet(args("python", "verify_webhook", None));
        let code = outcome.code.unwrap();
        assert!(code.contains("requests.get("));
        assert!(!code.contains("json="));
    }

    #[test]
    fn php_falls_back_to_endpoint_reference() {
        let outcome = generate_api_snippet(args("php", "create_policy", None));
        assert_eq!(outcome.language.as_deref(), Some("php"));
        assert_eq!(
            outcome.code.as_deref(),
            Some("// API endpoint: POST /api/v1/policies")
        );
    }

    #[test]
    fn unknown_endpoint_degrades_to_supported_list() {
        let outcome = generate_api_snippet(args("javascript", "delete_everything", None));
        assert!(outcome.code.is_none());
        assert!(outcome.result.contains("Supported:"));
    }
}
