// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! POS integration guides.

use serde::Deserialize;

use crate::executor::ToolOutcome;

/// Arguments for `get_pos_integration_guide`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosGuideArgs {
    pub pos_system: String,
    #[serde(default)]
    pub integration_type: Option<String>,
}

struct PosGuide {
    name: &'static str,
    steps: &'static [&'static str],
    common_issues: &'static [&'static str],
}

const SUPPORTED_SYSTEMS: &str = "mindbody, pike13, square";

fn guide_for(pos_system: &str) -> Option<PosGuide> {
    let guide = match pos_system {
        "mindbody" => PosGuide {
            name: "Mindbody",
            steps: &[
                "1. Log into your Mindbody business portal",
                "2. Go to Settings > API Credentials",
                "3. Generate a new API key with 'Booking' permissions",
                "4. Copy the Site ID and API Key",
                "5. In Daily Event dashboard, go to Integrations > POS",
                "6. Select Mindbody and enter your credentials",
                "7. Configure which class types trigger insurance offers",
                "8. Test with a sample booking",
            ],
            common_issues: &[
                "Incorrect Site ID format (should be numeric)",
                "API key without booking permissions",
                "Firewall blocking webhook callbacks",
            ],
        },
        "pike13" => PosGuide {
            name: "Pike13",
            steps: &[
                "1. Log into Pike13 Admin",
                "2. Navigate to Settings > Integrations",
                "3. Enable API Access",
                "4. Generate OAuth credentials",
                "5. Authorize Daily Event in the OAuth flow",
                "6. Map service categories to coverage types",
            ],
            common_issues: &["OAuth token expiration", "Service category mapping errors"],
        },
        "square" => PosGuide {
            name: "Square",
            steps: &[
                "1. Go to Square Developer Dashboard",
                "2. Create a new application",
                "3. Enable Bookings API and Payments API",
                "4. Copy Application ID and Access Token",
                "5. Set up webhook subscriptions for booking events",
                "6. Configure in Daily Event dashboard",
            ],
            common_issues: &[
                "Sandbox vs Production credentials",
                "Missing webhook subscriptions",
            ],
        },
        _ => return None,
    };
    Some(guide)
}

/// Returns the numbered setup guide for a POS system.
///
/// Systems without a written guide get the supported list back instead of
/// an error.
pub fn get_pos_integration_guide(args: PosGuideArgs) -> ToolOutcome {
    let integration_type = args.integration_type.as_deref().unwrap_or("webhook");

    let Some(guide) = guide_for(&args.pos_system) else {
        return ToolOutcome::message(format!(
            "No guide available for {}. Supported: {SUPPORTED_SYSTEMS}",
            args.pos_system
        ));
    };

    let issues = guide
        .common_issues
        .iter()
        .map(|i| format!("- {i}"))
        .collect::<Vec<_>>()
        .join("\n");

    ToolOutcome::message(format!(
        "# {} Integration Guide ({integration_type})\n\n## Steps:\n{}\n\n## Common Issues:\n{issues}\n\nNeed help? I can walk you through any of these steps.",
        guide.name,
        guide.steps.join("\n"),
    ))
}
