// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Widget embed code generation.

use serde::Deserialize;

use crate::executor::ToolOutcome;

/// Arguments for `generate_widget_code`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetCodeArgs {
    pub framework: String,
    pub partner_id: String,
    #[serde(default)]
    pub customizations: Option<WidgetCustomizations>,
}

/// Optional widget appearance overrides, each with a documented default.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetCustomizations {
    pub primary_color: Option<String>,
    pub position: Option<String>,
    pub auto_open: Option<bool>,
}

/// Generates an embed snippet for the partner's frontend framework.
///
/// React and Next.js get a TSX component, Vue gets a single-file component,
/// and everything else (including unknown frameworks) falls back to the
/// plain HTML script tag.
pub fn generate_widget_code(args: WidgetCodeArgs) -> ToolOutcome {
    let custom = args.customizations.unwrap_or_default();
    let primary_color = custom.primary_color.unwrap_or_else(|| "#14B8A6".to_string());
    let position = custom.position.unwrap_or_else(|| "bottom-right".to_string());
    let auto_open = custom.auto_open.unwrap_or(false);
    let partner_id = &args.partner_id;

    let (language, code) = match args.framework.as_str() {
        "react" | "nextjs" => (
            "tsx",
            format!(
                r#"// Install: npm install @dailyevent/widget-react

import {{ InsuranceWidget }} from '@dailyevent/widget-react'

export function InsuranceCoverage() {{
  return (
    <InsuranceWidget
      partnerId="{partner_id}"
      primaryColor="{primary_color}"
      position="{position}"
      autoOpen={{{auto_open}}}
      onQuoteComplete={{(quote) => console.log('Quote:', quote)}}
      onPolicyPurchased={{(policy) => console.log('Policy:', policy)}}
    />
  )
}}"#
            ),
        ),
        "vue" => (
            "vue",
            format!(
                r#"<!-- Install: npm install @dailyevent/widget-vue -->

<template>
  <InsuranceWidget
    partner-id="{partner_id}"
    primary-color="{primary_color}"
    position="{position}"
    :auto-open="{auto_open}"
    @quote-complete="onQuoteComplete"
    @policy-purchased="onPolicyPurchased"
  />
</template>

<script setup>
import {{ InsuranceWidget }} from '@dailyevent/widget-vue'

const onQuoteComplete = (quote) => console.log('Quote:', quote)
const onPolicyPurchased = (policy) => console.log('Policy:', policy)
</script>"#
            ),
        ),
        _ => (
            "html",
            format!(
                r#"<!-- Daily Event Insurance Widget -->
<script src="https://widget.dailyevent.com/v1/embed.js"></script>
<script>
  DailyEventWidget.init({{
    partnerId: '{partner_id}',
    primaryColor: '{primary_color}',
    position: '{position}',
    autoOpen: {auto_open},
    onQuoteComplete: function(quote) {{
      console.log('Quote:', quote);
    }},
    onPolicyPurchased: function(policy) {{
      console.log('Policy:', policy);
    }}
  }});
</script>"#
            ),
        ),
    };

    ToolOutcome {
        result: format!(
            "Generated {} widget code for partner {}",
            args.framework, partner_id
        ),
        code: Some(code),
        language: Some(language.to_string()),
        escalation: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(framework: &str) -> WidgetCodeArgs {
        WidgetCodeArgs {
            framework: framework.to_string(),
            partner_id: "abc123".to_string(),
            customizations: None,
        }
    }

    #[test]
    fn react_yields_tsx_with_partner_id() {
        let outcome = generate_widget_code(args("react"));
        assert_eq!(outcome.language.as_deref(), Some("tsx"));
        let code = outcome.code.unwrap();
        assert!(code.contains(r#"partnerId="abc123""#));
        assert!(code.contains("autoOpen={false}"));
    }

    #[test]
    fn nextjs_shares_the_react_template() {
        let outcome = generate_widget_code(args("nextjs"));
        assert_eq!(outcome.language.as_deref(), Some("tsx"));
    }

    #[test]
    fn vue_yields_vue_sfc() {
        let outcome = generate_widget_code(args("vue"));
        assert_eq!(outcome.language.as_deref(), Some("vue"));
        assert!(outcome.code.unwrap().contains(r#"partner-id="abc123""#));
    }

    #[test]
    fn unknown_framework_falls_back_to_html() {
        let outcome = generate_widget_code(args("svelte"));
        assert_eq!(outcome.language.as_deref(), Some("html"));
        assert!(outcome.code.unwrap().contains("partnerId: 'abc123'"));
    }

    #[test]
    fn customizations_override_defaults() {
        let outcome = generate_widget_code(WidgetCodeArgs {
            framework: "vanilla".to_string(),
            partner_id: "p-9".to_string(),
            customizations: Some(WidgetCustomizations {
                primary_color: Some("#FF0000".to_string()),
                position: Some("inline".to_string()),
                auto_open: Some(true),
            }),
        });
        let code = outcome.code.unwrap();
        assert!(code.contains("#FF0000"));
        assert!(code.contains("'inline'"));
        assert!(code.contains("autoOpen: true"));
    }
}
