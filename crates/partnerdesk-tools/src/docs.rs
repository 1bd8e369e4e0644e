// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Documentation search tool, backed by the knowledge-base engine.

use partnerdesk_kb::{ArticleCategory, SearchEngine};
use serde::Deserialize;
use tracing::debug;

use crate::executor::ToolOutcome;

/// Arguments for `search_integration_docs`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsSearchArgs {
    pub query: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Maps the tool's category vocabulary onto article categories.
fn category_filter(category: &str) -> Option<&'static [ArticleCategory]> {
    use ArticleCategory::*;
    match category {
        "widget" => Some(&[WidgetIntegration]),
        "api" | "webhook" => Some(&[ApiReference]),
        "pos" => Some(&[PosIntegration]),
        "troubleshooting" => Some(&[Troubleshooting]),
        _ => None,
    }
}

/// Searches the documentation corpus and formats up to five ranked hits.
pub fn search_integration_docs(engine: &SearchEngine, args: DocsSearchArgs) -> ToolOutcome {
    let results = engine.search(&args.query, 5);

    let filter = args.category.as_deref().and_then(|c| {
        let mapped = category_filter(c);
        if mapped.is_none() {
            debug!(category = c, "ignoring unknown docs category");
        }
        mapped
    });

    let hits: Vec<_> = results
        .iter()
        .filter(|r| filter.map_or(true, |cats| cats.contains(&r.article.category)))
        .collect();

    let suffix = args
        .category
        .as_ref()
        .map(|c| format!(" in {c}"))
        .unwrap_or_default();

    if hits.is_empty() {
        return ToolOutcome::message(format!(
            "No documentation found for \"{}\"{suffix}. Try:\n- Broader search terms\n- Different category\n- Contact support for help",
            args.query
        ));
    }

    let formatted = hits
        .iter()
        .map(|r| {
            format!(
                "- **{}** ({}): {}\n  URL: /docs/{}",
                r.article.title, r.article.category, r.snippet, r.article.slug
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    ToolOutcome::message(format!(
        "Found {} results for \"{}\"{suffix}:\n\n{formatted}",
        hits.len(),
        args.query
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(query: &str, category: Option<&str>) -> ToolOutcome {
        let engine = SearchEngine::with_seed();
        search_integration_docs(
            &engine,
            DocsSearchArgs {
                query: query.to_string(),
                category: category.map(str::to_string),
            },
        )
    }

    #[test]
    fn formats_hits_with_title_category_and_url() {
        let outcome = search("webhook", None);
        assert!(outcome.result.starts_with("Found "));
        assert!(outcome.result.contains("**Webhook Configuration** (api-reference)"));
        assert!(outcome.result.contains("URL: /docs/webhook-setup"));
    }

    #[test]
    fn category_filter_narrows_results() {
        let outcome = search("widget", Some("troubleshooting"));
        assert!(outcome.result.contains("in troubleshooting"));
        assert!(outcome.result.contains("Troubleshooting Widget Issues"));
        assert!(!outcome.result.contains("Widget Installation Guide"));
    }

    #[test]
    fn nonsense_query_yields_no_documentation_found() {
        let outcome = search("zzqqxx123", None);
        assert!(outcome
            .result
            .contains("No documentation found for \"zzqqxx123\""));
        assert!(outcome.result.contains("Broader search terms"));
    }

    #[test]
    fn empty_filtered_set_yields_no_documentation_found() {
        // "mindbody" only matches the POS article; filtering to widget
        // leaves nothing.
        let outcome = search("mindbody", Some("widget"));
        assert!(outcome.result.contains("No documentation found"));
        assert!(outcome.result.contains("in widget"));
    }
}
