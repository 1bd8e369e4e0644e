// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relevance-scored search over the article corpus.
//!
//! Scoring is purely lexical: query terms are matched against title, tags,
//! summary, and content with fixed weights, plus a popularity boost from
//! helpfulness votes and view counts. No query expansion or stemming.

use partnerdesk_core::types::ConversationTopic;
use tracing::{debug, info};

use crate::article::{ArticleCategory, KnowledgeArticle};
use crate::seed;

/// Characters of context kept on each side of the matched term in a snippet.
const SNIPPET_CONTEXT: usize = 100;

/// Score added per query term found in the title.
const TITLE_WEIGHT: f64 = 10.0;
/// Score added per query term found in a tag.
const TAG_WEIGHT: f64 = 5.0;
/// Score added per query term found in the summary.
const SUMMARY_WEIGHT: f64 = 3.0;
/// Per-term cap on content occurrence score, to prevent keyword stuffing.
const CONTENT_OCCURRENCE_CAP: usize = 5;

/// Message terms that indicate the partner is stuck on a problem.
const ERROR_TERMS: &[&str] = &["error", "not working", "failed", "issue", "problem", "help"];

/// A scored search hit.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub article: KnowledgeArticle,
    pub relevance_score: f64,
    /// Query terms that matched this article, in query order.
    pub matched_terms: Vec<String>,
    /// Context window around the first matched term.
    pub snippet: String,
}

/// A context-driven article suggestion.
#[derive(Debug, Clone)]
pub struct ArticleSuggestion {
    pub article: KnowledgeArticle,
    /// Human-readable reason shown alongside the suggestion.
    pub reason: String,
    /// Confidence in [0, 1]; suggestions are returned highest first.
    pub confidence: f64,
}

/// Conversation context used to drive proactive article suggestions.
#[derive(Debug, Clone, Default)]
pub struct SuggestionContext {
    pub topic: Option<ConversationTopic>,
    pub current_page: Option<String>,
    pub recent_messages: Vec<String>,
    pub error_type: Option<String>,
}

/// Lexical search engine over an immutable article corpus.
///
/// The corpus is injected at construction so tests can substitute fixtures.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    articles: Vec<KnowledgeArticle>,
}

impl SearchEngine {
    /// Creates an engine over the given corpus.
    pub fn new(articles: Vec<KnowledgeArticle>) -> Self {
        Self { articles }
    }

    /// Creates an engine over the built-in corpus.
    pub fn with_seed() -> Self {
        Self::new(seed::seed_articles())
    }

    /// Returns the full corpus.
    pub fn articles(&self) -> &[KnowledgeArticle] {
        &self.articles
    }

    /// Searches the corpus, returning up to `limit` results ordered by
    /// descending relevance.
    ///
    /// An empty or whitespace-only query returns no results. Matching is
    /// case-insensitive substring matching per whitespace-separated term.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let query_terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let mut results = Vec::new();

        for article in &self.articles {
            let searchable = [
                article.title.as_str(),
                article.summary.as_str(),
                article.content.as_str(),
            ]
            .into_iter()
            .chain(article.tags.iter().map(String::as_str))
            .chain(article.related_topics.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

            let matched_terms: Vec<String> = query_terms
                .iter()
                .filter(|term| searchable.contains(term.as_str()))
                .cloned()
                .collect();
            if matched_terms.is_empty() {
                continue;
            }

            let score = score_article(article, &matched_terms);
            let snippet = generate_snippet(&article.content, &matched_terms[0], SNIPPET_CONTEXT);

            results.push(SearchResult {
                article: article.clone(),
                relevance_score: score,
                matched_terms,
                snippet,
            });
        }

        results.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        results.truncate(limit);
        debug!(query, hits = results.len(), "knowledge base search");
        results
    }

    /// Suggests up to three articles for the given conversation context.
    ///
    /// Category relevance yields a 0.7 base confidence. When recent messages
    /// contain error language, troubleshooting articles are boosted to 0.9
    /// (if already suggested) or added at 0.8.
    pub fn suggest(&self, context: &SuggestionContext) -> Vec<ArticleSuggestion> {
        let relevant = topic_categories(context.topic);
        let topic_label = context
            .topic
            .map(|t| t.to_string())
            .unwrap_or_else(|| "your current task".to_string());

        let mut suggestions: Vec<ArticleSuggestion> = self
            .articles
            .iter()
            .filter(|a| relevant.contains(&a.category))
            .map(|a| ArticleSuggestion {
                article: a.clone(),
                reason: format!("Relevant to {topic_label}"),
                confidence: 0.7,
            })
            .collect();

        let has_error_context = context.recent_messages.iter().any(|msg| {
            let lower = msg.to_lowercase();
            ERROR_TERMS.iter().any(|term| lower.contains(term))
        });

        if has_error_context {
            for article in self
                .articles
                .iter()
                .filter(|a| a.category == ArticleCategory::Troubleshooting)
            {
                match suggestions.iter_mut().find(|s| s.article.id == article.id) {
                    Some(existing) => {
                        existing.confidence = 0.9;
                        existing.reason = "Based on your issue description".to_string();
                    }
                    None => suggestions.push(ArticleSuggestion {
                        article: article.clone(),
                        reason: "May help with your issue".to_string(),
                        confidence: 0.8,
                    }),
                }
            }
        }

        suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        suggestions.truncate(3);
        suggestions
    }

    /// Looks up an article by id.
    pub fn article_by_id(&self, id: &str) -> Option<&KnowledgeArticle> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// Looks up an article by slug.
    pub fn article_by_slug(&self, slug: &str) -> Option<&KnowledgeArticle> {
        self.articles.iter().find(|a| a.slug == slug)
    }

    /// Returns all articles in a category, in corpus order.
    pub fn articles_by_category(&self, category: ArticleCategory) -> Vec<&KnowledgeArticle> {
        self.articles
            .iter()
            .filter(|a| a.category == category)
            .collect()
    }

    /// Returns up to `limit` articles by descending view count.
    pub fn popular_articles(&self, limit: usize) -> Vec<&KnowledgeArticle> {
        let mut sorted: Vec<&KnowledgeArticle> = self.articles.iter().collect();
        sorted.sort_by(|a, b| b.view_count.cmp(&a.view_count));
        sorted.truncate(limit);
        sorted
    }

    /// Returns up to `limit` articles related to the given one by category,
    /// shared tags, or declared related topics.
    pub fn related_articles(&self, article_id: &str, limit: usize) -> Vec<&KnowledgeArticle> {
        let Some(article) = self.article_by_id(article_id) else {
            return Vec::new();
        };
        self.articles
            .iter()
            .filter(|a| {
                a.id != article.id
                    && (a.category == article.category
                        || a.tags.iter().any(|tag| article.tags.contains(tag))
                        || article.related_topics.contains(&a.slug))
            })
            .take(limit)
            .collect()
    }

    /// Records that an article was opened. The corpus itself is immutable;
    /// counters are aggregated out of band from these events.
    pub fn track_article_view(&self, article_id: &str) {
        info!(article_id, "article viewed");
    }

    /// Records a helpfulness vote on an article.
    pub fn track_article_helpful(&self, article_id: &str, is_helpful: bool) {
        info!(article_id, is_helpful, "article helpfulness vote");
    }
}

/// Maps a conversation topic to the categories worth suggesting.
fn topic_categories(topic: Option<ConversationTopic>) -> &'static [ArticleCategory] {
    use ArticleCategory::*;
    match topic {
        Some(ConversationTopic::Onboarding) => &[GettingStarted, WidgetIntegration],
        Some(ConversationTopic::WidgetInstall) => &[WidgetIntegration, Troubleshooting],
        Some(ConversationTopic::ApiIntegration) => &[ApiReference, GettingStarted],
        Some(ConversationTopic::PosSetup) => &[PosIntegration, Troubleshooting],
        Some(ConversationTopic::Troubleshooting) => &[Troubleshooting, WidgetIntegration],
        None => &[GettingStarted],
    }
}

fn score_article(article: &KnowledgeArticle, matched_terms: &[String]) -> f64 {
    let title = article.title.to_lowercase();
    let summary = article.summary.to_lowercase();
    let content = article.content.to_lowercase();
    let tags: Vec<String> = article.tags.iter().map(|t| t.to_lowercase()).collect();

    let mut score = 0.0;

    for term in matched_terms {
        if title.contains(term.as_str()) {
            score += TITLE_WEIGHT;
        }
        if tags.iter().any(|tag| tag.contains(term.as_str())) {
            score += TAG_WEIGHT;
        }
        if summary.contains(term.as_str()) {
            score += SUMMARY_WEIGHT;
        }
        let occurrences = content.matches(term.as_str()).count();
        score += occurrences.min(CONTENT_OCCURRENCE_CAP) as f64;
    }

    // Popularity boost, applied once per article.
    score += f64::from(article.helpful_count) / 100.0 + f64::from(article.view_count) / 1000.0;

    score
}

/// Strips markdown punctuation and collapses whitespace into single spaces.
fn plain_text(content: &str) -> String {
    let replaced: String = content
        .chars()
        .map(|c| match c {
            '#' | '*' | '`' | '\n' => ' ',
            other => other,
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn char_floor(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Extracts a context window around the first occurrence of `term`.
///
/// If the term does not appear in the stripped content (it may only match a
/// tag or related topic), the leading `2 * context_length` characters are
/// returned instead.
fn generate_snippet(content: &str, term: &str, context_length: usize) -> String {
    let plain = plain_text(content);
    let lower = plain.to_lowercase();

    let Some(index) = lower.find(&term.to_lowercase()) else {
        let end = char_floor(&plain, context_length * 2);
        return format!("{}...", &plain[..end]);
    };

    let start = char_floor(&plain, index.saturating_sub(context_length));
    let end = char_floor(&plain, index + term.len() + context_length);

    let mut snippet = plain[start..end].to_string();
    if start > 0 {
        snippet = format!("...{snippet}");
    }
    if end < plain.len() {
        snippet = format!("{snippet}...");
    }
    snippet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::Difficulty;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn fixture(id: &str, title: &str, content: &str, category: ArticleCategory) -> KnowledgeArticle {
        KnowledgeArticle {
            id: id.to_string(),
            title: title.to_string(),
            slug: id.to_string(),
            summary: String::new(),
            content: content.to_string(),
            category,
            tags: Vec::new(),
            related_topics: Vec::new(),
            difficulty: Difficulty::Beginner,
            estimated_read_time: 1,
            last_updated: NaiveDate::default(),
            helpful_count: 0,
            view_count: 0,
        }
    }

    #[test]
    fn title_match_outranks_content_only_match() {
        let engine = SearchEngine::new(vec![
            fixture(
                "a",
                "Nothing relevant here",
                "filler filler filler webhook filler",
                ArticleCategory::GettingStarted,
            ),
            fixture(
                "b",
                "Webhook Setup",
                "filler content without the keyword",
                ArticleCategory::ApiReference,
            ),
        ]);
        let results = engine.search("webhook", 5);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].article.id, "b");
        assert!(results[0].relevance_score > results[1].relevance_score);
    }

    #[test]
    fn content_occurrences_are_capped() {
        let stuffed = "widget ".repeat(50);
        let engine = SearchEngine::new(vec![
            fixture("stuffed", "Plain", &stuffed, ArticleCategory::Troubleshooting),
            fixture(
                "titled",
                "Widget Guide",
                "no keyword in body",
                ArticleCategory::WidgetIntegration,
            ),
        ]);
        let results = engine.search("widget", 5);
        // Capped content score (5) cannot beat a title match (10).
        assert_eq!(results[0].article.id, "titled");
    }

    #[test]
    fn empty_query_returns_nothing() {
        let engine = SearchEngine::with_seed();
        assert!(engine.search("", 5).is_empty());
        assert!(engine.search("   ", 5).is_empty());
    }

    #[test]
    fn nonsense_query_returns_nothing() {
        let engine = SearchEngine::with_seed();
        assert!(engine.search("zzqqxx123", 5).is_empty());
    }

    #[test]
    fn search_respects_limit() {
        let engine = SearchEngine::with_seed();
        let results = engine.search("widget", 2);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn snippet_contains_term_and_is_bounded() {
        let engine = SearchEngine::with_seed();
        for result in engine.search("webhook", 5) {
            let term = &result.matched_terms[0];
            assert!(
                result.snippet.to_lowercase().contains(term),
                "snippet missing term {term}: {}",
                result.snippet
            );
            assert!(result.snippet.len() <= 2 * SNIPPET_CONTEXT + term.len() + 6);
            let bare = result.snippet.trim_start_matches("...").trim_end_matches("...");
            assert!(plain_text(&result.article.content).contains(bare));
        }
    }

    #[test]
    fn suggest_maps_topic_to_categories() {
        let engine = SearchEngine::with_seed();
        let suggestions = engine.suggest(&SuggestionContext {
            topic: Some(ConversationTopic::PosSetup),
            ..Default::default()
        });
        assert!(!suggestions.is_empty());
        assert!(suggestions.len() <= 3);
        assert!(suggestions.iter().all(|s| matches!(
            s.article.category,
            ArticleCategory::PosIntegration | ArticleCategory::Troubleshooting
        )));
        assert!(suggestions[0].reason.contains("pos_setup"));
    }

    #[test]
    fn error_messages_boost_troubleshooting() {
        let engine = SearchEngine::with_seed();
        let suggestions = engine.suggest(&SuggestionContext {
            topic: Some(ConversationTopic::WidgetInstall),
            recent_messages: vec!["my widget is not working".to_string()],
            ..Default::default()
        });
        let top = &suggestions[0];
        assert_eq!(top.article.category, ArticleCategory::Troubleshooting);
        assert_eq!(top.confidence, 0.9);
        assert_eq!(top.reason, "Based on your issue description");
    }

    #[test]
    fn error_messages_add_troubleshooting_when_absent() {
        let engine = SearchEngine::with_seed();
        let suggestions = engine.suggest(&SuggestionContext {
            topic: Some(ConversationTopic::ApiIntegration),
            recent_messages: vec!["I hit an error calling the quotes endpoint".to_string()],
            ..Default::default()
        });
        let trouble = suggestions
            .iter()
            .find(|s| s.article.category == ArticleCategory::Troubleshooting)
            .expect("troubleshooting suggestion present");
        assert_eq!(trouble.confidence, 0.8);
        assert_eq!(trouble.reason, "May help with your issue");
    }

    #[test]
    fn lookups_work() {
        let engine = SearchEngine::with_seed();
        assert_eq!(
            engine.article_by_id("kb-001").map(|a| a.slug.as_str()),
            Some("getting-started")
        );
        assert_eq!(
            engine.article_by_slug("webhook-setup").map(|a| a.id.as_str()),
            Some("kb-006")
        );
        let popular = engine.popular_articles(2);
        assert_eq!(popular[0].id, "kb-001");
        assert_eq!(popular[1].id, "kb-002");
        assert!(!engine.related_articles("kb-002", 3).is_empty());
        assert!(engine.related_articles("missing", 3).is_empty());
    }

    proptest! {
        // Identical queries against an unchanged corpus return identical
        // ordering and scores.
        #[test]
        fn search_is_idempotent(query in "[a-z ]{0,20}") {
            let engine = SearchEngine::with_seed();
            let first = engine.search(&query, 5);
            let second = engine.search(&query, 5);
            prop_assert_eq!(first.len(), second.len());
            for (a, b) in first.iter().zip(second.iter()) {
                prop_assert_eq!(&a.article.id, &b.article.id);
                prop_assert_eq!(a.relevance_score, b.relevance_score);
                prop_assert_eq!(&a.snippet, &b.snippet);
            }
        }
    }
}
