// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge-base article types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Category of a knowledge-base article.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ArticleCategory {
    GettingStarted,
    WidgetIntegration,
    ApiReference,
    PosIntegration,
    Troubleshooting,
}

/// Reader skill level an article targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// A single knowledge-base article.
///
/// Articles form an immutable corpus injected into the search engine at
/// construction time, so tests can substitute fixture corpora.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeArticle {
    /// Stable article identifier (e.g., "kb-001").
    pub id: String,
    /// Display title.
    pub title: String,
    /// URL-friendly identifier.
    pub slug: String,
    /// One-sentence summary used in search results and suggestions.
    pub summary: String,
    /// Full article body in markdown.
    pub content: String,
    /// Primary category.
    pub category: ArticleCategory,
    /// Freeform tags for search matching.
    pub tags: Vec<String>,
    /// Slugs of related articles or topics.
    pub related_topics: Vec<String>,
    /// Reader skill level.
    pub difficulty: Difficulty,
    /// Estimated read time in minutes.
    pub estimated_read_time: u32,
    /// Date of last content revision.
    pub last_updated: NaiveDate,
    /// Number of "helpful" votes; feeds the popularity boost.
    pub helpful_count: u32,
    /// Number of views; feeds the popularity boost.
    pub view_count: u32,
}
