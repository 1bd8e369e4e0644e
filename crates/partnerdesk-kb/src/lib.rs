// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge-base search engine for Partnerdesk.
//!
//! Holds the support article corpus and provides lexical relevance search,
//! context-driven suggestions, and article lookups. The corpus is injected
//! at engine construction; [`seed::seed_articles`] supplies the built-in one.

pub mod article;
pub mod search;
pub mod seed;

pub use article::{ArticleCategory, Difficulty, KnowledgeArticle};
pub use search::{ArticleSuggestion, SearchEngine, SearchResult, SuggestionContext};
