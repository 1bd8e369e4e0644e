// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge-base search from the command line.

use partnerdesk_core::DeskError;
use partnerdesk_kb::SearchEngine;

pub fn run(query: &str, limit: usize) -> Result<(), DeskError> {
    if query.trim().is_empty() {
        println!("Nothing to search for. Try: partnerdesk search widget colors");
        return Ok(());
    }

    let engine = SearchEngine::with_seed();
    let results = engine.search(query, limit);
    if results.is_empty() {
        println!("No articles matched \"{query}\".");
        return Ok(());
    }

    for (rank, result) in results.iter().enumerate() {
        println!(
            "{}. {} ({}, score {:.1})",
            rank + 1,
            result.article.title,
            result.article.category,
            result.relevance_score,
        );
        println!("   /docs/{}", result.article.slug);
        println!("   {}\n", result.snippet);
    }
    Ok(())
}
