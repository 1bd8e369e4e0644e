// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Partnerdesk - partner support assistant for event-insurance integrations.
//!
//! Binary entry point. Subcommands exercise the assistant pieces directly:
//! an interactive support chat, knowledge-base search, and an active
//! conversation listing for the support team.

mod chat;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Partnerdesk - partner support assistant.
#[derive(Parser, Debug)]
#[command(name = "partnerdesk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive support chat session.
    Chat {
        /// Resume an existing conversation instead of starting fresh.
        #[arg(long)]
        conversation: Option<String>,
        /// Partner id to attach to the conversation context.
        #[arg(long)]
        partner_id: Option<String>,
    },
    /// Search the knowledge base.
    Search {
        /// Query terms.
        query: Vec<String>,
        /// Maximum number of results.
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// List conversations still needing attention.
    Conversations,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match partnerdesk_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            partnerdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.agent.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Some(Commands::Chat {
            conversation,
            partner_id,
        }) => chat::run(&config, conversation, partner_id).await,
        Some(Commands::Search { query, limit }) => search::run(&query.join(" "), limit),
        Some(Commands::Conversations) => chat::list_active(&config).await,
        None => {
            println!("partnerdesk: use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("partnerdesk: {err}");
        std::process::exit(1);
    }
}
