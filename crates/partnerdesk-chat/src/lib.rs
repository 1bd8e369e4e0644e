// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation storage and live fan-out for Partnerdesk.
//!
//! SQLite-backed persistence (WAL, single serialized writer) for
//! conversations and their append-only message history, plus an in-process
//! subscription hub that streams message and status events to watchers.

pub mod database;
pub mod events;
pub mod migrations;
pub mod queries;
pub mod service;

pub use database::Database;
pub use events::{ChatEvent, MessageFeed, Subscription, SubscriptionHub};
pub use service::{ChatService, ContextUpdate, ConversationInit, NewMessage};
