// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat-completions provider adapter for Partnerdesk.
//!
//! This crate implements [`CompletionProvider`] for the OpenAI
//! chat-completions API, translating the workspace's provider-neutral
//! conversation types to and from the wire format.
//!
//! [`CompletionProvider`]: partnerdesk_core::completion::CompletionProvider

pub mod client;
pub mod types;

pub use client::OpenAiClient;
