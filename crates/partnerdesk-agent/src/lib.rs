// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool-calling conversation agent for Partnerdesk.
//!
//! Orchestrates the exchange with the completion service: system prompt and
//! context in, zero or more tool rounds through `partnerdesk-tools`, final
//! assistant text out. The agent is transport-agnostic; persisting its
//! output is the caller's job.

pub mod agent;
pub mod context;

pub use agent::{AgentReply, SupportAgent};
pub use context::AgentContext;
