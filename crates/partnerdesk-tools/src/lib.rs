// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool registry and executor for the Partnerdesk support agent.
//!
//! Defines the fixed set of capabilities the language model can invoke
//! (code generators, docs search, status lookup, escalation) and executes
//! them deterministically. The executor is total: malformed calls from the
//! model degrade to diagnostic results instead of errors.

pub mod api;
pub mod docs;
pub mod escalate;
pub mod executor;
pub mod pos;
pub mod registry;
pub mod status;
pub mod widget;

pub use executor::{EscalationSignal, ToolExecutor, ToolOutcome};
pub use registry::{tool_definitions, ToolName};
pub use status::StatusClient;
