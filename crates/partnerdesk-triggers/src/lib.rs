// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Proactive chat trigger engine.
//!
//! A deterministic state machine that turns browser signals (idle time,
//! exit intent, scroll depth, form and runtime errors) into a small number
//! of non-spammy chat prompts, with per-route greeting copy.

pub mod context;
pub mod engine;
pub mod trigger;

pub use context::{page_context, PageContext, DEFAULT_CONTEXT};
pub use engine::TriggerEngine;
pub use trigger::{
    BrowserSignal, FormErrorContext, ProactiveTrigger, TriggerKind, TriggerPriority,
};
