// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Partnerdesk support core.

use thiserror::Error;

/// The primary error type used across all Partnerdesk crates.
#[derive(Debug, Error)]
pub enum DeskError {
    /// Configuration errors (invalid TOML, missing required fields, missing credentials).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Completion-service errors (API failure, malformed response, transport).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Agent loop errors (contract violations surfaced by the conversation loop).
    #[error("agent error: {0}")]
    Agent(String),

    /// A requested entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desk_error_has_all_variants() {
        let _config = DeskError::Config("test".into());
        let _storage = DeskError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _provider = DeskError::Provider {
            message: "test".into(),
            source: None,
        };
        let _agent = DeskError::Agent("test".into());
        let _not_found = DeskError::NotFound {
            entity: "conversation",
            id: "c-1".into(),
        };
        let _timeout = DeskError::Timeout {
            duration: std::time::Duration::from_secs(10),
        };
        let _internal = DeskError::Internal("test".into());
    }

    #[test]
    fn not_found_display_includes_entity_and_id() {
        let err = DeskError::NotFound {
            entity: "conversation",
            id: "abc".into(),
        };
        assert_eq!(err.to_string(), "conversation not found: abc");
    }
}
