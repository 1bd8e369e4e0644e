// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQL query modules, one per table.
//!
//! Enum-valued columns are stored as snake_case TEXT, structured columns as
//! JSON TEXT, and timestamps as RFC 3339 TEXT (UTC, millisecond precision).
//! Shared column decoding helpers live here so both tables stay consistent.

pub mod conversations;
pub mod messages;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use serde::de::DeserializeOwned;

/// Renders a timestamp the way it is stored in TEXT columns.
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn parse_timestamp(idx: usize, raw: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parses a snake_case TEXT column into a strum-backed enum.
pub(crate) fn parse_text_enum<T>(idx: usize, raw: String) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parses a JSON TEXT column.
pub(crate) fn parse_json<T: DeserializeOwned>(idx: usize, raw: String) -> rusqlite::Result<T> {
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Serializes a value into a JSON TEXT column, outside the connection closure.
pub(crate) fn to_json<T: serde::Serialize>(
    value: &T,
) -> Result<String, partnerdesk_core::DeskError> {
    serde_json::to_string(value).map_err(|e| partnerdesk_core::DeskError::Storage {
        source: Box::new(e),
    })
}
