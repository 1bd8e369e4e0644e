// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use partnerdesk_core::DeskError;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::migrations;

/// Handle to the SQLite database backing the chat service.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if necessary) the database at `path`, applies
    /// connection pragmas, and runs pending migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DeskError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| DeskError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        let conn = Connection::open(path.as_ref()).await.map_err(map_tr_err)?;
        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            )?;
            migrations::run_migrations(conn)
                .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path = %path.as_ref().display(), "database opened");
        Ok(Self { conn })
    }

    /// Returns the underlying serialized connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Maps a tokio-rusqlite error into the workspace error type.
pub fn map_tr_err(err: tokio_rusqlite::Error) -> DeskError {
    DeskError::Storage {
        source: Box::new(err),
    }
}
