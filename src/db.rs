// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use rusqlite::{Connection, ErrorCode};

use crate::error::{LedgerError, Result};

/// Opens a fresh SQLite connection. The ledger calls this on start-up and
/// again whenever the previous connection was lost.
pub trait Connector {
    fn connect(&self) -> rusqlite::Result<Connection>;
}

#[derive(Debug, Clone)]
pub struct FileConnector {
    path: PathBuf,
}

impl FileConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Connector for FileConnector {
    fn connect(&self) -> rusqlite::Result<Connection> {
        Connection::open(&self.path)
    }
}

/// Private in-memory database. A reconnect yields an empty database.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryConnector;

impl Connector for MemoryConnector {
    fn connect(&self) -> rusqlite::Result<Connection> {
        Connection::open_in_memory()
    }
}

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    INSERT OR IGNORE INTO settings(key, value) VALUES ('categories', '');
    INSERT OR IGNORE INTO settings(key, value) VALUES ('payment_methods', '');

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        amount INTEGER NOT NULL CHECK(amount > 0),
        kind TEXT NOT NULL CHECK(kind IN ('income','expense')),
        category TEXT NOT NULL,
        description TEXT,
        payment_method TEXT NOT NULL,
        paid INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    "#,
    )
}

/// Errors after which the connection is assumed dead and worth reopening.
pub(crate) fn is_connection_lost(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => matches!(
            e.code,
            ErrorCode::SystemIoFailure
                | ErrorCode::CannotOpen
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
        ),
        _ => false,
    }
}

fn establish<C: Connector>(connector: &C) -> Result<Connection> {
    let conn = connector.connect()?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Handle to the ledger database.
///
/// Owns a single lazily (re)established connection. Every operation goes
/// through [`Ledger::with_retry`], so a dropped connection is reopened and
/// the operation retried exactly once before the failure is surfaced.
pub struct Ledger<C: Connector = FileConnector> {
    connector: C,
    conn: Option<Connection>,
}

impl Ledger<FileConnector> {
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(FileConnector::new(path))
    }
}

impl Ledger<MemoryConnector> {
    pub fn open_in_memory() -> Result<Self> {
        Self::open(MemoryConnector)
    }
}

impl<C: Connector> Ledger<C> {
    pub fn open(connector: C) -> Result<Self> {
        let conn = establish(&connector)?;
        Ok(Self {
            connector,
            conn: Some(conn),
        })
    }

    fn connection(&mut self) -> Result<&mut Connection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => {
                tracing::info!("opening database connection");
                establish(&self.connector)?
            }
        };
        Ok(self.conn.insert(conn))
    }

    /// Run `op` against the connection. A connection-level failure drops the
    /// connection, reopens it and runs `op` once more.
    pub(crate) fn with_retry<T>(
        &mut self,
        name: &str,
        mut op: impl FnMut(&mut Connection) -> Result<T>,
    ) -> Result<T> {
        match self.connection().and_then(&mut op) {
            Err(LedgerError::Persistence(e)) if is_connection_lost(&e) => {
                tracing::warn!("{name}: connection lost ({e}), reconnecting and retrying once");
                self.conn = None;
                self.connection()
                    .and_then(&mut op)
                    .inspect_err(|error| tracing::error!("{name} failed after retry: {error}"))
            }
            other => other,
        }
    }
}
