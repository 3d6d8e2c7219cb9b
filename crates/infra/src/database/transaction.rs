//! SQLite transaction handle
//!
//! Owns one pooled connection for the lifetime of a transaction. Write
//! transactions open with `BEGIN IMMEDIATE`, taking SQLite's write lock up
//! front so two read-decide-write sequences can never interleave. A handle
//! dropped before [`commit`](StoreTransaction::commit) rolls back.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use flyball_core::{StoreTransaction, TxMode};
use flyball_domain::{PlannerError, Result};
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use tracing::{instrument, warn};

use super::pool::SqliteConnection;
use crate::errors::map_sql_error;

/// An open SQLite transaction
pub struct SqliteTransaction {
    conn: SqliteConnection,
    finished: bool,
}

impl SqliteTransaction {
    #[instrument(skip(conn))]
    pub(crate) fn begin(conn: SqliteConnection, mode: TxMode) -> Result<Self> {
        let sql = match mode {
            TxMode::Read => "BEGIN DEFERRED",
            TxMode::Write => "BEGIN IMMEDIATE",
        };
        conn.execute_batch(sql).map_err(map_sql_error)?;
        Ok(Self { conn, finished: false })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl StoreTransaction for SqliteTransaction {
    fn commit(mut self: Box<Self>) -> Result<()> {
        self.conn.execute_batch("COMMIT").map_err(map_sql_error)?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for SqliteTransaction {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(err) = self.conn.execute_batch("ROLLBACK") {
            warn!(error = %err, "rollback failed");
        }
    }
}

// ============================================================================
// Column codecs shared by the entity repositories
// ============================================================================

/// Read a UUID-backed id stored as text.
pub(crate) fn get_id<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = PlannerError>,
{
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|err: PlannerError| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
    })
}

/// Fixed-width RFC 3339 so text order matches time order.
pub(crate) fn timestamp_text(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn get_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

/// Parse a status column through its `FromStr` impl.
pub(crate) fn get_status<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = PlannerError>,
{
    get_id(row, idx)
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

pub(crate) fn int_to_bool(value: i64) -> bool {
    value != 0
}

pub(crate) fn count_to_usize(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}
