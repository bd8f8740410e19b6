//! SQLite file behind the `sqlite` slot store.
//!
//! # Responsibility
//! - Open the slot database and bring its `kv_slots` schema up to date.
//! - Report schema drift as a typed error so the store can refuse the file.
//!
//! # Invariants
//! - The applied schema revision lives in `PRAGMA user_version`.
//! - A slot database written by a newer binary is never touched.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type SlotDbResult<T> = Result<T, SlotDbError>;

/// Failure opening or migrating the slot database.
#[derive(Debug)]
pub enum SlotDbError {
    Sqlite(rusqlite::Error),
    /// File carries a schema revision this binary does not know.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for SlotDbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "slot database error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "slot database uses schema revision {found}, this build only knows up to {supported}"
            ),
        }
    }
}

impl Error for SlotDbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for SlotDbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Schema revision recorded in the slot database.
pub fn schema_revision(conn: &Connection) -> SlotDbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}
