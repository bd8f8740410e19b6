//! Key-value persistence port and its backends.
//!
//! # Responsibility
//! - Define the string-keyed slot contract the note repository writes through.
//! - Provide interchangeable backends: in-memory, directory of files, SQLite.
//!
//! # Invariants
//! - `get` on a never-written key returns `Ok(None)`, not an error.
//! - `set` overwrites the previous value of the slot in full.
//! - Slot keys are portable: any key accepted by `validate_slot_key` works on
//!   every backend.

use crate::db::SlotDbError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod file;
mod memory;
mod sqlite;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Backend failure while reading or writing a slot.
#[derive(Debug)]
pub enum StoreError {
    /// Key does not satisfy `validate_slot_key`.
    InvalidKey(String),
    /// Slot exists but its bytes are not UTF-8 text.
    Corrupt { key: String },
    /// Filesystem failure in the file backend.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// SQLite failure in the database backend.
    Db(SlotDbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey(key) => write!(
                f,
                "invalid store key `{key}`; use ASCII letters, digits, `_`, `-` or `.` and do not start with `.`"
            ),
            Self::Corrupt { key } => write!(f, "store slot `{key}` does not hold UTF-8 text"),
            Self::Io { path, source } => write!(f, "store io error at `{}`: {source}", path.display()),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidKey(_) | Self::Corrupt { .. } => None,
            Self::Io { source, .. } => Some(source),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<SlotDbError> for StoreError {
    fn from(value: SlotDbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(SlotDbError::Sqlite(value))
    }
}

/// Checks that `key` can name a slot on every backend.
///
/// Non-empty, ASCII letters, digits, `_`, `-` and `.` only, no leading `.`.
pub fn validate_slot_key(key: &str) -> StoreResult<()> {
    let well_formed = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if well_formed {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// String-keyed slot storage.
pub trait KeyValueStore {
    /// Reads the raw value of `key`, or `None` when the slot was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the value of `key`.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}
