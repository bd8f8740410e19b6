use super::{KeyValueStore, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Store backed by the `kv_slots` table of a migrated SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the slot database at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!(
            "event=store_set module=store backend=sqlite status=ok bytes={}",
            value.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteStore;
    use crate::store::KeyValueStore;

    #[test]
    fn in_memory_store_upserts_slots() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get("notesData").unwrap(), None);

        store.set("notesData", "[]").unwrap();
        store.set("notesData", "[{}]").unwrap();
        store.set("other", "x").unwrap();

        assert_eq!(store.get("notesData").unwrap().as_deref(), Some("[{}]"));
        assert_eq!(store.get("other").unwrap().as_deref(), Some("x"));
    }
}
