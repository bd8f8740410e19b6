use super::{validate_slot_key, KeyValueStore, StoreError, StoreResult};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const SLOT_EXTENSION: &str = "slot";

/// Directory-backed store: one `<key>.slot` file per slot.
///
/// Writes land in a hidden temp file first and are renamed into place, so a
/// reader never observes a partially written slot.
///
/// Assumes a single writer per slot: the staging name `.<key>.slot.tmp` is
/// fixed, so two processes writing the same slot at once race on it.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> StoreResult<PathBuf> {
        validate_slot_key(key)?;
        Ok(self.dir.join(format!("{key}.{SLOT_EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) if err.kind() == ErrorKind::InvalidData => Err(StoreError::Corrupt {
                key: key.to_string(),
            }),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.slot_path(key)?;
        let staging = self.dir.join(format!(".{key}.{SLOT_EXTENSION}.tmp"));

        fs::write(&staging, value).map_err(|source| StoreError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(
            "event=store_set module=store backend=file status=ok bytes={}",
            value.len()
        );
        Ok(())
    }
}
