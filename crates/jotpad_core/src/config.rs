//! Runtime configuration for front ends.
//!
//! # Responsibility
//! - Resolve store backend, data directory, slot name and logging settings.
//! - Build the boxed store the repository is injected with.
//!
//! # Invariants
//! - Blank environment values fall back to defaults.
//! - The slot key is never empty and is a valid key for every backend.

use crate::logging::default_log_level;
use crate::repo::note_repo::NOTES_SLOT_KEY;
use crate::store::{
    validate_slot_key, FileStore, KeyValueStore, MemoryStore, SqliteStore, StoreError, StoreResult,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_STORE: &str = "JOTPAD_STORE";
pub const ENV_DATA_DIR: &str = "JOTPAD_DATA_DIR";
pub const ENV_SLOT: &str = "JOTPAD_SLOT";
pub const ENV_LOG_LEVEL: &str = "JOTPAD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "JOTPAD_LOG_DIR";

const APP_DIR_NAME: &str = "jotpad";
const SQLITE_FILE_NAME: &str = "jotpad.sqlite3";
const FILE_STORE_DIR_NAME: &str = "slots";
const LOG_DIR_NAME: &str = "logs";

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownBackend(String),
    EmptySlotKey,
    /// Slot key contains characters some backend cannot store.
    InvalidSlotKey(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownBackend(value) => write!(
                f,
                "unknown store backend `{value}`; expected memory|file|sqlite"
            ),
            Self::EmptySlotKey => write!(f, "store slot key cannot be empty"),
            Self::InvalidSlotKey(reason) => write!(f, "{reason}"),
        }
    }
}

impl Error for ConfigError {}

/// Which `KeyValueStore` implementation backs the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Nothing survives the process.
    Memory,
    File,
    #[default]
    Sqlite,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File => "file",
            Self::Sqlite => "sqlite",
        }
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(ConfigError::UnknownBackend(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub backend: StoreBackend,
    pub data_dir: PathBuf,
    pub slot_key: String,
    pub log_level: String,
    /// Defaults to `<data_dir>/logs` when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: default_data_dir(),
            slot_key: NOTES_SLOT_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads `JOTPAD_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(backend) = var(ENV_STORE) {
            config.backend = backend.parse()?;
        }
        if let Some(dir) = var(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(slot) = var(ENV_SLOT) {
            config.slot_key = slot;
        }
        if let Some(level) = var(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        config.log_dir = var(ENV_LOG_DIR).map(PathBuf::from);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_key.trim().is_empty() {
            return Err(ConfigError::EmptySlotKey);
        }
        validate_slot_key(&self.slot_key)
            .map_err(|err| ConfigError::InvalidSlotKey(err.to_string()))
    }

    pub fn resolved_log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join(LOG_DIR_NAME))
    }

    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join(SQLITE_FILE_NAME)
    }

    pub fn file_store_dir(&self) -> PathBuf {
        self.data_dir.join(FILE_STORE_DIR_NAME)
    }
}

/// Opens the configured backend.
///
/// Creates the data directory for `file` and `sqlite` backends.
pub fn open_store(config: &CoreConfig) -> StoreResult<Box<dyn KeyValueStore>> {
    let store: Box<dyn KeyValueStore> = match config.backend {
        StoreBackend::Memory => Box::new(MemoryStore::new()),
        StoreBackend::File => Box::new(FileStore::open(config.file_store_dir())?),
        StoreBackend::Sqlite => {
            std::fs::create_dir_all(&config.data_dir).map_err(|source| StoreError::Io {
                path: config.data_dir.clone(),
                source,
            })?;
            Box::new(SqliteStore::open(config.sqlite_path())?)
        }
    };
    info!(
        "event=store_open module=config status=ok backend={}",
        config.backend.as_str()
    );
    Ok(store)
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}
