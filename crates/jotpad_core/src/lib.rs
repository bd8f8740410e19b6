//! Core domain logic for Jotpad.
//! This crate is the single source of truth for note invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod snapshot;
pub mod store;

pub use config::{open_store, ConfigError, CoreConfig, StoreBackend};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId};
pub use repo::note_repo::{LoadOutcome, NoteRepository, SubscriptionId, NOTES_SLOT_KEY};
pub use service::note_service::{
    derive_content_preview, NoteService, NoteServiceError, NoteServiceResult, NoteSummary,
};
pub use snapshot::{decode_snapshot, encode_snapshot, SnapshotError, SnapshotResult};
pub use store::{
    validate_slot_key, FileStore, KeyValueStore, MemoryStore, SqliteStore, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
