//! Repository layer: ownership of the note collection and its persistence.
//!
//! # Invariants
//! - The repository is the only writer of its store slot.
//! - Storage and codec failures never escape as errors; they are logged.

pub mod note_repo;
