//! Whole-collection snapshot codec.
//!
//! # Responsibility
//! - Encode the ordered note collection into one JSON text document.
//! - Decode a stored document back into the ordered collection.
//!
//! # Invariants
//! - Decoding is all-or-nothing: one bad record fails the whole document.
//! - A decoded collection never contains the same id twice.
//! - `decode_snapshot(&encode_snapshot(notes)?)? == notes`.

use crate::model::note::{Note, NoteId};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Snapshot encode/decode failure.
#[derive(Debug)]
pub enum SnapshotError {
    /// In-memory collection could not be serialized.
    Encode(serde_json::Error),
    /// Stored text is not a well-formed note array.
    Decode(serde_json::Error),
    /// Stored text is well-formed but repeats a note id.
    DuplicateId(NoteId),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode notes snapshot: {err}"),
            Self::Decode(err) => write!(f, "failed to decode notes snapshot: {err}"),
            Self::DuplicateId(id) => write!(f, "notes snapshot repeats id {id}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

/// Encodes notes as a JSON array in collection order.
pub fn encode_snapshot(notes: &[Note]) -> SnapshotResult<String> {
    serde_json::to_string(notes).map_err(SnapshotError::Encode)
}

/// Decodes a JSON array of notes, preserving document order.
///
/// # Errors
/// - `Decode` for malformed JSON, a non-array document, or a record missing
///   any of `id`, `title`, `content`, `isCompleted`.
/// - `DuplicateId` when two records share an id.
pub fn decode_snapshot(raw: &str) -> SnapshotResult<Vec<Note>> {
    let notes: Vec<Note> = serde_json::from_str(raw).map_err(SnapshotError::Decode)?;

    let mut seen = HashSet::with_capacity(notes.len());
    for note in &notes {
        if !seen.insert(note.id) {
            return Err(SnapshotError::DuplicateId(note.id));
        }
    }

    Ok(notes)
}
