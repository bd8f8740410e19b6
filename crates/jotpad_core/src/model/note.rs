//! Note domain model.
//!
//! # Responsibility
//! - Define the note record and its wire field names.
//! - Provide constructors used by the repository and by import paths.
//!
//! # Invariants
//! - `id` is stable for the lifetime of a note and never reused.
//! - Equality is structural over every field, `id` included.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// A single user-authored note.
///
/// Serialized with camelCase keys (`id`, `title`, `content`, `isCompleted`).
/// Every key is required on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub is_completed: bool,
}

impl Note {
    /// Creates an open note with a freshly generated id.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, content)
    }

    /// Creates an open note with a caller-provided id.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            is_completed: false,
        }
    }

    /// Human-readable completion badge.
    pub fn status_label(&self) -> &'static str {
        if self.is_completed {
            "Completed"
        } else {
            "In Progress"
        }
    }
}
