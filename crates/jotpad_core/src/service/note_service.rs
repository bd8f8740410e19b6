//! Note use-case service.
//!
//! # Responsibility
//! - Enforce the savable-note rule (non-blank title) for headless callers.
//! - Report unknown ids and bad positions instead of silently ignoring them.
//! - Derive list summaries (status label, two-line content preview).
//!
//! # Invariants
//! - Rejected input never reaches the repository, so nothing is persisted.
//! - Titles are stored trimmed.

use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::NoteRepository;
use crate::store::KeyValueStore;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const PREVIEW_MAX_LINES: usize = 2;
const PREVIEW_MAX_CHARS: usize = 120;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Service error for note use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteServiceError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// No note carries this id.
    NoteNotFound(NoteId),
    /// Position is outside the current collection.
    InvalidPosition { position: usize, len: usize },
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title cannot be empty"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidPosition { position, len } => {
                write!(f, "position {position} is out of range for {len} note(s)")
            }
        }
    }
}

impl Error for NoteServiceError {}

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// List row projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSummary {
    /// Position in the current collection, as accepted by `delete_notes`.
    pub position: usize,
    pub id: NoteId,
    pub title: String,
    pub is_completed: bool,
    pub status_label: &'static str,
    /// Collapsed first lines of content; `None` when content is blank.
    pub preview: Option<String>,
}

/// Note service facade over a repository.
pub struct NoteService<S: KeyValueStore> {
    repo: NoteRepository<S>,
}

impl<S: KeyValueStore> NoteService<S> {
    pub fn new(repo: NoteRepository<S>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &NoteRepository<S> {
        &self.repo
    }

    /// Mutable access, e.g. for `subscribe`.
    pub fn repository_mut(&mut self) -> &mut NoteRepository<S> {
        &mut self.repo
    }

    pub fn into_repository(self) -> NoteRepository<S> {
        self.repo
    }

    /// Creates a note after validating the title.
    pub fn create_note(
        &mut self,
        title: &str,
        content: impl Into<String>,
    ) -> NoteServiceResult<Note> {
        let title = normalize_title(title)?;
        let id = self.repo.add(title, content);
        self.read_back(id)
    }

    /// Replaces title and content of an existing note.
    pub fn update_note(
        &mut self,
        id: NoteId,
        title: &str,
        content: impl Into<String>,
    ) -> NoteServiceResult<Note> {
        let title = normalize_title(title)?;
        if !self.repo.update(id, title, content) {
            return Err(NoteServiceError::NoteNotFound(id));
        }
        self.read_back(id)
    }

    /// Flips completion and returns the updated note.
    pub fn toggle_completion(&mut self, id: NoteId) -> NoteServiceResult<Note> {
        self.repo
            .toggle_completion(id)
            .ok_or(NoteServiceError::NoteNotFound(id))?;
        self.read_back(id)
    }

    /// Deletes notes by position; all positions must be valid.
    ///
    /// Checks every position before removing anything.
    pub fn delete_notes(&mut self, positions: &[usize]) -> NoteServiceResult<usize> {
        let len = self.repo.len();
        if let Some(&position) = positions.iter().find(|&&position| position >= len) {
            return Err(NoteServiceError::InvalidPosition { position, len });
        }
        Ok(self.repo.delete(positions.iter().copied()))
    }

    /// Deletes one note by id.
    pub fn delete_note(&mut self, id: NoteId) -> NoteServiceResult<()> {
        let position = self
            .repo
            .position_of(id)
            .ok_or(NoteServiceError::NoteNotFound(id))?;
        self.repo.delete([position]);
        Ok(())
    }

    pub fn get_note(&self, id: NoteId) -> NoteServiceResult<Note> {
        self.read_back(id)
    }

    /// Summaries in display order.
    pub fn list_notes(&self) -> Vec<NoteSummary> {
        self.repo
            .notes()
            .iter()
            .enumerate()
            .map(|(position, note)| NoteSummary {
                position,
                id: note.id,
                title: note.title.clone(),
                is_completed: note.is_completed,
                status_label: note.status_label(),
                preview: derive_content_preview(&note.content),
            })
            .collect()
    }

    fn read_back(&self, id: NoteId) -> NoteServiceResult<Note> {
        self.repo
            .get(id)
            .cloned()
            .ok_or(NoteServiceError::NoteNotFound(id))
    }
}

fn normalize_title(title: &str) -> NoteServiceResult<&str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        Err(NoteServiceError::EmptyTitle)
    } else {
        Ok(trimmed)
    }
}

/// Derives the list preview of a note body.
///
/// Rules:
/// - keep the first two non-blank lines;
/// - collapse whitespace runs inside each line to one space;
/// - join the lines with one space and keep at most 120 chars.
pub fn derive_content_preview(content: &str) -> Option<String> {
    let lines: Vec<String> = content
        .lines()
        .map(|line| WHITESPACE_RE.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .take(PREVIEW_MAX_LINES)
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" ").chars().take(PREVIEW_MAX_CHARS).collect())
    }
}
