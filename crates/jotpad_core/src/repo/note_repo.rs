//! Note repository: authoritative in-memory collection with write-through
//! persistence.
//!
//! # Responsibility
//! - Own the ordered note collection and every mutation of it.
//! - Mirror the collection into one named slot of a `KeyValueStore`.
//! - Notify subscribers after each effective mutation.
//!
//! # Invariants
//! - Note ids are unique within the collection.
//! - Order is insertion order; deletion keeps survivors in relative order.
//! - Every effective mutation is persisted before the call returns.
//! - No operation here returns an error or panics on storage/codec failure:
//!   failures are logged and degrade to a safe state.

use crate::model::note::{Note, NoteId};
use crate::snapshot::{decode_snapshot, encode_snapshot};
use crate::store::{KeyValueStore, StoreError};
use log::{debug, error, info, warn};
use std::collections::BTreeSet;

/// Default slot name holding the serialized note collection.
pub const NOTES_SLOT_KEY: &str = "notesData";

/// What happened when the repository read its slot at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Slot was absent or blank.
    Empty,
    /// Slot decoded into `count` notes.
    Restored { count: usize },
    /// Slot contents could not be decoded (bad text or bad shape); started
    /// empty.
    DecodeFailed,
    /// Store read failed; started empty.
    StoreUnavailable,
}

/// Handle returned by [`NoteRepository::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&[Note])>;

/// Owns the note collection and writes it through to `S`.
pub struct NoteRepository<S: KeyValueStore> {
    store: S,
    slot_key: String,
    notes: Vec<Note>,
    load_outcome: LoadOutcome,
    persisted: bool,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> NoteRepository<S> {
    /// Restores the collection from the default `notesData` slot.
    pub fn load(store: S) -> Self {
        Self::load_with_slot(store, NOTES_SLOT_KEY)
    }

    /// Restores the collection from `slot_key`.
    ///
    /// This is the only read of the slot for the repository's lifetime.
    /// Absent, blank or undecodable slot contents yield an empty collection.
    pub fn load_with_slot(store: S, slot_key: impl Into<String>) -> Self {
        let slot_key = slot_key.into();
        let (notes, load_outcome) = restore(&store, &slot_key);

        Self {
            store,
            slot_key,
            notes,
            load_outcome,
            persisted: true,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current collection in display order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn position_of(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    /// Whether the slot currently mirrors the in-memory collection.
    ///
    /// `false` after a failed persist, until the next successful one.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Gives the backing store back, e.g. to reload it in a new repository.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Appends a new open note and returns its id.
    ///
    /// No validation happens here; see `NoteService` for the title gate.
    pub fn add(&mut self, title: impl Into<String>, content: impl Into<String>) -> NoteId {
        let note = Note::new(title, content);
        let id = note.id;
        self.notes.push(note);
        debug!("event=note_add module=repo status=ok note_id={id}");
        self.commit();
        id
    }

    /// Replaces title and content of `id` in place.
    ///
    /// Returns `false` (and changes nothing) when `id` is unknown.
    pub fn update(
        &mut self,
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> bool {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            debug!("event=note_update module=repo status=skipped reason=not_found note_id={id}");
            return false;
        };

        note.title = title.into();
        note.content = content.into();
        debug!("event=note_update module=repo status=ok note_id={id}");
        self.commit();
        true
    }

    /// Flips the completion flag of `id` and returns the new value.
    ///
    /// Returns `None` (and changes nothing) when `id` is unknown.
    pub fn toggle_completion(&mut self, id: NoteId) -> Option<bool> {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            debug!("event=note_toggle module=repo status=skipped reason=not_found note_id={id}");
            return None;
        };

        note.is_completed = !note.is_completed;
        let completed = note.is_completed;
        debug!("event=note_toggle module=repo status=ok note_id={id} completed={completed}");
        self.commit();
        Some(completed)
    }

    /// Removes the notes at `positions` of the current order.
    ///
    /// Repeated positions count once and out-of-range positions are ignored.
    /// Always persists. Returns how many notes were removed.
    pub fn delete(&mut self, positions: impl IntoIterator<Item = usize>) -> usize {
        let len = self.notes.len();
        let (valid, ignored): (BTreeSet<usize>, BTreeSet<usize>) =
            positions.into_iter().partition(|&position| position < len);

        if !ignored.is_empty() {
            warn!(
                "event=note_delete module=repo status=partial ignored_positions={} len={len}",
                ignored.len()
            );
        }

        let mut index = 0;
        self.notes.retain(|_| {
            let keep = !valid.contains(&index);
            index += 1;
            keep
        });

        debug!(
            "event=note_delete module=repo status=ok removed={}",
            valid.len()
        );
        self.commit();
        valid.len()
    }

    /// Registers `observer` to receive the collection after every effective
    /// mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&[Note]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(current, _)| *current != id);
        self.observers.len() != before
    }

    fn commit(&mut self) {
        self.persist();
        for (_, observer) in &mut self.observers {
            observer(&self.notes);
        }
    }

    fn persist(&mut self) {
        let encoded = match encode_snapshot(&self.notes) {
            Ok(encoded) => encoded,
            Err(err) => {
                self.persisted = false;
                error!(
                    "event=notes_persist module=repo status=error error_code=encode_failed error={err}"
                );
                return;
            }
        };

        match self.store.set(&self.slot_key, &encoded) {
            Ok(()) => {
                self.persisted = true;
                debug!(
                    "event=notes_persist module=repo status=ok count={} bytes={}",
                    self.notes.len(),
                    encoded.len()
                );
            }
            Err(err) => {
                self.persisted = false;
                error!(
                    "event=notes_persist module=repo status=error error_code=store_write_failed error={err}"
                );
            }
        }
    }
}

fn restore<S: KeyValueStore>(store: &S, slot_key: &str) -> (Vec<Note>, LoadOutcome) {
    let raw = match store.get(slot_key) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => {
            info!("event=notes_load module=repo status=ok count=0 source=empty_slot");
            return (Vec::new(), LoadOutcome::Empty);
        }
        Err(err @ StoreError::Corrupt { .. }) => {
            error!("event=notes_load module=repo status=error error_code=decode_failed error={err}");
            return (Vec::new(), LoadOutcome::DecodeFailed);
        }
        Err(err) => {
            error!(
                "event=notes_load module=repo status=error error_code=store_read_failed error={err}"
            );
            return (Vec::new(), LoadOutcome::StoreUnavailable);
        }
    };

    match decode_snapshot(&raw) {
        Ok(notes) => {
            let count = notes.len();
            info!("event=notes_load module=repo status=ok count={count}");
            (notes, LoadOutcome::Restored { count })
        }
        Err(err) => {
            error!(
                "event=notes_load module=repo status=error error_code=decode_failed bytes={} error={err}",
                raw.len()
            );
            (Vec::new(), LoadOutcome::DecodeFailed)
        }
    }
}
