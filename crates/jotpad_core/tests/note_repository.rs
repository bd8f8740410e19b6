use jotpad_core::{
    decode_snapshot, encode_snapshot, LoadOutcome, MemoryStore, Note, NoteRepository,
    NOTES_SLOT_KEY,
};
use uuid::Uuid;

#[test]
fn adds_append_in_call_order() {
    let mut repo = NoteRepository::load(MemoryStore::new());
    let titles = ["first", "second", "third", "fourth"];
    let ids: Vec<_> = titles.iter().map(|title| repo.add(*title, "")).collect();

    assert_eq!(repo.len(), titles.len());
    let stored: Vec<_> = repo.notes().iter().map(|n| (n.id, n.title.as_str())).collect();
    let expected: Vec<_> = ids.into_iter().zip(titles).collect();
    assert_eq!(stored, expected);
}

#[test]
fn restart_restores_an_equal_collection() {
    let mut store = MemoryStore::new();
    let before = {
        let mut repo = NoteRepository::load(&mut store);
        let id = repo.add("Groceries", "Milk, eggs");
        repo.add("Call mom", "");
        repo.toggle_completion(id);
        repo.notes().to_vec()
    };

    let after = NoteRepository::load(&mut store);
    assert_eq!(after.load_outcome(), LoadOutcome::Restored { count: 2 });
    assert_eq!(after.notes(), before.as_slice());
}

#[test]
fn unknown_ids_leave_collection_and_slot_untouched() {
    let mut store = MemoryStore::new();
    let mut repo = NoteRepository::load(&mut store);
    repo.add("keep", "body");
    let snapshot = repo.notes().to_vec();
    let ghost = Uuid::new_v4();

    assert!(!repo.update(ghost, "changed", "changed"));
    assert_eq!(repo.toggle_completion(ghost), None);
    assert_eq!(repo.notes(), snapshot.as_slice());

    drop(repo);
    let persisted = decode_snapshot(store.raw(NOTES_SLOT_KEY).unwrap()).unwrap();
    assert_eq!(persisted, snapshot);
}

#[test]
fn update_replaces_title_and_content_only() {
    let mut repo = NoteRepository::load(MemoryStore::new());
    let id = repo.add("draft", "old");
    repo.toggle_completion(id);

    assert!(repo.update(id, "final", "new"));
    let note = repo.get(id).unwrap();
    assert_eq!(note.id, id);
    assert_eq!(note.title, "final");
    assert_eq!(note.content, "new");
    assert!(note.is_completed);
}

#[test]
fn toggle_twice_restores_original_state() {
    let mut repo = NoteRepository::load(MemoryStore::new());
    let id = repo.add("flip", "");

    assert_eq!(repo.toggle_completion(id), Some(true));
    assert_eq!(repo.toggle_completion(id), Some(false));
    assert!(!repo.get(id).unwrap().is_completed);
}

#[test]
fn delete_first_of_three_keeps_order() {
    let mut repo = NoteRepository::load(MemoryStore::new());
    repo.add("A", "");
    let b = repo.add("B", "");
    let c = repo.add("C", "");

    assert_eq!(repo.delete([0]), 1);
    let remaining: Vec<_> = repo.notes().iter().map(|n| n.id).collect();
    assert_eq!(remaining, vec![b, c]);
}

#[test]
fn delete_ignores_out_of_range_and_repeated_positions() {
    let mut repo = NoteRepository::load(MemoryStore::new());
    let a = repo.add("A", "");
    repo.add("B", "");
    let c = repo.add("C", "");
    repo.add("D", "");

    assert_eq!(repo.delete([3, 1, 1, 42]), 2);
    let remaining: Vec<_> = repo.notes().iter().map(|n| n.id).collect();
    assert_eq!(remaining, vec![a, c]);

    assert_eq!(repo.delete([7]), 0);
    assert_eq!(repo.len(), 2);
}

#[test]
fn corrupted_slot_loads_as_empty_and_is_overwritten_on_next_write() {
    let mut store = MemoryStore::with_slot(NOTES_SLOT_KEY, "[{\"id\": 12, \"title\":");
    {
        let mut repo = NoteRepository::load(&mut store);
        assert!(repo.is_empty());
        assert_eq!(repo.load_outcome(), LoadOutcome::DecodeFailed);
        repo.add("fresh start", "");
    }

    let decoded = decode_snapshot(store.raw(NOTES_SLOT_KEY).unwrap()).unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].title, "fresh start");
}

#[test]
fn absent_or_blank_slot_loads_as_empty() {
    let repo = NoteRepository::load(MemoryStore::new());
    assert_eq!(repo.load_outcome(), LoadOutcome::Empty);

    let repo = NoteRepository::load(MemoryStore::with_slot(NOTES_SLOT_KEY, ""));
    assert!(repo.is_empty());
    assert_eq!(repo.load_outcome(), LoadOutcome::Empty);
}

#[test]
fn slot_written_by_another_session_is_restored_in_order() {
    let notes = vec![
        Note::with_id(Uuid::new_v4(), "one", "1"),
        Note::with_id(Uuid::new_v4(), "two", "2"),
    ];
    let store = MemoryStore::with_slot(NOTES_SLOT_KEY, encode_snapshot(&notes).unwrap());

    let repo = NoteRepository::load(store);
    assert_eq!(repo.notes(), notes.as_slice());
    assert_eq!(repo.position_of(notes[1].id), Some(1));
}

#[test]
fn groceries_scenario_ends_with_empty_persisted_slot() {
    let mut store = MemoryStore::new();
    let mut repo = NoteRepository::load(&mut store);

    let id = repo.add("Groceries", "Milk, eggs");
    let note = &repo.notes()[0];
    assert_eq!(note.title, "Groceries");
    assert_eq!(note.content, "Milk, eggs");
    assert!(!note.is_completed);

    assert_eq!(repo.toggle_completion(id), Some(true));
    assert!(repo.notes()[0].is_completed);

    repo.delete([0]);
    assert!(repo.is_empty());

    drop(repo);
    assert_eq!(store.raw(NOTES_SLOT_KEY), Some("[]"));
}
