use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn jotpad(data_dir: &Path, backend: &str) -> Command {
    let mut cmd = Command::cargo_bin("jotpad").unwrap();
    cmd.env_remove("JOTPAD_SLOT")
        .env_remove("JOTPAD_LOG_DIR")
        .env("JOTPAD_LOG_LEVEL", "info")
        .env("JOTPAD_STORE", backend)
        .env("JOTPAD_DATA_DIR", data_dir);
    cmd
}

fn add_note(data_dir: &Path, backend: &str, title: &str, content: &str) -> String {
    let output = jotpad(data_dir, backend)
        .args(["add", title, content])
        .output()
        .unwrap();
    assert!(output.status.success(), "add failed: {output:?}");
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn empty_list_prints_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    jotpad(dir.path(), "sqlite")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes yet."));
}

#[test]
fn groceries_flow_persists_between_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_note(dir.path(), "sqlite", "Groceries", "Milk, eggs");
    assert!(uuid::Uuid::parse_str(&id).is_ok());

    jotpad(dir.path(), "sqlite")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("  0  [ ] Groceries"))
        .stdout(predicate::str::contains("Milk, eggs"));

    jotpad(dir.path(), "sqlite")
        .args(["toggle", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries: Completed"));

    jotpad(dir.path(), "sqlite")
        .args(["show", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: Completed"));

    jotpad(dir.path(), "sqlite")
        .args(["delete", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 note(s)."));

    jotpad(dir.path(), "sqlite")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes yet."));
}

#[test]
fn edit_without_content_keeps_body_on_file_backend() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_note(dir.path(), "file", "draft", "keep me");

    jotpad(dir.path(), "file")
        .args(["edit", id.as_str(), "final"])
        .assert()
        .success();

    jotpad(dir.path(), "file")
        .args(["show", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("final\n"))
        .stdout(predicate::str::contains("keep me"));
    assert!(dir.path().join("slots").join("notesData.slot").exists());
}

#[test]
fn blank_title_and_unknown_id_fail_with_exit_code_1() {
    let dir = tempfile::tempdir().unwrap();

    jotpad(dir.path(), "sqlite")
        .args(["add", "   "])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("note title cannot be empty"));

    jotpad(dir.path(), "sqlite")
        .args(["toggle", "11111111-2222-4333-8444-555555555555"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("note not found"));
}

#[test]
fn out_of_range_delete_is_rejected_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    add_note(dir.path(), "file", "only", "");

    jotpad(dir.path(), "file")
        .args(["delete", "0", "3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("position 3 is out of range"));

    jotpad(dir.path(), "file")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] only"));
}

#[test]
fn corrupted_slot_warns_and_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let slots = dir.path().join("slots");
    std::fs::create_dir_all(&slots).unwrap();
    std::fs::write(slots.join("notesData.slot"), "{ definitely not notes").unwrap();

    jotpad(dir.path(), "file")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes yet."))
        .stderr(predicate::str::contains("could not be read"));
}

#[test]
fn unknown_backend_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    jotpad(dir.path(), "redis")
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown store backend"));
}

#[test]
fn non_utf8_slot_warns_and_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let slots = dir.path().join("slots");
    std::fs::create_dir_all(&slots).unwrap();
    std::fs::write(slots.join("notesData.slot"), [0xff, 0xfe, b'[']).unwrap();

    jotpad(dir.path(), "file")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes yet."))
        .stderr(predicate::str::contains("could not be read"));
}

#[test]
fn unreadable_store_refuses_to_write() {
    let dir = tempfile::tempdir().unwrap();
    let slot = dir.path().join("slots").join("notesData.slot");
    // A directory where the slot file belongs fails every read.
    std::fs::create_dir_all(&slot).unwrap();

    jotpad(dir.path(), "file")
        .args(["add", "Groceries"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("could not be read from the store"));
    assert!(slot.is_dir());
}

#[test]
fn invalid_slot_key_fails_before_anything_is_printed() {
    let dir = tempfile::tempdir().unwrap();

    jotpad(dir.path(), "sqlite")
        .args(["--slot", "bad/key", "add", "x"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid store key `bad/key`"));

    jotpad(dir.path(), "file")
        .args(["--slot", "../escape", "add", "x"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
    assert!(!dir.path().join("escape.slot").exists());
}

#[test]
fn failed_save_prints_no_note_id() {
    let dir = tempfile::tempdir().unwrap();
    let slots = dir.path().join("slots");
    // Occupy the staging name so the write-through cannot land.
    std::fs::create_dir_all(slots.join(".notesData.slot.tmp")).unwrap();

    jotpad(dir.path(), "file")
        .args(["add", "Groceries"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("changes could not be saved"));
    assert!(!slots.join("notesData.slot").exists());
}
