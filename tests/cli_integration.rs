use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn notecase(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("notecase").unwrap();
    cmd.env("NOTECASE_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("NOTECASE_LOG")
        .current_dir(home);
    cmd
}

fn add(home: &Path, args: &[&str]) {
    notecase(home).arg("add").args(args).assert().success();
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn add_then_list() {
    let home = TempDir::new().unwrap();
    notecase(home.path())
        .args(["add", "Buy", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note added (text): Buy milk"));

    notecase(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Buy milk"))
        .stdout(predicate::str::contains("Just now"));
}

#[test]
fn empty_note_is_rejected() {
    let home = TempDir::new().unwrap();
    notecase(home.path())
        .arg("add")
        .write_stdin("   ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid note"));
    assert!(!home.path().join("storage.json").exists());
}

#[test]
fn pin_moves_note_to_pinned_partition() {
    let home = TempDir::new().unwrap();
    add(home.path(), &["Buy", "milk"]);
    add(home.path(), &["--code", "python", "print(1)"]);

    // Newest first: the code note is 1, "Buy milk" is 2
    notecase(home.path())
        .args(["pin", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note pinned: Buy milk"));

    notecase(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("p1. Buy milk"))
        .stdout(predicate::str::contains("1. [python] print(1)"));

    notecase(home.path())
        .args(["list", "--pinned"])
        .assert()
        .success()
        .stdout(predicate::str::contains("print(1)").not());
}

#[test]
fn export_of_empty_store_fails() {
    let home = TempDir::new().unwrap();
    notecase(home.path())
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No notes to export"));
}

#[test]
fn export_and_replace_import_round_trip() {
    let home = TempDir::new().unwrap();
    add(home.path(), &["first"]);
    add(home.path(), &["second"]);
    let export = home.path().join("backup.json");

    notecase(home.path())
        .arg("export")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 note(s)"));

    let doc = read_json(&export);
    assert_eq!(doc["version"], "1.0");
    assert_eq!(doc["notesCount"], 2);
    assert!(doc["exportDate"].as_str().unwrap().ends_with('Z'));

    let other = TempDir::new().unwrap();
    add(other.path(), &["to be replaced"]);
    notecase(other.path())
        .arg("import")
        .arg(&export)
        .args(["--mode", "replace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Replaced 1 existing note(s) with 2 imported"));

    let stored = read_json(&other.path().join("storage.json"));
    let notes = stored["secureNotes"].as_array().unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["content"], "second");
    assert_eq!(notes[1]["content"], "first");
}

#[test]
fn merge_import_dedups_by_content() {
    let home = TempDir::new().unwrap();
    add(home.path(), &["Hi"]);

    let payload = home.path().join("in.json");
    std::fs::write(
        &payload,
        r#"{"notes": [
            {"id": "x1", "type": "text", "content": "hi", "createdAt": 1, "updatedAt": 1},
            {"id": "x2", "content": "brand new", "createdAt": 2, "updatedAt": 2}
        ]}"#,
    )
    .unwrap();

    notecase(home.path())
        .arg("import")
        .arg(&payload)
        .args(["--mode", "merge"])
        .assert()
        .success();

    let stored = read_json(&home.path().join("storage.json"));
    let notes = stored["secureNotes"].as_array().unwrap();
    assert_eq!(notes.len(), 2);
    // The stored "Hi" is newer than the imported "hi", so it wins
    assert!(notes.iter().any(|n| n["content"] == "Hi"));
    assert!(notes.iter().any(|n| n["content"] == "brand new"));
}

#[test]
fn malformed_import_leaves_store_untouched() {
    let home = TempDir::new().unwrap();
    add(home.path(), &["keep me"]);
    let before = std::fs::read_to_string(home.path().join("storage.json")).unwrap();

    let payload = home.path().join("bad.json");
    std::fs::write(&payload, r#"{"notes": "nope"}"#).unwrap();
    notecase(home.path())
        .arg("import")
        .arg(&payload)
        .args(["--mode", "replace"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid import file"));

    let after = std::fs::read_to_string(home.path().join("storage.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn gzip_export_imports_back() {
    let home = TempDir::new().unwrap();
    add(home.path(), &["compressed"]);
    let export = home.path().join("backup.json.gz");
    notecase(home.path())
        .arg("export")
        .arg(&export)
        .assert()
        .success();

    let bytes = std::fs::read(&export).unwrap();
    assert_eq!(&bytes[..2], &[0x1f, 0x8b]);

    let other = TempDir::new().unwrap();
    notecase(other.path())
        .arg("import")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 note(s)"));
}

#[test]
fn delete_needs_confirmation_when_piped() {
    let home = TempDir::new().unwrap();
    add(home.path(), &["doomed"]);

    notecase(home.path())
        .args(["rm", "1"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    notecase(home.path())
        .args(["rm", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note deleted: doomed"));

    notecase(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes yet."));
}

#[test]
fn edit_replaces_content() {
    let home = TempDir::new().unwrap();
    add(home.path(), &["draft"]);
    notecase(home.path())
        .args(["edit", "1", "final", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note updated: final version"));

    notecase(home.path())
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("final version"));
}

#[test]
fn config_set_and_show() {
    let home = TempDir::new().unwrap();
    notecase(home.path())
        .args(["config", "default-language", "rust"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default-language set to rust"));

    notecase(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default-language = rust"))
        .stdout(predicate::str::contains("storage-key = secureNotes"));
}

#[test]
fn huge_index_range_fails_cleanly() {
    let home = TempDir::new().unwrap();
    add(home.path(), &["one"]);
    add(home.path(), &["two"]);

    notecase(home.path())
        .args(["view", "1-400000000000"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("past the last note"));

    notecase(home.path())
        .args(["view", "1-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("one"))
        .stdout(predicate::str::contains("two"));
}
