use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotecaseError, Result};
use crate::index::sort_notes;
use crate::model::{ImportMode, Note, NoteKind};
use crate::store::KeyValueStore;
use flate2::read::GzDecoder;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::export::is_gzip_path;
use super::helpers::{load_notes, save_notes};

/// Extracts the `notes` array from an import document.
///
/// Other top-level fields are ignored. Any record that is not a note fails the whole
/// import.
pub fn parse_envelope(text: &str) -> Result<Vec<Note>> {
    let doc: Value = serde_json::from_str(text)
        .map_err(|e| NotecaseError::Format(format!("not valid JSON: {}", e)))?;

    let records = match doc.get("notes") {
        Some(Value::Array(records)) => records,
        Some(_) => return Err(NotecaseError::Format("'notes' is not an array".to_string())),
        None => return Err(NotecaseError::Format("missing 'notes' array".to_string())),
    };

    let mut notes = Vec::with_capacity(records.len());
    let mut seen = HashSet::new();
    for (i, record) in records.iter().enumerate() {
        let mut note: Note = serde_json::from_value(record.clone())
            .map_err(|e| NotecaseError::Format(format!("note #{}: {}", i + 1, e)))?;
        if note.kind == NoteKind::Image
            && note.image_data.as_deref().map_or(true, |d| d.trim().is_empty())
        {
            return Err(NotecaseError::Format(format!(
                "note #{}: image note without imageData",
                i + 1
            )));
        }
        if !seen.insert(note.id.clone()) {
            return Err(NotecaseError::Format(format!(
                "note #{}: duplicate id {}",
                i + 1,
                note.id
            )));
        }
        note.normalize();
        notes.push(note);
    }
    Ok(notes)
}

/// Reads and parses an import file; `.gz` files are decompressed first.
pub fn read_file(path: &Path) -> Result<Vec<Note>> {
    let file = File::open(path).map_err(NotecaseError::Io)?;
    let mut text = String::new();
    if is_gzip_path(path) {
        GzDecoder::new(file)
            .read_to_string(&mut text)
            .map_err(|e| NotecaseError::Format(format!("not a readable gzip file: {}", e)))?;
    } else {
        let mut file = file;
        file.read_to_string(&mut text).map_err(NotecaseError::Io)?;
    }
    parse_envelope(&text)
}

/// Computes the collection that results from importing `imported` over `existing`.
///
/// With no existing notes the mode does not matter. The result is always sorted.
pub fn merge_notes(imported: Vec<Note>, existing: Vec<Note>, mode: ImportMode) -> Vec<Note> {
    let mut merged = if existing.is_empty() || mode == ImportMode::Replace {
        imported
    } else {
        let combined: Vec<Note> = existing.into_iter().chain(imported).collect();
        let by_content = keep_latest(combined, Note::dedup_key);
        // Distinct content can still carry the same id
        keep_latest(by_content, |n| n.id.clone())
    };
    sort_notes(&mut merged);
    merged
}

/// Collapses notes sharing a key to the one with the largest `updated_at`.
/// On a tie the earlier note wins; survivors keep the position of their key's
/// first occurrence.
fn keep_latest<F>(notes: Vec<Note>, key_of: F) -> Vec<Note>
where
    F: Fn(&Note) -> String,
{
    let mut slots: Vec<Note> = Vec::with_capacity(notes.len());
    let mut positions: HashMap<String, usize> = HashMap::new();
    for note in notes {
        let key = key_of(&note);
        match positions.get(&key) {
            Some(&pos) => {
                if note.updated_at > slots[pos].updated_at {
                    slots[pos] = note;
                }
            }
            None => {
                positions.insert(key, slots.len());
                slots.push(note);
            }
        }
    }
    slots
}

/// Imports `imported` into the stored collection, replacing it wholesale.
pub fn run<S: KeyValueStore>(
    store: &mut S,
    key: &str,
    imported: Vec<Note>,
    mode: ImportMode,
) -> Result<CmdResult> {
    let existing = load_notes(store, key)?;
    let existing_count = existing.len();
    let imported_count = imported.len();

    let merged = merge_notes(imported, existing, mode);
    save_notes(store, key, &merged)?;

    log::info!(
        "imported {} notes ({}), collection now {}",
        imported_count,
        mode,
        merged.len()
    );
    let mut result = CmdResult::default();
    let summary = if existing_count == 0 {
        format!("Imported {} note(s)", imported_count)
    } else {
        match mode {
            ImportMode::Merge => format!(
                "Merged {} imported note(s) into {} existing: {} total",
                imported_count,
                existing_count,
                merged.len()
            ),
            ImportMode::Replace => format!(
                "Replaced {} existing note(s) with {} imported",
                existing_count, imported_count
            ),
        }
    };
    result.add_message(CmdMessage::success(summary));

    let collapsed = (existing_count + imported_count).saturating_sub(merged.len());
    if mode == ImportMode::Merge && existing_count > 0 && collapsed > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} duplicate note(s) collapsed, the most recently updated copy was kept",
            collapsed
        )));
    }
    Ok(result.with_affected_notes(merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::index::is_sorted;
    use crate::store::memory::fixtures::{note, pinned, StoreFixture, TEST_KEY};
    use crate::store::memory::MemoryStore;

    fn sorted_ids(notes: &[Note]) -> Vec<String> {
        let mut ids: Vec<_> = notes.iter().map(|n| n.id.clone()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn merge_keeps_latest_duplicate_by_normalized_content() {
        let existing = vec![note("e", "Hi", 100)];
        let imported = vec![note("i", "hi", 200)];

        let merged = merge_notes(imported, existing, ImportMode::Merge);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].updated_at, 200);
        assert_eq!(merged[0].id, "i");
    }

    #[test]
    fn merge_prefers_existing_when_it_is_newer() {
        let existing = vec![note("e", "  Note ", 300)];
        let imported = vec![note("i", "note", 200)];

        let merged = merge_notes(imported, existing, ImportMode::Merge);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "e");
    }

    #[test]
    fn merge_unions_distinct_notes_and_sorts() {
        let existing = vec![note("a", "alpha", 10), note("b", "beta", 30)];
        let imported = vec![pinned(note("c", "gamma", 5)), note("d", "delta", 20)];

        let merged = merge_notes(imported, existing, ImportMode::Merge);
        let ids: Vec<_> = merged.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "d", "a"]);
        assert!(is_sorted(&merged));
    }

    #[test]
    fn merge_resolves_id_collisions() {
        let existing = vec![note("same", "one thing", 10)];
        let imported = vec![note("same", "another thing", 20)];

        let merged = merge_notes(imported, existing, ImportMode::Merge);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].content, "another thing");
    }

    #[test]
    fn replace_discards_existing() {
        let existing = vec![note("a", "alpha", 10)];
        let imported = vec![note("b", "beta", 1)];
        let merged = merge_notes(imported, existing, ImportMode::Replace);
        assert_eq!(sorted_ids(&merged), vec!["b"]);
    }

    #[test]
    fn empty_existing_ignores_mode() {
        let imported = vec![
            note("a", "same", 1),
            note("b", "SAME", 2),
            pinned(note("c", "x", 0)),
        ];
        let merge = merge_notes(imported.clone(), vec![], ImportMode::Merge);
        let replace = merge_notes(imported.clone(), vec![], ImportMode::Replace);

        assert_eq!(merge, replace);
        assert_eq!(merge.len(), 3);
        let mut expected = imported;
        sort_notes(&mut expected);
        assert_eq!(merge, expected);
    }

    #[test]
    fn parse_accepts_extra_fields_and_defaults() {
        let notes = parse_envelope(
            r#"{"version":"1.0","source":"elsewhere","notes":[
                {"id":"a","content":"hi","createdAt":1,"updatedAt":2},
                {"id":"b","type":"code","content":"x","createdAt":1,"updatedAt":1}
            ]}"#,
        )
        .unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].kind, NoteKind::Text);
        assert_eq!(notes[1].language.as_deref(), Some("plaintext"));
    }

    #[test]
    fn parse_rejects_bad_documents() {
        for text in [
            "not json",
            r#"{"items": []}"#,
            r#"{"notes": {"a": 1}}"#,
            r#"{"notes": [{"id": "a"}]}"#,
            r#"{"notes": [{"id":"a","type":"video","content":"x","createdAt":1,"updatedAt":1}]}"#,
            r#"{"notes": [{"id":"a","type":"image","content":"Image","createdAt":1,"updatedAt":1}]}"#,
            r#"{"notes": [
                {"id":"a","content":"x","createdAt":1,"updatedAt":1},
                {"id":"a","content":"y","createdAt":1,"updatedAt":1}
            ]}"#,
        ] {
            assert!(
                matches!(parse_envelope(text), Err(NotecaseError::Format(_))),
                "expected format error for {}",
                text
            );
        }
    }

    #[test]
    fn run_persists_merged_collection() {
        let mut store = StoreFixture::new()
            .with_note(note("e", "Hi", 100))
            .with_note(note("k", "keep", 50))
            .build();

        let result = run(
            &mut store,
            TEST_KEY,
            vec![note("i", "hi", 200)],
            ImportMode::Merge,
        )
        .unwrap();

        let stored = load_notes(&store, TEST_KEY).unwrap();
        assert_eq!(sorted_ids(&stored), vec!["i", "k"]);
        assert!(is_sorted(&stored));

        let warning = result
            .messages
            .iter()
            .find(|m| m.level == MessageLevel::Warning)
            .unwrap();
        assert!(warning.content.starts_with("1 duplicate note(s) collapsed"));
    }

    #[test]
    fn distinct_merge_has_no_warning() {
        let mut store = StoreFixture::new().with_note(note("a", "alpha", 1)).build();
        let result = run(
            &mut store,
            TEST_KEY,
            vec![note("b", "beta", 2)],
            ImportMode::Merge,
        )
        .unwrap();
        assert!(result
            .messages
            .iter()
            .all(|m| m.level != MessageLevel::Warning));
    }

    #[test]
    fn failed_write_keeps_previous_collection() {
        let mut store = StoreFixture::new().with_notes(2).build();
        let before = store.get(TEST_KEY).unwrap();
        store.set_simulate_write_error(true);

        let err = run(
            &mut store,
            TEST_KEY,
            vec![note("x", "new", 1)],
            ImportMode::Replace,
        );
        assert!(matches!(err, Err(NotecaseError::Store(_))));
        assert_eq!(store.get(TEST_KEY).unwrap(), before);
    }

    #[test]
    fn import_into_empty_store() {
        let mut store = MemoryStore::new();
        let result = run(
            &mut store,
            TEST_KEY,
            vec![note("a", "A", 1), pinned(note("b", "B", 0))],
            ImportMode::Merge,
        )
        .unwrap();
        assert_eq!(result.affected_notes[0].id, "b");
        assert_eq!(load_notes(&store, TEST_KEY).unwrap().len(), 2);
    }
}
