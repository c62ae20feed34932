use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{now_millis, Note, NoteDraft};
use crate::store::KeyValueStore;

use super::helpers::{load_notes, note_label, save_notes};

/// Creates a note from `draft` and stores it at the front of the collection.
pub fn run<S: KeyValueStore>(store: &mut S, key: &str, draft: NoteDraft) -> Result<CmdResult> {
    let valid = draft.validate().inspect_err(|e| log::warn!("add rejected: {}", e))?;

    let mut notes = load_notes(store, key)?;
    let note = Note::from_draft(valid, now_millis());
    notes.insert(0, note.clone());
    save_notes(store, key, &notes)?;

    log::info!("added {} note {}", note.kind, note.id);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Note added ({}): {}",
        note.kind,
        note_label(&note)
    )));
    Ok(result.with_affected_notes(vec![note]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::load_notes;
    use crate::error::NotecaseError;
    use crate::model::{NoteKind, DEFAULT_LANGUAGE};
    use crate::store::memory::fixtures::TEST_KEY;
    use crate::store::memory::MemoryStore;

    #[test]
    fn added_note_matches_draft() {
        let mut store = MemoryStore::new();
        let result = run(
            &mut store,
            TEST_KEY,
            NoteDraft::code("print(1)", Some("python".into())),
        )
        .unwrap();
        let id = result.affected_notes[0].id.clone();

        let notes = load_notes(&store, TEST_KEY).unwrap();
        let found = notes.iter().find(|n| n.id == id).unwrap();
        assert_eq!(found.kind, NoteKind::Code);
        assert_eq!(found.content, "print(1)");
        assert_eq!(found.language.as_deref(), Some("python"));
        assert!(!found.pinned);
        assert_eq!(found.created_at, found.updated_at);
    }

    #[test]
    fn new_notes_are_prepended() {
        let mut store = MemoryStore::new();
        run(&mut store, TEST_KEY, NoteDraft::text("first")).unwrap();
        run(&mut store, TEST_KEY, NoteDraft::text("second")).unwrap();

        let notes = load_notes(&store, TEST_KEY).unwrap();
        assert_eq!(notes[0].content, "second");
        assert_eq!(notes[1].content, "first");
        assert_ne!(notes[0].id, notes[1].id);
    }

    #[test]
    fn code_without_language_uses_default() {
        let mut store = MemoryStore::new();
        let result = run(&mut store, TEST_KEY, NoteDraft::code("ls -la", None)).unwrap();
        assert_eq!(
            result.affected_notes[0].language.as_deref(),
            Some(DEFAULT_LANGUAGE)
        );
    }

    #[test]
    fn rejected_draft_does_not_write() {
        let mut store = MemoryStore::new();
        run(&mut store, TEST_KEY, NoteDraft::text("keep me")).unwrap();
        let before = store.get(TEST_KEY).unwrap();
        let writes = store.write_count();

        let err = run(&mut store, TEST_KEY, NoteDraft::text("   ")).unwrap_err();
        assert!(matches!(err, NotecaseError::Validation(_)));
        let err = run(&mut store, TEST_KEY, NoteDraft::image("", None)).unwrap_err();
        assert!(matches!(err, NotecaseError::Validation(_)));

        assert_eq!(store.get(TEST_KEY).unwrap(), before);
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn write_failure_surfaces_as_store_error() {
        let mut store = MemoryStore::new();
        run(&mut store, TEST_KEY, NoteDraft::text("one")).unwrap();
        store.set_simulate_write_error(true);

        let err = run(&mut store, TEST_KEY, NoteDraft::text("two")).unwrap_err();
        assert!(matches!(err, NotecaseError::Store(_)));

        let notes = load_notes(&store, TEST_KEY).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "one");
    }
}
