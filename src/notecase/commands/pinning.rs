use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::sort_notes;
use crate::model::now_millis;
use crate::store::KeyValueStore;

use super::helpers::{load_notes, note_label, save_notes};

/// Flips `pinned` on each listed note, then re-sorts and stores the collection.
pub fn toggle<S: KeyValueStore>(store: &mut S, key: &str, ids: &[String]) -> Result<CmdResult> {
    change_pins(store, key, ids, |current| Some(!current))
}

pub fn pin<S: KeyValueStore>(store: &mut S, key: &str, ids: &[String]) -> Result<CmdResult> {
    change_pins(store, key, ids, |current| (!current).then_some(true))
}

pub fn unpin<S: KeyValueStore>(store: &mut S, key: &str, ids: &[String]) -> Result<CmdResult> {
    change_pins(store, key, ids, |current| current.then_some(false))
}

/// `next` maps the current pin state to the new one, or `None` to leave the note alone.
fn change_pins<S, F>(store: &mut S, key: &str, ids: &[String], next: F) -> Result<CmdResult>
where
    S: KeyValueStore,
    F: Fn(bool) -> Option<bool>,
{
    let mut notes = load_notes(store, key)?;
    let now = now_millis();
    let mut result = CmdResult::default();
    let mut changed = Vec::new();

    for note in notes.iter_mut().filter(|n| ids.contains(&n.id)) {
        let Some(pinned) = next(note.pinned) else {
            let state = if note.pinned { "pinned" } else { "not pinned" };
            result.add_message(CmdMessage::info(format!(
                "Note already {}: {}",
                state,
                note_label(note)
            )));
            continue;
        };
        note.pinned = pinned;
        note.updated_at = now;

        let verb = if pinned { "pinned" } else { "unpinned" };
        log::info!("{} note {}", verb, note.id);
        result.add_message(CmdMessage::success(format!(
            "Note {}: {}",
            verb,
            note_label(note)
        )));
        changed.push(note.clone());
    }

    if changed.is_empty() {
        if result.messages.is_empty() {
            result.add_message(CmdMessage::info("No matching notes to pin."));
        }
        return Ok(result);
    }

    sort_notes(&mut notes);
    save_notes(store, key, &notes)?;
    Ok(result.with_affected_notes(changed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::is_sorted;
    use crate::store::memory::fixtures::{note, pinned, StoreFixture, TEST_KEY};

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn toggle_pins_and_resorts() {
        let mut store = StoreFixture::new()
            .with_note(note("new", "newer", 2_000))
            .with_note(note("old", "older", 1_000))
            .build();

        toggle(&mut store, TEST_KEY, &ids(&["old"])).unwrap();

        let notes = load_notes(&store, TEST_KEY).unwrap();
        assert_eq!(notes[0].id, "old");
        assert!(notes[0].pinned);
        assert!(is_sorted(&notes));
    }

    #[test]
    fn toggle_twice_restores_pin_state() {
        let mut store = StoreFixture::new().with_note(note("a", "A", 1)).build();
        toggle(&mut store, TEST_KEY, &ids(&["a"])).unwrap();
        let first = load_notes(&store, TEST_KEY).unwrap()[0].updated_at;
        toggle(&mut store, TEST_KEY, &ids(&["a"])).unwrap();

        let notes = load_notes(&store, TEST_KEY).unwrap();
        assert!(!notes[0].pinned);
        assert!(notes[0].updated_at >= first);
        assert!(first > 1);
    }

    #[test]
    fn toggle_stamps_current_time_even_over_future_timestamps() {
        let future = now_millis() + 86_400_000;
        let mut store = StoreFixture::new()
            .with_note(note("a", "from the future", future))
            .build();
        toggle(&mut store, TEST_KEY, &ids(&["a"])).unwrap();

        let stamped = load_notes(&store, TEST_KEY).unwrap()[0].updated_at;
        assert!(stamped < future);
        assert!(stamped <= now_millis());
    }

    #[test]
    fn toggle_unknown_id_is_a_noop() {
        let mut store = StoreFixture::new().with_notes(2).build();
        let result = toggle(&mut store, TEST_KEY, &ids(&["ghost"])).unwrap();
        assert!(result.affected_notes.is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn pin_is_idempotent() {
        let mut store = StoreFixture::new()
            .with_note(pinned(note("a", "A", 1)))
            .build();
        let result = pin(&mut store, TEST_KEY, &ids(&["a"])).unwrap();
        assert!(result.affected_notes.is_empty());
        assert_eq!(store.write_count(), 0);

        let result = unpin(&mut store, TEST_KEY, &ids(&["a"])).unwrap();
        assert_eq!(result.affected_notes.len(), 1);
        assert!(!load_notes(&store, TEST_KEY).unwrap()[0].pinned);
    }
}
