use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::KeyValueStore;

use super::helpers::{load_notes, note_label, save_notes};

/// Removes the notes with the given ids. Ids that are not present are skipped.
pub fn run<S: KeyValueStore>(store: &mut S, key: &str, ids: &[String]) -> Result<CmdResult> {
    let notes = load_notes(store, key)?;
    let (removed, kept): (Vec<_>, Vec<_>) = notes.into_iter().partition(|n| ids.contains(&n.id));

    let mut result = CmdResult::default();
    if removed.is_empty() {
        result.add_message(CmdMessage::info("No matching notes to delete."));
        return Ok(result);
    }

    save_notes(store, key, &kept)?;
    for note in &removed {
        log::info!("deleted note {}", note.id);
        result.add_message(CmdMessage::success(format!(
            "Note deleted: {}",
            note_label(note)
        )));
    }
    Ok(result.with_affected_notes(removed))
}
