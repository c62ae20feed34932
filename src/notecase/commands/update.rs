use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{now_millis, NoteDraft};
use crate::store::KeyValueStore;

use super::helpers::{load_notes, note_label, save_notes};

/// Replaces the editable fields of note `id` with `draft`.
///
/// An unknown id is not an error: nothing is written and the result carries no
/// affected notes. `id`, `created_at` and `pinned` are kept; `updated_at` never
/// moves backwards.
pub fn run<S: KeyValueStore>(
    store: &mut S,
    key: &str,
    id: &str,
    draft: NoteDraft,
) -> Result<CmdResult> {
    let valid = draft
        .validate()
        .inspect_err(|e| log::warn!("update of {} rejected: {}", id, e))?;

    let mut notes = load_notes(store, key)?;
    let mut result = CmdResult::default();

    let Some(note) = notes.iter_mut().find(|n| n.id == id) else {
        log::debug!("update: no note {}", id);
        result.add_message(CmdMessage::info(format!("No note with id {}", id)));
        return Ok(result);
    };

    note.apply(valid);
    note.updated_at = now_millis().max(note.updated_at);
    let updated = note.clone();
    save_notes(store, key, &notes)?;

    log::info!("updated note {}", updated.id);
    result.add_message(CmdMessage::success(format!(
        "Note updated: {}",
        note_label(&updated)
    )));
    Ok(result.with_affected_notes(vec![updated]))
}
