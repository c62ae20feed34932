use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::NoteSelector;
use crate::store::KeyValueStore;

use super::helpers::notes_by_selectors;

pub fn run<S: KeyValueStore>(
    store: &S,
    key: &str,
    selectors: &[NoteSelector],
) -> Result<CmdResult> {
    let notes = notes_by_selectors(store, key, selectors)?;
    Ok(CmdResult::default().with_listed_notes(notes))
}
