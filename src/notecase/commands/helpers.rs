use crate::error::{NotecaseError, Result};
use crate::index::{index_notes, DisplayNote, NoteSelector};
use crate::model::Note;
use crate::store::KeyValueStore;

/// Reads the whole collection. An absent key is an empty collection.
pub fn load_notes<S: KeyValueStore>(store: &S, key: &str) -> Result<Vec<Note>> {
    let notes = match store.get(key)? {
        None | Some(serde_json::Value::Null) => Vec::new(),
        Some(value) => serde_json::from_value::<Vec<Note>>(value).map_err(|e| {
            NotecaseError::Store(format!("stored notes under '{}' are malformed: {}", key, e))
        })?,
    };
    log::debug!("loaded {} notes from '{}'", notes.len(), key);
    Ok(notes)
}

/// Replaces the whole collection.
pub fn save_notes<S: KeyValueStore>(store: &mut S, key: &str, notes: &[Note]) -> Result<()> {
    let value = serde_json::to_value(notes).map_err(NotecaseError::Serialization)?;
    store.set(key, value)?;
    log::debug!("saved {} notes to '{}'", notes.len(), key);
    Ok(())
}

pub fn indexed_notes<S: KeyValueStore>(store: &S, key: &str) -> Result<Vec<DisplayNote>> {
    Ok(index_notes(load_notes(store, key)?))
}

/// Finds the notes a selector points at. Ids match exactly first, then by unique prefix.
/// A range must lie entirely within the listing.
pub fn find_selected<'a>(
    indexed: &'a [DisplayNote],
    selector: &NoteSelector,
) -> Result<Vec<&'a DisplayNote>> {
    match selector {
        NoteSelector::Index(idx) => indexed
            .iter()
            .find(|dn| &dn.index == idx)
            .map(|dn| vec![dn])
            .ok_or_else(|| NotecaseError::Api(format!("Index {} not found", idx))),
        NoteSelector::Range(_, end) => {
            if !indexed.iter().any(|dn| &dn.index == end) {
                return Err(NotecaseError::Api(format!(
                    "Range {} goes past the last note",
                    selector
                )));
            }
            Ok(indexed
                .iter()
                .filter(|dn| selector.covers(&dn.index))
                .collect())
        }
        NoteSelector::Id(id) => {
            if let Some(dn) = indexed.iter().find(|dn| &dn.note.id == id) {
                return Ok(vec![dn]);
            }
            let matches: Vec<_> = indexed
                .iter()
                .filter(|dn| dn.note.id.starts_with(id.as_str()))
                .collect();
            match matches.len() {
                1 => Ok(matches),
                0 => Err(NotecaseError::Api(format!("No note with id {}", id))),
                n => Err(NotecaseError::Api(format!(
                    "Id prefix {} is ambiguous ({} notes match)",
                    id, n
                ))),
            }
        }
    }
}

/// Resolves selectors against the current listing and returns the matching notes
/// (in selector order, duplicates removed).
pub fn notes_by_selectors<S: KeyValueStore>(
    store: &S,
    key: &str,
    selectors: &[NoteSelector],
) -> Result<Vec<DisplayNote>> {
    let indexed = indexed_notes(store, key)?;
    let mut picked: Vec<DisplayNote> = Vec::with_capacity(selectors.len());
    for selector in selectors {
        for dn in find_selected(&indexed, selector)? {
            if !picked.iter().any(|p| p.note.id == dn.note.id) {
                picked.push(dn.clone());
            }
        }
    }
    Ok(picked)
}

/// Short single-line label for messages.
pub fn note_label(note: &Note) -> String {
    let first_line = note.content.lines().next().unwrap_or("").trim();
    let label: String = first_line.chars().take(40).collect();
    if label.chars().count() < first_line.chars().count() {
        format!("{}…", label)
    } else {
        label
    }
}
