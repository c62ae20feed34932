use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::NoteKind;
use crate::store::KeyValueStore;

use super::helpers::indexed_notes;

#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    pub kind: Option<NoteKind>,
    pub pinned_only: bool,
    /// Case-insensitive substring of the content.
    pub search: Option<String>,
}

impl NoteFilter {
    fn matches(&self, kind: NoteKind, pinned: bool, content: &str) -> bool {
        if self.kind.is_some_and(|k| k != kind) {
            return false;
        }
        if self.pinned_only && !pinned {
            return false;
        }
        match &self.search {
            Some(term) => content.to_lowercase().contains(&term.to_lowercase()),
            None => true,
        }
    }
}

/// Lists notes in display order: pinned partition first, then the rest.
pub fn run<S: KeyValueStore>(store: &S, key: &str, filter: &NoteFilter) -> Result<CmdResult> {
    let listed: Vec<_> = indexed_notes(store, key)?
        .into_iter()
        .filter(|dn| filter.matches(dn.note.kind, dn.note.pinned, &dn.note.content))
        .collect();
    Ok(CmdResult::default().with_listed_notes(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::DisplayIndex;
    use crate::store::memory::fixtures::{note, pinned, StoreFixture, TEST_KEY};

    #[test]
    fn lists_pinned_partition_first() {
        let store = StoreFixture::new()
            .with_note(note("a", "Newest", 30))
            .with_note(pinned(note("b", "Pinned", 10)))
            .with_note(note("c", "Middle", 20))
            .build();

        let result = run(&store, TEST_KEY, &NoteFilter::default()).unwrap();
        let order: Vec<_> = result
            .listed_notes
            .iter()
            .map(|dn| dn.note.id.as_str())
            .collect();
        assert_eq!(order, vec!["b", "a", "c"]);
        assert_eq!(result.listed_notes[0].index, DisplayIndex::Pinned(1));
        assert_eq!(result.listed_notes[1].index, DisplayIndex::Regular(1));
    }

    #[test]
    fn filters_by_kind_and_search() {
        let mut code = note("c", "SELECT * FROM t", 5);
        code.kind = NoteKind::Code;
        let store = StoreFixture::new()
            .with_note(note("a", "Buy milk", 1))
            .with_note(code)
            .build();

        let filter = NoteFilter {
            kind: Some(NoteKind::Code),
            ..Default::default()
        };
        assert_eq!(run(&store, TEST_KEY, &filter).unwrap().listed_notes.len(), 1);

        let filter = NoteFilter {
            search: Some("MILK".into()),
            ..Default::default()
        };
        let listed = run(&store, TEST_KEY, &filter).unwrap().listed_notes;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].note.id, "a");
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = StoreFixture::new().build();
        let result = run(&store, TEST_KEY, &NoteFilter::default()).unwrap();
        assert!(result.listed_notes.is_empty());
    }
}
