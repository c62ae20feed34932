use super::KeyValueStore;
use crate::error::{NotecaseError, Result};
use serde_json::Value;
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
    simulate_write_error: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        if self.simulate_write_error {
            return Err(NotecaseError::Store(
                "Simulated write error (quota exceeded)".to_string(),
            ));
        }
        self.values.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Note, NoteKind};

    pub const TEST_KEY: &str = "secureNotes";

    /// A note with explicit timestamps, for ordering-sensitive tests.
    pub fn note(id: &str, content: &str, updated_at: i64) -> Note {
        Note {
            id: id.to_string(),
            kind: NoteKind::Text,
            content: content.to_string(),
            language: None,
            image_data: None,
            caption: None,
            pinned: false,
            created_at: updated_at,
            updated_at,
        }
    }

    pub fn pinned(mut note: Note) -> Note {
        note.pinned = true;
        note
    }

    pub struct StoreFixture {
        pub store: MemoryStore,
        notes: Vec<Note>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: MemoryStore::new(),
                notes: Vec::new(),
            }
        }

        pub fn with_note(mut self, note: Note) -> Self {
            self.notes.push(note);
            self
        }

        pub fn with_notes(mut self, count: usize) -> Self {
            for i in 0..count {
                let n = self.notes.len() + 1;
                self.notes.push(note(
                    &format!("note-{}", n),
                    &format!("Note {}", n),
                    1_000 + i as i64,
                ));
            }
            self
        }

        pub fn build(mut self) -> MemoryStore {
            let value = serde_json::to_value(&self.notes).unwrap();
            self.store.set(TEST_KEY, value).unwrap();
            self.store.writes = 0;
            self.store
        }
    }
}
