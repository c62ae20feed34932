//! # API Facade
//!
//! [`NotecaseApi`] is the note store manager: the single entry point for every
//! operation on the collection, whatever UI drives it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (display indexes and id prefixes → note ids, config defaults)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! Business logic stays in `commands/*.rs`; nothing here prints or formats.
//!
//! ## One Operation at a Time
//!
//! Every mutating method takes `&mut self` and performs a full
//! read → modify → write cycle against the store before returning. Holding the API
//! therefore serializes mutations in call order, so two operations on the same
//! manager can never interleave and drop each other's writes. Wrap the API in a
//! `Mutex` to share it between threads.
//!
//! ## Generic Over KeyValueStore
//!
//! - Production: `NotecaseApi<FileStore>`
//! - Testing: `NotecaseApi<MemoryStore>`

use crate::commands;
use crate::config::NotecaseConfig;
use crate::error::{NotecaseError, Result};
use crate::index::{parse_selectors, NoteSelector};
use crate::model::{DraftTarget, ImportMode, Note, NoteDraft, NoteKind};
use crate::store::KeyValueStore;
use std::path::{Path, PathBuf};

pub struct NotecaseApi<S: KeyValueStore> {
    store: S,
    config: NotecaseConfig,
    data_dir: PathBuf,
}

impl<S: KeyValueStore> NotecaseApi<S> {
    pub fn new(store: S, config: NotecaseConfig, data_dir: PathBuf) -> Self {
        Self {
            store,
            config,
            data_dir,
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.config.storage_key
    }

    pub fn settings(&self) -> &NotecaseConfig {
        &self.config
    }

    pub fn add(&mut self, draft: NoteDraft) -> Result<commands::CmdResult> {
        let draft = self.with_defaults(draft);
        commands::add::run(&mut self.store, &self.config.storage_key, draft)
    }

    pub fn update(&mut self, id: &str, draft: NoteDraft) -> Result<commands::CmdResult> {
        let draft = self.with_defaults(draft);
        commands::update::run(&mut self.store, &self.config.storage_key, id, draft)
    }

    /// Saves a draft from the editor: creates a note or edits the one being edited.
    pub fn submit(&mut self, target: DraftTarget, draft: NoteDraft) -> Result<commands::CmdResult> {
        match target {
            DraftTarget::New => self.add(draft),
            DraftTarget::Existing(id) => self.update(&id, draft),
        }
    }

    pub fn toggle_pin(&mut self, id: &str) -> Result<commands::CmdResult> {
        self.toggle_pins(&[id.to_string()])
    }

    pub fn toggle_pins(&mut self, ids: &[String]) -> Result<commands::CmdResult> {
        commands::pinning::toggle(&mut self.store, &self.config.storage_key, ids)
    }

    pub fn pin(&mut self, ids: &[String]) -> Result<commands::CmdResult> {
        commands::pinning::pin(&mut self.store, &self.config.storage_key, ids)
    }

    pub fn unpin(&mut self, ids: &[String]) -> Result<commands::CmdResult> {
        commands::pinning::unpin(&mut self.store, &self.config.storage_key, ids)
    }

    pub fn delete(&mut self, id: &str) -> Result<commands::CmdResult> {
        self.delete_many(&[id.to_string()])
    }

    pub fn delete_many(&mut self, ids: &[String]) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, &self.config.storage_key, ids)
    }

    pub fn list(&self, filter: &NoteFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, &self.config.storage_key, filter)
    }

    pub fn view<I: AsRef<str>>(&self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = to_selectors(inputs)?;
        commands::view::run(&self.store, &self.config.storage_key, &selectors)
    }

    /// Turns user input (`p1`, `3`, `2-4`, id prefixes) into note ids.
    pub fn resolve_ids<I: AsRef<str>>(&self, inputs: &[I]) -> Result<Vec<String>> {
        let selectors = to_selectors(inputs)?;
        let notes =
            commands::helpers::notes_by_selectors(&self.store, &self.config.storage_key, &selectors)?;
        Ok(notes.into_iter().map(|dn| dn.note.id).collect())
    }

    pub fn get_note(&self, id: &str) -> Result<Option<Note>> {
        Ok(self.notes()?.into_iter().find(|n| n.id == id))
    }

    /// The stored collection, in stored order.
    pub fn notes(&self) -> Result<Vec<Note>> {
        commands::helpers::load_notes(&self.store, &self.config.storage_key)
    }

    pub fn note_count(&self) -> Result<usize> {
        Ok(self.notes()?.len())
    }

    pub fn export_snapshot(&self) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, &self.config.storage_key)
    }

    /// Writes an export file. Without a path, a timestamped file is created in `dir`.
    pub fn export_to_file(
        &self,
        path: Option<PathBuf>,
        dir: &Path,
    ) -> Result<commands::CmdResult> {
        commands::export::to_file(
            &self.store,
            &self.config.storage_key,
            path,
            dir,
            self.config.compress_exports,
        )
    }

    pub fn import_notes(
        &mut self,
        imported: Vec<Note>,
        mode: ImportMode,
    ) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, &self.config.storage_key, imported, mode)
    }

    /// Parses the file completely before touching the store.
    pub fn import_file(&mut self, path: &Path, mode: ImportMode) -> Result<commands::CmdResult> {
        let imported = commands::import::read_file(path)?;
        self.import_notes(imported, mode)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.data_dir)
    }

    fn with_defaults(&self, mut draft: NoteDraft) -> NoteDraft {
        if draft.kind == NoteKind::Code
            && draft.language.as_deref().map_or(true, |l| l.trim().is_empty())
        {
            draft.language = Some(self.config.default_language.clone());
        }
        draft
    }
}

fn to_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<NoteSelector>> {
    parse_selectors(inputs).map_err(NotecaseError::Api)
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::import::{merge_notes, parse_envelope};
pub use crate::commands::list::NoteFilter;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
