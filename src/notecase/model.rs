use crate::error::{NotecaseError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const DEFAULT_LANGUAGE: &str = "plaintext";
pub const IMAGE_FALLBACK_CONTENT: &str = "Image";

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

pub fn now_millis() -> Timestamp {
    Utc::now().timestamp_millis()
}

pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    #[default]
    Text,
    Code,
    Image,
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NoteKind::Text => "text",
            NoteKind::Code => "code",
            NoteKind::Image => "image",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: NoteKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Note {
    /// Builds a fresh note from an already validated draft.
    pub fn from_draft(draft: ValidDraft, now: Timestamp) -> Self {
        let mut note = Self {
            id: generate_id(),
            kind: draft.kind,
            content: String::new(),
            language: None,
            image_data: None,
            caption: None,
            pinned: false,
            created_at: now,
            updated_at: now,
        };
        note.apply(draft);
        note
    }

    /// Overwrites the user-editable fields. `id`, `pinned` and timestamps are untouched.
    pub fn apply(&mut self, draft: ValidDraft) {
        self.kind = draft.kind;
        self.content = draft.content;
        self.language = draft.language;
        self.image_data = draft.image_data;
        self.caption = draft.caption;
    }

    /// Drops fields that have no meaning for the note's kind and repairs timestamps.
    pub fn normalize(&mut self) {
        match self.kind {
            NoteKind::Text => {
                self.language = None;
                self.image_data = None;
                self.caption = None;
            }
            NoteKind::Code => {
                if self.language.as_deref().map_or(true, |l| l.trim().is_empty()) {
                    self.language = Some(DEFAULT_LANGUAGE.to_string());
                }
                self.image_data = None;
                self.caption = None;
            }
            NoteKind::Image => {
                self.language = None;
                if self.caption.as_deref().is_some_and(|c| c.trim().is_empty()) {
                    self.caption = None;
                }
            }
        }
        if self.updated_at < self.created_at {
            self.updated_at = self.created_at;
        }
    }

    /// Key used to detect the same note across an import merge.
    pub fn dedup_key(&self) -> String {
        self.content.trim().to_lowercase()
    }
}

/// Caller-supplied fields for creating or editing a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub kind: NoteKind,
    pub content: String,
    pub language: Option<String>,
    pub image_data: Option<String>,
    pub caption: Option<String>,
}

impl NoteDraft {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: NoteKind::Text,
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn code(content: impl Into<String>, language: Option<String>) -> Self {
        Self {
            kind: NoteKind::Code,
            content: content.into(),
            language,
            ..Default::default()
        }
    }

    pub fn image(image_data: impl Into<String>, caption: Option<String>) -> Self {
        Self {
            kind: NoteKind::Image,
            image_data: Some(image_data.into()),
            caption,
            ..Default::default()
        }
    }

    /// Checks the draft and produces the exact fields that will be stored.
    pub fn validate(self) -> Result<ValidDraft> {
        match self.kind {
            NoteKind::Text | NoteKind::Code => {
                let content = self.content.trim().to_string();
                if content.is_empty() {
                    return Err(NotecaseError::Validation(format!(
                        "{} note content cannot be empty",
                        self.kind
                    )));
                }
                let language = match self.kind {
                    NoteKind::Code => Some(
                        self.language
                            .map(|l| l.trim().to_string())
                            .filter(|l| !l.is_empty())
                            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
                    ),
                    _ => None,
                };
                Ok(ValidDraft {
                    kind: self.kind,
                    content,
                    language,
                    image_data: None,
                    caption: None,
                })
            }
            NoteKind::Image => {
                let image_data = self
                    .image_data
                    .filter(|d| !d.trim().is_empty())
                    .ok_or_else(|| {
                        NotecaseError::Validation("an image note needs image data".to_string())
                    })?;
                let caption = self
                    .caption
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty());
                let content = caption
                    .clone()
                    .unwrap_or_else(|| IMAGE_FALLBACK_CONTENT.to_string());
                Ok(ValidDraft {
                    kind: NoteKind::Image,
                    content,
                    language: None,
                    image_data: Some(image_data),
                    caption,
                })
            }
        }
    }
}

/// A draft that passed [`NoteDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    kind: NoteKind,
    content: String,
    language: Option<String>,
    image_data: Option<String>,
    caption: Option<String>,
}

/// Whether a submitted draft creates a note or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftTarget {
    New,
    Existing(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    #[default]
    Merge,
    Replace,
}

impl FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "merge" | "m" => Ok(ImportMode::Merge),
            "replace" | "r" => Ok(ImportMode::Replace),
            other => Err(format!("Unknown import mode: {} (use merge or replace)", other)),
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMode::Merge => write!(f, "merge"),
            ImportMode::Replace => write!(f, "replace"),
        }
    }
}

pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// The document written by an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub version: String,
    pub export_date: String,
    pub notes_count: usize,
    pub notes: Vec<Note>,
}
