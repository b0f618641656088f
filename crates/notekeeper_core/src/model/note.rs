//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its wire shape.
//! - Provide the merge rules used when an edited note is saved.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `folder` is never blank once normalized; blank means `DEFAULT_FOLDER`.
//! - `updated_at` never moves backwards when an edit is applied.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Built-in folder every note falls back to. Always present in folder lists.
pub const DEFAULT_FOLDER: &str = "General";

/// Title shown for notes that have no title yet.
pub const UNTITLED_NOTE_TITLE: &str = "Untitled Note";

/// Validation failures for note identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Note ids must contain at least one non-whitespace character.
    EmptyId,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "note id cannot be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// Stable note identifier.
///
/// New notes get a UUID v4 string. Ids read back from storage are kept as-is,
/// so older short random ids stay addressable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generates a fresh collision-resistant id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing id, rejecting blank values.
    pub fn parse(value: impl Into<String>) -> Result<Self, NoteValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(NoteValidationError::EmptyId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical note record.
///
/// Serialized with camelCase keys (`createdAt`, `updatedAt`) to stay
/// compatible with collections written by earlier versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_folder")]
    pub folder: String,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
    /// Unix epoch milliseconds. Refreshed on every save.
    #[serde(default)]
    pub updated_at: i64,
}

impl Note {
    /// Creates an empty note in `folder` with a generated id.
    ///
    /// # Invariants
    /// - `title` and `content` start empty.
    /// - `created_at == updated_at == now_ms`.
    pub fn new(folder: &str, now_ms: i64) -> Self {
        Self::with_id(NoteId::generate(), folder, now_ms)
    }

    /// Creates an empty note with a caller-provided id.
    pub fn with_id(id: NoteId, folder: &str, now_ms: i64) -> Self {
        Self {
            id,
            title: String::new(),
            content: String::new(),
            folder: normalize_folder(folder),
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Folder used for grouping; blank folders count as `DEFAULT_FOLDER`.
    pub fn effective_folder(&self) -> &str {
        let trimmed = self.folder.trim();
        if trimmed.is_empty() {
            DEFAULT_FOLDER
        } else {
            trimmed
        }
    }

    /// Title for list display.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED_NOTE_TITLE
        } else {
            &self.title
        }
    }

    /// Merges an edit into this note.
    ///
    /// # Invariants
    /// - `id` and `created_at` are left untouched.
    /// - `updated_at` becomes `max(now_ms, updated_at)`.
    pub fn apply_edit(&mut self, edit: &NoteEdit, now_ms: i64) {
        if let Some(title) = edit.title.as_ref() {
            self.title = title.clone();
        }
        if let Some(content) = edit.content.as_ref() {
            self.content = content.clone();
        }
        if let Some(folder) = edit.folder.as_ref() {
            self.folder = normalize_folder(folder);
        }
        self.updated_at = now_ms.max(self.updated_at);
    }
}

/// Edited form of a note submitted to `NoteStore::save_note`.
///
/// `None` fields keep the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEdit {
    pub id: NoteId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder: Option<String>,
}

impl NoteEdit {
    /// Starts an empty edit targeting `id`.
    pub fn new(id: NoteId) -> Self {
        Self {
            id,
            title: None,
            content: None,
            folder: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }
}

impl From<Note> for NoteEdit {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: Some(note.title),
            content: Some(note.content),
            folder: Some(note.folder),
        }
    }
}

impl From<&Note> for NoteEdit {
    fn from(note: &Note) -> Self {
        Self::from(note.clone())
    }
}

/// Trims a folder name and maps blank names to `DEFAULT_FOLDER`.
pub fn normalize_folder(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_FOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

fn default_folder() -> String {
    DEFAULT_FOLDER.to_string()
}
