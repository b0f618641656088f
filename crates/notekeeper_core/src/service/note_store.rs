//! Note store: in-memory collection, selection state and persistence sync.
//!
//! # Responsibility
//! - Provide create/select/save/delete/filter operations over the collection.
//! - Recompute folders and write the full collection after every mutation.
//!
//! # Invariants
//! - Note ids are unique within the collection.
//! - New notes are prepended; saves and deletes keep relative order.
//! - Write failures never roll back memory state; they are logged and
//!   reported through `is_persisted`.
//! - No operation returns an error to the caller.

use crate::model::folder::{derive_folders, notes_in_folder};
use crate::model::note::{
    normalize_folder, now_epoch_ms, Note, NoteEdit, NoteId, DEFAULT_FOLDER,
};
use crate::repo::note_storage::NoteStorage;
use log::{debug, error, info};

/// Source of epoch-millisecond timestamps.
pub type Clock = fn() -> i64;

/// Note state owner. All mutations go through `&mut self`.
pub struct NoteStore<S: NoteStorage> {
    storage: S,
    notes: Vec<Note>,
    folders: Vec<String>,
    current_folder: String,
    current_note_id: Option<NoteId>,
    clock: Clock,
    persisted: bool,
}

impl<S: NoteStorage> NoteStore<S> {
    /// Loads the stored collection using the system clock.
    pub fn open(storage: S) -> Self {
        Self::with_clock(storage, now_epoch_ms)
    }

    /// Loads the stored collection with an injected clock.
    ///
    /// Starts in `DEFAULT_FOLDER` with no note selected.
    pub fn with_clock(storage: S, clock: Clock) -> Self {
        let notes = storage.load();
        let folders = derive_folders(&notes);
        info!(
            "event=store_open module=store status=ok notes={} folders={}",
            notes.len(),
            folders.len()
        );
        Self {
            storage,
            notes,
            folders,
            current_folder: DEFAULT_FOLDER.to_string(),
            current_note_id: None,
            clock,
            persisted: true,
        }
    }

    /// Full collection, most recently created first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Folder list: default folder first, then first-seen order.
    pub fn folders(&self) -> &[String] {
        &self.folders
    }

    pub fn current_folder(&self) -> &str {
        &self.current_folder
    }

    pub fn current_note_id(&self) -> Option<&NoteId> {
        self.current_note_id.as_ref()
    }

    /// Resolves the selection. A dangling id resolves to `None`.
    pub fn current_note(&self) -> Option<&Note> {
        let id = self.current_note_id.as_ref()?;
        self.find(id)
    }

    /// Looks up one note by id.
    pub fn find(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    /// Whether the latest write reached storage.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Notes whose effective folder equals `folder`, in collection order.
    pub fn visible_notes(&self, folder: &str) -> Vec<&Note> {
        notes_in_folder(&self.notes, folder)
    }

    /// Notes of the current folder.
    pub fn current_visible_notes(&self) -> Vec<&Note> {
        self.visible_notes(&self.current_folder)
    }

    /// Note counts per folder, following `folders()` order.
    pub fn folder_counts(&self) -> Vec<(String, usize)> {
        self.folders
            .iter()
            .map(|folder| (folder.clone(), self.visible_notes(folder).len()))
            .collect()
    }

    /// Creates an empty note in the current folder.
    pub fn create_note(&mut self) -> Note {
        let folder = self.current_folder.clone();
        self.create_note_in(&folder)
    }

    /// Creates an empty note in `folder`, prepends it and selects it.
    pub fn create_note_in(&mut self, folder: &str) -> Note {
        let mut id = NoteId::generate();
        while self.find(&id).is_some() {
            id = NoteId::generate();
        }

        let note = Note::with_id(id, folder, (self.clock)());
        self.notes.insert(0, note.clone());
        self.current_note_id = Some(note.id.clone());
        debug!(
            "event=note_create module=store status=ok note_id={} folder={}",
            note.id, note.folder
        );
        self.after_mutation();
        note
    }

    /// Switches the active folder and selects its first note, if any.
    ///
    /// The name is normalized the same way note folders are, so a padded or
    /// blank name selects the folder new notes will actually be filed under.
    pub fn select_folder(&mut self, folder: &str) {
        let folder = normalize_folder(folder);
        let first_id = self
            .notes
            .iter()
            .find(|note| note.effective_folder() == folder)
            .map(|note| note.id.clone());
        self.current_folder = folder;
        self.current_note_id = first_id;
    }

    /// Adds a transient folder and makes it current.
    ///
    /// Returns `false` for blank names. The folder is not stored; it stays
    /// listed only while current or referenced by a note.
    pub fn add_folder(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        if !self.folders.iter().any(|folder| folder == trimmed) {
            self.folders.push(trimmed.to_string());
        }
        self.current_folder = trimmed.to_string();
        true
    }

    /// Sets the selection without checking that the note exists.
    pub fn select_note(&mut self, id: NoteId) {
        self.current_note_id = Some(id);
    }

    /// Merges `edit` into the note with the same id and persists.
    ///
    /// Returns the updated note, or `None` when no note matches; in that case
    /// nothing changes and nothing is written.
    pub fn save_note(&mut self, edit: impl Into<NoteEdit>) -> Option<Note> {
        let edit = edit.into();
        let now = (self.clock)();
        let Some(note) = self.notes.iter_mut().find(|note| note.id == edit.id) else {
            debug!(
                "event=note_save module=store status=ignored reason=not_found note_id={}",
                edit.id
            );
            return None;
        };

        note.apply_edit(&edit, now);
        let saved = note.clone();
        self.current_note_id = Some(saved.id.clone());
        debug!(
            "event=note_save module=store status=ok note_id={} folder={}",
            saved.id, saved.folder
        );
        self.after_mutation();
        Some(saved)
    }

    /// Removes the note with `id` and clears the selection.
    ///
    /// Returns `false` when no note matches; the collection is unchanged and
    /// nothing is written, but the selection is still cleared.
    pub fn delete_note(&mut self, id: &NoteId) -> bool {
        self.current_note_id = None;
        let Some(index) = self.notes.iter().position(|note| &note.id == id) else {
            debug!("event=note_delete module=store status=ignored reason=not_found note_id={id}");
            return false;
        };

        self.notes.remove(index);
        debug!("event=note_delete module=store status=ok note_id={id}");
        self.after_mutation();
        true
    }

    fn after_mutation(&mut self) {
        let mut folders = derive_folders(&self.notes);
        if !folders.contains(&self.current_folder) {
            folders.push(self.current_folder.clone());
        }
        self.folders = folders;
        self.persist();
    }

    fn persist(&mut self) {
        match self.storage.save(&self.notes) {
            Ok(()) => self.persisted = true,
            Err(err) => {
                self.persisted = false;
                error!(
                    "event=notes_persist module=store status=error error_code=save_failed count={} error={}",
                    self.notes.len(),
                    err
                );
            }
        }
    }
}
