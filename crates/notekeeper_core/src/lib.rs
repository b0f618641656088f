//! Core domain logic for Note Keeper.
//! This crate is the single source of truth for note and folder invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::folder::{derive_folders, notes_in_folder};
pub use model::note::{
    normalize_folder, now_epoch_ms, Note, NoteEdit, NoteId, NoteValidationError, DEFAULT_FOLDER,
    UNTITLED_NOTE_TITLE,
};
pub use repo::kv_store::{KvStore, MemoryKvStore, SqliteKvStore};
pub use repo::note_storage::{
    decode_notes, encode_notes, KvNoteStorage, NoteStorage, NOTES_STORAGE_KEY,
};
pub use repo::{RepoError, RepoResult};
pub use service::note_store::{Clock, NoteStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
