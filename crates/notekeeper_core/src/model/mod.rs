//! Domain model for notes and their folder grouping.
//!
//! # Responsibility
//! - Define the canonical note record persisted by core.
//! - Derive the folder list from the note collection.
//!
//! # Invariants
//! - Every note is identified by a stable, non-empty `NoteId`.
//! - Folders are never stored on their own; they only exist through notes
//!   and the built-in default folder.
//! - Deletion is a hard delete, no tombstones are kept.

pub mod folder;
pub mod note;
