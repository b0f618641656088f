//! Folder derivation.
//!
//! # Responsibility
//! - Compute the visible folder list from the note collection.
//!
//! # Invariants
//! - `DEFAULT_FOLDER` is always the first entry.
//! - Entries are unique and otherwise follow first-seen collection order.

use crate::model::note::{Note, DEFAULT_FOLDER};
use std::collections::HashSet;

/// Returns `DEFAULT_FOLDER` followed by every distinct effective folder.
///
/// Pure function; callers recompute it fully after each collection change.
pub fn derive_folders(notes: &[Note]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(notes.len() + 1);
    let mut folders = vec![DEFAULT_FOLDER.to_string()];
    seen.insert(DEFAULT_FOLDER);

    for note in notes {
        let folder = note.effective_folder();
        if seen.insert(folder) {
            folders.push(folder.to_string());
        }
    }

    folders
}

/// Returns notes whose effective folder equals `folder`, in collection order.
pub fn notes_in_folder<'a>(notes: &'a [Note], folder: &str) -> Vec<&'a Note> {
    notes
        .iter()
        .filter(|note| note.effective_folder() == folder)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::derive_folders;

    #[test]
    fn empty_collection_yields_default_only() {
        assert_eq!(derive_folders(&[]), vec!["General".to_string()]);
    }
}
