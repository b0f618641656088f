//! Note collection persistence adapter.
//!
//! # Responsibility
//! - Load and save the full note collection as one JSON blob under a fixed key.
//! - Recover silently from missing or malformed stored data.
//!
//! # Invariants
//! - `load` never fails; any unreadable state yields an empty collection.
//! - `save` overwrites the previous blob with the complete collection.
//! - Loaded collections never contain duplicate ids.

use crate::model::note::{normalize_folder, Note, NoteId};
use crate::repo::kv_store::KvStore;
use crate::repo::RepoResult;
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

/// Storage key holding the serialized note collection.
pub const NOTES_STORAGE_KEY: &str = "notes-app-notes-v1";

/// Persistence boundary used by the note store.
pub trait NoteStorage {
    /// Reads the stored collection, or an empty one when nothing usable exists.
    fn load(&self) -> Vec<Note>;
    /// Replaces the stored collection with `notes`.
    fn save(&self, notes: &[Note]) -> RepoResult<()>;
}

impl<T: NoteStorage + ?Sized> NoteStorage for &T {
    fn load(&self) -> Vec<Note> {
        (**self).load()
    }

    fn save(&self, notes: &[Note]) -> RepoResult<()> {
        (**self).save(notes)
    }
}

/// `NoteStorage` implementation over any key-value store.
pub struct KvNoteStorage<S: KvStore> {
    store: S,
}

impl<S: KvStore> KvNoteStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: KvStore> NoteStorage for KvNoteStorage<S> {
    fn load(&self) -> Vec<Note> {
        let raw = match self.store.get(NOTES_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("event=notes_load module=storage status=ok source=empty count=0");
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=storage status=recovered error_code=read_failed error={}",
                    err
                );
                return Vec::new();
            }
        };

        let notes = decode_notes(&raw);
        info!(
            "event=notes_load module=storage status=ok source=store count={}",
            notes.len()
        );
        notes
    }

    fn save(&self, notes: &[Note]) -> RepoResult<()> {
        let encoded = encode_notes(notes)?;
        self.store.set(NOTES_STORAGE_KEY, &encoded)?;
        info!(
            "event=notes_save module=storage status=ok count={} bytes={}",
            notes.len(),
            encoded.len()
        );
        Ok(())
    }
}

/// Serializes a collection into its stored JSON array form.
pub fn encode_notes(notes: &[Note]) -> RepoResult<String> {
    Ok(serde_json::to_string(notes)?)
}

/// Decodes a stored JSON blob leniently.
///
/// Rules:
/// - non-JSON or non-array input -> empty collection.
/// - elements that are not objects or lack a usable `id` are skipped.
/// - missing or non-string `title`/`content` -> `""`; missing, non-string or
///   blank `folder` -> default folder (other names are trimmed).
/// - timestamps accept integers and whole floats; an unusable one falls back
///   to the other timestamp, then to `0`.
/// - later elements reusing an earlier id are dropped.
pub fn decode_notes(raw: &str) -> Vec<Note> {
    let elements = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(elements)) => elements,
        Ok(_) => {
            warn!("event=notes_decode module=storage status=recovered error_code=not_an_array");
            return Vec::new();
        }
        Err(err) => {
            warn!(
                "event=notes_decode module=storage status=recovered error_code=malformed_json error={}",
                err
            );
            return Vec::new();
        }
    };

    let mut seen = HashSet::with_capacity(elements.len());
    let mut notes = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let Some(note) = decode_note(element) else {
            warn!("event=notes_decode module=storage status=skipped reason=invalid_element index={index}");
            continue;
        };
        if !seen.insert(note.id.clone()) {
            warn!("event=notes_decode module=storage status=skipped reason=duplicate_id index={index}");
            continue;
        }
        notes.push(note);
    }
    notes
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredNote {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    content: Option<Value>,
    #[serde(default)]
    folder: Option<Value>,
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(default)]
    updated_at: Option<Value>,
}

fn decode_note(element: Value) -> Option<Note> {
    let stored = serde_json::from_value::<StoredNote>(element).ok()?;
    let id = match stored.id? {
        Value::String(value) => NoteId::parse(value).ok()?,
        Value::Number(value) => NoteId::parse(value.to_string()).ok()?,
        _ => return None,
    };

    let created_at = stored.created_at.as_ref().and_then(epoch_ms_value);
    let updated_at = stored.updated_at.as_ref().and_then(epoch_ms_value);

    Some(Note {
        id,
        title: text_value(stored.title),
        content: text_value(stored.content),
        folder: normalize_folder(&text_value(stored.folder)),
        created_at: created_at.or(updated_at).unwrap_or_default(),
        updated_at: updated_at.or(created_at).unwrap_or_default(),
    })
}

/// Strings are kept; anything else (null, numbers, objects) reads as `""`.
fn text_value(value: Option<Value>) -> String {
    match value {
        Some(Value::String(text)) => text,
        _ => String::new(),
    }
}

/// Accepts integer milliseconds and whole-number floats.
fn epoch_ms_value(value: &Value) -> Option<i64> {
    if let Some(ms) = value.as_i64() {
        return Some(ms);
    }
    let ms = value.as_f64()?;
    if ms.is_finite() && ms.fract() == 0.0 && ms.abs() <= i64::MAX as f64 {
        Some(ms as i64)
    } else {
        None
    }
}
