use notekeeper_core::db::open_db_in_memory;
use notekeeper_core::{
    decode_notes, KvNoteStorage, KvStore, MemoryKvStore, Note, NoteId, NoteStorage, RepoError,
    RepoResult, SqliteKvStore, NOTES_STORAGE_KEY,
};

struct UnreadableStore;

impl KvStore for UnreadableStore {
    fn get(&self, _key: &str) -> RepoResult<Option<String>> {
        Err(RepoError::Backend("disk unavailable".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> RepoResult<()> {
        Err(RepoError::Backend("disk unavailable".to_string()))
    }

    fn remove(&self, _key: &str) -> RepoResult<bool> {
        Err(RepoError::Backend("disk unavailable".to_string()))
    }
}

fn sample_notes() -> Vec<Note> {
    let mut first = Note::with_id(NoteId::parse("b2").unwrap(), "Work", 2_000);
    first.title = "Second".to_string();
    first.content = "body two".to_string();
    let second = Note::with_id(NoteId::parse("a1").unwrap(), "General", 1_000);
    vec![first, second]
}

#[test]
fn load_returns_empty_when_key_is_missing() {
    let storage = KvNoteStorage::new(MemoryKvStore::new());
    assert!(storage.load().is_empty());
}

#[test]
fn load_returns_empty_when_blob_is_malformed() {
    let kv = MemoryKvStore::new();
    kv.set(NOTES_STORAGE_KEY, "{not json").unwrap();
    assert!(KvNoteStorage::new(&kv).load().is_empty());

    kv.set(NOTES_STORAGE_KEY, r#"{"id": "a1"}"#).unwrap();
    assert!(KvNoteStorage::new(&kv).load().is_empty());
}

#[test]
fn load_returns_empty_when_store_read_fails() {
    let storage = KvNoteStorage::new(UnreadableStore);
    assert!(storage.load().is_empty());
}

#[test]
fn save_reports_store_write_failure() {
    let storage = KvNoteStorage::new(UnreadableStore);
    let err = storage.save(&sample_notes()).unwrap_err();
    assert!(matches!(err, RepoError::Backend(_)));
}

#[test]
fn save_then_load_preserves_collection_and_order() {
    let storage = KvNoteStorage::new(MemoryKvStore::new());
    let notes = sample_notes();

    storage.save(&notes).unwrap();
    assert_eq!(storage.load(), notes);
}

#[test]
fn save_overwrites_previous_collection() {
    let storage = KvNoteStorage::new(MemoryKvStore::new());
    storage.save(&sample_notes()).unwrap();
    storage.save(&[]).unwrap();

    assert!(storage.load().is_empty());
    assert_eq!(storage.store().len(), 1);
}

#[test]
fn stored_blob_is_a_camel_case_json_array() {
    let storage = KvNoteStorage::new(MemoryKvStore::new());
    storage.save(&sample_notes()).unwrap();

    let raw = storage.store().get(NOTES_STORAGE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "b2");
    assert_eq!(items[0]["createdAt"], 2_000);
    assert_eq!(items[1]["folder"], "General");
}

#[test]
fn decode_fills_defaults_for_absent_fields() {
    let notes = decode_notes(r#"[{"id": "x9", "createdAt": 5, "updatedAt": 7}]"#);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "");
    assert_eq!(notes[0].content, "");
    assert_eq!(notes[0].folder, "General");
    assert_eq!(notes[0].created_at, 5);
    assert_eq!(notes[0].updated_at, 7);
}

#[test]
fn decode_maps_null_or_blank_folder_to_default() {
    let notes = decode_notes(r#"[{"id": "a", "folder": null}, {"id": "b", "folder": ""}]"#);
    assert_eq!(notes[0].folder, "General");
    assert_eq!(notes[1].folder, "General");
}

#[test]
fn decode_skips_invalid_elements_and_keeps_the_rest() {
    let raw = r#"[
        {"id": "keep-1", "title": "ok"},
        42,
        {"title": "no id"},
        {"id": "   "},
        {"id": "keep-2"}
    ]"#;

    let ids: Vec<String> = decode_notes(raw)
        .into_iter()
        .map(|note| note.id.to_string())
        .collect();
    assert_eq!(ids, vec!["keep-1", "keep-2"]);
}

#[test]
fn decode_keeps_notes_with_float_timestamps() {
    let raw = r#"[{"id": "a", "title": "x", "folder": "Work", "createdAt": 1.5e12, "updatedAt": 1700000000000.0}]"#;
    let notes = decode_notes(raw);

    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "x");
    assert_eq!(notes[0].folder, "Work");
    assert_eq!(notes[0].created_at, 1_500_000_000_000);
    assert_eq!(notes[0].updated_at, 1_700_000_000_000);
}

#[test]
fn decode_replaces_unusable_fields_instead_of_dropping_the_note() {
    let raw = r#"[
        {"id": "t1", "title": 7, "content": {"x": 1}, "folder": 3, "createdAt": "yesterday", "updatedAt": 2000},
        {"id": "t2", "title": "kept", "content": "body", "createdAt": 1.25, "updatedAt": null}
    ]"#;
    let notes = decode_notes(raw);

    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].title, "");
    assert_eq!(notes[0].content, "");
    assert_eq!(notes[0].folder, "General");
    assert_eq!(notes[0].created_at, 2_000);
    assert_eq!(notes[0].updated_at, 2_000);

    assert_eq!(notes[1].title, "kept");
    assert_eq!(notes[1].content, "body");
    assert_eq!(notes[1].created_at, 0);
    assert_eq!(notes[1].updated_at, 0);
}

#[test]
fn decode_trims_padded_folder_names() {
    let notes = decode_notes(r#"[{"id": "a", "folder": " Work "}, {"id": "b", "folder": "Work"}]"#);
    assert_eq!(notes[0].folder, "Work");
    assert_eq!(notes[0].folder, notes[1].folder);
}

#[test]
fn decode_drops_later_duplicate_ids() {
    let raw = r#"[{"id": "dup", "title": "first"}, {"id": "dup", "title": "second"}]"#;
    let notes = decode_notes(raw);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "first");
}

#[test]
fn sqlite_backed_storage_round_trips_collection() {
    let conn = open_db_in_memory().unwrap();
    let storage = KvNoteStorage::new(SqliteKvStore::try_new(&conn).unwrap());
    let notes = sample_notes();

    storage.save(&notes).unwrap();
    assert_eq!(storage.load(), notes);
}
