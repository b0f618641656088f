//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify config, logging, storage and note store wiring end to end.
//! - Print a deterministic summary of the stored collection.

use log::info;
use notekeeper_core::db::open_db;
use notekeeper_core::{
    core_version, init_logging, CoreConfig, KvNoteStorage, NoteStore, SqliteKvStore,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("notekeeper: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = CoreConfig::from_env()?;
    init_logging(config.log_level, &config.log_dir.to_string_lossy())?;

    let conn = open_db(&config.db_path)
        .map_err(|err| format!("failed to open `{}`: {err}", config.db_path.display()))?;
    let kv = SqliteKvStore::try_new(&conn).map_err(|err| err.to_string())?;
    let store = NoteStore::open(KvNoteStorage::new(kv));
    info!(
        "event=cli_summary module=cli status=ok notes={}",
        store.notes().len()
    );

    println!("notekeeper_core version={}", core_version());
    println!("db_path={}", config.db_path.display());
    println!("notes={}", store.notes().len());
    for (folder, count) in store.folder_counts() {
        println!("folder={folder} notes={count}");
    }
    Ok(())
}
