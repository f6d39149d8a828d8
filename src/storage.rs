use std::{path::PathBuf, sync::Arc};

use crate::{bookkeeping::Bookkeeping, config::{Backend, Config, StorageConfig}, seed::seed_default_chart};

// Re-export the storage layer so callers only depend on this crate
pub use bookkeeping_core::storage::{AccountFilter, AccountStore, JournalFilter, JournalStore, StorageError};
pub use bookkeeping_memory::InMemoryStorage;
pub use bookkeeping_sqlite::SqliteStorage;

/// Opens the configured backend, seeding a new store with the default chart.
pub fn open(config: &Config) -> Result<Bookkeeping, StorageError> {
    let policy = config.posting;
    match config.storage.backend {
        Backend::Memory => {
            let storage = Arc::new(InMemoryStorage::new());
            seed_default_chart(storage.as_ref())?;
            Ok(Bookkeeping::with_storage(storage, policy))
        }
        Backend::Sqlite => {
            std::fs::create_dir_all(&config.storage.data_dir)?;
            let storage = Arc::new(SqliteStorage::new(config.storage.db_path())?);
            seed_default_chart(storage.as_ref())?;
            Ok(Bookkeeping::with_storage(storage, policy))
        }
    }
}

fn sidecar(path: &std::path::Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Removes the database file and its WAL sidecars. Returns whether a file was removed.
pub fn delete_database(config: &StorageConfig) -> Result<bool, StorageError> {
    if config.backend == Backend::Memory {
        return Ok(false);
    }

    let path = config.db_path();
    if !path.exists() {
        tracing::info!(path = %path.display(), "No database to delete");
        return Ok(false);
    }

    std::fs::remove_file(&path)?;
    for suffix in ["-wal", "-shm"] {
        let extra = sidecar(&path, suffix);
        if extra.exists() {
            std::fs::remove_file(extra)?;
        }
    }
    tracing::info!(path = %path.display(), "Database deleted");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookkeeping_core::JournalLine;

    fn sqlite_config(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.storage.data_dir = dir.join("nested").join("books");
        config
    }

    #[test]
    fn open_creates_directory_and_seeds_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = sqlite_config(dir.path());

        let book = open(&config).unwrap();
        assert!(config.storage.db_path().exists());
        let seeded = book.fetch_accounts("", "").unwrap().len();
        assert!(seeded > 0);
        book.post(&[JournalLine::debit(1110, 100), JournalLine::credit(3100, 100)]).unwrap();
        drop(book);

        let book = open(&config).unwrap();
        assert_eq!(book.fetch_accounts("", "").unwrap().len(), seeded);
        assert_eq!(book.fetch_general_ledger(&[1110]).unwrap().balance(1110), 100);
    }

    #[test]
    fn delete_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = sqlite_config(dir.path());

        drop(open(&config).unwrap());
        assert!(delete_database(&config.storage).unwrap());
        assert!(!config.storage.db_path().exists());
        assert!(!delete_database(&config.storage).unwrap());
    }

    #[test]
    fn memory_backend_is_seeded() {
        let mut config = Config::default();
        config.storage.backend = Backend::Memory;
        let book = open(&config).unwrap();
        assert_eq!(book.fetch_accounts("4100", "").unwrap().len(), 1);
        assert!(!delete_database(&config.storage).unwrap());
    }
}
