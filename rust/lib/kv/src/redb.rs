use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use redb::{Database, DatabaseError, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("folio");

/// Delay between attempts while another process holds the file.
const LOCK_POLL: Duration = Duration::from_millis(50);

fn storage_err(e: impl std::fmt::Display) -> KVError {
    KVError::Storage(e.to_string())
}

/// RedbStore is a KVStore backed by a single redb file.
///
/// Every `set` and `delete` is its own write transaction, so each key is
/// updated atomically. The file is locked for as long as the store is open:
/// a second process sees `KVError::Busy` until the first one drops it.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    ///
    /// Missing parent directories are created. Fails with `KVError::Busy`
    /// if another process has the file open.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(storage_err)?;
            }
        }

        let db = Database::create(path).map_err(|e| match e {
            DatabaseError::DatabaseAlreadyOpen => KVError::Busy(path.display().to_string()),
            e => storage_err(e),
        })?;

        // Create the table up front so readers never see TableDoesNotExist.
        let write_txn = db.begin_write().map_err(storage_err)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;

        debug!("opened redb store at {}", path.display());
        Ok(Self { db: Arc::new(db) })
    }

    /// Like [`open`](Self::open), but waits up to `timeout` for another
    /// process to release the file. Writers queue up behind each other, so
    /// the last one to commit wins.
    pub fn open_waiting(path: &Path, timeout: Duration) -> Result<Self, KVError> {
        let deadline = Instant::now() + timeout;
        loop {
            match Self::open(path) {
                Err(KVError::Busy(_)) if Instant::now() < deadline => {
                    debug!("{} is locked, waiting", path.display());
                    std::thread::sleep(LOCK_POLL);
                }
                other => return other,
            }
        }
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(TABLE).map_err(storage_err)?;
        let value = table.get(key).map_err(storage_err)?;
        Ok(value.map(|v| v.value().to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage_err)?;
            table.insert(key, value).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;
        debug!(key, bytes = value.len(), "kv set");
        Ok(())
    }

    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage_err)?;
            for (key, value) in entries {
                table.insert(*key, *value).map_err(storage_err)?;
            }
        }
        write_txn.commit().map_err(storage_err)?;
        debug!(keys = entries.len(), "kv batch set");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage_err)?;
            table.remove(key).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;
        debug!(key, "kv delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, RedbStore) {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = RedbStore::open(&tmp.path().join("local.redb")).unwrap();
        (tmp, store)
    }

    #[test]
    fn set_then_get() {
        let (_tmp, store) = open_temp();
        assert_eq!(store.get("authToken").unwrap(), None);
        store.set("authToken", b"abc").unwrap();
        assert_eq!(store.get("authToken").unwrap(), Some(b"abc".to_vec()));
    }

    #[test]
    fn set_overwrites() {
        let (_tmp, store) = open_temp();
        store.set("k", b"one").unwrap();
        store.set("k", b"two").unwrap();
        assert_eq!(store.get_string("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn delete_missing_key_is_noop() {
        let (_tmp, store) = open_temp();
        store.delete("never-set").unwrap();
        store.set("k", b"v").unwrap();
        store.delete("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn batch_set_commits_together() {
        let (_tmp, store) = open_temp();
        store.set("portfolioResumeFileName", b"old.pdf").unwrap();
        store
            .batch_set(&[("portfolioResume", b"data:new"), ("portfolioResumeFileName", b"new.pdf")])
            .unwrap();
        assert_eq!(store.get_string("portfolioResume").unwrap().as_deref(), Some("data:new"));
        assert_eq!(
            store.get_string("portfolioResumeFileName").unwrap().as_deref(),
            Some("new.pdf")
        );
    }

    #[test]
    fn reopen_keeps_data() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("local.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.set("portfolioProfile", b"{}").unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.get("portfolioProfile").unwrap(), Some(b"{}".to_vec()));
    }

    #[test]
    fn second_open_is_busy() {
        let (tmp, _held) = open_temp();
        assert!(matches!(
            RedbStore::open(&tmp.path().join("local.redb")),
            Err(KVError::Busy(_))
        ));
    }

    #[test]
    fn open_waiting_gives_up_after_timeout() {
        let (tmp, _held) = open_temp();
        let started = Instant::now();
        let result = RedbStore::open_waiting(&tmp.path().join("local.redb"), Duration::from_millis(120));
        assert!(matches!(result, Err(KVError::Busy(_))));
        assert!(started.elapsed() >= Duration::from_millis(120));
    }

    #[test]
    fn later_writer_wins_after_lock_is_released() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("local.redb");
        let first = RedbStore::open(&path).unwrap();
        first.set("portfolioProfile", b"first").unwrap();

        let holder = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(150));
            first.set("portfolioProfile", b"first again").unwrap();
            drop(first);
        });

        let second = RedbStore::open_waiting(&path, Duration::from_secs(10)).unwrap();
        holder.join().unwrap();
        assert_eq!(
            second.get_string("portfolioProfile").unwrap().as_deref(),
            Some("first again")
        );
        second.set("portfolioProfile", b"second").unwrap();
        assert_eq!(
            second.get_string("portfolioProfile").unwrap().as_deref(),
            Some("second")
        );
    }

    #[test]
    fn get_string_rejects_invalid_utf8() {
        let (_tmp, store) = open_temp();
        store.set("bin", &[0xff, 0xfe]).unwrap();
        assert!(matches!(
            store.get_string("bin"),
            Err(KVError::Serialization(_))
        ));
    }
}
