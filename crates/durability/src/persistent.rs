//! PersistentStore: durable ordered store backed by a record log
//!
//! The live state is held in an [`InMemoryStore`]; every mutation is first
//! appended to the record log. Reads never touch the disk.
//!
//! # Lifecycle
//!
//! - `open` takes an exclusive lock on `<location>/LOCK`, replays the log and
//!   compacts it when it has grown well past the live set.
//! - `flush` makes every appended record durable (flush + fsync).
//! - `close` fsyncs and releases the lock; it never deletes data.
//! - `destroy` removes the store files, and the directory once it is empty.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use fs2::FileExt;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use doclite_core::error::{Error, Result};
use doclite_storage::{InMemoryStore, OrderedStore};

use crate::encoding::LogRecord;
use crate::log::RecordLog;
use crate::paths::StorePaths;

/// Minimum record count before compaction is considered
pub const COMPACTION_MIN_RECORDS: u64 = 1024;

/// Durable ordered store
#[derive(Debug)]
pub struct PersistentStore {
    paths: StorePaths,
    state: InMemoryStore,
    /// None once closed
    log: Mutex<Option<RecordLog>>,
    lock: Mutex<Option<File>>,
}

impl PersistentStore {
    /// Open (or create) the store in directory `location`
    ///
    /// # Errors
    ///
    /// - `Error::StoreLocked` if another handle holds the directory lock
    /// - `Error::IoError` if the directory or log cannot be opened
    pub fn open(location: impl AsRef<Path>) -> Result<Self> {
        let paths = StorePaths::from_root(location);
        paths.create_directories()?;

        let lock_path = paths.lock_file();
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)?;
        lock_file
            .try_lock_exclusive()
            .map_err(|_| Error::StoreLocked(paths.root().to_path_buf()))?;

        let (mut log, replay) = RecordLog::open(paths.log_file())?;
        let live = replay.entries.len() as u64;

        if replay.discarded_bytes > 0 {
            warn!(
                path = ?paths.root(),
                discarded_bytes = replay.discarded_bytes,
                "Store opened with a damaged log tail"
            );
        }

        if needs_compaction(replay.records, live) {
            debug!(path = ?paths.root(), records = replay.records, live, "Compacting record log");
            drop(log);
            RecordLog::rewrite(paths.log_file(), paths.compact_file(), &replay.entries)?;
            log = RecordLog::open(paths.log_file())?.0;
        }

        info!(
            path = ?paths.root(),
            records = log.records(),
            documents = live,
            "Opened persistent store"
        );

        Ok(PersistentStore {
            paths,
            state: InMemoryStore::from_entries(replay.entries),
            log: Mutex::new(Some(log)),
            lock: Mutex::new(Some(lock_file)),
        })
    }

    /// Remove the store's own files at `location`
    ///
    /// Only the record log, the compaction output and the lock file are
    /// deleted. The directory itself is removed once nothing else is left in
    /// it. A missing directory is not an error.
    pub fn destroy(location: impl AsRef<Path>) -> Result<()> {
        let paths = StorePaths::from_root(location);
        for file in paths.store_files() {
            match std::fs::remove_file(&file) {
                Ok(()) => debug!(path = ?file, "Removed store file"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        let root = paths.root();
        if !root.is_dir() {
            return Ok(());
        }
        if std::fs::read_dir(root)?.next().is_none() {
            std::fs::remove_dir(root)?;
            info!(path = ?root, "Destroyed persistent store");
        } else {
            info!(path = ?root, "Destroyed persistent store, kept non-empty directory");
        }
        Ok(())
    }

    /// Store directory
    pub fn location(&self) -> &Path {
        self.paths.root()
    }

    /// Records currently in the log (0 once closed)
    pub fn log_records(&self) -> u64 {
        self.log.lock().as_ref().map_or(0, RecordLog::records)
    }

    /// True once `close` has run
    pub fn is_closed(&self) -> bool {
        self.log.lock().is_none()
    }

    fn append(&self, record: LogRecord) -> Result<()> {
        let mut guard = self.log.lock();
        let log = guard
            .as_mut()
            .ok_or_else(|| Error::StorageError(format!("store at {:?} is closed", self.location())))?;
        log.append(&record)?;

        // Applied under the log lock so memory order matches log order
        match record {
            LogRecord::Set { key, value } => {
                self.state.insert(key, value);
            }
            LogRecord::Remove { key } => {
                self.state.delete(&key);
            }
        }
        Ok(())
    }
}

fn needs_compaction(records: u64, live: u64) -> bool {
    records > COMPACTION_MIN_RECORDS.max(live.saturating_mul(2))
}

impl OrderedStore for PersistentStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.state.get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        self.append(LogRecord::Set {
            key: key.to_string(),
            value,
        })
    }

    fn remove(&self, key: &str) -> Result<bool> {
        if !self.state.contains(key)? {
            return Ok(false);
        }
        self.append(LogRecord::Remove {
            key: key.to_string(),
        })?;
        Ok(true)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        self.state.contains(key)
    }

    fn entries(&self) -> Result<Vec<(String, String)>> {
        self.state.entries()
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.state.keys()
    }

    fn key_range(&self, skip: usize, take: usize) -> Result<Vec<String>> {
        self.state.key_range(skip, take)
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        self.state.scan_prefix(prefix)
    }

    fn count(&self) -> Result<usize> {
        self.state.count()
    }

    fn flush(&self) -> Result<()> {
        match self.log.lock().as_mut() {
            Some(log) => log.fsync(),
            None => Ok(()),
        }
    }

    fn close(&self) -> Result<()> {
        let log = self.log.lock().take();
        if let Some(mut log) = log {
            log.fsync()?;
        }
        if let Some(lock) = self.lock.lock().take() {
            if let Err(e) = lock.unlock() {
                warn!(path = ?self.location(), error = %e, "Failed to release store lock");
            }
        }
        debug!(path = ?self.location(), "Closed persistent store");
        Ok(())
    }
}
