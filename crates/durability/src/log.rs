//! Append-only record log
//!
//! The log is a single file of framed records (see [`crate::encoding`]).
//! Opening a log replays it; a partial or corrupt tail stops the replay and
//! is truncated so the next append starts on a frame boundary.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use doclite_core::error::{Error, Result};
use tracing::{debug, warn};

use crate::encoding::{decode_record, encode_record, LogRecord};

/// Result of replaying a log file
#[derive(Debug, Default)]
pub struct Replay {
    /// Live key/value state after applying every valid record
    pub entries: BTreeMap<String, String>,
    /// Number of valid records read
    pub records: u64,
    /// Bytes discarded from a corrupt or partial tail
    pub discarded_bytes: u64,
}

/// Append handle over a record log file
#[derive(Debug)]
pub struct RecordLog {
    path: PathBuf,
    writer: BufWriter<File>,
    size: u64,
    records: u64,
}

impl RecordLog {
    /// Open the log at `path`, creating it if missing, and replay it
    pub fn open(path: impl AsRef<Path>) -> Result<(Self, Replay)> {
        let path = path.as_ref().to_path_buf();

        let replay = if path.exists() {
            replay_file(&path)?
        } else {
            Replay::default()
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(&path)?;
        let size = file.metadata()?.len();

        let log = RecordLog {
            path,
            writer: BufWriter::new(file),
            size,
            records: replay.records,
        };
        Ok((log, replay))
    }

    /// Write `entries` as a fresh log, replacing the file at `path`
    ///
    /// The new log is written to `staging`, fsynced and renamed over `path`.
    pub fn rewrite(
        path: impl AsRef<Path>,
        staging: impl AsRef<Path>,
        entries: &BTreeMap<String, String>,
    ) -> Result<()> {
        let staging = staging.as_ref();
        {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(staging)?;
            let mut writer = BufWriter::new(file);
            for (key, value) in entries {
                let record = LogRecord::Set {
                    key: key.clone(),
                    value: value.clone(),
                };
                writer.write_all(&encode_record(&record)?)?;
            }
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(staging, path.as_ref())?;
        Ok(())
    }

    /// Append one record to the log buffer
    pub fn append(&mut self, record: &LogRecord) -> Result<u64> {
        let offset = self.size;
        let encoded = encode_record(record)?;

        self.writer.write_all(&encoded).map_err(|e| {
            Error::StorageError(format!("Failed to write record at offset {}: {}", offset, e))
        })?;

        self.size += encoded.len() as u64;
        self.records += 1;
        Ok(offset)
    }

    /// Force buffered records to disk (flush + fsync)
    pub fn fsync(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::StorageError(format!("Failed to flush: {}", e)))?;
        self.writer
            .get_ref()
            .sync_all()
            .map_err(|e| Error::StorageError(format!("Failed to fsync: {}", e)))
    }

    /// Bytes written so far, including buffered ones
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Records in the log, including buffered ones
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Log file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RecordLog {
    fn drop(&mut self) {
        if let Err(e) = self.fsync() {
            warn!(path = ?self.path, error = %e, "Final fsync of record log failed");
        }
    }
}

fn replay_file(path: &Path) -> Result<Replay> {
    let bytes = fs::read(path)?;
    let mut replay = Replay::default();
    let mut offset = 0usize;

    while offset < bytes.len() {
        match decode_record(&bytes[offset..], offset as u64) {
            Ok(Some((record, consumed))) => {
                match record {
                    LogRecord::Set { key, value } => {
                        replay.entries.insert(key, value);
                    }
                    LogRecord::Remove { key } => {
                        replay.entries.remove(&key);
                    }
                }
                replay.records += 1;
                offset += consumed;
            }
            Ok(None) => {
                warn!(path = ?path, offset, "Partial record at end of log, discarding tail");
                break;
            }
            Err(e) => {
                warn!(path = ?path, offset, error = %e, "Corrupt record in log, discarding tail");
                break;
            }
        }
    }

    if offset < bytes.len() {
        replay.discarded_bytes = (bytes.len() - offset) as u64;
        let file = OpenOptions::new().write(true).open(path)?;
        file.set_len(offset as u64)?;
        file.sync_all()?;
    }

    debug!(path = ?path, records = replay.records, live = replay.entries.len(), "Replayed record log");
    Ok(replay)
}
