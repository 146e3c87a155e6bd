//! Log record encoding and decoding
//!
//! This module provides encoding/decoding for log records with CRC32 checksums
//! for corruption detection.
//!
//! ## Record Format
//!
//! ```text
//! [length: u32][type: u8][payload: bytes][crc32: u32]
//! ```
//!
//! - **length**: Total size of type + payload + crc (NOT including length itself)
//! - **type**: Record type tag (1=Set, 2=Remove)
//! - **payload**: bincode-serialized LogRecord
//! - **crc32**: CRC32 checksum over \[type\]\[payload\]
//!
//! All integers are little-endian.

use crc32fast::Hasher;
use doclite_core::error::{Error, Result};
use serde::{Deserialize, Serialize};

const TYPE_SET: u8 = 1;
const TYPE_REMOVE: u8 = 2;

/// Smallest valid frame body: type(1) + crc(4)
const MIN_FRAME_LEN: usize = 5;

/// One mutation of the ordered store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogRecord {
    /// Insert or overwrite `key`
    Set {
        /// Store key
        key: String,
        /// Stored text
        value: String,
    },
    /// Delete `key`
    Remove {
        /// Store key
        key: String,
    },
}

impl LogRecord {
    /// Key touched by this record
    pub fn key(&self) -> &str {
        match self {
            LogRecord::Set { key, .. } | LogRecord::Remove { key } => key,
        }
    }

    fn type_tag(&self) -> u8 {
        match self {
            LogRecord::Set { .. } => TYPE_SET,
            LogRecord::Remove { .. } => TYPE_REMOVE,
        }
    }
}

fn checksum(type_tag: u8, payload: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[type_tag]);
    hasher.update(payload);
    hasher.finalize()
}

/// Encode a record to a framed byte buffer
///
/// Format: `[length: u32][type: u8][payload: bytes][crc32: u32]`
pub fn encode_record(record: &LogRecord) -> Result<Vec<u8>> {
    let type_tag = record.type_tag();
    let payload =
        bincode::serialize(record).map_err(|e| Error::SerializationError(e.to_string()))?;

    let total_len = 1 + payload.len() + 4;
    let frame_len = u32::try_from(total_len).map_err(|_| {
        Error::StorageError(format!("record of {} bytes exceeds frame limit", total_len))
    })?;

    let mut buf = Vec::with_capacity(4 + total_len);
    buf.extend_from_slice(&frame_len.to_le_bytes());
    buf.push(type_tag);
    buf.extend_from_slice(&payload);
    buf.extend_from_slice(&checksum(type_tag, &payload).to_le_bytes());

    Ok(buf)
}

/// Decode one record from the front of `buf`
///
/// Returns the record and the number of bytes consumed, or `Ok(None)` when
/// `buf` ends before the frame does (a partial write).
///
/// # Errors
///
/// Returns `Error::Corruption` with the file offset when:
/// - The declared length is smaller than a minimal frame
/// - CRC32 checksum doesn't match
/// - Type tag doesn't match the deserialized record
/// - Deserialization fails
pub fn decode_record(buf: &[u8], offset: u64) -> Result<Option<(LogRecord, usize)>> {
    if buf.len() < 4 {
        return Ok(None);
    }

    let mut len_buf = [0u8; 4];
    len_buf.copy_from_slice(&buf[..4]);
    let total_len = u32::from_le_bytes(len_buf) as usize;

    if total_len < MIN_FRAME_LEN {
        return Err(Error::Corruption(format!(
            "offset {}: invalid record length {} (minimum is {} bytes)",
            offset, total_len, MIN_FRAME_LEN
        )));
    }

    if buf.len() < 4 + total_len {
        return Ok(None);
    }

    let frame = &buf[4..4 + total_len];
    let type_tag = frame[0];
    let payload = &frame[1..total_len - 4];

    let mut crc_buf = [0u8; 4];
    crc_buf.copy_from_slice(&frame[total_len - 4..]);
    let expected_crc = u32::from_le_bytes(crc_buf);
    let actual_crc = checksum(type_tag, payload);

    if actual_crc != expected_crc {
        return Err(Error::Corruption(format!(
            "offset {}: CRC mismatch: expected {:08x}, got {:08x}",
            offset, expected_crc, actual_crc
        )));
    }

    let record: LogRecord = bincode::deserialize(payload).map_err(|e| {
        Error::Corruption(format!("offset {}: deserialization failed: {}", offset, e))
    })?;

    if record.type_tag() != type_tag {
        return Err(Error::Corruption(format!(
            "offset {}: type tag mismatch: expected {}, got {}",
            offset,
            record.type_tag(),
            type_tag
        )));
    }

    Ok(Some((record, 4 + total_len)))
}
