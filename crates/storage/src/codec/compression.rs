//! Zstandard compression stage.

use super::traits::{CodecError, StorageCodec};

/// Default zstd compression level
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

const CODEC_ID: &str = "zstd";

/// Lossless compression with zstd
///
/// Each encoded value is one self-contained zstd frame.
#[derive(Debug, Clone, Copy)]
pub struct ZstdCodec {
    level: i32,
}

impl ZstdCodec {
    /// Create a codec at the given compression level
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidCompressionLevel` if zstd does not
    /// support `level`.
    pub fn new(level: i32) -> Result<Self, CodecError> {
        if !zstd::compression_level_range().contains(&level) {
            return Err(CodecError::InvalidCompressionLevel(level));
        }
        Ok(Self { level })
    }

    /// Configured compression level
    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Default for ZstdCodec {
    fn default() -> Self {
        Self {
            level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl StorageCodec for ZstdCodec {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        zstd::encode_all(data, self.level).map_err(|e| CodecError::encode(e.to_string(), CODEC_ID))
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        zstd::decode_all(data).map_err(|e| CodecError::decode(e.to_string(), CODEC_ID, data.len()))
    }

    fn codec_id(&self) -> &str {
        CODEC_ID
    }
}
