//! Session factory configuration
//!
//! A `SessionFactoryConfig` is an immutable value built with a consuming
//! builder, or loaded from a `doclite.toml` file:
//!
//! ```toml
//! location = "/var/lib/app/data"
//! in_memory = false
//! compress = true
//! compression_level = 3
//! encryption_key = "ABCDEFGHIJKLMNOP"
//! ```
//!
//! Every field is optional in the file; missing fields take the builder
//! defaults.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use doclite_storage::codec::{DEFAULT_COMPRESSION_LEVEL, KEY_LENGTH};

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "doclite.toml";

/// Directory name used for the default store location
pub const DEFAULT_DATA_DIR: &str = "data";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Encryption key is not 16 bytes
    #[error("Encryption key must be {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Required key length
        expected: usize,
        /// Supplied key length
        actual: usize,
    },

    /// Persistent store without a location
    #[error("A persistent store requires a location")]
    MissingLocation,

    /// Compression level unsupported by zstd
    #[error("Invalid compression level: {0}")]
    InvalidCompressionLevel(i32),

    /// Config file could not be read
    #[error("Failed to read config file '{}': {detail}", path.display())]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        detail: String,
    },

    /// Config text is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(String),
}

impl From<ConfigError> for doclite_core::Error {
    fn from(e: ConfigError) -> Self {
        doclite_core::Error::ConfigurationError(e.to_string())
    }
}

/// Configuration of a [`crate::SessionFactory`]
///
/// # Example
///
/// ```
/// use doclite_engine::SessionFactoryConfig;
///
/// let config = SessionFactoryConfig::new()
///     .store_at("/tmp/doclite-example")
///     .compress()
///     .encrypt_with_key("ABCDEFGHIJKLMNOP");
///
/// assert!(config.validate().is_ok());
/// assert!(config.is_compressed());
/// assert!(config.is_encrypted());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionFactoryConfig {
    location: PathBuf,
    in_memory: bool,
    compress: bool,
    compression_level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    encryption_key: Option<String>,
}

impl Default for SessionFactoryConfig {
    fn default() -> Self {
        Self {
            location: Self::default_location(),
            in_memory: false,
            compress: false,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            encryption_key: None,
        }
    }
}

impl fmt::Debug for SessionFactoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionFactoryConfig")
            .field("location", &self.location)
            .field("in_memory", &self.in_memory)
            .field("compress", &self.compress)
            .field("compression_level", &self.compression_level)
            .field(
                "encryption_key",
                &self.encryption_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl SessionFactoryConfig {
    /// Configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<directory of the running executable>/data`
    ///
    /// Falls back to `./data` when the executable path is unavailable.
    pub fn default_location() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_DATA_DIR)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Store documents in directory `path`
    pub fn store_at<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.location = path.into();
        self
    }

    /// Keep documents in memory only
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Compress stored documents with zstd
    pub fn compress(mut self) -> Self {
        self.compress = true;
        self
    }

    /// zstd level used when compressing
    pub fn compression_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }

    /// Encrypt stored documents with AES-128-CBC under a 16-byte key
    pub fn encrypt_with_key<K: Into<String>>(mut self, key: K) -> Self {
        self.encryption_key = Some(key.into());
        self
    }

    /// Configured store location
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// True for a non-durable store
    pub fn is_in_memory(&self) -> bool {
        self.in_memory
    }

    /// True if documents are compressed
    pub fn is_compressed(&self) -> bool {
        self.compress
    }

    /// Configured zstd level
    pub fn level(&self) -> i32 {
        self.compression_level
    }

    /// True if documents are encrypted
    pub fn is_encrypted(&self) -> bool {
        self.encryption_key.is_some()
    }

    /// Raw encryption key bytes
    pub fn encryption_key(&self) -> Option<&[u8]> {
        self.encryption_key.as_deref().map(str::as_bytes)
    }

    /// Check the configuration before opening a factory
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(key) = self.encryption_key() {
            if key.len() != KEY_LENGTH {
                return Err(ConfigError::InvalidKeyLength {
                    expected: KEY_LENGTH,
                    actual: key.len(),
                });
            }
        }

        if !self.in_memory && self.location.as_os_str().is_empty() {
            return Err(ConfigError::MissingLocation);
        }

        if self.compress && !zstd_level_supported(self.compression_level) {
            return Err(ConfigError::InvalidCompressionLevel(self.compression_level));
        }

        Ok(())
    }

    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SessionFactoryConfig =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

fn zstd_level_supported(level: i32) -> bool {
    doclite_storage::codec::ZstdCodec::new(level).is_ok()
}
