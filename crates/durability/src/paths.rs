//! Store directory structure
//!
//! A persistent store is a directory containing all state:
//!
//! ```text
//! <location>/
//! ├── documents.log          # Record log
//! ├── documents.log.compact  # Compaction output (transient)
//! └── LOCK                   # Exclusive advisory lock
//! ```

use std::path::{Path, PathBuf};

/// Store directory paths
#[derive(Debug, Clone)]
pub struct StorePaths {
    root: PathBuf,
}

impl StorePaths {
    /// Create paths from root directory
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        StorePaths {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root store directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Record log path
    pub fn log_file(&self) -> PathBuf {
        self.root.join("documents.log")
    }

    /// Compaction output path
    pub fn compact_file(&self) -> PathBuf {
        self.root.join("documents.log.compact")
    }

    /// Lock file path
    pub fn lock_file(&self) -> PathBuf {
        self.root.join("LOCK")
    }

    /// Every file the store creates in its directory
    pub fn store_files(&self) -> [PathBuf; 3] {
        [self.log_file(), self.compact_file(), self.lock_file()]
    }

    /// Create the store directory
    pub fn create_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }
}
