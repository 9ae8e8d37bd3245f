//! Storage backend configuration
//!
//! Loaded from TOML. Every field has a default, so an empty document is a
//! valid configuration:
//!
//! ```toml
//! root = "levels"
//! extension = "lvl"
//! compression_level = 6
//! range_policy = "reject"
//! verify_trailer = true
//! ```

use crate::constants::{
    DEFAULT_COMPRESSION_LEVEL, DEFAULT_STORAGE_ROOT, LVL_EXTENSION, MAX_COMPRESSION_LEVEL,
};
use crate::error::{PersistenceError, PersistenceResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How spawn values that do not fit their header field are handled on save
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// Fail the save with `EncodingRange`
    #[default]
    Reject,
    /// Clamp positions into [0, 65535] and wrap angles into [0, 360),
    /// matching files written by legacy servers
    Saturate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one file per level
    pub root: PathBuf,

    /// File extension without the leading dot
    pub extension: String,

    /// gzip level, 0..=9
    pub compression_level: u32,

    pub range_policy: RangePolicy,

    /// Drain the stream after the payload so the gzip CRC and size trailer
    /// are checked on every load
    pub verify_trailer: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_STORAGE_ROOT),
            extension: LVL_EXTENSION.to_string(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            range_policy: RangePolicy::Reject,
            verify_trailer: true,
        }
    }
}

impl StorageConfig {
    /// Default config rooted at `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(source: &str) -> PersistenceResult<Self> {
        let config: StorageConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> PersistenceResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| PersistenceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> PersistenceResult<()> {
        if self.extension.is_empty()
            || self
                .extension
                .chars()
                .any(|c| c == '.' || c == '/' || c == '\\' || c == '\0')
        {
            return Err(PersistenceError::InvalidConfig {
                field: "extension".to_string(),
                reason: format!("'{}' is not a bare file extension", self.extension),
            });
        }

        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(PersistenceError::InvalidConfig {
                field: "compression_level".to_string(),
                reason: format!(
                    "{} exceeds maximum {}",
                    self.compression_level, MAX_COMPRESSION_LEVEL
                ),
            });
        }

        if self.root.as_os_str().is_empty() {
            return Err(PersistenceError::InvalidConfig {
                field: "root".to_string(),
                reason: "storage root must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
