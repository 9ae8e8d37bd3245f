//! Error handling for level persistence
//!
//! Every load or save failure is terminal for that operation and comes back
//! to the caller as one `PersistenceError`. Nothing in this crate retries.

use std::io;
use std::path::PathBuf;

/// Result type for every fallible operation in this crate
pub type PersistenceResult<T> = Result<T, PersistenceError>;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    // Backend errors
    #[error("Level '{name}' not found at {}", .path.display())]
    NotFound { name: String, path: PathBuf },

    #[error("Failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("Failed to initialize storage root {}: {source}", .path.display())]
    StorageInit { path: PathBuf, source: io::Error },

    #[error("Invalid level name: {0:?}")]
    InvalidName(String),

    // Stream errors
    #[error("Decompression error: {0}")]
    Decompression(#[source] io::Error),

    #[error("Read error: {0}")]
    Read(#[source] io::Error),

    #[error("Write error: {0}")]
    Write(#[source] io::Error),

    // Format errors
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u16, found: u16 },

    #[error("Truncated data: stream ended inside the {section}")]
    Truncated { section: &'static str },

    #[error("Allocation failed for {width}x{height}x{length} level: {reason}")]
    Allocation {
        width: u16,
        height: u16,
        length: u16,
        reason: String,
    },

    #[error("Value {value} for {field} cannot be encoded without loss")]
    EncodingRange { field: &'static str, value: f64 },

    #[error("Block buffer size mismatch: dimensions require {expected}, found {found}")]
    SizeMismatch { expected: usize, found: usize },

    // Configuration errors
    #[error("Invalid config: {field} ({reason})")]
    InvalidConfig { field: String, reason: String },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl PersistenceError {
    /// Map a failed read of `section` on a plain byte stream.
    ///
    /// A short read is always truncation; anything else is passed through
    /// as a read error for the caller to classify further.
    pub fn from_read(error: io::Error, section: &'static str) -> Self {
        match error.kind() {
            io::ErrorKind::UnexpectedEof => PersistenceError::Truncated { section },
            _ => PersistenceError::Read(error),
        }
    }
}
