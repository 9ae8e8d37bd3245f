//! Format constants for the `.lvl` level container
//!
//! Single source of truth for every magic number the codec and the storage
//! backend agree on.

/// The only header version this crate can decode or will write
pub const LVL_FORMAT_VERSION: u16 = 1874;

/// Fixed header size in bytes: seven u16 fields plus four single bytes
pub const LVL_HEADER_SIZE: usize = 18;

/// Default file extension, without the leading dot
pub const LVL_EXTENSION: &str = "lvl";

/// Default storage root, relative to the working directory
pub const DEFAULT_STORAGE_ROOT: &str = "levels";

/// Default gzip level (flate2's `Compression::default()`)
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Highest gzip level flate2 accepts
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Added to the stored X and Z spawn coordinates on load to center the
/// spawn on its voxel. Y is stored and restored as-is.
pub const SPAWN_CENTER_OFFSET: f64 = 0.5;

/// Largest spawn coordinate a u16 header field can hold
pub const MAX_SPAWN_COORDINATE: f64 = u16::MAX as f64;

/// Angle quantization: one full turn maps onto 256 byte steps
pub const ANGLE_STEPS: f64 = 256.0;
pub const FULL_TURN_DEGREES: f64 = 360.0;
