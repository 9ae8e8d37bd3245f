//! Level Data - Pure DOP Structures
//!
//! The in-memory snapshot of one stored world.
//! NO METHODS - all transformations live in level_operations.rs

use super::core::BlockId;
use glam::DVec3;

/// One complete level: dimensions, flat block buffer and spawn state
///
/// `blocks.len()` is always `width * height * length` for levels built by
/// `create_level` or returned from a load. Callers may mutate blocks in
/// place but must not resize the buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelData {
    /// Identifier the level is stored under
    pub name: String,

    /// Extent along X
    pub width: u16,

    /// Extent along Y
    pub height: u16,

    /// Extent along Z
    pub length: u16,

    /// Block ids, indexed by `(y * length + z) * width + x`
    pub blocks: Vec<BlockId>,

    pub spawn: SpawnData,
}

/// Where new players appear in a level
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnData {
    pub position: DVec3,

    /// Degrees, [0, 360)
    pub yaw: f64,

    /// Degrees, [0, 360)
    pub pitch: f64,
}

impl Default for SpawnData {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}
