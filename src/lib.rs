// Level persistence for voxel worlds
//
// Levels are stored one file per level in the `.lvl` container: an 18-byte
// big-endian header followed by the raw block ids, gzip-compressed.
// - world: the level snapshot (data + pure operations)
// - persistence: the codec and storage backends
//
// For new code, prefer:
// - persistence::LevelStorage as the seam between a world runtime and disk
// - world::level_operations for building and editing levels

// Constants module
pub mod constants;

pub mod error;
pub mod persistence;
pub mod world;

pub use error::{PersistenceError, PersistenceResult};
pub use persistence::{
    LevelStorage, LockedStorage, LvlHeader, LvlStorage, RangePolicy, StorageConfig,
};
pub use world::{BlockId, LevelData, SpawnData};
