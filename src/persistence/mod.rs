//! Persistence Module - level storage on disk
//!
//! Two layers: the `.lvl` codec (pure encode/decode against a byte stream,
//! gzip framing on top) and storage backends that map level names to files.

// Data modules
pub mod lvl_header_data;
pub mod storage_config;

// Operations modules
pub mod compression_operations;
pub mod lvl_codec_operations;

// Backends
pub mod level_locks;
pub mod lvl_storage;

pub use level_locks::LockedStorage;
pub use lvl_header_data::LvlHeader;
pub use lvl_storage::LvlStorage;
pub use storage_config::{RangePolicy, StorageConfig};

pub use crate::error::{PersistenceError, PersistenceResult};

use crate::world::level_data::LevelData;

/// Contract every on-disk level format implements
///
/// `load` always returns a freshly built, fully populated level or an error;
/// `save` only reads from the level it is given.
pub trait LevelStorage: Send + Sync {
    fn load(&self, name: &str) -> PersistenceResult<LevelData>;
    fn save(&self, level: &LevelData) -> PersistenceResult<()>;
}

impl<S: LevelStorage + ?Sized> LevelStorage for Box<S> {
    fn load(&self, name: &str) -> PersistenceResult<LevelData> {
        (**self).load(name)
    }

    fn save(&self, level: &LevelData) -> PersistenceResult<()> {
        (**self).save(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::level_operations::create_level;

    #[test]
    fn test_backend_behind_trait_object() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage: Box<dyn LevelStorage> = Box::new(
            LvlStorage::new(StorageConfig::with_root(dir.path()))
                .expect("Storage should initialize"),
        );

        let mut level = create_level("boxed", 3, 3, 3).expect("Level should allocate");
        // Already centered on its voxel, so the spawn survives quantization exactly
        level.spawn.position = glam::DVec3::new(1.5, 2.0, 1.5);
        storage.save(&level).expect("Save should succeed");
        assert_eq!(storage.load("boxed").expect("Load should succeed"), level);
    }

    #[test]
    fn test_round_trip_across_dimensions() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = LvlStorage::new(StorageConfig::with_root(dir.path()))
            .expect("Storage should initialize");

        for (i, (w, h, l)) in [(1, 1, 1), (1, 64, 1), (17, 5, 3), (64, 32, 64)]
            .into_iter()
            .enumerate()
        {
            let name = format!("dims{}", i);
            let mut level = create_level(name.as_str(), w, h, l).expect("Level should allocate");
            for (j, block) in level.blocks.iter_mut().enumerate() {
                block.0 = (j % 256) as u8;
            }
            storage.save(&level).expect("Save should succeed");

            let loaded = storage.load(&name).expect("Load should succeed");
            assert_eq!((loaded.width, loaded.height, loaded.length), (w, h, l));
            assert_eq!(loaded.blocks, level.blocks);
        }
    }
}
