//! `.lvl` storage backend
//!
//! One gzip-compressed file per level under a configured root directory.
//! Holds no state between calls beyond its configuration; callers that load
//! and save the same level from several threads must serialize access
//! themselves (see `LockedStorage`).

use super::compression_operations::{read_compressed_level, write_compressed_level};
use super::lvl_codec_operations::header_from_level;
use super::storage_config::StorageConfig;
use super::LevelStorage;
use crate::error::{PersistenceError, PersistenceResult};
use crate::world::level_data::LevelData;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

#[derive(Debug)]
pub struct LvlStorage {
    config: StorageConfig,
}

impl LvlStorage {
    /// Validate `config` and create its root directory
    ///
    /// An existing root is fine. Any other failure to create it is returned
    /// here rather than on the first save.
    pub fn new(config: StorageConfig) -> PersistenceResult<Self> {
        config.validate()?;

        fs::create_dir_all(&config.root).map_err(|source| PersistenceError::StorageInit {
            path: config.root.clone(),
            source,
        })?;

        log::info!(
            "[LvlStorage] Initialized at {} (*.{}, gzip level {})",
            config.root.display(),
            config.extension,
            config.compression_level
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// File a level name is stored in. Pure path composition, no I/O.
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.config
            .root
            .join(format!("{}.{}", name, self.config.extension))
    }
}

/// Reject names that are empty or would resolve outside the storage root
pub fn validate_level_name(name: &str) -> PersistenceResult<()> {
    let escapes_root = name == "."
        || name == ".."
        || name.chars().any(|c| c == '/' || c == '\\' || c == '\0');
    if name.is_empty() || escapes_root {
        return Err(PersistenceError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl LevelStorage for LvlStorage {
    fn load(&self, name: &str) -> PersistenceResult<LevelData> {
        validate_level_name(name)?;
        let path = self.resolve_path(name);

        let file = File::open(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => PersistenceError::NotFound {
                name: name.to_string(),
                path: path.clone(),
            },
            _ => PersistenceError::Open {
                path: path.clone(),
                source,
            },
        })?;

        // The decoder owns the file and is dropped before it on every path
        let level = read_compressed_level(name, BufReader::new(file), self.config.verify_trailer)
            .map_err(|e| {
                log::warn!("[LvlStorage] Failed to load '{}': {}", name, e);
                e
            })?;

        log::debug!(
            "[LvlStorage] Loaded '{}' from {} ({}x{}x{})",
            name,
            path.display(),
            level.width,
            level.height,
            level.length
        );
        Ok(level)
    }

    fn save(&self, level: &LevelData) -> PersistenceResult<()> {
        validate_level_name(&level.name)?;

        // Range and size checks run before the existing file is truncated
        let header = header_from_level(level, self.config.range_policy)?;

        let path = self.resolve_path(&level.name);
        let file = File::create(&path).map_err(|source| PersistenceError::Open {
            path: path.clone(),
            source,
        })?;

        let writer = write_compressed_level(
            &header,
            level,
            BufWriter::new(file),
            self.config.compression_level,
        )?;
        let file = writer
            .into_inner()
            .map_err(|e| PersistenceError::Write(e.into_error()))?;
        file.sync_all().map_err(PersistenceError::Write)?;

        log::debug!(
            "[LvlStorage] Saved '{}' to {} ({} blocks)",
            level.name,
            path.display(),
            level.blocks.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::compression_operations::gzip_writer;
    use crate::persistence::storage_config::RangePolicy;
    use crate::world::core::BlockId;
    use crate::world::level_data::SpawnData;
    use crate::world::level_operations::create_level;
    use glam::DVec3;
    use std::io::Write;
    use tempfile::TempDir;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn temp_storage() -> (TempDir, LvlStorage) {
        init_logging();
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = LvlStorage::new(StorageConfig::with_root(dir.path()))
            .expect("Storage should initialize");
        (dir, storage)
    }

    fn scenario_level(name: &str) -> LevelData {
        let mut level = create_level(name, 4, 4, 4).expect("Level should allocate");
        level.blocks[37] = BlockId::new(9);
        level.spawn = SpawnData {
            position: DVec3::new(2.5, 3.0, 2.5),
            yaw: 90.0,
            pitch: 0.0,
        };
        level
    }

    #[test]
    fn test_resolve_path() {
        let storage = LvlStorage {
            config: StorageConfig::with_root("/srv/levels"),
        };
        assert_eq!(
            storage.resolve_path("main"),
            PathBuf::from("/srv/levels/main.lvl")
        );
    }

    #[test]
    fn test_init_creates_nested_root() {
        init_logging();
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = dir.path().join("worlds").join("classic");

        LvlStorage::new(StorageConfig::with_root(&root)).expect("Storage should initialize");
        assert!(root.is_dir());
        // Existing root is not an error
        LvlStorage::new(StorageConfig::with_root(&root)).expect("Re-init should succeed");
    }

    #[test]
    fn test_init_failure_is_reported() {
        init_logging();
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, b"file").expect("Failed to write blocker file");

        let result = LvlStorage::new(StorageConfig::with_root(blocker.join("levels")));
        assert!(matches!(result, Err(PersistenceError::StorageInit { .. })));
    }

    #[test]
    fn test_scenario_save_then_load() {
        let (_dir, storage) = temp_storage();
        let level = scenario_level("scenario");

        storage.save(&level).expect("Save should succeed");
        assert!(storage.resolve_path("scenario").is_file());

        let loaded = storage.load("scenario").expect("Load should succeed");
        assert_eq!(loaded.name, "scenario");
        assert_eq!((loaded.width, loaded.height, loaded.length), (4, 4, 4));
        assert_eq!(loaded.blocks, level.blocks);
        assert_eq!(loaded.spawn.position, DVec3::new(2.5, 3.0, 2.5));
        assert!((loaded.spawn.yaw - 90.0).abs() < 360.0 / 256.0);
        assert_eq!(loaded.spawn.pitch, 0.0);
    }

    #[test]
    fn test_save_overwrites_existing_level() {
        let (_dir, storage) = temp_storage();
        let mut level = scenario_level("rewrite");
        storage.save(&level).expect("First save should succeed");

        level.blocks[0] = BlockId::BEDROCK;
        storage.save(&level).expect("Second save should succeed");

        let loaded = storage.load("rewrite").expect("Load should succeed");
        assert_eq!(loaded.blocks[0], BlockId::BEDROCK);
    }

    #[test]
    fn test_load_missing_level() {
        let (_dir, storage) = temp_storage();
        let result = storage.load("nowhere");
        assert!(matches!(
            result,
            Err(PersistenceError::NotFound { ref name, .. }) if name == "nowhere"
        ));
    }

    #[test]
    fn test_load_rejects_non_gzip_file() {
        let (_dir, storage) = temp_storage();
        fs::write(storage.resolve_path("plain"), b"this is not a level")
            .expect("Failed to write file");
        assert!(matches!(
            storage.load("plain"),
            Err(PersistenceError::Decompression(_))
        ));

        fs::write(storage.resolve_path("empty"), b"").expect("Failed to write file");
        assert!(matches!(
            storage.load("empty"),
            Err(PersistenceError::Decompression(_))
        ));
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let (_dir, storage) = temp_storage();
        fs::create_dir(storage.resolve_path("folder")).expect("Failed to create directory");

        // Opening succeeds on Linux and the first read fails with EISDIR
        let result = storage.load("folder");
        assert!(
            matches!(
                result,
                Err(PersistenceError::Read(_)) | Err(PersistenceError::Open { .. })
            ),
            "Expected an I/O error, got {:?}",
            result
        );
    }

    #[test]
    fn test_load_rejects_wrong_version() {
        let (_dir, storage) = temp_storage();
        let file = File::create(storage.resolve_path("future")).expect("Failed to create file");
        let mut encoder = gzip_writer(file, 6);
        let mut header = [0u8; 18];
        header[0..2].copy_from_slice(&1875u16.to_be_bytes());
        header[2..8].copy_from_slice(&[0, 1, 0, 1, 0, 1]);
        encoder.write_all(&header).expect("Failed to write header");
        encoder.write_all(&[0]).expect("Failed to write payload");
        encoder.finish().expect("Failed to finish gzip stream");

        assert!(matches!(
            storage.load("future"),
            Err(PersistenceError::VersionMismatch {
                expected: 1874,
                found: 1875
            })
        ));
    }

    #[test]
    fn test_load_truncated_file() {
        let (_dir, storage) = temp_storage();
        let mut level = create_level("cut", 32, 32, 32).expect("Level should allocate");
        for (i, block) in level.blocks.iter_mut().enumerate() {
            *block = BlockId::new((i * 31 % 251) as u8);
        }
        storage.save(&level).expect("Save should succeed");

        let path = storage.resolve_path("cut");
        let bytes = fs::read(&path).expect("Failed to read level file");
        fs::write(&path, &bytes[..bytes.len() / 2]).expect("Failed to truncate level file");

        assert!(matches!(
            storage.load("cut"),
            Err(PersistenceError::Truncated { .. }) | Err(PersistenceError::Decompression(_))
        ));
    }

    #[test]
    fn test_range_failure_keeps_previous_file() {
        let (_dir, storage) = temp_storage();
        let mut level = scenario_level("keep");
        storage.save(&level).expect("Save should succeed");
        let before = fs::read(storage.resolve_path("keep")).expect("Failed to read level file");

        level.spawn.position.x = -4.0;
        assert!(matches!(
            storage.save(&level),
            Err(PersistenceError::EncodingRange { field: "spawn.x", .. })
        ));

        let after = fs::read(storage.resolve_path("keep")).expect("Failed to read level file");
        assert_eq!(before, after);
    }

    #[test]
    fn test_range_failure_writes_nothing() {
        let (_dir, storage) = temp_storage();
        let mut level = scenario_level("fresh");
        level.spawn.position.z = 70000.0;

        assert!(matches!(
            storage.save(&level),
            Err(PersistenceError::EncodingRange { .. })
        ));
        assert!(!storage.resolve_path("fresh").exists());
    }

    #[test]
    fn test_saturate_policy_saves_out_of_range_spawn() {
        init_logging();
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = StorageConfig {
            range_policy: RangePolicy::Saturate,
            ..StorageConfig::with_root(dir.path())
        };
        let storage = LvlStorage::new(config).expect("Storage should initialize");

        let mut level = scenario_level("legacy");
        level.spawn.position = DVec3::new(-3.0, 3.0, 1e9);
        storage.save(&level).expect("Saturating save should succeed");

        let loaded = storage.load("legacy").expect("Load should succeed");
        assert_eq!(loaded.spawn.position, DVec3::new(0.5, 3.0, 65535.5));
    }

    #[test]
    fn test_invalid_names() {
        let (_dir, storage) = temp_storage();
        for name in ["", ".", "..", "../escape", "nested/level", "back\\slash"] {
            assert!(matches!(
                storage.load(name),
                Err(PersistenceError::InvalidName(_))
            ));
            let mut level = scenario_level("valid");
            level.name = name.to_string();
            assert!(matches!(
                storage.save(&level),
                Err(PersistenceError::InvalidName(_))
            ));
        }
    }

    #[test]
    fn test_custom_extension() {
        init_logging();
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = StorageConfig {
            extension: "mcl".to_string(),
            compression_level: 1,
            ..StorageConfig::with_root(dir.path())
        };
        let storage = LvlStorage::new(config).expect("Storage should initialize");

        storage
            .save(&scenario_level("alt"))
            .expect("Save should succeed");
        assert!(dir.path().join("alt.mcl").is_file());
        assert!(storage.load("alt").is_ok());
    }
}
