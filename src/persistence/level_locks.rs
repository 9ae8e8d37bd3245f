//! Per-level serialization for shared storage backends
//!
//! Backends do not coordinate concurrent access to the same level: two saves
//! to one file race at the filesystem level. `LockedStorage` wraps any
//! backend and holds a mutex per level name for the duration of each load
//! or save, while different levels still proceed in parallel.
//!
//! Names are validated before a lock is created, and a level's entry is
//! dropped once no call holds or waits on it, so the map only tracks levels
//! with operations in flight.

use super::lvl_storage::validate_level_name;
use super::LevelStorage;
use crate::error::PersistenceResult;
use crate::world::level_data::LevelData;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

pub struct LockedStorage<S> {
    inner: S,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<S: LevelStorage> LockedStorage<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            locks: DashMap::new(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Lock for `name`, created on first use
    fn lock_for(&self, name: &str) -> Arc<Mutex<()>> {
        // Clone out of the map so no shard lock is held while waiting
        self.locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Run `operation` while holding the lock for `name`
    fn with_lock<T>(
        &self,
        name: &str,
        operation: impl FnOnce() -> PersistenceResult<T>,
    ) -> PersistenceResult<T> {
        validate_level_name(name)?;

        let lock = self.lock_for(name);
        let result = {
            let _guard = lock.lock();
            operation()
        };
        drop(lock);

        // The map's own reference is the only one left when nobody else
        // holds or waits on this level
        self.locks.remove_if(name, |_, lock| Arc::strong_count(lock) == 1);
        result
    }

    /// Number of level names with a load or save in flight
    pub fn tracked_levels(&self) -> usize {
        self.locks.len()
    }
}

impl<S: LevelStorage> LevelStorage for LockedStorage<S> {
    fn load(&self, name: &str) -> PersistenceResult<LevelData> {
        self.with_lock(name, || self.inner.load(name))
    }

    fn save(&self, level: &LevelData) -> PersistenceResult<()> {
        self.with_lock(&level.name, || self.inner.save(level))
    }
}
