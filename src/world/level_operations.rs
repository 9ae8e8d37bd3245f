//! Level Operations - Pure DOP Functions
//!
//! All functions take level data and return results.
//! No methods, no self, just transformations.

use super::core::BlockId;
use super::level_data::{LevelData, SpawnData};
use crate::error::{PersistenceError, PersistenceResult};

/// Number of blocks a level of the given dimensions holds
///
/// Returns `None` when any dimension is zero or the product does not fit
/// in `usize`.
pub fn level_volume(width: u16, height: u16, length: u16) -> Option<usize> {
    if width == 0 || height == 0 || length == 0 {
        return None;
    }
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(length as usize)
}

/// Empty byte buffer with capacity for a whole level payload
///
/// Degenerate dimensions and failed allocations are reported as
/// `PersistenceError::Allocation`. The capacity is reserved fallibly and
/// left unfilled, so memory is only touched as payload bytes are written in.
/// Returns the block count alongside the buffer.
pub fn reserve_block_bytes(
    width: u16,
    height: u16,
    length: u16,
) -> PersistenceResult<(usize, Vec<u8>)> {
    let allocation_error = |reason: String| PersistenceError::Allocation {
        width,
        height,
        length,
        reason,
    };

    let volume = level_volume(width, height, length)
        .ok_or_else(|| allocation_error("degenerate dimensions".to_string()))?;

    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(volume)
        .map_err(|e| allocation_error(e.to_string()))?;
    Ok((volume, bytes))
}

/// Build a level around an already filled payload buffer
///
/// The buffer must hold exactly `width * height * length` bytes.
pub fn level_from_bytes(
    name: impl Into<String>,
    width: u16,
    height: u16,
    length: u16,
    bytes: Vec<u8>,
) -> PersistenceResult<LevelData> {
    let expected = level_volume(width, height, length).unwrap_or(0);
    if expected == 0 || bytes.len() != expected {
        return Err(PersistenceError::SizeMismatch {
            expected,
            found: bytes.len(),
        });
    }

    Ok(LevelData {
        name: name.into(),
        width,
        height,
        length,
        // u8 and BlockId share size and alignment, so the allocation is reused
        blocks: bytemuck::allocation::cast_vec(bytes),
        spawn: SpawnData::default(),
    })
}

/// Create a level filled with air
pub fn create_level(
    name: impl Into<String>,
    width: u16,
    height: u16,
    length: u16,
) -> PersistenceResult<LevelData> {
    let (volume, mut bytes) = reserve_block_bytes(width, height, length)?;
    bytes.resize(volume, BlockId::AIR.0);
    level_from_bytes(name, width, height, length, bytes)
}

/// Check if coordinates are within level bounds
pub fn is_in_bounds(level: &LevelData, x: u16, y: u16, z: u16) -> bool {
    x < level.width && y < level.height && z < level.length
}

/// Flat buffer index of a voxel, or `None` when out of bounds
pub fn block_index(level: &LevelData, x: u16, y: u16, z: u16) -> Option<usize> {
    if !is_in_bounds(level, x, y, z) {
        return None;
    }
    let (x, y, z) = (x as usize, y as usize, z as usize);
    Some((y * level.length as usize + z) * level.width as usize + x)
}

/// Get block at position, air when out of bounds
pub fn get_block(level: &LevelData, x: u16, y: u16, z: u16) -> BlockId {
    block_index(level, x, y, z)
        .and_then(|index| level.blocks.get(index).copied())
        .unwrap_or(BlockId::AIR)
}

/// Set block at position, returns false when out of bounds
pub fn set_block(level: &mut LevelData, x: u16, y: u16, z: u16, block: BlockId) -> bool {
    match block_index(level, x, y, z).and_then(|index| level.blocks.get_mut(index)) {
        Some(slot) => {
            *slot = block;
            true
        }
        None => false,
    }
}

/// Block buffer viewed as raw bytes, the on-disk payload layout
pub fn block_bytes(level: &LevelData) -> &[u8] {
    bytemuck::cast_slice(&level.blocks)
}

/// Mutable raw byte view of the block buffer
pub fn block_bytes_mut(level: &mut LevelData) -> &mut [u8] {
    bytemuck::cast_slice_mut(&mut level.blocks)
}
