//! World Module
//!
//! The in-memory level the storage layer reads from and writes into.
//!
//! # Architecture Overview
//!
//! - **Core**: Fundamental data types (BlockId)
//! - **Level data**: The level snapshot, pure data
//! - **Level operations**: Construction and block access, pure functions
//!
//! Everything else about a running world (entities, physics, networking)
//! lives outside this crate and only touches levels through these types.

pub mod core;
pub mod level_data;
pub mod level_operations;

// Re-export core types for convenience
pub use self::core::BlockId;
pub use level_data::{LevelData, SpawnData};
pub use level_operations::{
    block_bytes, block_bytes_mut, block_index, create_level, get_block, is_in_bounds,
    level_from_bytes, level_volume, reserve_block_bytes, set_block,
};
