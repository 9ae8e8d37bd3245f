//! Core world data types
//!
//! Types shared by the level snapshot and the on-disk codec.

mod block;

pub use block::BlockId;
