//! Level Header Data - Pure DOP
//!
//! NO METHODS. Just data.
//! Encoding and decoding happen in lvl_codec_operations.rs

/// Fixed-width `.lvl` header, stored big-endian in this field order
///
/// Spawn fields are a lossy projection of the level's spawn state:
/// positions keep only whole voxels, angles keep 1/256 of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LvlHeader {
    pub version: u16,
    pub width: u16,
    pub height: u16,
    pub length: u16,
    pub spawn_x: u16,
    pub spawn_y: u16,
    pub spawn_z: u16,
    pub spawn_yaw: u8,
    pub spawn_pitch: u8,
    // Two reserved bytes follow on disk: written as zero, ignored on read
}
