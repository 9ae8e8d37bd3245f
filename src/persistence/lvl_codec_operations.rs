//! Level Codec Operations - Pure DOP Functions
//!
//! Encode and decode the fixed `.lvl` layout against any byte stream:
//! an 18-byte big-endian header followed by `width * height * length`
//! raw block ids. Compression and file handling live elsewhere.
//!
//! The payload has no length prefix. The header's dimensions decide how many
//! bytes are consumed, so a header that claims more blocks than the stream
//! holds is indistinguishable from a short read and reported as truncation.

use super::lvl_header_data::LvlHeader;
use super::storage_config::RangePolicy;
use crate::constants::{
    ANGLE_STEPS, FULL_TURN_DEGREES, LVL_FORMAT_VERSION, LVL_HEADER_SIZE, MAX_SPAWN_COORDINATE,
    SPAWN_CENTER_OFFSET,
};
use crate::error::{PersistenceError, PersistenceResult};
use crate::world::level_data::{LevelData, SpawnData};
use crate::world::level_operations::{
    block_bytes, level_from_bytes, level_volume, reserve_block_bytes,
};
use glam::DVec3;
use std::io::{Read, Write};

/// Serialize a header into its on-disk byte layout
pub fn encode_header(header: &LvlHeader) -> [u8; LVL_HEADER_SIZE] {
    let mut bytes = [0u8; LVL_HEADER_SIZE];
    let words = [
        header.version,
        header.width,
        header.height,
        header.length,
        header.spawn_x,
        header.spawn_y,
        header.spawn_z,
    ];
    for (i, word) in words.iter().enumerate() {
        bytes[i * 2..i * 2 + 2].copy_from_slice(&word.to_be_bytes());
    }
    bytes[14] = header.spawn_yaw;
    bytes[15] = header.spawn_pitch;
    // bytes[16..18] reserved, left zero
    bytes
}

/// Parse a header from its on-disk byte layout, ignoring the reserved bytes
pub fn decode_header(bytes: &[u8; LVL_HEADER_SIZE]) -> LvlHeader {
    let word = |i: usize| u16::from_be_bytes([bytes[i * 2], bytes[i * 2 + 1]]);
    LvlHeader {
        version: word(0),
        width: word(1),
        height: word(2),
        length: word(3),
        spawn_x: word(4),
        spawn_y: word(5),
        spawn_z: word(6),
        spawn_yaw: bytes[14],
        spawn_pitch: bytes[15],
    }
}

/// Narrow a spawn coordinate to its u16 header field, truncating the fraction
pub fn quantize_coordinate(
    field: &'static str,
    value: f64,
    policy: RangePolicy,
) -> PersistenceResult<u16> {
    let in_range = value.is_finite() && (0.0..=MAX_SPAWN_COORDINATE).contains(&value);
    match (in_range, policy) {
        (true, _) => Ok(value as u16),
        (false, RangePolicy::Reject) => Err(PersistenceError::EncodingRange { field, value }),
        (false, RangePolicy::Saturate) => {
            log::warn!("[LvlCodec] Clamping {} = {} into u16 range", field, value);
            // Float to int casts saturate, NaN becomes 0
            Ok(value as u16)
        }
    }
}

/// Quantize an angle in degrees to 1/256 of a turn, truncating toward zero
pub fn quantize_angle(
    field: &'static str,
    degrees: f64,
    policy: RangePolicy,
) -> PersistenceResult<u8> {
    let in_range = degrees.is_finite() && (0.0..FULL_TURN_DEGREES).contains(&degrees);
    let degrees = match (in_range, policy) {
        (true, _) => degrees,
        (false, RangePolicy::Reject) => {
            return Err(PersistenceError::EncodingRange {
                field,
                value: degrees,
            })
        }
        (false, RangePolicy::Saturate) => {
            log::warn!("[LvlCodec] Wrapping {} = {} into [0, 360)", field, degrees);
            if degrees.is_finite() {
                degrees.rem_euclid(FULL_TURN_DEGREES)
            } else {
                0.0
            }
        }
    };
    Ok((degrees * ANGLE_STEPS / FULL_TURN_DEGREES) as u8)
}

/// Expand a quantized angle back to degrees
pub fn expand_angle(step: u8) -> f64 {
    step as f64 * FULL_TURN_DEGREES / ANGLE_STEPS
}

/// Build the header for a level
///
/// Fails before anything is written if the block buffer disagrees with the
/// dimensions or a spawn value does not fit its field under `policy`.
pub fn header_from_level(level: &LevelData, policy: RangePolicy) -> PersistenceResult<LvlHeader> {
    for (field, value) in [
        ("width", level.width),
        ("height", level.height),
        ("length", level.length),
    ] {
        if value == 0 {
            return Err(PersistenceError::EncodingRange {
                field,
                value: 0.0,
            });
        }
    }

    let expected = level_volume(level.width, level.height, level.length).unwrap_or(0);
    if level.blocks.len() != expected {
        return Err(PersistenceError::SizeMismatch {
            expected,
            found: level.blocks.len(),
        });
    }

    let spawn = &level.spawn;
    Ok(LvlHeader {
        version: LVL_FORMAT_VERSION,
        width: level.width,
        height: level.height,
        length: level.length,
        spawn_x: quantize_coordinate("spawn.x", spawn.position.x, policy)?,
        spawn_y: quantize_coordinate("spawn.y", spawn.position.y, policy)?,
        spawn_z: quantize_coordinate("spawn.z", spawn.position.z, policy)?,
        spawn_yaw: quantize_angle("spawn.yaw", spawn.yaw, policy)?,
        spawn_pitch: quantize_angle("spawn.pitch", spawn.pitch, policy)?,
    })
}

/// Expand the quantized spawn fields, recentering X and Z on their voxel
pub fn spawn_from_header(header: &LvlHeader) -> SpawnData {
    SpawnData {
        position: DVec3::new(
            header.spawn_x as f64 + SPAWN_CENTER_OFFSET,
            header.spawn_y as f64,
            header.spawn_z as f64 + SPAWN_CENTER_OFFSET,
        ),
        yaw: expand_angle(header.spawn_yaw),
        pitch: expand_angle(header.spawn_pitch),
    }
}

/// Read and validate the header
pub fn read_header<R: Read>(reader: &mut R) -> PersistenceResult<LvlHeader> {
    let mut bytes = [0u8; LVL_HEADER_SIZE];
    reader
        .read_exact(&mut bytes)
        .map_err(|e| PersistenceError::from_read(e, "header"))?;

    let header = decode_header(&bytes);
    if header.version != LVL_FORMAT_VERSION {
        return Err(PersistenceError::VersionMismatch {
            expected: LVL_FORMAT_VERSION,
            found: header.version,
        });
    }
    Ok(header)
}

/// Decode one level from a decompressed stream
///
/// Either a fully populated level comes back or nothing does: a partially
/// read block buffer is dropped with the error. The payload buffer is
/// reserved from the header's dimensions but only filled as bytes arrive,
/// so a header claiming a huge level over a short stream fails as
/// truncation without committing the claimed size.
pub fn decode_level<R: Read>(name: &str, reader: &mut R) -> PersistenceResult<LevelData> {
    let header = read_header(reader)?;

    let (volume, mut bytes) = reserve_block_bytes(header.width, header.height, header.length)?;
    reader
        .by_ref()
        .take(volume as u64)
        .read_to_end(&mut bytes)
        .map_err(|e| PersistenceError::from_read(e, "block payload"))?;
    if bytes.len() < volume {
        return Err(PersistenceError::Truncated {
            section: "block payload",
        });
    }

    let mut level = level_from_bytes(name, header.width, header.height, header.length, bytes)?;
    level.spawn = spawn_from_header(&header);

    log::debug!(
        "[LvlCodec] Decoded '{}': {}x{}x{} ({} blocks)",
        name,
        level.width,
        level.height,
        level.length,
        level.blocks.len()
    );
    Ok(level)
}

/// Write a prepared header followed by the level's block payload
///
/// The two are written back to back with nothing between them, so the
/// stream sees one contiguous header-then-payload byte run.
pub fn write_level<W: Write>(
    header: &LvlHeader,
    level: &LevelData,
    writer: &mut W,
) -> PersistenceResult<()> {
    writer
        .write_all(&encode_header(header))
        .map_err(PersistenceError::Write)?;
    writer
        .write_all(block_bytes(level))
        .map_err(PersistenceError::Write)?;
    Ok(())
}

/// Encode one level into an uncompressed stream
pub fn encode_level<W: Write>(
    level: &LevelData,
    writer: &mut W,
    policy: RangePolicy,
) -> PersistenceResult<()> {
    let header = header_from_level(level, policy)?;
    write_level(&header, level, writer)
}
