//! Compression Operations - gzip framing around the level codec
//!
//! The compressor always wraps the sink it writes to and is finished before
//! the sink is handed back, so the deflate tail and gzip trailer land in the
//! sink while it is still open. A file closed before its compressor is
//! finished is missing that trailer and will not load.

use super::lvl_codec_operations::{decode_level, write_level};
use super::lvl_header_data::LvlHeader;
use crate::error::{PersistenceError, PersistenceResult};
use crate::world::level_data::LevelData;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Read, Write};

/// Wrap a sink in a gzip compressor at `level` (0..=9)
pub fn gzip_writer<W: Write>(inner: W, level: u32) -> GzEncoder<W> {
    GzEncoder::new(inner, Compression::new(level))
}

/// Flush the compressor's tail and trailer, returning the sink
pub fn finish_gzip_writer<W: Write>(encoder: GzEncoder<W>) -> PersistenceResult<W> {
    encoder.finish().map_err(PersistenceError::Write)
}

/// Reclassify a codec error raised while reading through a gzip decoder
///
/// Malformed gzip framing, corrupt deflate data and checksum failures come
/// out of flate2 as `InvalidInput`/`InvalidData` and become decompression
/// errors. A stream that ends before its gzip header is complete is not a
/// gzip stream either. Short reads past the header stay truncation, and any
/// other I/O failure from the underlying reader passes through as `Read`.
pub fn classify_stream_error<R: Read>(
    decoder: &GzDecoder<R>,
    error: PersistenceError,
) -> PersistenceError {
    match error {
        PersistenceError::Read(e)
            if matches!(
                e.kind(),
                io::ErrorKind::InvalidInput
                    | io::ErrorKind::InvalidData
                    | io::ErrorKind::UnexpectedEof
            ) =>
        {
            PersistenceError::Decompression(e)
        }
        PersistenceError::Truncated { .. } if decoder.header().is_none() => {
            PersistenceError::Decompression(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream ended before a gzip header",
            ))
        }
        other => other,
    }
}

/// Decode a level from a gzip-compressed stream
///
/// With `verify_trailer` the rest of the stream is drained after the block
/// payload so the gzip checksum is checked. Decompressed bytes past the
/// payload are discarded.
pub fn read_compressed_level<R: Read>(
    name: &str,
    inner: R,
    verify_trailer: bool,
) -> PersistenceResult<LevelData> {
    let mut decoder = GzDecoder::new(inner);

    let level =
        decode_level(name, &mut decoder).map_err(|e| classify_stream_error(&decoder, e))?;

    if verify_trailer {
        let trailing = io::copy(&mut decoder, &mut io::sink()).map_err(|e| {
            classify_stream_error(&decoder, PersistenceError::from_read(e, "gzip trailer"))
        })?;
        if trailing > 0 {
            log::debug!(
                "[LvlCodec] Ignored {} bytes after the block payload of '{}'",
                trailing,
                name
            );
        }
    }

    Ok(level)
}

/// Compress a header and level payload into `inner`, returning the sink once
/// the compressor has been finished
pub fn write_compressed_level<W: Write>(
    header: &LvlHeader,
    level: &LevelData,
    inner: W,
    compression_level: u32,
) -> PersistenceResult<W> {
    let mut encoder = gzip_writer(inner, compression_level);
    write_level(header, level, &mut encoder)?;
    finish_gzip_writer(encoder)
}
