use std::io::{Read, Write};

use log::warn;
use vcad_kernel_types::CadError;

/// Outer compression applied to a complete SBVX byte stream (spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// No compression.
    #[default]
    None,
    /// DEFLATE (RFC 1951).
    Deflate,
    /// Zstandard, when the `zstd` feature is linked; otherwise falls back
    /// to Deflate (spec §6, §9 "runtime plugin lookup").
    Zstd,
}

/// Compression level, mapped to an encoder-specific integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// Fastest compression, largest output.
    Fastest,
    /// Balanced speed/size tradeoff.
    #[default]
    Balanced,
    /// Smallest output, slowest.
    Smallest,
}

impl CompressionLevel {
    /// Map an integer level (as accepted by `save.compressionLevel`) to a
    /// tier: `<= 1` is Fastest, `>= 9` is Smallest, else Balanced.
    pub fn from_int(level: i32) -> Self {
        if level <= 1 {
            CompressionLevel::Fastest
        } else if level >= 9 {
            CompressionLevel::Smallest
        } else {
            CompressionLevel::Balanced
        }
    }

    fn flate2_level(self) -> flate2::Compression {
        match self {
            CompressionLevel::Fastest => flate2::Compression::fast(),
            CompressionLevel::Balanced => flate2::Compression::default(),
            CompressionLevel::Smallest => flate2::Compression::best(),
        }
    }

    #[cfg(feature = "zstd")]
    fn zstd_level(self) -> i32 {
        match self {
            CompressionLevel::Fastest => 1,
            CompressionLevel::Balanced => 9,
            CompressionLevel::Smallest => 19,
        }
    }
}

/// Compress `data` according to `mode`/`level` and write it to `w`.
pub fn write_compressed(
    w: &mut impl Write,
    data: &[u8],
    mode: Compression,
    level: CompressionLevel,
) -> Result<(), CadError> {
    match mode {
        Compression::None => {
            w.write_all(data)?;
            Ok(())
        }
        Compression::Deflate => {
            let mut enc = flate2::write::DeflateEncoder::new(w, level.flate2_level());
            enc.write_all(data)?;
            enc.finish()?;
            Ok(())
        }
        Compression::Zstd => write_zstd(w, data, level),
    }
}

#[cfg(feature = "zstd")]
fn write_zstd(w: &mut impl Write, data: &[u8], level: CompressionLevel) -> Result<(), CadError> {
    zstd::stream::copy_encode(data, w, level.zstd_level())?;
    Ok(())
}

#[cfg(not(feature = "zstd"))]
fn write_zstd(w: &mut impl Write, data: &[u8], level: CompressionLevel) -> Result<(), CadError> {
    warn!("zstd requested but not linked in this build; falling back to deflate");
    write_compressed(w, data, Compression::Deflate, level)
}

/// Decompress a stream produced by `write_compressed` under `mode`.
pub fn read_compressed(r: &mut impl Read, mode: Compression) -> Result<Vec<u8>, CadError> {
    let mut out = Vec::new();
    match mode {
        Compression::None => {
            r.read_to_end(&mut out)?;
        }
        Compression::Deflate => {
            let mut dec = flate2::read::DeflateDecoder::new(r);
            dec.read_to_end(&mut out)?;
        }
        Compression::Zstd => read_zstd(r, &mut out)?,
    }
    Ok(out)
}

#[cfg(feature = "zstd")]
fn read_zstd(r: &mut impl Read, out: &mut Vec<u8>) -> Result<(), CadError> {
    zstd::stream::copy_decode(r, out)?;
    Ok(())
}

#[cfg(not(feature = "zstd"))]
fn read_zstd(r: &mut impl Read, out: &mut Vec<u8>) -> Result<(), CadError> {
    // Without zstd linked, `write_compressed` silently wrote as deflate
    // (see `write_zstd` above); mirror that fallback here so the two stay
    // consistent within one build.
    warn!("zstd requested but not linked in this build; reading as deflate");
    let mut dec = flate2::read::DeflateDecoder::new(r);
    dec.read_to_end(out)?;
    Ok(())
}
