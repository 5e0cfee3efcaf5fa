//! Payload compression.
//!
//! Blobs are zlib streams (RFC 1950): a two-byte header, a deflate body and
//! an Adler-32 trailer. Decompression requires the stream to end cleanly and
//! to fill the whole blob, so a truncated blob, trailing bytes or a corrupted
//! checksum is reported as
//! [`CompressionError::CorruptBlob`] rather than returning partial output.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use thiserror::Error;

/// Default cap on decompressed output (64 MiB).
pub const DEFAULT_MAX_DECOMPRESSED_LEN: usize = 64 * 1024 * 1024;

/// Output buffer growth step while inflating.
const INFLATE_CHUNK: usize = 16 * 1024;

#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("Corrupt compressed blob: {0}")]
    CorruptBlob(String),
    #[error("Decompressed payload exceeds limit of {limit} bytes")]
    TooLarge { limit: usize },
}

/// Compression settings.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressionConfig {
    /// zlib level, 0 (store) to 9 (best). Values above 9 are clamped.
    pub level: u32,
    /// Largest decompressed payload accepted before giving up.
    pub max_decompressed_len: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            level: 6,
            max_decompressed_len: DEFAULT_MAX_DECOMPRESSED_LEN,
        }
    }
}

/// zlib compressor/decompressor bound to a [`CompressionConfig`].
#[derive(Clone, Debug, Default)]
pub struct Compressor {
    config: CompressionConfig,
}

impl Compressor {
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Compress `data`. Incompressible input may come back slightly larger.
    pub fn compress(&self, data: &[u8]) -> Vec<u8> {
        let level = Compression::new(self.config.level.min(9));
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2 + 16), level);
        // Writes go to an in-memory Vec and cannot fail.
        encoder
            .write_all(data)
            .and_then(|_| encoder.finish())
            .expect("zlib into Vec<u8> is infallible")
    }

    /// Decompress a blob produced by [`Compressor::compress`] (or any zlib
    /// stream).
    pub fn decompress(&self, blob: &[u8]) -> Result<Vec<u8>, CompressionError> {
        if blob.is_empty() {
            log::debug!("Rejected empty compressed blob");
            return Err(CompressionError::CorruptBlob("empty input".into()));
        }
        let limit = self.config.max_decompressed_len;
        let mut inflater = Decompress::new(true);
        let mut out = Vec::with_capacity(blob.len().saturating_mul(2).clamp(64, INFLATE_CHUNK));

        loop {
            if out.len() == out.capacity() {
                out.reserve(INFLATE_CHUNK);
            }
            let before_in = inflater.total_in();
            let before_out = inflater.total_out();
            let status = inflater
                .decompress_vec(&blob[before_in as usize..], &mut out, FlushDecompress::None)
                .map_err(|e| {
                    log::debug!("Rejected compressed blob: {}", e);
                    CompressionError::CorruptBlob(e.to_string())
                })?;

            if out.len() > limit {
                log::debug!("Decompressed payload exceeded {} bytes", limit);
                return Err(CompressionError::TooLarge { limit });
            }

            match status {
                Status::StreamEnd => {
                    if (inflater.total_in() as usize) < blob.len() {
                        log::debug!("Rejected compressed blob with trailing bytes");
                        return Err(CompressionError::CorruptBlob(
                            "trailing bytes after stream end".into(),
                        ));
                    }
                    return Ok(out);
                }
                Status::Ok | Status::BufError => {
                    // Output room was available, so a call that moves
                    // nothing means the input ended mid-stream.
                    if inflater.total_in() == before_in && inflater.total_out() == before_out {
                        log::debug!("Rejected truncated compressed blob");
                        return Err(CompressionError::CorruptBlob(
                            "truncated stream".into(),
                        ));
                    }
                }
            }
        }
    }
}

/// Compress with the default configuration.
pub fn compress(data: &[u8]) -> Vec<u8> {
    Compressor::default().compress(data)
}

/// Decompress with the default configuration.
pub fn decompress(blob: &[u8]) -> Result<Vec<u8>, CompressionError> {
    Compressor::default().decompress(blob)
}
