//! # Shield Common
//!
//! Small, self-contained primitives shared by the Shield networking stack for
//! randomized and size-sensitive decisions:
//!
//! - **Secure sampling**: permutations, integer ranges and durations drawn
//!   from OS entropy without modulo bias
//! - **Jitter**: multiplicative timing jitter against fingerprintable cadences
//! - **Weighted coins**: probabilistic gating of optional behaviour
//! - **Compression**: zlib blobs with a strict round-trip contract
//! - **Formatting**: human-readable byte counts
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use shield_common::{jitter, secure_random_duration, compress, decompress, format_byte_count};
//!
//! let poll_ms = jitter(5_000, 0.1).expect("entropy");
//! assert!((4_500..=5_500).contains(&poll_ms));
//!
//! let wait = secure_random_duration(Duration::from_millis(200), Duration::from_millis(800))
//!     .expect("entropy");
//! assert!(wait >= Duration::from_millis(200));
//!
//! let blob = compress(b"payload");
//! assert_eq!(decompress(&blob).unwrap(), b"payload");
//!
//! assert_eq!(format_byte_count(10_000), "9.8K");
//! ```
//!
//! ## Architecture
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`random`] | Entropy sources, sampling, jitter, weighted coins |
//! | [`compression`] | zlib compress / decompress with size limits |
//! | [`format`] | Byte count formatting |
//! | [`json`] | Loosely-typed JSON value helpers |
//!
//! Randomized operations are fail-closed: an unreadable entropy source is an
//! error, never a silent fallback to a weaker generator. The sampling, jitter
//! and coin operations also have a `*_with` form taking an injectable
//! [`EntropySource`].

// ── Public modules ──────────────────────────────────────────────────────────

/// Secure randomness: entropy sources, permutations, ranges, durations,
/// jitter and weighted coin flips.
pub mod random;

/// zlib payload compression.
pub mod compression;

/// Human-readable formatting.
pub mod format;

/// Helpers for loosely-typed JSON values.
pub mod json;

// ── Re-exports for convenience ──────────────────────────────────────────────

pub use random::{
    flip_coin, flip_weighted_coin, jitter, jitter_duration, secure_random_bytes,
    secure_random_duration, secure_random_in_range, secure_random_padding,
    secure_random_permutation, secure_random_string_hex, EntropySource, OsEntropy, RandomError,
    SeededEntropy,
};

pub use compression::{compress, decompress, CompressionConfig, CompressionError, Compressor};

pub use format::format_byte_count;

pub use json::get_string_slice;

// ── Library metadata ────────────────────────────────────────────────────────

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version string.
pub fn version() -> &'static str {
    VERSION
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
        assert!(version().contains('.'));
    }

    #[test]
    fn test_seeded_source_drives_every_primitive() {
        let a = SeededEntropy::from_u64(99);
        let b = SeededEntropy::from_u64(99);
        let run = |s: &SeededEntropy| {
            (
                random::random_permutation_with(s, 16).unwrap(),
                random::random_in_range_with(s, -50, 50).unwrap(),
                random::jitter_with(s, 1000, 0.25).unwrap(),
                random::flip_weighted_coin_with(s, 0.5).unwrap(),
            )
        };
        assert_eq!(run(&a), run(&b));
    }
}
