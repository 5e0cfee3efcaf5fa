//! Entropy sources.
//!
//! Every randomized primitive in this crate draws from an [`EntropySource`].
//! Production code uses [`OsEntropy`] (the operating system CSPRNG via
//! `getrandom`); tests and simulations can inject a [`SeededEntropy`] to get
//! reproducible sequences. A failing source is reported as
//! [`RandomError::EntropyUnavailable`] and never replaced by a weaker one.

use std::sync::Mutex;

use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

use super::RandomError;

/// 2^-53, the spacing of `f64` values in `[0.5, 1)`.
const F64_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// A source of uniformly distributed random bytes.
///
/// Only `fill_bytes` is required; the integer and float helpers are derived
/// from it and are bias-free.
pub trait EntropySource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandomError>;

    /// A uniform 64-bit value.
    fn next_u64(&self) -> Result<u64, RandomError> {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf)?;
        Ok(u64::from_ne_bytes(buf))
    }

    /// A uniform value in `0..bound`.
    ///
    /// Draws below `(2^64 - bound) % bound` are rejected, leaving an
    /// accepted region whose size is an exact multiple of `bound`, so the
    /// final reduction has no modulo bias. Fewer than half of all draws are
    /// ever rejected.
    fn below(&self, bound: u64) -> Result<u64, RandomError> {
        if bound == 0 {
            return Err(RandomError::ZeroBound);
        }
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let x = self.next_u64()?;
            if x >= threshold {
                return Ok(x % bound);
            }
        }
    }

    /// A uniform `f64` in `[0, 1)` built from the top 53 bits of a draw.
    fn unit_f64(&self) -> Result<f64, RandomError> {
        Ok((self.next_u64()? >> 11) as f64 * F64_UNIT)
    }
}

impl<S: EntropySource + ?Sized> EntropySource for &S {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandomError> {
        (**self).fill_bytes(dest)
    }
}

// ---------------------------------------------------------------------------
// Operating system entropy
// ---------------------------------------------------------------------------

/// The operating system's secure random source.
///
/// Stateless; the first read may block until the kernel pool is seeded.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandomError> {
        getrandom::getrandom(dest).map_err(|e| {
            log::warn!("OS entropy source failed: {}", e);
            RandomError::EntropyUnavailable(e.to_string())
        })
    }
}

// ---------------------------------------------------------------------------
// Deterministic entropy
// ---------------------------------------------------------------------------

/// A deterministic ChaCha20 stream for tests and simulations.
///
/// Two instances built from the same seed produce the same byte stream. Not
/// for production use: anyone holding the seed can predict every output.
pub struct SeededEntropy {
    rng: Mutex<ChaCha20Rng>,
}

impl SeededEntropy {
    /// Build from a full 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::from_seed(seed)),
        }
    }

    /// Build from a short integer seed (expanded by `rand_core`).
    pub fn from_u64(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }
}

impl std::fmt::Debug for SeededEntropy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeededEntropy").finish_non_exhaustive()
    }
}

impl EntropySource for SeededEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandomError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| RandomError::EntropyUnavailable("seeded source lock poisoned".into()))?;
        rng.fill_bytes(dest);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
