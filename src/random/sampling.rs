//! Uniform sampling: permutations, integer ranges, durations and byte buffers.
//!
//! All ranges are closed (`[min, max]`) and every value in them is equally
//! likely. Mapping entropy onto a range always goes through
//! [`EntropySource::below`] or masked rejection, never a bare `%`.

use std::time::Duration;

use super::source::{EntropySource, OsEntropy};
use super::RandomError;

const NANOS_PER_SEC: u128 = 1_000_000_000;

// ---------------------------------------------------------------------------
// Span helpers
// ---------------------------------------------------------------------------

/// Uniform value in `[0, span]`. `span == u64::MAX` takes one raw draw.
fn uniform_inclusive<S: EntropySource + ?Sized>(source: &S, span: u64) -> Result<u64, RandomError> {
    match span.checked_add(1) {
        Some(bound) => source.below(bound),
        None => source.next_u64(),
    }
}

/// Uniform value in `[0, span]` for spans wider than 64 bits.
fn uniform_inclusive_u128<S: EntropySource + ?Sized>(
    source: &S,
    span: u128,
) -> Result<u128, RandomError> {
    if let Ok(narrow) = u64::try_from(span) {
        return uniform_inclusive(source, narrow).map(u128::from);
    }
    // Mask to the bit width of `span`; at least half of all draws land inside.
    let mask = u128::MAX >> span.leading_zeros();
    loop {
        let hi = u128::from(source.next_u64()?);
        let lo = u128::from(source.next_u64()?);
        let x = ((hi << 64) | lo) & mask;
        if x <= span {
            return Ok(x);
        }
    }
}

// ---------------------------------------------------------------------------
// Permutation
// ---------------------------------------------------------------------------

/// Uniformly random permutation of `0..n` (Fisher–Yates).
pub fn random_permutation_with<S: EntropySource + ?Sized>(
    source: &S,
    n: usize,
) -> Result<Vec<usize>, RandomError> {
    let mut perm: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = source.below(i as u64 + 1)? as usize;
        perm.swap(i, j);
    }
    Ok(perm)
}

/// Uniformly random permutation of `0..n` from OS entropy.
pub fn secure_random_permutation(n: usize) -> Result<Vec<usize>, RandomError> {
    random_permutation_with(&OsEntropy, n)
}

// ---------------------------------------------------------------------------
// Integer range
// ---------------------------------------------------------------------------

/// Uniform integer in `[min, max]`. Supports the full `i64` range.
pub fn random_in_range_with<S: EntropySource + ?Sized>(
    source: &S,
    min: i64,
    max: i64,
) -> Result<i64, RandomError> {
    if min > max {
        return Err(RandomError::InvalidRange { min, max });
    }
    // Two's complement: the wrapped difference is the true span as u64.
    let span = max.wrapping_sub(min) as u64;
    let offset = uniform_inclusive(source, span)?;
    Ok(min.wrapping_add(offset as i64))
}

/// Uniform integer in `[min, max]` from OS entropy.
pub fn secure_random_in_range(min: i64, max: i64) -> Result<i64, RandomError> {
    random_in_range_with(&OsEntropy, min, max)
}

// ---------------------------------------------------------------------------
// Duration range
// ---------------------------------------------------------------------------

/// Uniform duration in `[min, max]`, sampled at nanosecond granularity.
pub fn random_duration_with<S: EntropySource + ?Sized>(
    source: &S,
    min: Duration,
    max: Duration,
) -> Result<Duration, RandomError> {
    if min > max {
        return Err(RandomError::InvalidDurationRange { min, max });
    }
    let lo = min.as_nanos();
    let offset = uniform_inclusive_u128(source, max.as_nanos() - lo)?;
    let total = lo + offset;
    // total <= max.as_nanos(), so the seconds part fits in u64.
    Ok(Duration::new(
        (total / NANOS_PER_SEC) as u64,
        (total % NANOS_PER_SEC) as u32,
    ))
}

/// Uniform duration in `[min, max]` from OS entropy.
pub fn secure_random_duration(min: Duration, max: Duration) -> Result<Duration, RandomError> {
    random_duration_with(&OsEntropy, min, max)
}

// ---------------------------------------------------------------------------
// Byte buffers
// ---------------------------------------------------------------------------

/// `len` random bytes.
pub fn random_bytes_with<S: EntropySource + ?Sized>(
    source: &S,
    len: usize,
) -> Result<Vec<u8>, RandomError> {
    let mut buf = vec![0u8; len];
    source.fill_bytes(&mut buf)?;
    Ok(buf)
}

pub fn secure_random_bytes(len: usize) -> Result<Vec<u8>, RandomError> {
    random_bytes_with(&OsEntropy, len)
}

/// Random bytes of a random length in `[min_len, max_len]`.
///
/// Used to pad handshake and cover messages so their size does not
/// fingerprint the sender.
pub fn random_padding_with<S: EntropySource + ?Sized>(
    source: &S,
    min_len: usize,
    max_len: usize,
) -> Result<Vec<u8>, RandomError> {
    if min_len > max_len {
        return Err(RandomError::InvalidRange {
            min: i64::try_from(min_len).unwrap_or(i64::MAX),
            max: i64::try_from(max_len).unwrap_or(i64::MAX),
        });
    }
    let extra = uniform_inclusive(source, (max_len - min_len) as u64)?;
    random_bytes_with(source, min_len + extra as usize)
}

pub fn secure_random_padding(min_len: usize, max_len: usize) -> Result<Vec<u8>, RandomError> {
    random_padding_with(&OsEntropy, min_len, max_len)
}

/// Hex string encoding `byte_len` random bytes (`2 * byte_len` characters).
pub fn secure_random_string_hex(byte_len: usize) -> Result<String, RandomError> {
    Ok(hex::encode(secure_random_bytes(byte_len)?))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
