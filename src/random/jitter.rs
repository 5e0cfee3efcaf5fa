//! Multiplicative jitter for timing values.
//!
//! Callers jitter polling, retry and keep-alive intervals so that many
//! clients (or one client over time) do not produce a fixed, fingerprintable
//! cadence. Jitter fails closed: if entropy cannot be read the error is
//! returned rather than the unjittered input.

use std::time::Duration;

use super::sampling::random_in_range_with;
use super::source::{EntropySource, OsEntropy};
use super::RandomError;

/// Relative tolerance for float error in `|n| * factor`.
const ROUNDING_SLACK: f64 = 1e-12;

/// Maximum absolute deviation for `n` at `factor`: `ceil(|n| * factor)`.
///
/// Computing the deviation once keeps `jitter(100, 0.1)` at exactly
/// `[90, 110]`; evaluating `100.0 * 1.1` directly rounds up past 110.
/// Products that land a rounding error above an integer (`100.0 * 0.07`
/// is `7.000000000000001`) are pulled back before `ceil`.
fn deviation(n: i64, factor: f64) -> i64 {
    let factor = if factor.is_nan() {
        0.0
    } else {
        factor.clamp(0.0, 1.0)
    };
    let product = n.unsigned_abs() as f64 * factor;
    // Float-to-int casts saturate.
    (product - product * ROUNDING_SLACK).ceil() as i64
}

/// Uniform value in `[n - d, n + d]` where `d = ceil(|n| * factor)`.
///
/// `factor` is clamped to `[0, 1]`; NaN is treated as 0. The bounds
/// saturate at the `i64` limits.
pub fn jitter_with<S: EntropySource + ?Sized>(
    source: &S,
    n: i64,
    factor: f64,
) -> Result<i64, RandomError> {
    let a = deviation(n, factor);
    if a == 0 {
        return Ok(n);
    }
    random_in_range_with(source, n.saturating_sub(a), n.saturating_add(a))
}

/// [`jitter_with`] over OS entropy.
pub fn jitter(n: i64, factor: f64) -> Result<i64, RandomError> {
    jitter_with(&OsEntropy, n, factor)
}

/// Jitter a duration at nanosecond granularity. Results never go below zero.
pub fn jitter_duration_with<S: EntropySource + ?Sized>(
    source: &S,
    d: Duration,
    factor: f64,
) -> Result<Duration, RandomError> {
    let nanos = i64::try_from(d.as_nanos()).unwrap_or(i64::MAX);
    let jittered = jitter_with(source, nanos, factor)?;
    Ok(Duration::from_nanos(jittered.max(0) as u64))
}

pub fn jitter_duration(d: Duration, factor: f64) -> Result<Duration, RandomError> {
    jitter_duration_with(&OsEntropy, d, factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DeadEntropy;

    impl EntropySource for DeadEntropy {
        fn fill_bytes(&self, _dest: &mut [u8]) -> Result<(), RandomError> {
            Err(RandomError::EntropyUnavailable("no entropy".into()))
        }
    }

    fn observed_bounds(n: i64, factor: f64, trials: usize) -> (i64, i64) {
        let mut min = i64::MAX;
        let mut max = i64::MIN;
        for _ in 0..trials {
            let x = jitter(n, factor).unwrap();
            min = min.min(x);
            max = max.max(x);
        }
        (min, max)
    }

    #[test]
    fn test_jitter_100_by_10_percent() {
        assert_eq!(observed_bounds(100, 0.1, 100_000), (90, 110));
    }

    #[test]
    fn test_jitter_1000_by_30_percent() {
        assert_eq!(observed_bounds(1000, 0.3, 100_000), (700, 1300));
    }

    #[test]
    fn test_jitter_100_by_7_percent() {
        assert_eq!(deviation(100, 0.07), 7);
        assert_eq!(observed_bounds(100, 0.07, 100_000), (93, 107));
    }

    #[test]
    fn test_deviation_exact_products() {
        assert_eq!(deviation(100, 0.1), 10);
        assert_eq!(deviation(1000, 0.3), 300);
        assert_eq!(deviation(10, 0.25), 3);
        assert_eq!(deviation(-100, 0.07), 7);
    }

    #[test]
    fn test_jitter_zero_factor_is_identity() {
        for _ in 0..100 {
            assert_eq!(jitter(12345, 0.0).unwrap(), 12345);
        }
        assert_eq!(jitter(0, 0.5).unwrap(), 0);
        // No draw happens when there is nothing to jitter.
        assert_eq!(jitter_with(&DeadEntropy, 77, 0.0).unwrap(), 77);
    }

    #[test]
    fn test_jitter_factor_clamped() {
        for _ in 0..1000 {
            let x = jitter(10, 5.0).unwrap();
            assert!((0..=20).contains(&x), "{} out of clamped range", x);
        }
        assert_eq!(jitter(10, -1.0).unwrap(), 10);
        assert_eq!(jitter(10, f64::NAN).unwrap(), 10);
    }

    #[test]
    fn test_jitter_negative_and_extreme_inputs() {
        for _ in 0..1000 {
            let x = jitter(-100, 0.1).unwrap();
            assert!((-110..=-90).contains(&x));
        }
        for _ in 0..100 {
            let hi = jitter(i64::MAX, 1.0).unwrap();
            assert!(hi >= 0);
            let lo = jitter(i64::MIN, 1.0).unwrap();
            assert!(lo <= 0);
        }
    }

    #[test]
    fn test_jitter_fails_closed() {
        assert!(matches!(
            jitter_with(&DeadEntropy, 100, 0.1),
            Err(RandomError::EntropyUnavailable(_))
        ));
        assert!(jitter_duration_with(&DeadEntropy, Duration::from_secs(1), 0.1).is_err());
    }

    #[test]
    fn test_jitter_duration_bounds() {
        let base = Duration::from_millis(1000);
        for _ in 0..1000 {
            let d = jitter_duration(base, 0.2).unwrap();
            assert!(d >= Duration::from_millis(800) && d <= Duration::from_millis(1200));
        }
        assert_eq!(jitter_duration(Duration::ZERO, 0.5).unwrap(), Duration::ZERO);
    }
}
