//! Weighted coin flips for probabilistic gating.

use super::source::{EntropySource, OsEntropy};
use super::RandomError;

/// Returns `true` with probability `weight`.
///
/// `weight <= 0.0` (and NaN) is always `false` and `weight >= 1.0` is always
/// `true`; neither edge consumes entropy.
pub fn flip_weighted_coin_with<S: EntropySource + ?Sized>(
    source: &S,
    weight: f64,
) -> Result<bool, RandomError> {
    if weight.is_nan() || weight <= 0.0 {
        return Ok(false);
    }
    if weight >= 1.0 {
        return Ok(true);
    }
    Ok(source.unit_f64()? < weight)
}

pub fn flip_weighted_coin(weight: f64) -> Result<bool, RandomError> {
    flip_weighted_coin_with(&OsEntropy, weight)
}

/// A fair coin.
pub fn flip_coin() -> Result<bool, RandomError> {
    flip_weighted_coin(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUNS: usize = 100_000;
    const TOLERANCE: usize = 1000;

    struct DeadEntropy;

    impl EntropySource for DeadEntropy {
        fn fill_bytes(&self, _dest: &mut [u8]) -> Result<(), RandomError> {
            Err(RandomError::EntropyUnavailable("no entropy".into()))
        }
    }

    fn count_trues(weight: f64) -> usize {
        (0..RUNS)
            .filter(|_| flip_weighted_coin(weight).unwrap())
            .count()
    }

    fn assert_near(weight: f64, expected: usize) {
        let trues = count_trues(weight);
        let min = expected.saturating_sub(TOLERANCE);
        let max = expected + TOLERANCE;
        assert!(
            (min..=max).contains(&trues),
            "unexpected coin flip outcome: {} {} (+/-{}) {}",
            weight,
            expected,
            TOLERANCE,
            trues
        );
    }

    #[test]
    fn test_weight_one_third() {
        assert_near(0.333, RUNS / 3);
    }

    #[test]
    fn test_weight_half() {
        assert_near(0.5, RUNS / 2);
    }

    #[test]
    fn test_weight_one_always_true() {
        assert_eq!(count_trues(1.0), RUNS);
    }

    #[test]
    fn test_weight_zero_always_false() {
        assert_eq!(count_trues(0.0), 0);
    }

    #[test]
    fn test_out_of_range_weights() {
        assert!(!flip_weighted_coin(-0.5).unwrap());
        assert!(!flip_weighted_coin(f64::NAN).unwrap());
        assert!(flip_weighted_coin(1.5).unwrap());
    }

    #[test]
    fn test_edges_need_no_entropy() {
        assert!(!flip_weighted_coin_with(&DeadEntropy, 0.0).unwrap());
        assert!(flip_weighted_coin_with(&DeadEntropy, 1.0).unwrap());
    }

    #[test]
    fn test_entropy_failure_not_masked() {
        assert!(matches!(
            flip_weighted_coin_with(&DeadEntropy, 0.5),
            Err(RandomError::EntropyUnavailable(_))
        ));
    }

    #[test]
    fn test_flip_coin_both_sides() {
        let heads = (0..1000).filter(|_| flip_coin().unwrap()).count();
        assert!(heads > 0 && heads < 1000);
    }
}
