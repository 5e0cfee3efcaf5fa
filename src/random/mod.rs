//! Secure randomness primitives.
//!
//! Each operation comes in two forms: a `*_with` variant that takes any
//! [`EntropySource`], and a `secure_*` / plain variant bound to [`OsEntropy`].

use std::time::Duration;
use thiserror::Error;

pub mod coin;
pub mod jitter;
pub mod sampling;
pub mod source;

pub use coin::{flip_coin, flip_weighted_coin, flip_weighted_coin_with};
pub use jitter::{jitter, jitter_duration, jitter_duration_with, jitter_with};
pub use sampling::{
    random_bytes_with, random_duration_with, random_in_range_with, random_padding_with,
    random_permutation_with, secure_random_bytes, secure_random_duration, secure_random_in_range,
    secure_random_padding, secure_random_permutation, secure_random_string_hex,
};
pub use source::{EntropySource, OsEntropy, SeededEntropy};

#[derive(Error, Debug)]
pub enum RandomError {
    #[error("Secure entropy source unavailable: {0}")]
    EntropyUnavailable(String),
    #[error("Invalid range: min {min} > max {max}")]
    InvalidRange { min: i64, max: i64 },
    #[error("Invalid duration range: min {min:?} > max {max:?}")]
    InvalidDurationRange { min: Duration, max: Duration },
    #[error("Sampling bound must be non-zero")]
    ZeroBound,
}
