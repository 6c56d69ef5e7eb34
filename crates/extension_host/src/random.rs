//! Random value helpers for identifiers, jitter, and shuffled collections.

use rand::{distr::Alphanumeric, seq::SliceRandom, Rng};

/// Character count produced by [`random_string_default`].
pub const DEFAULT_RANDOM_STRING_LEN: usize = 8;

/// Returns a uniformly random string of `len` characters drawn from `[A-Za-z0-9]`.
pub fn random_string(len: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Returns a random alphanumeric string of [`DEFAULT_RANDOM_STRING_LEN`] characters.
pub fn random_string_default() -> String {
    random_string(DEFAULT_RANDOM_STRING_LEN)
}

/// Returns a uniformly random integer in `[min, max]`, inclusive of both bounds.
///
/// Returns `min` unchanged when the range is empty.
pub fn random_int(min: i64, max: i64) -> i64 {
    if min >= max {
        return min;
    }
    rand::rng().random_range(min..=max)
}

/// Returns a uniformly random float in `[min, max)`.
///
/// Returns `min` unchanged when the range is empty.
pub fn random_float(min: f64, max: f64) -> f64 {
    if min >= max {
        return min;
    }
    rand::rng().random_range(min..max)
}

/// Shuffles a slice in place into a uniformly random permutation.
pub fn shuffle<T>(values: &mut [T]) {
    values.shuffle(&mut rand::rng());
}
