//! Optimal Bloom filter parameters.
//!
//! Standard formulas for a filter holding `n` elements at a target false
//! positive rate `p`:
//!
//! * bit array size: `m = ceil(-n * ln(p) / ln(2)^2)`
//! * hash count: `k = round((m / n) * ln(2))`
//! * false positive rate after `n` inserts: `(1 - e^(-k * n / m))^k`

use std::f64::consts::LN_2;

/// Rate used when a caller passes something outside `(0, 1)`.
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;
pub const MIN_BIT_ARRAY_SIZE: usize = 64;
pub const MAX_BIT_ARRAY_SIZE: usize = usize::MAX / 8;
pub const MIN_HASH_FUNCTIONS: usize = 1;
pub const MAX_HASH_FUNCTIONS: usize = 32;

pub fn optimal_bit_array_size(n: usize, fpr: f64) -> usize {
    if n == 0 {
        return MIN_BIT_ARRAY_SIZE;
    }
    let fpr = if fpr <= 0.0 || fpr >= 1.0 || fpr.is_nan() {
        DEFAULT_FALSE_POSITIVE_RATE
    } else {
        fpr
    };

    let m = ((-(n as f64) * fpr.ln()) / (LN_2 * LN_2)).ceil();
    // `as` saturates for values beyond usize::MAX
    (m as usize).clamp(MIN_BIT_ARRAY_SIZE, MAX_BIT_ARRAY_SIZE)
}

pub fn optimal_hash_count(m: usize, n: usize) -> usize {
    if n == 0 {
        return MIN_HASH_FUNCTIONS;
    }
    let k = ((m as f64 / n as f64) * LN_2).round() as usize;
    k.clamp(MIN_HASH_FUNCTIONS, MAX_HASH_FUNCTIONS)
}

/// Expected false positive probability of a filter with `m` bits and `k`
/// hashes after `n_inserted` insertions.
pub fn estimate_false_positive_rate(m: usize, k: usize, n_inserted: usize) -> f64 {
    if m == 0 || k == 0 {
        return 1.0;
    }
    if n_inserted == 0 {
        return 0.0;
    }

    let exponent = -(k as f64) * (n_inserted as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

pub fn bits_per_element(m: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    m as f64 / n as f64
}
