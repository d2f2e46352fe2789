// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The two summation approaches under test.

use std::fmt;

/// Largest slice summed without splitting in [`bulk_sum()`].
const PAIRWISE_BLOCK: usize = 128;
/// Number of independent partial sums in a [`bulk_sum()`] block.
const LANES: usize = 8;

/// Sums a slice of floats with an explicit accumulation loop.
///
/// This is the compiled-loop approach: a single accumulator starting at `0.0`
/// and one addition per element, in order. It is kept out of line so that each
/// timed execution is a real function call.
///
/// ```rust
/// # use sumtime::accumulate_sum;
/// assert_eq!(accumulate_sum(&[1.0, 2.0, 3.0, 4.0]), 10.0);
/// assert_eq!(accumulate_sum(&[]), 0.0);
/// ```
#[inline(never)]
pub fn accumulate_sum(values: &[f64]) -> f64 {
    let mut res = 0.0;
    for &x in values {
        res += x;
    }
    res
}

/// Sums a slice of floats in bulk, with pairwise summation.
///
/// This is the bulk-sum approach. Blocks of up to 128 items are summed with 8
/// independent partial sums, which the compiler turns into vector
/// instructions. Longer slices are split in two halves (the first one a
/// multiple of 8 items long) that are summed recursively, which also keeps the
/// rounding error growth logarithmic in the length.
///
/// ```rust
/// # use sumtime::bulk_sum;
/// let input = (1..=1000).map(|x| x as f64).collect::<Vec<f64>>();
/// assert_eq!(bulk_sum(&input), 500_500.0);
/// ```
pub fn bulk_sum(values: &[f64]) -> f64 {
    if values.len() <= PAIRWISE_BLOCK {
        let mut lanes = [0.0; LANES];
        let chunks = values.chunks_exact(LANES);
        let remainder = chunks.remainder();
        for chunk in chunks {
            for (lane, x) in lanes.iter_mut().zip(chunk) {
                *lane += *x;
            }
        }
        let mut res = ((lanes[0] + lanes[1]) + (lanes[2] + lanes[3]))
            + ((lanes[4] + lanes[5]) + (lanes[6] + lanes[7]));
        for x in remainder {
            res += *x;
        }
        res
    } else {
        let mut half = values.len() / 2;
        half -= half % LANES;
        let (left, right) = values.split_at(half);
        bulk_sum(left) + bulk_sum(right)
    }
}

/// A way of summing a slice, as compared by the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Approach {
    /// Summing the whole slice with [`bulk_sum()`].
    Bulk,
    /// Summing element by element with [`accumulate_sum()`].
    Loop,
}

impl Approach {
    /// All the approaches, in reporting order.
    pub const ALL: [Approach; 2] = [Approach::Bulk, Approach::Loop];

    /// Sums the given slice with this approach.
    pub fn sum(self, values: &[f64]) -> f64 {
        match self {
            Approach::Bulk => bulk_sum(values),
            Approach::Loop => accumulate_sum(values),
        }
    }

    /// Short label, used in console output and plot legends.
    pub fn name(self) -> &'static str {
        match self {
            Approach::Bulk => "bulk-sum",
            Approach::Loop => "compiled-loop",
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha12Rng;

    /// Compensated summation, used as the reference.
    fn kahan_sum(values: &[f64]) -> f64 {
        let mut sum = 0.0;
        let mut compensation = 0.0;
        for &x in values {
            let y = x - compensation;
            let t = sum + y;
            compensation = (t - sum) - y;
            sum = t;
        }
        sum
    }

    fn random_input(rng: &mut ChaCha12Rng, len: usize) -> Vec<f64> {
        (0..len).map(|_| rng.random::<f64>()).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-10 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "{actual} is not within {tolerance} of {expected}"
        );
    }

    #[test]
    fn test_sum_small_sequence() {
        let input = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(accumulate_sum(&input), 10.0);
        assert_eq!(bulk_sum(&input), 10.0);
    }

    #[test]
    fn test_sum_empty() {
        assert_eq!(accumulate_sum(&[]), 0.0);
        assert_eq!(bulk_sum(&[]), 0.0);
    }

    #[test]
    fn test_sum_integers_exact() {
        // Every partial sum is an integer below 2^53, so no rounding happens.
        let input = (0..100_000).map(|x| x as f64).collect::<Vec<f64>>();
        assert_eq!(accumulate_sum(&input), 4_999_950_000.0);
        assert_eq!(bulk_sum(&input), 4_999_950_000.0);
    }

    #[test]
    fn test_sum_matches_reference() {
        let mut rng = ChaCha12Rng::seed_from_u64(42);
        for len in [1, 7, 8, 9, 127, 128, 129, 1000, 12_345, 1_000_000] {
            let input = random_input(&mut rng, len);
            let expected = kahan_sum(&input);
            assert_close(accumulate_sum(&input), expected);
            assert_close(bulk_sum(&input), expected);
        }
    }

    #[test]
    fn test_bulk_sum_is_more_accurate() {
        // 1.0 followed by many values below half an ulp of 1.0: the sequential
        // loop drops each of them, the pairwise sum adds them together first.
        let mut input = vec![1.0];
        input.extend(std::iter::repeat(1e-16).take(1 << 16));
        let expected = 1.0 + (1 << 16) as f64 * 1e-16;
        assert_eq!(accumulate_sum(&input), 1.0);
        assert!((bulk_sum(&input) - expected).abs() < 1e-14);
    }

    #[test]
    fn test_approach_dispatch() {
        let input = [0.5, 0.25, 0.125];
        for approach in Approach::ALL {
            assert_eq!(approach.sum(&input), 0.875);
        }
        assert_eq!(Approach::Bulk.to_string(), "bulk-sum");
        assert_eq!(Approach::Loop.to_string(), "compiled-loop");
    }
}
