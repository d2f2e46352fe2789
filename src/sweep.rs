// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sweep of timing measurements over a range of input sizes.

use crate::macros::log_debug;
use crate::stats::Summary;
use crate::summation::Approach;
use crate::timer::Timer;
use rand::Rng;
use std::fmt;
use std::num::NonZeroUsize;

/// Returns `num` numbers spaced evenly on a log scale, from `10^start` to
/// `10^stop` inclusive.
///
/// ```rust
/// # use sumtime::logspace;
/// assert_eq!(logspace(1.0, 3.0, 3), [10.0, 100.0, 1000.0]);
/// assert_eq!(logspace(2.0, 5.0, 1), [100.0]);
/// assert!(logspace(1.0, 6.0, 0).is_empty());
/// ```
pub fn logspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![10f64.powf(start)],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| {
                    // The last exponent is exactly `stop`, without accumulated rounding.
                    let exponent = if i == num - 1 {
                        stop
                    } else {
                        start + i as f64 * step
                    };
                    10f64.powf(exponent)
                })
                .collect()
        }
    }
}

/// Draws `len` floats uniformly from `[0, 1)`.
fn random_input<R: Rng>(rng: &mut R, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.random::<f64>()).collect()
}

/// Timing measurements of one approach at one sample size.
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    /// Sample size, as produced by the log-spaced sweep.
    pub size: f64,
    /// Duration of each batch, in seconds.
    pub durations: Vec<f64>,
}

impl Trial {
    /// Number of items in the generated input, i.e. the sample size truncated
    /// toward zero.
    pub fn input_len(&self) -> usize {
        self.size as usize
    }
}

impl fmt::Display for Trial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}", self.size)?;
        for duration in &self.durations {
            write!(f, ", {duration:?}")?;
        }
        f.write_str("]")
    }
}

/// All the trials of one approach, one row per sample size.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    /// Approach that was measured.
    pub approach: Approach,
    /// Rows, in the order the sizes were processed.
    pub rows: Vec<Trial>,
}

impl ResultTable {
    /// Creates an empty table for the given approach.
    pub fn new(approach: Approach) -> Self {
        Self {
            approach,
            rows: Vec::new(),
        }
    }

    /// Mean and standard deviation of each row.
    pub fn summaries(&self) -> Vec<Summary> {
        self.rows.iter().map(Summary::of).collect()
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i != 0 {
                f.write_str(",\n ")?;
            }
            write!(f, "{row}")?;
        }
        f.write_str("]")
    }
}

/// Parameters of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// Sample sizes to measure, in order.
    pub sizes: Vec<f64>,
    /// Number of batches per approach and size.
    pub repeat: NonZeroUsize,
    /// Number of executions in each batch.
    pub number: NonZeroUsize,
}

impl Default for SweepConfig {
    /// 15 sizes from 10 to 1,000,000, 3 batches of 2000 executions each.
    fn default() -> Self {
        Self {
            sizes: logspace(1.0, 6.0, 15),
            repeat: NonZeroUsize::new(3).unwrap(),
            number: NonZeroUsize::new(2000).unwrap(),
        }
    }
}

impl SweepConfig {
    /// Times one approach at one sample size.
    ///
    /// Each batch sums a fresh input of [`Trial::input_len()`] floats drawn
    /// uniformly from `[0, 1)`. Generating the input isn't part of the
    /// measured duration.
    pub fn measure<R: Rng>(&self, rng: &mut R, size: f64, approach: Approach) -> Trial {
        let mut trial = Trial {
            size,
            durations: Vec::with_capacity(self.repeat.get()),
        };
        let len = trial.input_len();
        let mut timer = Timer::new(
            || random_input(rng, len),
            |input: &Vec<f64>| approach.sum(input),
        );
        trial.durations.extend(
            timer
                .repeat(self.repeat.get(), self.number.get())
                .into_iter()
                .map(|duration| duration.as_secs_f64()),
        );
        trial
    }

    /// Returns an iterator that measures both approaches at each size, lazily
    /// and in order.
    pub fn sweep<'a, R: Rng>(&'a self, rng: &'a mut R) -> Sweep<'a, R> {
        Sweep {
            config: self,
            sizes: self.sizes.iter(),
            rng,
        }
    }

    /// Runs the whole sweep and collects the results.
    pub fn run<R: Rng>(&self, rng: &mut R) -> SweepResults {
        let mut results = SweepResults::new();
        for step in self.sweep(rng) {
            results.push(step);
        }
        results
    }
}

/// Measurements of both approaches at one sample size.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepStep {
    /// Sample size.
    pub size: f64,
    /// Trial of the bulk-sum approach.
    pub bulk: Trial,
    /// Trial of the compiled-loop approach.
    pub compiled: Trial,
}

/// Iterator over the steps of a sweep, returned by [`SweepConfig::sweep()`].
pub struct Sweep<'a, R> {
    config: &'a SweepConfig,
    sizes: std::slice::Iter<'a, f64>,
    rng: &'a mut R,
}

impl<R: Rng> Iterator for Sweep<'_, R> {
    type Item = SweepStep;

    fn next(&mut self) -> Option<SweepStep> {
        let size = *self.sizes.next()?;
        log_debug!("measuring sample size {size}");
        let bulk = self.config.measure(&mut *self.rng, size, Approach::Bulk);
        let compiled = self.config.measure(&mut *self.rng, size, Approach::Loop);
        Some(SweepStep {
            size,
            bulk,
            compiled,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.sizes.size_hint()
    }
}

impl<R: Rng> ExactSizeIterator for Sweep<'_, R> {}

/// Result tables of both approaches.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResults {
    /// Table of the bulk-sum approach.
    pub bulk: ResultTable,
    /// Table of the compiled-loop approach.
    pub compiled: ResultTable,
}

impl Default for SweepResults {
    fn default() -> Self {
        Self::new()
    }
}

impl SweepResults {
    /// Creates empty tables.
    pub fn new() -> Self {
        Self {
            bulk: ResultTable::new(Approach::Bulk),
            compiled: ResultTable::new(Approach::Loop),
        }
    }

    /// Appends the trials of one step to the tables.
    pub fn push(&mut self, step: SweepStep) {
        self.bulk.rows.push(step.bulk);
        self.compiled.rows.push(step.compiled);
    }

    /// Both tables, in reporting order.
    pub fn tables(&self) -> [&ResultTable; 2] {
        [&self.bulk, &self.compiled]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn small_config(sizes: Vec<f64>) -> SweepConfig {
        SweepConfig {
            sizes,
            repeat: NonZeroUsize::new(3).unwrap(),
            number: NonZeroUsize::new(5).unwrap(),
        }
    }

    #[test]
    fn test_logspace_endpoints() {
        let sizes = logspace(1.0, 6.0, 15);
        assert_eq!(sizes.len(), 15);
        assert!((sizes[0] - 10.0).abs() < 1e-9);
        assert!((sizes[14] - 1_000_000.0).abs() < 1e-6);
        // 10^(1 + 5/14)
        assert!((sizes[1] - 22.758459260747887).abs() < 1e-9);
    }

    #[test]
    fn test_logspace_degenerate() {
        assert!(logspace(1.0, 6.0, 0).is_empty());
        assert_eq!(logspace(3.0, 6.0, 1), [1000.0]);
        assert_eq!(logspace(2.0, 2.0, 3), [100.0, 100.0, 100.0]);
    }

    #[test]
    fn test_default_config() {
        let config = SweepConfig::default();
        assert_eq!(config.sizes.len(), 15);
        assert!(config.sizes.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(config.repeat.get(), 3);
        assert_eq!(config.number.get(), 2000);
    }

    #[test]
    fn test_input_len_truncates() {
        let trial = Trial {
            size: 22.758459260747887,
            durations: vec![],
        };
        assert_eq!(trial.input_len(), 22);
    }

    #[test]
    fn test_random_input() {
        let mut rng = ChaCha12Rng::seed_from_u64(42);
        let trial = Trial {
            size: 22.758459260747887,
            durations: vec![],
        };
        let input = random_input(&mut rng, trial.input_len());
        assert_eq!(input.len(), 22);
        assert!(input.iter().all(|x| (0.0..1.0).contains(x)));
        assert!(random_input(&mut rng, 0).is_empty());
    }

    #[test]
    fn test_measure_fractional_size() {
        let config = small_config(vec![]);
        let mut rng = ChaCha12Rng::seed_from_u64(42);
        let trial = config.measure(&mut rng, 22.758459260747887, Approach::Loop);
        assert_eq!(trial.size, 22.758459260747887);
        assert_eq!(trial.input_len(), 22);
        assert_eq!(trial.durations.len(), 3);
        assert!(trial.durations.iter().all(|d| *d >= 0.0));
    }

    #[test]
    fn test_measure_size_10() {
        let config = small_config(vec![10.0]);
        let mut rng = ChaCha12Rng::seed_from_u64(42);
        let results = config.run(&mut rng);

        for table in results.tables() {
            assert_eq!(table.rows.len(), 1);
            let row = &table.rows[0];
            assert_eq!(row.size, 10.0);
            assert_eq!(row.input_len(), 10);
            assert_eq!(row.durations.len(), 3);
            assert!(row.durations.iter().all(|d| *d >= 0.0));
        }
        assert_eq!(results.bulk.approach, Approach::Bulk);
        assert_eq!(results.compiled.approach, Approach::Loop);
    }

    #[test]
    fn test_sweep_rows() {
        let config = small_config(logspace(1.0, 3.0, 15));
        let mut rng = ChaCha12Rng::seed_from_u64(42);
        let results = config.run(&mut rng);

        for table in results.tables() {
            assert_eq!(table.rows.len(), 15);
            assert!(table.rows.windows(2).all(|w| w[0].size < w[1].size));
            for (row, size) in table.rows.iter().zip(&config.sizes) {
                assert_eq!(row.size, *size);
                assert_eq!(row.durations.len(), 3);
                assert!(row.durations.iter().all(|d| *d >= 0.0));
            }
            assert_eq!(table.summaries().len(), 15);
        }
    }

    #[test]
    fn test_sweep_is_lazy_and_exact_size() {
        let config = small_config(vec![10.0, 100.0, 1000.0]);
        let mut rng = ChaCha12Rng::seed_from_u64(42);
        let mut sweep = config.sweep(&mut rng);
        assert_eq!(sweep.len(), 3);

        let step = sweep.next().unwrap();
        assert_eq!(step.size, 10.0);
        assert_eq!(step.bulk.size, 10.0);
        assert_eq!(step.compiled.size, 10.0);
        assert_eq!(sweep.len(), 2);

        let sizes = sweep.map(|step| step.size).collect::<Vec<f64>>();
        assert_eq!(sizes, [100.0, 1000.0]);
    }

    #[test]
    fn test_display() {
        let mut table = ResultTable::new(Approach::Bulk);
        assert_eq!(table.to_string(), "[]");

        table.rows.push(Trial {
            size: 10.0,
            durations: vec![0.5, 0.25, 0.125],
        });
        assert_eq!(table.to_string(), "[[10.0, 0.5, 0.25, 0.125]]");

        table.rows.push(Trial {
            size: 100.0,
            durations: vec![1.0, 2.0, 3.0],
        });
        assert_eq!(
            table.to_string(),
            "[[10.0, 0.5, 0.25, 0.125],\n [100.0, 1.0, 2.0, 3.0]]"
        );
    }
}
