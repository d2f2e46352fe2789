// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A timer measuring batches of repeated executions of a statement.

use crate::macros::log_trace;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Times a statement, after running an untimed setup.
///
/// Each batch (one call to [`timeit()`](Self::timeit)) runs the setup once,
/// then runs the statement the given number of times on the setup's output,
/// and measures the total wall-clock time of these executions.
///
/// ```rust
/// # use sumtime::Timer;
/// let mut timer = Timer::new(|| vec![1.0; 1000], |x: &Vec<f64>| x.iter().sum::<f64>());
/// let durations = timer.repeat(3, 10);
/// assert_eq!(durations.len(), 3);
/// ```
pub struct Timer<Setup, Statement> {
    setup: Setup,
    statement: Statement,
}

impl<T, R, Setup, Statement> Timer<Setup, Statement>
where
    Setup: FnMut() -> T,
    Statement: FnMut(&T) -> R,
{
    /// Creates a timer from a setup and a statement.
    pub fn new(setup: Setup, statement: Statement) -> Self {
        Self { setup, statement }
    }

    /// Runs one batch: the setup once, then `number` executions of the
    /// statement, returning the elapsed time of the executions only.
    pub fn timeit(&mut self, number: usize) -> Duration {
        let state = (self.setup)();
        let start = Instant::now();
        for _ in 0..number {
            black_box((self.statement)(black_box(&state)));
        }
        let elapsed = start.elapsed();
        log_trace!("batch of {number} executions took {elapsed:?}");
        elapsed
    }

    /// Runs `repeat` independent batches of `number` executions each, and
    /// returns their durations in order.
    pub fn repeat(&mut self, repeat: usize, number: usize) -> Vec<Duration> {
        (0..repeat).map(|_| self.timeit(number)).collect()
    }
}
