// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Summary statistics over the repetitions of a trial.

use crate::sweep::Trial;

/// Arithmetic mean. Returns NaN for an empty input.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divisor `n`). Returns NaN for an empty
/// input.
pub fn std_dev(values: &[f64]) -> f64 {
    let mean = mean(values);
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Mean and standard deviation of the durations of one [`Trial`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Sample size of the trial.
    pub size: f64,
    /// Mean duration, in seconds.
    pub mean: f64,
    /// Standard deviation of the durations, in seconds.
    pub std: f64,
}

impl Summary {
    /// Summarizes the durations of a trial.
    pub fn of(trial: &Trial) -> Self {
        Summary {
            size: trial.size,
            mean: mean(&trial.durations),
            std: std_dev(&trial.durations),
        }
    }
}
