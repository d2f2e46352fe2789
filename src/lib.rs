// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![doc = include_str!("../README.md")]
#![forbid(missing_docs, unsafe_code)]

mod macros;
pub mod report;
pub mod stats;
mod summation;
pub mod sweep;
mod timer;

pub use report::{plot_error_bars, PlotError, PlotOptions};
pub use summation::{accumulate_sum, bulk_sum, Approach};
pub use sweep::{logspace, ResultTable, SweepConfig, SweepResults, Trial};
pub use timer::Timer;
