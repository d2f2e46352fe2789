// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI tool that times a bulk sum against a compiled accumulation loop over a
//! sweep of input sizes, and plots the results.

use anyhow::{ensure, Context};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;
use sumtime::{logspace, plot_error_bars, PlotOptions, SweepConfig, SweepResults, Timer};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    execute(&cli)
}

/// Runs the sweep described by the command line, saves the figure and opens it
/// unless `--no-show` is set.
fn execute(cli: &Cli) -> anyhow::Result<()> {
    cli.validate()?;

    if cli.warm_up {
        warm_up();
    }

    let config = cli.sweep_config();
    log::info!(
        "sweeping {} sizes, {} batches of {} executions each",
        config.sizes.len(),
        config.repeat,
        config.number
    );
    let results = match cli.seed {
        Some(seed) => run(&config, &mut ChaCha12Rng::seed_from_u64(seed)),
        None => run(&config, &mut rand::rng()),
    };

    for table in results.tables() {
        println!("{}:", table.approach);
        println!("{table}");
    }

    plot_error_bars(&cli.output, &results.tables(), &PlotOptions::default())
        .with_context(|| format!("failed to plot the results to {}", cli.output.display()))?;
    println!("figure saved to {}", cli.output.display());

    if !cli.no_show {
        log::debug!("opening {} in the default viewer", cli.output.display());
        opener::open(&cli.output)
            .with_context(|| format!("failed to open {}", cli.output.display()))?;
    }
    Ok(())
}

/// Runs the sweep, printing each sample size as it is processed.
fn run<R: Rng>(config: &SweepConfig, rng: &mut R) -> SweepResults {
    let mut results = SweepResults::new();
    for step in config.sweep(rng) {
        println!("{:?}", step.size);
        results.push(step);
    }
    results
}

/// Times two trivial statements, to check that the timer works.
fn warm_up() {
    let mut timer = Timer::new(|| println!("setup"), |_: &()| println!("main statement"));

    println!("TIMEIT:");
    println!("{:?}", timer.timeit(2).as_secs_f64());

    println!("REPEAT:");
    let durations = timer
        .repeat(3, 2)
        .iter()
        .map(Duration::as_secs_f64)
        .collect::<Vec<f64>>();
    println!("{durations:?}");

    println!("DONE");
}

/// CLI tool that times a bulk sum against a compiled accumulation loop.
#[derive(Parser, Debug, PartialEq)]
#[command(version)]
struct Cli {
    /// Number of sample sizes, spaced evenly on a log scale.
    #[arg(long, default_value_t = NonZeroUsize::new(15).unwrap())]
    num_sizes: NonZeroUsize,

    /// The smallest sample size is 10 to the power of this exponent.
    #[arg(long, default_value_t = 1.0)]
    min_exponent: f64,

    /// The largest sample size is 10 to the power of this exponent.
    #[arg(long, default_value_t = 6.0)]
    max_exponent: f64,

    /// Number of batches per approach and sample size.
    #[arg(long, default_value_t = NonZeroUsize::new(3).unwrap())]
    repeat: NonZeroUsize,

    /// Number of executions in each batch.
    #[arg(long, default_value_t = NonZeroUsize::new(2000).unwrap())]
    number: NonZeroUsize,

    /// Seed for the random inputs. Default to a randomly seeded generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Path of the output figure.
    #[arg(long, default_value = "fig2.png")]
    output: PathBuf,

    /// Whether to run a warm-up experiment with a trivial statement first.
    #[arg(long, default_value_t = false)]
    warm_up: bool,

    /// Don't open the saved figure in the default image viewer.
    #[arg(long, default_value_t = false)]
    no_show: bool,
}

/// Largest number of `f64` that a single allocation can hold.
const MAX_INPUT_LEN: usize = isize::MAX as usize / std::mem::size_of::<f64>();

impl Cli {
    fn validate(&self) -> anyhow::Result<()> {
        for (name, exponent) in [
            ("--min-exponent", self.min_exponent),
            ("--max-exponent", self.max_exponent),
        ] {
            ensure!(exponent.is_finite(), "{name} ({exponent}) must be finite");
            ensure!(
                10f64.powf(exponent) <= MAX_INPUT_LEN as f64,
                "{name} ({exponent}) gives inputs larger than {MAX_INPUT_LEN} floats"
            );
        }
        ensure!(
            self.num_sizes.get() == 1 || self.min_exponent < self.max_exponent,
            "--min-exponent ({}) must be smaller than --max-exponent ({})",
            self.min_exponent,
            self.max_exponent
        );
        Ok(())
    }

    fn sweep_config(&self) -> SweepConfig {
        SweepConfig {
            sizes: logspace(self.min_exponent, self.max_exponent, self.num_sizes.get()),
            repeat: self.repeat,
            number: self.number,
        }
    }
}
