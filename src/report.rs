// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error-bar plot of the sweep results.

use crate::macros::{log_info, log_warn};
use crate::stats::Summary;
use crate::summation::Approach;
use crate::sweep::ResultTable;
use plotters::prelude::*;
use plotters::style::register_font;
use std::error::Error;
use std::fmt;
use std::ops::Range;
use std::path::Path;

/// Font used for every text of the figure, registered as `sans-serif`.
static FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Error returned by [`plot_error_bars()`].
#[derive(Debug)]
pub enum PlotError {
    /// None of the tables has a row that can be plotted.
    NoData,
    /// The embedded font couldn't be loaded.
    Font,
    /// The drawing backend failed, e.g. because the output file couldn't be
    /// written.
    Drawing(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotError::NoData => f.write_str("no timing data to plot"),
            PlotError::Font => f.write_str("failed to load the embedded font"),
            PlotError::Drawing(e) => write!(f, "failed to draw the figure: {e}"),
        }
    }
}

impl Error for PlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlotError::NoData | PlotError::Font => None,
            PlotError::Drawing(e) => Some(e.as_ref()),
        }
    }
}

/// Layout of the figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotOptions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Title drawn above the chart.
    pub caption: String,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            caption: "bulk sum vs. compiled loop".to_owned(),
        }
    }
}

/// Plots the mean duration of each row of the given tables, with error bars of
/// one standard deviation, and saves the figure as an image at `path`.
///
/// All the tables share the same axes: the sample size on a logarithmic x axis
/// and the duration in seconds on the y axis. Each table gets its own color
/// and marker, and a legend entry with the name of its approach. Rows without
/// any duration are skipped.
pub fn plot_error_bars(
    path: impl AsRef<Path>,
    tables: &[&ResultTable],
    options: &PlotOptions,
) -> Result<(), PlotError> {
    let series = tables
        .iter()
        .map(|table| {
            let summaries = table
                .summaries()
                .into_iter()
                .filter(|s| s.size > 0.0 && s.mean.is_finite() && s.std.is_finite())
                .collect::<Vec<Summary>>();
            (table.approach, summaries)
        })
        .collect::<Vec<_>>();

    let (x_range, y_range) = axis_ranges(&series).ok_or(PlotError::NoData)?;
    register_font("sans-serif", FontStyle::Normal, FONT).map_err(|_| PlotError::Font)?;
    let path = path.as_ref();
    draw(path, &series, x_range, y_range, options).map_err(PlotError::Drawing)?;
    log_info!("saved figure to {}", path.display());
    Ok(())
}

/// Computes the ranges of both axes, or [`None`] if there is nothing to plot.
fn axis_ranges(series: &[(Approach, Vec<Summary>)]) -> Option<(Range<f64>, Range<f64>)> {
    let mut summaries = series.iter().flat_map(|(_, s)| s.iter()).peekable();
    summaries.peek()?;

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_max = 0.0f64;
    for s in summaries {
        x_min = x_min.min(s.size);
        x_max = x_max.max(s.size);
        y_max = y_max.max(s.mean + s.std);
    }
    if y_max <= 0.0 {
        y_max = f64::EPSILON;
    }

    // Pad by a constant factor on the log axis, and by 10% on the linear one.
    Some((x_min / 1.5..x_max * 1.5, 0.0..y_max * 1.1))
}

fn draw(
    path: &Path,
    series: &[(Approach, Vec<Summary>)],
    x_range: Range<f64>,
    y_range: Range<f64>,
    options: &PlotOptions,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&options.caption, ("sans-serif", 24).into_font())
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range.log_scale(), y_range)?;
    chart
        .configure_mesh()
        .x_desc("sample size")
        .y_desc("seconds per batch")
        .draw()?;

    for (i, (approach, summaries)) in series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();

        chart.draw_series(summaries.iter().map(|s| {
            let lower = s.mean - s.std;
            if lower < 0.0 {
                log_warn!(
                    "clipping the error bar of {approach} at size {} to zero",
                    s.size
                );
            }
            ErrorBar::new_vertical(
                s.size,
                lower.max(0.0),
                s.mean,
                s.mean + s.std,
                color.stroke_width(1),
                8,
            )
        }))?;

        // Alternate between circle and square markers.
        if i % 2 == 0 {
            chart
                .draw_series(summaries.iter().map(|s| {
                    EmptyElement::at((s.size, s.mean)) + Circle::new((0, 0), 4, color.filled())
                }))?
                .label(approach.name())
                .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
        } else {
            chart
                .draw_series(summaries.iter().map(|s| {
                    EmptyElement::at((s.size, s.mean))
                        + Rectangle::new([(-4, -4), (4, 4)], color.filled())
                }))?
                .label(approach.name())
                .legend(move |(x, y)| {
                    Rectangle::new([(x - 4, y - 4), (x + 4, y + 4)], color.filled())
                });
        }
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
