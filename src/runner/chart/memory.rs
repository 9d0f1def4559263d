//! The log-scale line drawing strategy for heap and stack usage

use std::path::Path;

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::{draw_error, x_label_font, MEDIAN_COLOR, SERIES_COLORS};
use crate::runner::table::read_memory_table;
use crate::util::median;

/// Draw one memory table as heap and stack lines over time onto `area`
///
/// Both series share a logarithmic y axis with the upper bound `y_extent`
/// common to all subplots of the figure. Each series additionally gets a grey
/// horizontal line at its median.
#[allow(clippy::cast_precision_loss)]
pub fn draw<DB>(
    table: &Path,
    area: &DrawingArea<DB, Shift>,
    y_extent: f64,
    title: &str,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let snapshots = read_memory_table(table)?;

    let x_max = snapshots
        .iter()
        .map(|snapshot| snapshot.time)
        .max()
        .unwrap_or(1)
        .max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18))
        .margin(8)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, (1f64..y_extent.max(2.0)).log_scale())
        .map_err(|error| draw_error(table, &error))?;

    chart
        .configure_mesh()
        .x_label_style(x_label_font())
        .x_desc("time (bytes)")
        .y_desc("bytes allocated")
        .draw()
        .map_err(|error| draw_error(table, &error))?;

    if snapshots.is_empty() {
        // An empty but valid table renders as an empty subplot
        return Ok(());
    }

    let series: [(&str, RGBColor, Vec<u64>); 2] = [
        (
            "heap",
            SERIES_COLORS[0],
            snapshots.iter().map(|snapshot| snapshot.heap).collect(),
        ),
        (
            "stack",
            SERIES_COLORS[1],
            snapshots.iter().map(|snapshot| snapshot.stack).collect(),
        ),
    ];

    for (name, color, values) in series {
        // Clamped like the samples below, to stay on the log axis
        let series_median = median(&values).max(1f64);
        chart
            .draw_series(LineSeries::new(
                [(0f64, series_median), (x_max, series_median)],
                &MEDIAN_COLOR,
            ))
            .map_err(|error| draw_error(table, &error))?;

        chart
            .draw_series(LineSeries::new(
                snapshots.iter().zip(&values).map(|(snapshot, value)| {
                    // Clamp to one byte so zero samples stay on the log axis
                    (snapshot.time as f64, (*value).max(1) as f64)
                }),
                &color,
            ))
            .map_err(|error| draw_error(table, &error))?
            .label(name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], color)
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|error| draw_error(table, &error))?;

    Ok(())
}
