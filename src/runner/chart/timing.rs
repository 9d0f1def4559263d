//! The grouped-bar drawing strategy for normalized execution time

use std::path::Path;

use anyhow::Result;
use plotters::coord::ranged1d::SegmentValue;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::{draw_error, x_label_font, SERIES_COLORS};
use crate::runner::table::{pivot_normalized, read_timing_table};

/// Draw one timing table as a grouped bar chart onto `area`
///
/// The table is pivoted to one bar group per function with one bar per
/// library, normalized so the slowest library of a group reaches 1.0. The x
/// axis is segmented into `libraries + 1` slots per group, the extra slot
/// forming the gap between groups.
pub fn draw<DB>(table: &Path, area: &DrawingArea<DB, Shift>, title: &str) -> Result<()>
where
    DB: DrawingBackend,
{
    let records = read_timing_table(table)?;
    let pivoted = pivot_normalized(&records);

    let functions: Vec<String> = pivoted
        .rows
        .iter()
        .map(|row| row.function.clone())
        .collect();
    let slots = pivoted.libraries.len() + 1;
    let total = (functions.len() * slots).max(1);
    // The slot in the middle of a group carries the group's tick label
    let middle = pivoted.libraries.len() / 2;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18))
        .margin(8)
        .x_label_area_size(80)
        .y_label_area_size(50)
        .build_cartesian_2d((0..total).into_segmented(), 0f64..1.05f64)
        .map_err(|error| draw_error(table, &error))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(total)
        .x_label_style(x_label_font())
        .x_label_formatter(&|value| {
            let index = match value {
                SegmentValue::Exact(index) | SegmentValue::CenterOf(index) => *index,
                SegmentValue::Last => return String::new(),
            };
            if index % slots == middle {
                functions
                    .get(index / slots)
                    .cloned()
                    .unwrap_or_default()
            } else {
                String::new()
            }
        })
        .y_desc("execution time, normalized")
        .draw()
        .map_err(|error| draw_error(table, &error))?;

    for (library_index, library) in pivoted.libraries.iter().enumerate() {
        let color = SERIES_COLORS[library_index % SERIES_COLORS.len()];

        chart
            .draw_series(pivoted.rows.iter().enumerate().filter_map(
                |(row_index, row)| {
                    row.values[library_index].map(|value| {
                        let slot = row_index * slots + library_index;
                        Rectangle::new(
                            [
                                (SegmentValue::Exact(slot), 0f64),
                                (SegmentValue::Exact(slot + 1), value),
                            ],
                            color.filled(),
                        )
                    })
                },
            ))
            .map_err(|error| draw_error(table, &error))?
            .label(library)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 4), (x + 12, y + 4)], color.filled())
            });
    }

    if !pivoted.libraries.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|error| draw_error(table, &error))?;
    }

    Ok(())
}
