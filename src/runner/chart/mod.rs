//! The chart renderer: one subplot per table on a near-square grid

pub mod memory;
pub mod timing;

use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use log::debug;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontTransform};

use super::format;
use super::table::read_memory_table;
use crate::util::{base_name, list_dir_sorted};

/// The pixel size of the composed figure
pub const CANVAS_SIZE: (u32, u32) = (1500, 1000);

/// The fixed per-series color palette
///
/// Timing charts use one color per library column; memory charts use the
/// first two for the heap and stack series.
pub const SERIES_COLORS: [RGBColor; 7] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
];

/// The color of the median reference lines in memory charts
pub const MEDIAN_COLOR: RGBColor = RGBColor(191, 191, 191);

/// The drawing strategy selecting the per-table chart kind
///
/// Exactly one strategy is active per rendered figure; all subplots of a
/// figure share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStrategy {
    /// Grouped bars of normalized execution time, one bar color per library
    Timing,
    /// Heap and stack line series over time on a logarithmic y axis
    Memory,
}

impl DrawStrategy {
    /// The shared upper y bound across all subplots of a figure
    ///
    /// Timing values are normalized per row to at most 1.0, so the timing
    /// scale is fixed. Memory charts share the largest sample over all tables
    /// and both series.
    #[allow(clippy::cast_precision_loss)]
    fn shared_y_extent(self, tables: &[PathBuf]) -> Result<f64> {
        match self {
            Self::Timing => Ok(1.0),
            Self::Memory => {
                let mut max = 0u64;
                for table in tables {
                    for snapshot in read_memory_table(table)? {
                        max = max.max(snapshot.heap).max(snapshot.stack);
                    }
                }
                Ok(max.max(1) as f64)
            }
        }
    }
}

/// Compute the smallest near-square grid able to hold `n` subplots
///
/// Rounding ties favor fewer rows, so the grid grows by columns first.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn grid_dims(n: usize) -> (usize, usize) {
    let sqrt = (n as f64).sqrt();
    (sqrt.round() as usize, sqrt.ceil() as usize)
}

/// Render one subplot per table file in `table_dir` into a single image at `dest`
///
/// The subplots share a y-axis scale and are decorated uniformly; the actual
/// drawing is delegated per table to the given strategy. An empty table
/// directory produces a valid blank image.
pub fn render(
    table_dir: &Path,
    dest: &Path,
    strategy: DrawStrategy,
    title_suffix: &str,
) -> Result<()> {
    let tables = list_dir_sorted(table_dir)?;
    let (rows, cols) = grid_dims(tables.len());
    debug!(
        "Charting {} tables from '{}' on a {rows}x{cols} grid",
        tables.len(),
        table_dir.display()
    );

    let root = BitMapBackend::new(dest, CANVAS_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|error| draw_error(dest, &error))?;

    if !tables.is_empty() {
        let y_extent = strategy.shared_y_extent(&tables)?;
        let areas = root.split_evenly((rows, cols));

        for (table, area) in tables.iter().zip(areas.iter()) {
            format::progress("Creating chart from", table);
            let title = format!("{}{title_suffix}", base_name(table));
            match strategy {
                DrawStrategy::Timing => timing::draw(table, area, &title)?,
                DrawStrategy::Memory => memory::draw(table, area, y_extent, &title)?,
            }
            format::progress_done();
        }
    }

    root.present().map_err(|error| draw_error(dest, &error))?;
    debug!("Saved chart image '{}'", dest.display());
    Ok(())
}

/// The x tick label font shared by all chart kinds
///
/// The backend only supports right-angle text, so the labels are rotated a
/// full quarter turn to keep long benchmark names from overlapping.
pub(crate) fn x_label_font() -> FontDesc<'static> {
    ("sans-serif", 12)
        .into_font()
        .transform(FontTransform::Rotate90)
}

/// Convert a drawing error into an [`anyhow::Error`] naming the chart target
pub(crate) fn draw_error<E>(target: &Path, error: &E) -> anyhow::Error
where
    E: Display,
{
    anyhow!("Failed to draw chart for '{}': {error}", target.display())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::zero(0, (0, 0))]
    #[case::one(1, (1, 1))]
    #[case::two(2, (1, 2))]
    #[case::three(3, (2, 2))]
    #[case::four(4, (2, 2))]
    #[case::five(5, (2, 3))]
    #[case::seven(7, (3, 3))]
    #[case::nine(9, (3, 3))]
    #[case::ten(10, (3, 4))]
    fn test_grid_dims(#[case] n: usize, #[case] expected: (usize, usize)) {
        assert_eq!(grid_dims(n), expected);
    }

    #[test]
    fn test_grid_dims_hold_all_subplots() {
        for n in 1..=100 {
            let (rows, cols) = grid_dims(n);
            assert!(
                rows * cols >= n,
                "{n} subplots do not fit a {rows}x{cols} grid"
            );
        }
    }
}
