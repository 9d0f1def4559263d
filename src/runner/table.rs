//! Reading and reshaping of normalized benchmark tables

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;

use super::massif::model::Snapshot;
use crate::error::Error;

/// One timing measurement of a `<library>_<function>` benchmark
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRecord {
    pub library: String,
    pub function: String,
    pub elapsed: f64,
}

/// A timing table pivoted to one row per function with one value per library
///
/// Values are normalized per row so the slowest library of a function reads
/// as 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotedTable {
    /// All libraries of the table in sorted order
    pub libraries: Vec<String>,
    /// One row per function in sorted order
    pub rows: Vec<PivotRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub function: String,
    /// One value per library in [`PivotedTable::libraries`] order, `None` if
    /// the library has no measurement for this function
    pub values: Vec<Option<f64>>,
}

/// Split a `<library>_<function>` benchmark name at the first underscore
///
/// The function part may contain further underscores. A name without any
/// underscore is treated as a library with an empty function name.
pub fn split_name(name: &str) -> (&str, &str) {
    name.split_once('_').unwrap_or((name, ""))
}

/// Read a `;`-delimited timing table with a header row and `name;elapsed` rows
pub fn read_timing_table(path: &Path) -> Result<Vec<TimingRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read timing table '{}'", path.display()))?;

    let mut records = vec![];
    // The first line is the header written by the benchmark itself
    for line in text.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let (name, elapsed) = line.split_once(';').ok_or_else(|| {
            Error::ParseError(
                path.to_path_buf(),
                format!("Expected 'name;elapsed' but found '{line}'"),
            )
        })?;

        let elapsed = elapsed.trim().parse::<f64>().map_err(|error| {
            Error::ParseError(
                path.to_path_buf(),
                format!("Invalid elapsed value '{}': {error}", elapsed.trim()),
            )
        })?;

        let (library, function) = split_name(name.trim());
        records.push(TimingRecord {
            library: library.to_owned(),
            function: function.to_owned(),
            elapsed,
        });
    }

    Ok(records)
}

/// Read a normalized `time,heap,stack` table written by the massif parser
pub fn read_memory_table(path: &Path) -> Result<Vec<Snapshot>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read memory table '{}'", path.display()))?;

    let mut snapshots = vec![];
    for line in text.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split(',');
        let (Some(time), Some(heap), Some(stack), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(Error::ParseError(
                path.to_path_buf(),
                format!("Expected 'time,heap,stack' but found '{line}'"),
            )
            .into());
        };

        snapshots.push(Snapshot {
            time: parse_field(path, time)?,
            heap: parse_field(path, heap)?,
            stack: parse_field(path, stack)?,
        });
    }

    Ok(snapshots)
}

/// Pivot timing records to rows per function and normalize each row by its
/// maximum
pub fn pivot_normalized(records: &[TimingRecord]) -> PivotedTable {
    let libraries: Vec<String> = records
        .iter()
        .map(|record| record.library.clone())
        .sorted()
        .dedup()
        .collect();

    let mut by_function: BTreeMap<&str, Vec<&TimingRecord>> = BTreeMap::new();
    for record in records {
        by_function.entry(&record.function).or_default().push(record);
    }

    let rows = by_function
        .into_iter()
        .map(|(function, group)| {
            let mut values: Vec<Option<f64>> = vec![None; libraries.len()];
            for record in group {
                let index = libraries
                    .iter()
                    .position(|library| *library == record.library)
                    .expect("The libraries are collected from the same records");
                values[index] = Some(record.elapsed);
            }

            let max = values
                .iter()
                .flatten()
                .fold(f64::NEG_INFINITY, |max, value| max.max(*value));
            let values = values.iter().map(|value| value.map(|v| v / max)).collect();

            PivotRow {
                function: function.to_owned(),
                values,
            }
        })
        .collect();

    PivotedTable { libraries, rows }
}

fn parse_field(path: &Path, digits: &str) -> Result<u64> {
    digits.trim().parse().map_err(|error| {
        Error::ParseError(
            path.to_path_buf(),
            format!("Invalid table field '{}': {error}", digits.trim()),
        )
        .into()
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn record(library: &str, function: &str, elapsed: f64) -> TimingRecord {
        TimingRecord {
            library: library.to_owned(),
            function: function.to_owned(),
            elapsed,
        }
    }

    #[rstest]
    #[case::single_underscore("etl_fill", ("etl", "fill"))]
    #[case::several_underscores("etl_push_back", ("etl", "push_back"))]
    #[case::no_underscore("etl", ("etl", ""))]
    #[case::leading_underscore("_fill", ("", "fill"))]
    fn test_split_name(#[case] name: &str, #[case] expected: (&str, &str)) {
        assert_eq!(split_name(name), expected);
    }

    #[test]
    fn test_pivot_normalizes_each_row_by_its_maximum() {
        let records = [record("etl", "fill", 5.0), record("std", "fill", 10.0)];

        let pivoted = pivot_normalized(&records);

        assert_eq!(pivoted.libraries, vec!["etl", "std"]);
        assert_eq!(
            pivoted.rows,
            vec![PivotRow {
                function: "fill".to_owned(),
                values: vec![Some(0.5), Some(1.0)],
            }]
        );
    }

    #[test]
    fn test_pivot_keeps_missing_measurements_empty() {
        let records = [
            record("etl", "fill", 4.0),
            record("std", "fill", 8.0),
            record("std", "sort", 3.0),
        ];

        let pivoted = pivot_normalized(&records);

        assert_eq!(pivoted.libraries, vec!["etl", "std"]);
        assert_eq!(
            pivoted.rows,
            vec![
                PivotRow {
                    function: "fill".to_owned(),
                    values: vec![Some(0.5), Some(1.0)],
                },
                PivotRow {
                    function: "sort".to_owned(),
                    values: vec![None, Some(1.0)],
                },
            ]
        );
    }

    #[test]
    fn test_read_timing_table_skips_header_and_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("containers.csv");
        std::fs::write(&path, "name;elapsed\netl_push_back;12.5\nstd_push_back;25\n\n").unwrap();

        let records = read_timing_table(&path).unwrap();

        assert_eq!(
            records,
            vec![
                record("etl", "push_back", 12.5),
                record("std", "push_back", 25.0),
            ]
        );
    }

    #[test]
    fn test_read_memory_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("etl_vector.csv");
        std::fs::write(&path, "time,heap,stack\n10,20,3\n12,24,3\n\n").unwrap();

        let snapshots = read_memory_table(&path).unwrap();

        assert_eq!(
            snapshots,
            vec![
                Snapshot {
                    time: 10,
                    heap: 20,
                    stack: 3
                },
                Snapshot {
                    time: 12,
                    heap: 24,
                    stack: 3
                },
            ]
        );
    }

    #[test]
    fn test_read_memory_table_rejects_malformed_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        std::fs::write(&path, "time,heap,stack\n10,20\n").unwrap();

        assert!(read_memory_table(&path).is_err());
    }
}
