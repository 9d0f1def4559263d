//! The parser converting raw massif output into normalized tables

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::model::Snapshot;
use crate::error::Error;

lazy_static! {
    static ref SNAPSHOT_RE: Regex = Regex::new(
        r"time=(\d+)\nmem_heap_B=(\d+)\nmem_heap_extra_B=(\d+)\nmem_stacks_B=(\d+)"
    )
    .expect("Regex should compile");
}

/// The parser extracting [`Snapshot`]s from massif's native output format
#[derive(Debug, Clone, Copy)]
pub struct SnapshotParser {
    /// If true, snapshots whose fields are all zero are dropped
    pub skip_empty: bool,
}

impl SnapshotParser {
    pub fn new(skip_empty: bool) -> Self {
        Self { skip_empty }
    }

    /// Extract all snapshots from the massif file at `path` in file order
    ///
    /// Massif appends snapshots as the profiled program runs, so file order
    /// is ascending by `time`. Text around the snapshot stanzas (headers,
    /// heap trees) is ignored; a file without any stanza parses to an empty
    /// snapshot list.
    pub fn parse_single(&self, path: &Path) -> Result<Vec<Snapshot>> {
        debug!("Parsing massif file '{}'", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read massif file '{}'", path.display()))?;
        self.parse_text(path, &text)
    }

    fn parse_text(&self, path: &Path, text: &str) -> Result<Vec<Snapshot>> {
        let mut snapshots = vec![];
        for captures in SNAPSHOT_RE.captures_iter(text) {
            let snapshot = Snapshot {
                time: parse_field(path, &captures[1])?,
                heap: parse_field(path, &captures[2])?,
                // The third field is mem_heap_extra_B which is not charted
                stack: parse_field(path, &captures[4])?,
            };

            if self.skip_empty && snapshot.is_empty() {
                continue;
            }

            snapshots.push(snapshot);
        }

        Ok(snapshots)
    }

    /// Parse the massif file at `source` and write the normalized table to `dest`
    pub fn convert(&self, source: &Path, dest: &Path) -> Result<()> {
        let snapshots = self.parse_single(source)?;
        if snapshots.is_empty() {
            debug!("'{}': No snapshots found", source.display());
        }
        write_table(&snapshots, dest)
    }
}

/// Write snapshots as a normalized table
///
/// The layout is fixed: a `time,heap,stack` header, one row per snapshot in
/// the given order and a single trailing blank line.
pub fn write_table(snapshots: &[Snapshot], dest: &Path) -> Result<()> {
    let file = File::create(dest)
        .with_context(|| format!("Failed to create table file '{}'", dest.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "time,heap,stack")?;
    for snapshot in snapshots {
        writeln!(writer, "{},{},{}", snapshot.time, snapshot.heap, snapshot.stack)?;
    }
    writeln!(writer)?;

    writer
        .flush()
        .with_context(|| format!("Failed to write table file '{}'", dest.display()))
}

fn parse_field(path: &Path, digits: &str) -> Result<u64> {
    digits.parse().map_err(|_| {
        Error::ParseError(
            path.to_path_buf(),
            format!("Snapshot field '{digits}' does not fit into 64 bits"),
        )
        .into()
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    const SINGLE: &str = "time=10\nmem_heap_B=20\nmem_heap_extra_B=5\nmem_stacks_B=3";

    fn snapshot(time: u64, heap: u64, stack: u64) -> Snapshot {
        Snapshot { time, heap, stack }
    }

    #[rstest]
    #[case::empty("", vec![])]
    #[case::no_stanza("n2: 1016 0x109D86: main (in /home/bench/etl_vector)\n", vec![])]
    #[case::single_discards_heap_extra(SINGLE, vec![snapshot(10, 20, 3)])]
    #[case::incomplete_stanza("time=10\nmem_heap_B=20\n", vec![])]
    fn test_parse_text(#[case] text: &str, #[case] expected: Vec<Snapshot>) {
        let parser = SnapshotParser::new(false);
        let actual = parser.parse_text(Path::new("massif.out"), text).unwrap();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::all_zero("time=0\nmem_heap_B=0\nmem_heap_extra_B=0\nmem_stacks_B=0", vec![])]
    #[case::heap_set(
        "time=0\nmem_heap_B=5\nmem_heap_extra_B=0\nmem_stacks_B=0",
        vec![snapshot(0, 5, 0)]
    )]
    #[case::stack_set(
        "time=0\nmem_heap_B=0\nmem_heap_extra_B=0\nmem_stacks_B=7",
        vec![snapshot(0, 0, 7)]
    )]
    #[case::heap_extra_does_not_count(
        "time=0\nmem_heap_B=0\nmem_heap_extra_B=9\nmem_stacks_B=0",
        vec![]
    )]
    fn test_parse_text_skips_empty_snapshots(#[case] text: &str, #[case] expected: Vec<Snapshot>) {
        let parser = SnapshotParser::new(true);
        let actual = parser.parse_text(Path::new("massif.out"), text).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_parse_text_keeps_empty_snapshots_when_configured() {
        let parser = SnapshotParser::new(false);
        let actual = parser
            .parse_text(
                Path::new("massif.out"),
                "time=0\nmem_heap_B=0\nmem_heap_extra_B=0\nmem_stacks_B=0",
            )
            .unwrap();
        assert_eq!(actual, vec![snapshot(0, 0, 0)]);
    }

    #[test]
    fn test_write_table_layout() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("etl_vector.csv");

        write_table(&[snapshot(10, 20, 3), snapshot(12, 24, 3)], &dest).unwrap();

        assert_eq!(
            std::fs::read_to_string(&dest).unwrap(),
            "time,heap,stack\n10,20,3\n12,24,3\n\n"
        );
    }

    #[test]
    fn test_write_table_without_snapshots_is_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("empty.csv");

        write_table(&[], &dest).unwrap();

        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "time,heap,stack\n\n");
    }
}
