mod common;

use benchgrid::runner::massif::model::Snapshot;
use benchgrid::runner::massif::parser::SnapshotParser;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::fixtures_path;

#[rstest]
#[case::skip_empty(true, 4)]
#[case::keep_empty(false, 5)]
fn test_parse_massif_fixture(#[case] skip_empty: bool, #[case] expected_len: usize) {
    let parser = SnapshotParser::new(skip_empty);

    let snapshots = parser
        .parse_single(&fixtures_path("massif/etl_vector.txt"))
        .unwrap();

    assert_eq!(snapshots.len(), expected_len);
    assert_eq!(
        snapshots.last().copied().unwrap(),
        Snapshot {
            time: 8192,
            heap: 1024,
            stack: 64
        }
    );
}

#[test]
fn test_parse_massif_fixture_is_ordered_by_time() {
    let snapshots = SnapshotParser::new(true)
        .parse_single(&fixtures_path("massif/etl_vector.txt"))
        .unwrap();

    let times: Vec<u64> = snapshots.iter().map(|snapshot| snapshot.time).collect();
    let mut sorted = times.clone();
    sorted.sort_unstable();
    assert_eq!(times, sorted);
}

#[test]
fn test_convert_writes_normalized_table() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("etl_vector.csv");

    SnapshotParser::new(true)
        .convert(&fixtures_path("massif/etl_vector.txt"), &dest)
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(&dest).unwrap(),
        "time,heap,stack\n1000,800,64\n2048,1024,128\n4096,2048,128\n8192,1024,64\n\n"
    );
}
