mod common;

use benchgrid::runner::table::{pivot_normalized, read_timing_table, PivotRow};
use pretty_assertions::assert_eq;

use crate::common::fixtures_path;

#[test]
fn test_read_and_pivot_timing_fixture() {
    let records = read_timing_table(&fixtures_path("timing/containers.csv")).unwrap();
    assert_eq!(records.len(), 4);

    let pivoted = pivot_normalized(&records);

    assert_eq!(pivoted.libraries, vec!["etl", "std"]);
    assert_eq!(
        pivoted.rows,
        vec![
            PivotRow {
                function: "insert".to_owned(),
                values: vec![Some(1.0), Some(0.5)],
            },
            PivotRow {
                function: "push_back".to_owned(),
                values: vec![Some(0.5), Some(1.0)],
            },
        ]
    );
}
