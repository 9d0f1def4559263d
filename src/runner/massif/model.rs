/// A single massif snapshot reduced to the charted fields
///
/// Massif also reports `mem_heap_extra_B` (allocator bookkeeping overhead)
/// which is dropped during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Bytes allocated in total when the snapshot was taken
    pub time: u64,
    /// Useful heap bytes
    pub heap: u64,
    /// Stack bytes
    pub stack: u64,
}

impl Snapshot {
    /// True if the snapshot carries no data at all
    ///
    /// Massif emits a run of such snapshots while the program is still
    /// starting up; dropping them keeps the log-scale charts readable.
    pub fn is_empty(&self) -> bool {
        self.time == 0 && self.heap == 0 && self.stack == 0
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::all_zero(0, 0, 0, true)]
    #[case::heap_only(0, 5, 0, false)]
    #[case::stack_only(0, 0, 3, false)]
    #[case::time_only(8, 0, 0, false)]
    #[case::all_set(8, 5, 3, false)]
    fn test_is_empty(#[case] time: u64, #[case] heap: u64, #[case] stack: u64, #[case] expected: bool) {
        assert_eq!(Snapshot { time, heap, stack }.is_empty(), expected);
    }
}
