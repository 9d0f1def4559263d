//! The library behind the `benchgrid` binary
//!
//! `benchgrid` automates a directory of C++ micro-benchmarks: every source
//! file is compiled into an executable, each executable is run either
//! directly (capturing its timing output) or under Valgrind massif (capturing
//! heap and stack snapshots), the captures are normalized into csv tables and
//! the tables are rendered as a grid of subplots into a single chart image.
//!
//! The stages run strictly one after another; a stage only starts once the
//! previous stage has fully drained its input directory.

pub mod error;
pub mod runner;
pub mod util;
