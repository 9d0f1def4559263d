//! The pipeline runner
//!
//! A run is a strict sequence of stages over the filesystem: source directory
//! to executables directory to capture directory to table directory to a
//! single chart image. The `time` and `memory` subcommands share the build
//! and chart stages and differ in how the artifacts are executed and how
//! their output is normalized.

pub mod args;
pub mod chart;
pub mod compile;
pub mod format;
pub mod massif;
pub mod memory_bench;
pub mod meta;
pub mod summary;
pub mod table;
pub mod time_bench;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use self::args::{Command, CommandLineArgs};

/// The environment variables benchgrid reacts to
pub mod envs {
    pub const BENCHGRID_LOG: &str = "BENCHGRID_LOG";
    pub const CARGO_TERM_COLOR: &str = "CARGO_TERM_COLOR";
}

/// Parse the command line and run the selected pipeline to completion
pub fn run() -> Result<()> {
    let args = CommandLineArgs::parse();

    match args.command {
        Command::Time(time_args) => time_bench::run(&time_args)?,
        Command::Memory(memory_args) => memory_bench::run(&memory_args)?,
    }

    println!("\n{}", "Complete.".bold());
    Ok(())
}
