use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// The benchgrid command line
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Compile, run and chart C++ micro-benchmarks",
    long_about = None,
)]
pub struct CommandLineArgs {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build and execute timing benchmarks, then chart normalized execution times
    Time(TimeArgs),
    /// Build and profile benchmarks under Valgrind massif, then chart memory usage
    Memory(MemoryArgs),
}

/// Compiler arguments passed through verbatim after shell-style splitting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArgs(pub Vec<String>);

impl RawArgs {
    pub fn from_iter<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self(args.into_iter().map(|s| s.as_ref().to_owned()).collect())
    }
}

#[derive(clap::Args, Debug)]
pub struct CommonArgs {
    /// The directory containing the benchmark source files
    pub source_dir: PathBuf,

    /// The base directory for the intermediate directories and the chart
    #[clap(long = "working-dir", default_value = ".")]
    pub working_dir: PathBuf,

    /// Append this suffix to every subplot title
    #[clap(long = "suffix", default_value = "")]
    pub suffix: String,

    /// Chart pre-computed tables from this directory, skipping build and run
    #[clap(long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// The C++ compiler used to build the benchmarks
    #[clap(long = "compiler", default_value = "g++")]
    pub compiler: PathBuf,

    /// A system include search path passed to the compiler with -isystem
    #[clap(long = "include")]
    pub include_dirs: Vec<PathBuf>,

    /// Additional compiler arguments, split like a shell would
    #[clap(
        long = "compiler-args",
        default_value = "",
        value_parser = parse_compiler_args,
    )]
    pub compiler_args: RawArgs,
}

#[derive(clap::Args, Debug)]
pub struct TimeArgs {
    #[clap(flatten)]
    pub common: CommonArgs,

    /// An auxiliary source file compiled into every benchmark
    #[clap(long = "aux-source")]
    pub aux_sources: Vec<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct MemoryArgs {
    #[clap(flatten)]
    pub common: CommonArgs,

    /// Keep snapshots whose time, heap and stack are all zero
    #[clap(long = "keep-zero-snapshots")]
    pub keep_zero_snapshots: bool,
}

fn parse_compiler_args(value: &str) -> Result<RawArgs, String> {
    shlex::split(value)
        .ok_or_else(|| "Failed to split compiler args".to_owned())
        .map(RawArgs)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", &[])]
    #[case::single("-O2", &["-O2"])]
    #[case::two("-O2 -march=native", &["-O2", "-march=native"])]
    #[case::single_escaped("-DGREETING='hello world'", &["-DGREETING=hello world"])]
    #[case::double_escaped("-DGREETING='\"hello world\"'", &["-DGREETING=\"hello world\""])]
    fn test_parse_compiler_args(#[case] value: &str, #[case] expected: &[&str]) {
        let actual = parse_compiler_args(value).unwrap();
        assert_eq!(actual, RawArgs::from_iter(expected));
    }
}
