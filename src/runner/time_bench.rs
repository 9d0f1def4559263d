//! The timing pipeline: build, execute and chart execution-time benchmarks

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use log::debug;

use super::args::TimeArgs;
use super::chart::{self, DrawStrategy};
use super::compile::{self, Artifact, Compiler};
use super::format;
use super::meta::Metadata;
use super::summary::{PipelineKind, RunSummary};
use crate::error::Error;
use crate::util::{base_name, recreate_dir};

/// The intermediate directory layout of a timing run
#[derive(Debug)]
struct TimingPaths {
    generated: PathBuf,
    tables: PathBuf,
    chart: PathBuf,
}

impl TimingPaths {
    fn new(working_dir: &Path) -> Self {
        Self {
            generated: working_dir.join("generated_benchmark"),
            tables: working_dir.join("csv_benchmark"),
            chart: working_dir.join("chart_benchmark.png"),
        }
    }
}

pub fn run(args: &TimeArgs) -> Result<()> {
    let paths = TimingPaths::new(&args.common.working_dir);

    if let Some(data_dir) = &args.common.data_dir {
        format::stage_headline("Creating charts...");
        return chart::render(data_dir, &paths.chart, DrawStrategy::Timing, &args.common.suffix);
    }

    let meta = Metadata::new(&args.common, &args.aux_sources)?;

    recreate_dir(&paths.generated)?;
    recreate_dir(&paths.tables)?;

    format::stage_headline("Building files...");
    let compiler = Compiler::new(&meta);
    let artifacts = compile::build_all(&compiler, &args.common.source_dir, &paths.generated)?;

    format::stage_headline("Executing benchmarks...");
    let mut tables = vec![];
    for artifact in &artifacts {
        let dest = paths
            .tables
            .join(format!("{}.csv", base_name(&artifact.path)));
        format::progress("Executing benchmark", &artifact.path);
        execute(artifact, &dest)?;
        format::progress_done();
        tables.push(dest);
    }

    format::stage_headline("Creating charts...");
    chart::render(&paths.tables, &paths.chart, DrawStrategy::Timing, &args.common.suffix)?;

    RunSummary {
        kind: PipelineKind::Time,
        source_dir: args.common.source_dir.clone(),
        artifacts: artifacts.into_iter().map(|artifact| artifact.path).collect(),
        tables,
        chart: paths.chart.clone(),
    }
    .save(&args.common.working_dir.join("summary_benchmark.json"))
}

/// Execute a benchmark artifact, redirecting its stdout verbatim into `dest`
///
/// The benchmark writes its timing table itself; stderr passes through to the
/// terminal. A non-zero exit aborts the run.
fn execute(artifact: &Artifact, dest: &Path) -> Result<()> {
    let capture = File::create(dest)
        .with_context(|| format!("Failed to create capture file '{}'", dest.display()))?;

    debug!("Executing '{}'", artifact.path.display());
    let status = Command::new(&artifact.path)
        .stdout(Stdio::from(capture))
        .status()
        .map_err(|error| Error::LaunchError(artifact.path.clone(), error.to_string()))?;

    if !status.success() {
        return Err(Error::ProcessError(
            artifact.path.to_string_lossy().to_string(),
            None,
            status,
        )
        .into());
    }

    Ok(())
}
