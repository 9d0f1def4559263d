//! The memory pipeline: build, profile under massif, parse and chart

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::args::MemoryArgs;
use super::chart::{self, DrawStrategy};
use super::compile::{self, Compiler};
use super::format;
use super::massif::parser::SnapshotParser;
use super::massif::MassifCommand;
use super::meta::Metadata;
use super::summary::{PipelineKind, RunSummary};
use crate::util::{base_name, recreate_dir};

/// The intermediate directory layout of a memory run
///
/// Everything lives below one `memory` directory which is wiped at startup.
#[derive(Debug)]
struct MemoryPaths {
    root: PathBuf,
    generated: PathBuf,
    massif: PathBuf,
    tables: PathBuf,
    chart: PathBuf,
}

impl MemoryPaths {
    fn new(working_dir: &Path) -> Self {
        let root = working_dir.join("memory");
        Self {
            generated: root.join("generated"),
            massif: root.join("massif"),
            tables: root.join("csv"),
            chart: root.join("chart.png"),
            root,
        }
    }
}

pub fn run(args: &MemoryArgs) -> Result<()> {
    let paths = MemoryPaths::new(&args.common.working_dir);

    if let Some(data_dir) = &args.common.data_dir {
        format::stage_headline("Creating charts...");
        recreate_dir(&paths.root)?;
        return chart::render(data_dir, &paths.chart, DrawStrategy::Memory, &args.common.suffix);
    }

    let meta = Metadata::new(&args.common, &[])?;
    let massif_command = MassifCommand::new()?;

    recreate_dir(&paths.root)?;
    for dir in [&paths.generated, &paths.massif, &paths.tables] {
        recreate_dir(dir)?;
    }

    format::stage_headline("Building files...");
    let compiler = Compiler::new(&meta);
    let artifacts = compile::build_all(&compiler, &args.common.source_dir, &paths.generated)?;

    format::stage_headline("Running massif...");
    let mut captures = vec![];
    for artifact in &artifacts {
        let dest = paths
            .massif
            .join(format!("{}.txt", base_name(&artifact.path)));
        format::progress("Running massif on", &artifact.path);
        massif_command.run(artifact, &dest)?;
        format::progress_done();
        captures.push(dest);
    }

    format::stage_headline("Parsing...");
    let parser = SnapshotParser::new(!args.keep_zero_snapshots);
    let mut tables = vec![];
    for capture in &captures {
        let dest = paths.tables.join(format!("{}.csv", base_name(capture)));
        format::progress("Parsing", capture);
        parser.convert(capture, &dest)?;
        format::progress_done();
        tables.push(dest);
    }

    format::stage_headline("Creating charts...");
    chart::render(&paths.tables, &paths.chart, DrawStrategy::Memory, &args.common.suffix)?;

    RunSummary {
        kind: PipelineKind::Memory,
        source_dir: args.common.source_dir.clone(),
        artifacts: artifacts.into_iter().map(|artifact| artifact.path).collect(),
        tables,
        chart: paths.chart.clone(),
    }
    .save(&paths.root.join("summary.json"))
}
