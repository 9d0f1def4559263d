//! The machine-readable inventory of a pipeline run

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;

/// The pipeline kind recorded in the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineKind {
    Time,
    Memory,
}

/// The files a full pipeline run produced, written next to the chart
///
/// The summary makes reruns comparable without re-reading the intermediate
/// directories.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub kind: PipelineKind,
    pub source_dir: PathBuf,
    pub artifacts: Vec<PathBuf>,
    pub tables: Vec<PathBuf>,
    pub chart: PathBuf,
}

impl RunSummary {
    /// Save the summary as pretty-printed json
    pub fn save(&self, dest: &Path) -> Result<()> {
        debug!("Writing run summary '{}'", dest.display());
        let file = File::create(dest)
            .with_context(|| format!("Failed to create summary file '{}'", dest.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("Failed to write summary file '{}'", dest.display()))
    }
}
