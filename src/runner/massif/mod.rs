//! The profiled run stage: execute artifacts under Valgrind massif

pub mod args;
pub mod model;
pub mod parser;

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use log::debug;

use self::args::Args;
use super::compile::Artifact;
use crate::error::Error;
use crate::util::resolve_binary_path;

/// The Valgrind massif invocation shared by all benchmarks of a run
#[derive(Debug)]
pub struct MassifCommand {
    valgrind: PathBuf,
}

impl MassifCommand {
    /// Resolve `valgrind` from the `PATH`
    pub fn new() -> Result<Self> {
        Ok(Self {
            valgrind: resolve_binary_path("valgrind")?,
        })
    }

    /// Profile `artifact`, letting massif write its snapshot file to `dest`
    ///
    /// The artifact's own stdout and stderr are captured and only shown if
    /// the run fails; massif writes the snapshot file on its own.
    pub fn run(&self, artifact: &Artifact, dest: &Path) -> Result<()> {
        let args = Args::new(dest);
        debug!(
            "Running '{}' under massif: {}",
            artifact.path.display(),
            args
        );

        let output = Command::new(&self.valgrind)
            .args(args.to_vec())
            .arg(&artifact.path)
            .output()
            .map_err(|error| Error::LaunchError(self.valgrind.clone(), error.to_string()))?;

        if !output.status.success() {
            let status = output.status;
            return Err(Error::ProcessError("valgrind".to_owned(), Some(output), status).into());
        }

        Ok(())
    }
}
