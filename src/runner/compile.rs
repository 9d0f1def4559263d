//! The build stage: compile benchmark sources into executable artifacts

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use log::debug;

use super::format;
use super::meta::Metadata;
use crate::error::Error;
use crate::util::{base_name, list_dir_sorted, make_executable};

/// A compiled, executable benchmark binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
}

/// The compiler invocation shared by all benchmarks of a run
#[derive(Debug)]
pub struct Compiler<'a> {
    meta: &'a Metadata,
}

impl<'a> Compiler<'a> {
    pub fn new(meta: &'a Metadata) -> Self {
        Self { meta }
    }

    /// Compile `source` into the executable `dest`
    ///
    /// The benchmark source is compiled together with the configured
    /// auxiliary sources in C++17 mode. On success the artifact is made
    /// executable and read-only. A failed compilation aborts the run with the
    /// compiler's captured stderr.
    pub fn build(&self, source: &Path, dest: &Path) -> Result<Artifact> {
        let mut command = Command::new(&self.meta.compiler);
        command.arg(source);
        command.args(&self.meta.aux_sources);
        for include in &self.meta.include_dirs {
            command.arg("-isystem");
            command.arg(include);
        }
        command.arg("-std=c++17");
        command.args(&self.meta.extra_args);
        command.arg("-o");
        command.arg(dest);

        debug!(
            "Compiling '{}' -> '{}' with '{}'",
            source.display(),
            dest.display(),
            self.meta.compiler.display()
        );

        let output = command
            .output()
            .map_err(|error| Error::LaunchError(self.meta.compiler.clone(), error.to_string()))?;

        if !output.status.success() {
            let status = output.status;
            return Err(Error::ProcessError(
                self.meta.compiler.to_string_lossy().to_string(),
                Some(output),
                status,
            )
            .into());
        }

        make_executable(dest)?;
        Ok(Artifact {
            path: dest.to_path_buf(),
        })
    }
}

/// Build every source file in `source_dir` into `dest_dir`
///
/// The artifact of a source file is named after the source's base name.
/// Sources are built in lexicographic order and a single failure stops the
/// whole stage.
pub fn build_all(compiler: &Compiler, source_dir: &Path, dest_dir: &Path) -> Result<Vec<Artifact>> {
    let mut artifacts = vec![];
    for source in list_dir_sorted(source_dir)? {
        let dest = dest_dir.join(base_name(&source));
        format::progress("Building", &source);
        artifacts.push(compiler.build(&source, &dest)?);
        format::progress_done();
    }
    Ok(artifacts)
}
