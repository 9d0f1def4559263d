use std::path::PathBuf;

use anyhow::Result;
use log::debug;

use super::args::CommonArgs;
use crate::util::resolve_binary_path;

/// The configuration of a single pipeline run
///
/// Everything a stage needs is resolved once here and passed down explicitly;
/// no stage reads the environment or the command line on its own.
#[derive(Debug, Clone)]
pub struct Metadata {
    /// The resolved absolute path of the C++ compiler
    pub compiler: PathBuf,
    /// Include search paths passed to the compiler with `-isystem`
    pub include_dirs: Vec<PathBuf>,
    /// Extra compiler arguments appended verbatim
    pub extra_args: Vec<String>,
    /// Auxiliary sources compiled into every benchmark
    pub aux_sources: Vec<PathBuf>,
    /// The base directory for intermediate directories and the chart
    pub working_dir: PathBuf,
}

impl Metadata {
    pub fn new(common: &CommonArgs, aux_sources: &[PathBuf]) -> Result<Self> {
        let compiler = resolve_binary_path(&common.compiler)?;
        debug!("Resolved compiler: '{}'", compiler.display());

        for include in &common.include_dirs {
            debug!("Include search path: '{}'", include.display());
        }

        Ok(Self {
            compiler,
            include_dirs: common.include_dirs.clone(),
            extra_args: common.compiler_args.0.clone(),
            aux_sources: aux_sources.to_vec(),
            working_dir: common.working_dir.clone(),
        })
    }
}
