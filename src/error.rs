//! The module containing the crate main [`Error`] type

use std::fmt::Display;
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::{ExitStatus, Output};

use crate::util::write_all_to_stderr;

/// The main benchgrid error type
#[derive(Debug, PartialEq, Clone, Eq)]
pub enum Error {
    /// The error when trying to start an external [`std::process::Command`] fails
    ///
    /// `LaunchError(executable_path, message)`
    LaunchError(PathBuf, String),
    /// The generic error when parsing a capture or table file fails
    ///
    /// `ParseError(file_path, message)`
    ParseError(PathBuf, String),
    /// The error after a successful launch of an external [`std::process::Command`]
    ///
    /// `ProcessError(process_name, std::process::Output, std::process::ExitStatus)`
    ProcessError(String, Option<Output>, ExitStatus),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LaunchError(exec, message) => {
                write!(f, "Error launching '{}': {message}", exec.display())
            }
            Self::ParseError(path, message) => {
                write!(f, "Error parsing file '{}': {message}", path.display())
            }
            Self::ProcessError(process, output, status) => {
                if let Some(output) = output {
                    write_all_to_stderr(&output.stderr);
                }

                if let Some(code) = status.code() {
                    write!(f, "Error running '{process}': Exit code was: '{code}'")
                } else if let Some(signal) = status.signal() {
                    write!(
                        f,
                        "Error running '{process}': Terminated by a signal '{signal}'"
                    )
                } else {
                    write!(f, "Error running '{process}': Terminated abnormally")
                }
            }
        }
    }
}

impl std::error::Error for Error {}
