//! This module provides common utility functions

use std::ffi::OsStr;
use std::io::{self, BufWriter, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::debug;
use which::which;

/// Convert a boolean value to a `yes` or `no` string
pub fn bool_to_yesno(value: bool) -> String {
    if value {
        "yes".to_owned()
    } else {
        "no".to_owned()
    }
}

/// Return the file name of a path with the final extension removed
///
/// Only the last extension is stripped, so `/a/b/foo.tar.gz` yields
/// `foo.tar`. A path without a file name yields an empty string.
pub fn base_name<T>(path: T) -> String
where
    T: AsRef<Path>,
{
    path.as_ref()
        .file_stem()
        .map_or_else(String::new, |stem| stem.to_string_lossy().to_string())
}

/// Dump all data to `stderr`
pub fn write_all_to_stderr(bytes: &[u8]) {
    if !bytes.is_empty() {
        let stderr = io::stderr();
        let stderr = stderr.lock();
        let mut writer = BufWriter::new(stderr);
        writer
            .write_all(bytes)
            .and_then(|()| writer.flush())
            .unwrap();
        if !bytes.last().map_or(false, |l| *l == b'\n') {
            eprintln!();
        }
    }
}

/// Try to resolve the absolute path of a binary from the `PATH` and relative paths
///
/// If the binary is a name without path separators the PATH is tried, otherwise if not absolute
/// a relative path is tried. If the path is already absolute checks if it is executable.
pub fn resolve_binary_path<T>(binary: T) -> Result<PathBuf>
where
    T: AsRef<OsStr>,
{
    let binary = binary.as_ref();
    match which(binary) {
        Ok(path) => {
            debug!("Found '{}': '{}'", binary.to_string_lossy(), path.display());
            Ok(path)
        }
        Err(error) => Err(
            anyhow! {"{error}: '{0}' could not be found. Is '{0}' installed, executable and in the PATH?",
                binary.to_string_lossy()
            },
        ),
    }
}

/// Make `path` executable and read-only for everyone (mode `0o555`)
pub fn make_executable<T>(path: T) -> Result<()>
where
    T: AsRef<Path>,
{
    let path = path.as_ref();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o555))
        .with_context(|| format!("Failed to set permissions of '{}'", path.display()))
}

/// Remove `dir` with everything in it and recreate it empty
pub fn recreate_dir<T>(dir: T) -> Result<()>
where
    T: AsRef<Path>,
{
    let dir = dir.as_ref();
    match std::fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => {
            return Err(error)
                .with_context(|| format!("Failed to remove directory '{}'", dir.display()));
        }
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory '{}'", dir.display()))
}

/// List the entries of a directory in lexicographic order
///
/// Reruns over an unchanged directory produce the same ordering, which keeps
/// the pipeline output reproducible.
pub fn list_dir_sorted<T>(dir: T) -> Result<Vec<PathBuf>>
where
    T: AsRef<Path>,
{
    let dir = dir.as_ref();
    let mut paths = vec![];
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory '{}'", dir.display()))?
    {
        let entry =
            entry.with_context(|| format!("Failed to read directory '{}'", dir.display()))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

/// The median of a set of samples
///
/// The mean of the two middle samples for an even count.
#[allow(clippy::cast_precision_loss)]
pub fn median(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0f64;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2f64
    } else {
        sorted[mid] as f64
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::simple("foo.cpp", "foo")]
    #[case::nested("/a/b/foo.cpp", "foo")]
    #[case::no_extension("/a/b/foo", "foo")]
    #[case::two_extensions("/a/b/foo.tar.gz", "foo.tar")]
    #[case::hidden(".hidden", ".hidden")]
    #[case::trailing_dir("/a/b/", "b")]
    fn test_base_name(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(base_name(path), expected);
    }

    #[rstest]
    #[case::empty(&[], 0f64)]
    #[case::single(&[5], 5f64)]
    #[case::odd(&[9, 1, 5], 5f64)]
    #[case::even(&[4, 1, 9, 2], 3f64)]
    #[case::unsorted(&[10, 0], 5f64)]
    fn test_median(#[case] values: &[u64], #[case] expected: f64) {
        assert_eq!(median(values), expected);
    }

    #[rstest]
    #[case::yes(true, "yes")]
    #[case::no(false, "no")]
    fn test_bool_to_yesno(#[case] value: bool, #[case] expected: &str) {
        assert_eq!(bool_to_yesno(value), expected);
    }
}
