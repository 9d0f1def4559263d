use std::path::{Path, PathBuf};

pub const FIXTURES_ROOT: &str = "tests/fixtures";

pub fn fixtures_path<T>(name: T) -> PathBuf
where
    T: AsRef<Path>,
{
    PathBuf::from(FIXTURES_ROOT).join(name.as_ref())
}
