use std::ffi::OsString;
use std::fmt::Display;
use std::path::Path;

use crate::util::bool_to_yesno;

/// The massif command-line arguments
///
/// `--time-unit=B` fixes the time axis to bytes allocated and `--stacks=yes`
/// enables stack profiling. The snapshot parser relies on both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    out_file: OsString,
    time_unit: String,
    stacks: bool,
}

impl Args {
    pub fn new(out_file: &Path) -> Self {
        Self {
            out_file: out_file.into(),
            time_unit: "B".to_owned(),
            stacks: true,
        }
    }

    pub fn to_vec(&self) -> Vec<OsString> {
        let mut massif_out_file = OsString::from("--massif-out-file=");
        massif_out_file.push(&self.out_file);

        vec![
            OsString::from("--tool=massif"),
            massif_out_file,
            OsString::from(format!("--time-unit={}", self.time_unit)),
            OsString::from(format!("--stacks={}", bool_to_yesno(self.stacks))),
        ]
    }
}

impl Display for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let args = self
            .to_vec()
            .iter()
            .map(|arg| arg.to_string_lossy().to_string())
            .collect::<Vec<String>>()
            .join(" ");
        write!(f, "{args}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_args_to_vec() {
        let args = Args::new(Path::new("/tmp/massif/foo.txt"));
        assert_eq!(
            args.to_vec(),
            vec![
                OsString::from("--tool=massif"),
                OsString::from("--massif-out-file=/tmp/massif/foo.txt"),
                OsString::from("--time-unit=B"),
                OsString::from("--stacks=yes"),
            ]
        );
    }
}
