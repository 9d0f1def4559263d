//! Formatting of the user-facing progress output

use std::io::Write;
use std::path::Path;

use colored::Colorize;

/// Print the headline announcing a pipeline stage
pub fn stage_headline(headline: &str) {
    println!("\n{}", headline.bold());
}

/// Start a per-file progress line, leaving it open for [`progress_done`]
pub fn progress<T>(verb: &str, path: T)
where
    T: AsRef<Path>,
{
    print!("-> {verb} {}...", path.as_ref().display());
    // The line is finished by progress_done, make the partial line visible now
    let _ = std::io::stdout().flush();
}

/// Finish a progress line started with [`progress`]
pub fn progress_done() {
    println!(" {}", "Done".green());
}
