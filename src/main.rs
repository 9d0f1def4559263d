use std::io::Write;

use benchgrid::runner::envs;
use colored::{control, Colorize};
use env_logger::Env;
use log::error;

fn main() {
    // Configure the colored crate to respect CARGO_TERM_COLOR
    if let Ok(var) = std::env::var(envs::CARGO_TERM_COLOR) {
        if var == "never" {
            control::set_override(false);
        } else if var == "always" {
            control::set_override(true);
        }
    }

    env_logger::Builder::from_env(
        Env::default()
            .filter_or(envs::BENCHGRID_LOG, "warn")
            .write_style(envs::CARGO_TERM_COLOR),
    )
    .format(|buf, record| {
        writeln!(
            buf,
            "{}: {:<5}: {}",
            record
                .module_path()
                .unwrap_or(record.module_path_static().unwrap_or("???")),
            match record.level() {
                log::Level::Error => "Error".red().bold(),
                log::Level::Warn => "Warn".yellow().bold(),
                log::Level::Info => "Info".green().bold(),
                log::Level::Debug => "Debug".blue().bold(),
                log::Level::Trace => "Trace".cyan().bold(),
            },
            record.args()
        )
    })
    .init();

    if let Err(error) = benchgrid::runner::run() {
        error!("{error:#}");
        std::process::exit(1);
    }
}
