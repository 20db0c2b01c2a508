//! Trazar CLI library
//!
//! Command-line front end for the Trazar instruction-to-test compiler.

#![warn(missing_docs)]

mod commands;
mod error;
mod output;

pub use commands::{
    Cli, ClassifyArgs, ColorArg, Commands, FormatArg, GenerateArgs, ScenariosArgs, TypeArg,
};
pub use error::{CliError, CliResult};
pub use output::{file_progress, render_intent, render_outcome, render_scenarios, OutputOptions};

use tracing_subscriber::EnvFilter;

/// Initialize tracing from the `-v` count (error → warn → debug → trace).
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("trazar={level},trazar_cli={level}")));
    // a second init in tests is fine to ignore
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
