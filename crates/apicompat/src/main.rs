mod config;
mod tracing_setup;

use std::process::ExitCode;

use apicompat_error::{ErrorPolicy, StderrPolicy};
use clap::Parser;
use tracing::info;

use crate::config::ApicompatConfig;

/// Generates `internal/apicompat/<pkg>/apicompat.go` for every exported package of the
/// enclosing Go module. Each file binds every exported function to a variable of its
/// declared type, so building it against another release catches API breaks.
#[derive(Parser, Debug)]
#[command(name = "apicompat", version, about)]
struct Args {
    /// Package patterns handed to the front end
    #[arg(default_values_t = pkg_loader::DEFAULT_PATTERNS.map(String::from))]
    patterns: Vec<String>,
}

fn main() -> ExitCode {
    tracing_setup::init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            StderrPolicy.emit(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> apicompat_error::Result<()> {
    let config = ApicompatConfig::discover()?;
    let module = config.loader.module_path()?;
    let packages = config.loader.load(&args.patterns)?;
    let layout = config.layout(module);

    let written = apicompat_snapshot::run(&packages, &layout)?;
    info!(
        "wrote {} snapshot files under {}",
        written.len(),
        layout.root.display()
    );
    Ok(())
}
