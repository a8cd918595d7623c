//! Muddy's main application entry point.
//! Parses the command line, sets up logging and runs the build.

use log::info;
use muddy::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    logger::init_logger,
    pipeline::{build, BuildOptions},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Builds the project named on the command line and logs what was produced.
fn run(args: Args) -> Result<()> {
    let report = build(&BuildOptions::new(args.project_dir))?;

    for (kind, count) in &report.module_counts {
        info!("{kind}: {count} module(s)");
    }
    info!("Package '{}' written to '{}'", report.package, report.archive.display());
    Ok(())
}
