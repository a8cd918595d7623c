//! Command-line interface implementation for Muddy.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for Muddy.
#[derive(Parser, Debug)]
#[command(author, version, about = "Muddy: Mudlet package builder", long_about = None)]
pub struct Args {
    /// The project directory containing an 'mfile' file and 'src/' directory
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    pub project_dir: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 after printing help if arguments are unusable
/// * With clap's default error handling for help and version requests
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp || e.kind() == ErrorKind::DisplayVersion {
                e.exit();
            }
            let _ = Args::command()
                .help_template(
                    r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                )
                .print_help();
            std::process::exit(1);
        }
    }
}
