//! Command-line argument parsing for twig.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use std::path::PathBuf;

/// Options for running the TUI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// Override the data directory (settings, messages, log).
    pub data_dir: Option<PathBuf>,
    /// Redraw on every tick instead of only when something changed.
    pub invalidate: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Arguments could not be parsed
    Invalid(String),
    /// Run the TUI application (default)
    Run(RunOptions),
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use twig::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["twig".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--invalidate" => options.invalidate = true,
            "--data-dir" => match args.next() {
                Some(dir) => options.data_dir = Some(PathBuf::from(dir)),
                None => return CliCommand::Invalid("--data-dir needs a path".to_string()),
            },
            other => {
                if let Some(dir) = other.strip_prefix("--data-dir=") {
                    options.data_dir = Some(PathBuf::from(dir));
                } else {
                    return CliCommand::Invalid(format!("unknown argument '{}'", other));
                }
            }
        }
    }
    CliCommand::Run(options)
}

pub const USAGE: &str = "\
Usage: twig [OPTIONS]

Options:
      --data-dir <PATH>  Store settings, messages and logs in PATH
      --invalidate       Redraw every frame
  -V, --version          Print version
  -h, --help             Print help";
