//! CLI module for twig.
//!
//! The dispatcher runs early in `main()`, before the terminal is touched:
//!
//! ```ignore
//! use twig::cli::{parse_args, run_cli_command};
//!
//! let options = match run_cli_command(parse_args(std::env::args())) {
//!     Ok(options) => options,
//!     Err(code) => std::process::exit(code),
//! };
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, RunOptions, USAGE};
pub use version::{handle_version_command, VERSION};

/// Run a CLI command if applicable.
///
/// Returns the options to start the TUI with, or the exit code when the
/// command was handled here.
pub fn run_cli_command(command: CliCommand) -> Result<RunOptions, i32> {
    match command {
        // Never returns (calls exit)
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            println!("{}", USAGE);
            Err(0)
        }
        CliCommand::Invalid(message) => {
            eprintln!("error: {}\n\n{}", message, USAGE);
            Err(2)
        }
        CliCommand::Run(options) => Ok(options),
    }
}
