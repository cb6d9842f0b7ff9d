//! CLI module for flames-schemas
//!
//! Provides command-line access to the registry:
//! - models: list model names
//! - fields: field list of one model
//! - schema: every model with its fields
//! - validate: check one document
//! - export: write models as JSON files

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{build_registry, execute, load_config, run_command, Config};
pub use errors::{CliError, CliResult};
pub use io::{error_response, ok_response, read_document, write_json};

/// Parse arguments, load config and run the requested command.
///
/// The response goes to stdout; logs go to stderr.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, cli.config.as_deref(), &mut stdout)
}
