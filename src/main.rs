//! flames-schemas CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`. Failures have already been
//! written as an error envelope and logged, so only the exit code is left.

use flames_schemas::cli;

fn main() {
    if cli::run().is_err() {
        std::process::exit(1);
    }
}
