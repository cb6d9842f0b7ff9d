//! CLI argument definitions using clap
//!
//! Commands:
//! - flames-schemas models
//! - flames-schemas fields <model>
//! - flames-schemas schema
//! - flames-schemas validate <model> [--file <path>]
//! - flames-schemas export --out <dir>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Collection models and document validation for the Flames viewer
#[derive(Parser, Debug)]
#[command(name = "flames-schemas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered model names
    Models,

    /// Print the field list of one model
    Fields {
        /// Model name (case-insensitive)
        model: String,
    },

    /// Print every model with its fields
    Schema,

    /// Validate one JSON document against a model
    Validate {
        /// Model name (case-insensitive)
        model: String,

        /// Read the document from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Write every registered model as a JSON file
    Export {
        /// Target directory
        #[arg(long)]
        out: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from([
            "flames-schemas",
            "validate",
            "booking",
            "--file",
            "doc.json",
            "--config",
            "flames.json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("flames.json")));
        match cli.command {
            Command::Validate { model, file } => {
                assert_eq!(model, "booking");
                assert_eq!(file, Some(PathBuf::from("doc.json")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_fields_requires_model() {
        assert!(Cli::try_parse_from(["flames-schemas", "fields"]).is_err());
    }
}
