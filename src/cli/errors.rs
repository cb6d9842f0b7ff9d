//! CLI-specific error types

use std::io;
use thiserror::Error;

use crate::schema::SchemaError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing or invalid
    #[error("FLAMES_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// stdin/stdout or file I/O failed
    #[error("FLAMES_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    /// Input was not valid JSON
    #[error("FLAMES_CLI_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Registry or validation failure
    #[error("{0}")]
    Schema(#[from] SchemaError),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }

    /// Stable error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            CliError::Config(_) => "FLAMES_CLI_CONFIG_ERROR",
            CliError::Io(_) | CliError::Json(_) => "FLAMES_CLI_IO_ERROR",
            CliError::Schema(e) => e.code().code(),
        }
    }
}
