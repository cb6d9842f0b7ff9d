//! CLI command implementations
//!
//! Startup order: load config, set log level, register built-in models, load
//! model files. Each command then produces exactly one JSON response, including
//! when startup fails.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::register_builtin_models;
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::schema::{ExtraFields, ModelLoader, ModelRegistry};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{error_response, ok_response, read_document, write_json};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory of extra model files (optional)
    #[serde(default)]
    pub schema_dir: Option<PathBuf>,

    /// Register the built-in models (default true)
    #[serde(default = "default_builtin_models")]
    pub builtin_models: bool,

    /// Undeclared document fields: "ignore" (default) or "reject"
    #[serde(default)]
    pub extra_fields: ExtraFields,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_builtin_models() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_dir: None,
            builtin_models: default_builtin_models(),
            extra_fields: ExtraFields::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.log_severity()?;

        if !self.builtin_models && self.schema_dir.is_none() {
            return Err(CliError::config_error(
                "No models configured: enable builtin_models or set schema_dir",
            ));
        }

        Ok(())
    }

    pub fn log_severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }
}

/// Builds the registry described by the config
pub fn build_registry(config: &Config) -> CliResult<ModelRegistry> {
    let registry = ModelRegistry::with_extra_fields(config.extra_fields);

    if config.builtin_models {
        register_builtin_models(&registry)?;
    }
    if let Some(dir) = &config.schema_dir {
        ModelLoader::new(dir).load_all(&registry)?;
    }

    Ok(registry)
}

/// Loads the config file, or the defaults when no path is given
pub fn load_config(path: Option<&Path>) -> CliResult<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

fn start(config_path: Option<&Path>) -> CliResult<ModelRegistry> {
    let config = load_config(config_path)?;

    Logger::set_min_severity(config.log_severity()?);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("log_level", config.log_level.as_str())],
    );

    build_registry(&config)
}

/// Runs one command and writes its response to `out`.
///
/// Startup and command failures both produce an error envelope before the
/// error is returned.
pub fn run_command<W: Write>(
    command: Command,
    config_path: Option<&Path>,
    out: &mut W,
) -> CliResult<()> {
    let registry = match start(config_path) {
        Ok(registry) => registry,
        Err(err) => {
            let message = err.to_string();
            log_event_with_fields(
                Event::StartupFailed,
                &[("code", err.code_str()), ("error", message.as_str())],
            );
            return fail(out, err);
        }
    };

    match execute(command, &registry) {
        Ok(data) => write_json(out, &ok_response(data)),
        Err(err) => fail(out, err),
    }
}

fn fail<W: Write>(out: &mut W, err: CliError) -> CliResult<()> {
    let response = match &err {
        CliError::Schema(e) => error_response(e.code().code(), e.message(), e.violations()),
        other => error_response(other.code_str(), &other.to_string(), &[]),
    };
    write_json(out, &response)?;
    Err(err)
}

/// Executes a command against a registry, returning the response payload
pub fn execute(command: Command, registry: &ModelRegistry) -> CliResult<Value> {
    match command {
        Command::Models => Ok(json!(registry.model_names())),
        Command::Fields { model } => Ok(json!(registry.fields(&model)?)),
        Command::Schema => Ok(registry.schema_document()),
        Command::Validate { model, file } => validate(registry, &model, file.as_deref()),
        Command::Export { out } => {
            let paths = ModelLoader::new(out).export_all(registry)?;
            let paths: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
            Ok(json!(paths))
        }
    }
}

fn validate(registry: &ModelRegistry, model: &str, file: Option<&Path>) -> CliResult<Value> {
    let document = read_document(file)?;

    match registry.validate(model, &document) {
        Ok(validated) => {
            log_event_with_fields(Event::DocumentAccepted, &[("model", model)]);
            Ok(Value::Object(validated))
        }
        Err(err) => {
            let count = err.violations().len().to_string();
            log_event_with_fields(
                Event::DocumentRejected,
                &[("code", err.code().code()), ("model", model), ("violations", count.as_str())],
            );
            Err(err.into())
        }
    }
}
