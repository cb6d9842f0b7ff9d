//! Model loader for reading model files from disk at startup
//!
//! - One JSON file per model, `<dir>/<name>.json`
//! - Files are loaded in path order so registration is reproducible
//! - A missing directory loads nothing
//! - Unreadable or malformed files are FATAL

use std::fs;
use std::path::{Path, PathBuf};

use crate::observability::{log_event_with_fields, Event};

use super::errors::{SchemaError, SchemaResult};
use super::registry::ModelRegistry;
use super::types::ModelSpec;

/// Reads and writes model definition files in one directory.
pub struct ModelLoader {
    schema_dir: PathBuf,
}

impl ModelLoader {
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
        }
    }

    /// Registers every `*.json` model file in the directory.
    ///
    /// Returns the number of models registered.
    pub fn load_all(&self, registry: &ModelRegistry) -> SchemaResult<usize> {
        if !self.schema_dir.exists() {
            return Ok(0);
        }

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            SchemaError::malformed_schema(
                self.schema_dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_schema(
                    self.schema_dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            let spec = read_model_file(path)?;
            registry.register(spec)?;
        }

        let dir = self.schema_dir.display().to_string();
        let count = paths.len().to_string();
        log_event_with_fields(Event::ModelsLoaded, &[("count", count.as_str()), ("dir", dir.as_str())]);

        Ok(paths.len())
    }

    /// Writes a model to `<dir>/<name>.json`, refusing to overwrite.
    pub fn save_model(&self, spec: &ModelSpec) -> SchemaResult<PathBuf> {
        let path = self.schema_dir.join(format!("{}.json", spec.name.to_lowercase()));

        if path.exists() {
            return Err(SchemaError::duplicate_model(&spec.name));
        }

        fs::create_dir_all(&self.schema_dir).map_err(|e| {
            SchemaError::malformed_schema(
                self.schema_dir.display().to_string(),
                format!("Failed to create schema directory: {}", e),
            )
        })?;

        let content = serde_json::to_string_pretty(spec).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to serialize model: {}", e),
            )
        })?;

        fs::write(&path, content).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to write file: {}", e),
            )
        })?;

        Ok(path)
    }

    /// Writes every registered model, returning the paths written.
    pub fn export_all(&self, registry: &ModelRegistry) -> SchemaResult<Vec<PathBuf>> {
        let paths = registry
            .all_models()
            .iter()
            .map(|spec| self.save_model(spec))
            .collect::<SchemaResult<Vec<_>>>()?;

        let dir = self.schema_dir.display().to_string();
        let count = paths.len().to_string();
        log_event_with_fields(Event::ModelsExported, &[("count", count.as_str()), ("dir", dir.as_str())]);

        Ok(paths)
    }
}

fn read_model_file(path: &Path) -> SchemaResult<ModelSpec> {
    let content = fs::read_to_string(path).map_err(|e| {
        SchemaError::malformed_schema(path.display().to_string(), format!("Failed to read file: {}", e))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SchemaError::malformed_schema(path.display().to_string(), format!("Invalid JSON: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDef, FieldType};
    use tempfile::TempDir;

    fn sample_model() -> ModelSpec {
        ModelSpec::new(
            "Users",
            vec![
                FieldDef::required("name", FieldType::String).min_length(2),
                FieldDef::optional("age", FieldType::Integer).maximum(120.0),
            ],
        )
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ModelLoader::new(temp_dir.path());

        let path = loader.save_model(&sample_model()).unwrap();
        assert!(path.ends_with("users.json"));

        let registry = ModelRegistry::new();
        assert_eq!(loader.load_all(&registry).unwrap(), 1);

        let loaded = registry.get("users").unwrap();
        assert_eq!(loaded.fields, sample_model().fields);
    }

    #[test]
    fn test_save_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ModelLoader::new(temp_dir.path());

        loader.save_model(&sample_model()).unwrap();
        let err = loader.save_model(&sample_model()).unwrap_err();
        assert_eq!(err.code().code(), "FLAMES_DUPLICATE_MODEL");
    }

    #[test]
    fn test_missing_directory_loads_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ModelLoader::new(temp_dir.path().join("absent"));

        let registry = ModelRegistry::new();
        assert_eq!(loader.load_all(&registry).unwrap(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("broken.json"), "{ not json").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let loader = ModelLoader::new(temp_dir.path());
        let err = loader.load_all(&ModelRegistry::new()).unwrap_err();
        assert_eq!(err.code().code(), "FLAMES_MALFORMED_SCHEMA");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_export_all() {
        let temp_dir = TempDir::new().unwrap();
        let registry = ModelRegistry::new();
        registry.register(sample_model()).unwrap();

        let loader = ModelLoader::new(temp_dir.path());
        let paths = loader.export_all(&registry).unwrap();
        assert_eq!(paths.len(), 1);

        let reloaded = ModelRegistry::new();
        loader.load_all(&reloaded).unwrap();
        assert_eq!(reloaded.model_names(), registry.model_names());
    }
}
