//! In-memory model registry
//!
//! Models are registered once at startup and read-only afterwards. Names are
//! stored lower-cased, and lookups lower-case the requested name.
//! Registration takes the exclusive write lock; lookups share the read lock
//! and hand out `Arc<ModelSpec>` so validation never holds the lock.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::errors::{SchemaError, SchemaResult};
use super::types::{Document, FieldDef, ModelSpec};
use super::validator::{check_value, Model, SchemaValidator};

/// What to do with document keys the model does not declare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtraFields {
    /// Keep them in the validated document untouched
    #[default]
    Ignore,
    /// Report each one as an undeclared field violation
    Reject,
}

/// Registry mapping lower-cased model names to their definitions.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: RwLock<BTreeMap<String, Arc<ModelSpec>>>,
    extra_fields: ExtraFields,
}

impl ModelRegistry {
    /// Creates an empty registry with the pass-through extra fields policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given extra fields policy.
    pub fn with_extra_fields(extra_fields: ExtraFields) -> Self {
        Self {
            models: RwLock::default(),
            extra_fields,
        }
    }

    pub fn extra_fields(&self) -> ExtraFields {
        self.extra_fields
    }

    /// Registers a model under its lower-cased name.
    ///
    /// # Errors
    ///
    /// - `FLAMES_INVALID_MODEL` if the model breaks a structural rule or one of
    ///   its defaults does not satisfy its own field
    /// - `FLAMES_DUPLICATE_MODEL` if the name is taken
    pub fn register(&self, mut spec: ModelSpec) -> SchemaResult<()> {
        spec.name = spec.name.to_lowercase();

        spec.validate_structure()
            .map_err(|reason| SchemaError::invalid_model(&spec.name, reason))?;
        check_defaults(&spec)?;

        let mut models = self.models.write().unwrap_or_else(PoisonError::into_inner);
        if models.contains_key(&spec.name) {
            return Err(SchemaError::duplicate_model(&spec.name));
        }
        models.insert(spec.name.clone(), Arc::new(spec));

        Ok(())
    }

    /// Gets a model by name.
    pub fn get(&self, name: &str) -> SchemaResult<Arc<ModelSpec>> {
        let models = self.models.read().unwrap_or_else(PoisonError::into_inner);
        models
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| SchemaError::unknown_model(name))
    }

    /// Checks if a model exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// Returns all model names, sorted.
    pub fn model_names(&self) -> Vec<String> {
        let models = self.models.read().unwrap_or_else(PoisonError::into_inner);
        models.keys().cloned().collect()
    }

    /// Returns the fields of a model in declaration order.
    pub fn fields(&self, name: &str) -> SchemaResult<Vec<FieldDef>> {
        Ok(self.get(name)?.fields.clone())
    }

    /// Returns all models, sorted by name.
    pub fn all_models(&self) -> Vec<Arc<ModelSpec>> {
        let models = self.models.read().unwrap_or_else(PoisonError::into_inner);
        models.values().cloned().collect()
    }

    /// Serializes every model into one JSON object keyed by model name.
    pub fn schema_document(&self) -> Value {
        let models = self.models.read().unwrap_or_else(PoisonError::into_inner);
        let map = models
            .iter()
            .map(|(name, spec)| {
                let value = serde_json::to_value(spec.as_ref()).unwrap_or(Value::Null);
                (name.clone(), value)
            })
            .collect();
        Value::Object(map)
    }

    /// Returns the number of registered models.
    pub fn len(&self) -> usize {
        self.models.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validates a document against a named model. See [`SchemaValidator::validate`].
    pub fn validate(&self, model: &str, document: &Value) -> SchemaResult<Document> {
        SchemaValidator::new(self).validate(model, document)
    }

    /// Validates a document and deserializes it into `M`.
    pub fn validate_as<M: Model>(&self, document: &Value) -> SchemaResult<M> {
        SchemaValidator::new(self).validate_as(document)
    }
}

fn check_defaults(spec: &ModelSpec) -> SchemaResult<()> {
    for field in &spec.fields {
        let Some(default) = &field.default else {
            continue;
        };
        let mut violations = Vec::new();
        check_value(field, default, &mut violations);
        if let Some(v) = violations.first() {
            return Err(SchemaError::invalid_model(
                &spec.name,
                format!("default does not satisfy its field: {}", v),
            ));
        }
    }
    Ok(())
}
