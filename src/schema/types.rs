//! Model and field type definitions
//!
//! Supported field types:
//! - string: UTF-8 string
//! - integer: 64-bit integer
//! - float: any JSON number
//! - boolean
//! - date_time: ISO 8601 timestamp string (offset optional, UTC assumed)
//! - email: string with an address grammar check
//! - enum: string drawn from a fixed value set

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// A candidate or validated document: field name to JSON value
pub type Document = serde_json::Map<String, Value>;

/// Supported field types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit integer
    Integer,
    /// Floating point; integers are accepted
    Float,
    /// Boolean
    Boolean,
    /// ISO 8601 date-time string
    DateTime,
    /// Email address string
    Email,
    /// Enumerated string set
    Enum {
        /// Allowed values, in declaration order
        values: Vec<String>,
    },
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::DateTime => "date_time",
            FieldType::Email => "email",
            FieldType::Enum { .. } => "enum",
        }
    }

    /// Builds an enum type from any list of string-like values
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldType::Enum {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether length constraints apply to this type
    pub fn is_string_like(&self) -> bool {
        matches!(
            self,
            FieldType::String | FieldType::Email | FieldType::DateTime | FieldType::Enum { .. }
        )
    }

    /// Whether range constraints apply to this type
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Float)
    }
}

/// Optional bounds attached to a field. All bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

impl Constraints {
    /// True when no bound is set
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.minimum.is_none()
            && self.maximum.is_none()
    }
}

/// Per-field validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name as it appears in documents
    pub name: String,
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether the field must be present
    pub required: bool,
    /// Whether an explicit `null` is an accepted value
    #[serde(default)]
    pub nullable: bool,
    /// Value substituted when an optional field is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Constraints::is_empty")]
    pub constraints: Constraints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldDef {
    /// Create a required field
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            nullable: false,
            default: None,
            constraints: Constraints::default(),
            description: None,
        }
    }

    /// Create an optional field with no default
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type)
        }
    }

    /// Accept an explicit `null` for this field
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.constraints.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.constraints.max_length = Some(n);
        self
    }

    pub fn minimum(mut self, v: f64) -> Self {
        self.constraints.minimum = Some(v);
        self
    }

    pub fn maximum(mut self, v: f64) -> Self {
        self.constraints.maximum = Some(v);
        self
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// Complete model definition for one collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Collection name; lower-cased on registration
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field definitions in declaration order
    pub fields: Vec<FieldDef>,
}

impl ModelSpec {
    /// Create a new model
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields,
        }
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validates the model structure itself (not a document).
    ///
    /// Defaults are checked against their own field by the registry, since that
    /// needs the value checks in the validator.
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("model name must not be empty".into());
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err("field name must not be empty".into());
            }
            if !seen.insert(field.name.as_str()) {
                return Err(format!("duplicate field '{}'", field.name));
            }
            check_field(field)?;
        }

        Ok(())
    }
}

fn check_field(field: &FieldDef) -> Result<(), String> {
    let c = &field.constraints;
    let name = &field.name;

    if let FieldType::Enum { values } = &field.field_type {
        if values.is_empty() {
            return Err(format!("field '{}': enum needs at least one value", name));
        }
    }

    if (c.min_length.is_some() || c.max_length.is_some()) && !field.field_type.is_string_like() {
        return Err(format!(
            "field '{}': length bounds do not apply to {}",
            name,
            field.field_type.type_name()
        ));
    }
    if (c.minimum.is_some() || c.maximum.is_some()) && !field.field_type.is_numeric() {
        return Err(format!(
            "field '{}': range bounds do not apply to {}",
            name,
            field.field_type.type_name()
        ));
    }

    if let (Some(min), Some(max)) = (c.min_length, c.max_length) {
        if min > max {
            return Err(format!("field '{}': min_length {} > max_length {}", name, min, max));
        }
    }
    if let (Some(min), Some(max)) = (c.minimum, c.maximum) {
        if min > max {
            return Err(format!("field '{}': minimum {} > maximum {}", name, min, max));
        }
    }

    if field.required && field.default.is_some() {
        return Err(format!("field '{}': required fields cannot declare a default", name));
    }

    Ok(())
}
