//! Schema error types
//!
//! Registry-level error codes:
//! - FLAMES_UNKNOWN_MODEL (REJECT)
//! - FLAMES_DUPLICATE_MODEL (REJECT)
//! - FLAMES_INVALID_MODEL (REJECT)
//! - FLAMES_VALIDATION_FAILED (REJECT, carries every field violation)
//! - FLAMES_MALFORMED_SCHEMA (FATAL, schema files read at startup)
//! - FLAMES_MODEL_MISMATCH (REJECT, native struct disagrees with its model table)

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request rejected, caller may correct and retry
    Reject,
    /// Startup cannot continue
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Model name not registered
    UnknownModel,
    /// Model name already registered
    DuplicateModel,
    /// Model definition breaks a structural rule
    InvalidModel,
    /// Document violates its model
    ValidationFailed,
    /// Schema file unreadable or not a model
    MalformedSchema,
    /// A validated document does not fit the model's native struct
    ModelMismatch,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::UnknownModel => "FLAMES_UNKNOWN_MODEL",
            SchemaErrorCode::DuplicateModel => "FLAMES_DUPLICATE_MODEL",
            SchemaErrorCode::InvalidModel => "FLAMES_INVALID_MODEL",
            SchemaErrorCode::ValidationFailed => "FLAMES_VALIDATION_FAILED",
            SchemaErrorCode::MalformedSchema => "FLAMES_MALFORMED_SCHEMA",
            SchemaErrorCode::ModelMismatch => "FLAMES_MODEL_MISMATCH",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::MalformedSchema => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Which side of a length bound was crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthBound {
    Min(usize),
    Max(usize),
}

impl fmt::Display for LengthBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthBound::Min(n) => write!(f, "min_length {}", n),
            LengthBound::Max(n) => write!(f, "max_length {}", n),
        }
    }
}

/// Which side of a numeric range was crossed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeBound {
    Min(f64),
    Max(f64),
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeBound::Min(v) => write!(f, "minimum {}", v),
            RangeBound::Max(v) => write!(f, "maximum {}", v),
        }
    }
}

/// A single field-scoped validation failure
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    #[error("field '{field}': required field is missing")]
    MissingField { field: String },

    #[error("field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("field '{field}': length outside {bound}")]
    LengthConstraint { field: String, bound: LengthBound },

    #[error("field '{field}': value outside {bound}")]
    RangeConstraint { field: String, bound: RangeBound },

    #[error("field '{field}': value must be one of {}", .allowed.join(", "))]
    InvalidEnumValue { field: String, allowed: Vec<String> },

    #[error("field '{field}': not a valid {format}")]
    InvalidFormat { field: String, format: String },

    /// Only reported under the reject policy for extra fields
    #[error("field '{field}': not declared by the model")]
    UndeclaredField { field: String },
}

impl Violation {
    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            Violation::MissingField { field }
            | Violation::TypeMismatch { field, .. }
            | Violation::LengthConstraint { field, .. }
            | Violation::RangeConstraint { field, .. }
            | Violation::InvalidEnumValue { field, .. }
            | Violation::InvalidFormat { field, .. }
            | Violation::UndeclaredField { field } => field,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Violation::MissingField { .. } => "MISSING_FIELD",
            Violation::TypeMismatch { .. } => "TYPE_MISMATCH",
            Violation::LengthConstraint { .. } => "LENGTH_CONSTRAINT",
            Violation::RangeConstraint { .. } => "RANGE_CONSTRAINT",
            Violation::InvalidEnumValue { .. } => "INVALID_ENUM_VALUE",
            Violation::InvalidFormat { .. } => "INVALID_FORMAT",
            Violation::UndeclaredField { .. } => "UNDECLARED_FIELD",
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Violation::MissingField { field: field.into() }
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Violation::TypeMismatch {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_format(field: impl Into<String>, format: impl Into<String>) -> Self {
        Violation::InvalidFormat {
            field: field.into(),
            format: format.into(),
        }
    }
}

/// Schema error type with full context
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    /// Model name if applicable
    model: Option<String>,
    /// Every violation found, in declaration order
    violations: Vec<Violation>,
}

impl SchemaError {
    /// Create an unknown model error
    pub fn unknown_model(model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            code: SchemaErrorCode::UnknownModel,
            message: format!("Model '{}' not found", model),
            model: Some(model),
            violations: Vec::new(),
        }
    }

    /// Create a duplicate model error
    pub fn duplicate_model(model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            code: SchemaErrorCode::DuplicateModel,
            message: format!("Model '{}' is already registered", model),
            model: Some(model),
            violations: Vec::new(),
        }
    }

    /// Create an invalid model error
    pub fn invalid_model(model: impl Into<String>, reason: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            code: SchemaErrorCode::InvalidModel,
            message: format!("Model '{}' is invalid: {}", model, reason.into()),
            model: Some(model),
            violations: Vec::new(),
        }
    }

    /// Create a validation failed error carrying every violation
    pub fn validation_failed(model: impl Into<String>, violations: Vec<Violation>) -> Self {
        let model = model.into();
        let summary = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            code: SchemaErrorCode::ValidationFailed,
            message: format!("Document validation failed: {}", summary),
            model: Some(model),
            violations,
        }
    }

    /// Create an error for a malformed schema file
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::MalformedSchema,
            message: format!("Malformed schema file '{}': {}", path.into(), reason.into()),
            model: None,
            violations: Vec::new(),
        }
    }

    /// Create an error for a struct that cannot hold a validated document
    pub fn model_mismatch(model: impl Into<String>, reason: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            code: SchemaErrorCode::ModelMismatch,
            message: format!("Model '{}' does not match its struct: {}", model, reason.into()),
            model: Some(model),
            violations: Vec::new(),
        }
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Field violations; empty unless the code is `ValidationFailed`
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes the error, returning its violations
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
