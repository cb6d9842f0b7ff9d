//! Document validation against a registered model
//!
//! Validation semantics:
//! - Every declared field is checked, in declaration order
//! - Absent required fields are reported, absent optional fields take their default
//! - Present values are type-checked, then bound-, enum- and format-checked
//! - All violations are collected before returning; nothing short-circuits
//! - `null` is accepted only for fields declared nullable
//! - Undeclared fields pass through unless the registry rejects them
//!
//! Validation is a pure function of (model, document). The validator does not
//! mutate its input, log, or touch registry state.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::errors::{LengthBound, RangeBound, SchemaError, SchemaResult, Violation};
use super::format;
use super::registry::{ExtraFields, ModelRegistry};
use super::types::{Document, FieldDef, FieldType, ModelSpec};

/// A native struct backed by a registered model.
///
/// The collection name is declared explicitly and never derived from the type.
pub trait Model: DeserializeOwned {
    /// Registered (lower-case) model name
    const NAME: &'static str;

    /// The field descriptor table for this model
    fn spec() -> ModelSpec;
}

/// Validator that checks documents against models held by a registry.
pub struct SchemaValidator<'a> {
    registry: &'a ModelRegistry,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a new validator backed by the given registry.
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self { registry }
    }

    /// Validates a document against a named model.
    ///
    /// Returns the document with defaults applied.
    ///
    /// # Errors
    ///
    /// - `FLAMES_UNKNOWN_MODEL` if no model is registered under `model`
    /// - `FLAMES_VALIDATION_FAILED` with every violation found
    pub fn validate(&self, model: &str, document: &Value) -> SchemaResult<Document> {
        let spec = self.registry.get(model)?;
        validate_against(&spec, document, self.registry.extra_fields())
            .map_err(|violations| SchemaError::validation_failed(&spec.name, violations))
    }

    /// Validates a document and deserializes the result into the model's struct.
    ///
    /// A document that passes validation always fits the struct when the
    /// struct agrees with its descriptor table; `FLAMES_MODEL_MISMATCH` means
    /// the two have drifted apart.
    pub fn validate_as<M: Model>(&self, document: &Value) -> SchemaResult<M> {
        let validated = self.validate(M::NAME, document)?;
        serde_json::from_value(Value::Object(validated))
            .map_err(|e| SchemaError::model_mismatch(M::NAME, e.to_string()))
    }
}

/// Validates a document against a model definition.
///
/// Violations come back in declaration order, followed by undeclared fields
/// (reject policy only) in key order.
pub fn validate_against(
    spec: &ModelSpec,
    document: &Value,
    extra_fields: ExtraFields,
) -> Result<Document, Vec<Violation>> {
    let Some(input) = document.as_object() else {
        return Err(vec![Violation::type_mismatch(
            "$root",
            "object",
            json_type_name(document),
        )]);
    };

    let mut violations = Vec::new();
    let mut output = input.clone();

    for field in &spec.fields {
        match input.get(&field.name) {
            Some(value) => check_value(field, value, &mut violations),
            None if field.required => violations.push(Violation::missing_field(&field.name)),
            None => {
                if let Some(default) = &field.default {
                    output.insert(field.name.clone(), default.clone());
                }
            }
        }
    }

    if extra_fields == ExtraFields::Reject {
        let mut extra: Vec<&String> = input
            .keys()
            .filter(|key| spec.field(key).is_none())
            .collect();
        extra.sort();
        violations.extend(extra.into_iter().map(|key| Violation::UndeclaredField {
            field: key.clone(),
        }));
    }

    if violations.is_empty() {
        Ok(output)
    } else {
        Err(violations)
    }
}

/// Checks one present value against its field definition.
pub(crate) fn check_value(field: &FieldDef, value: &Value, out: &mut Vec<Violation>) {
    let name = &field.name;

    if value.is_null() {
        if !field.nullable {
            out.push(Violation::type_mismatch(name, field.field_type.type_name(), "null"));
        }
        return;
    }

    match &field.field_type {
        FieldType::Boolean => {
            if !value.is_boolean() {
                out.push(mismatch(field, value));
            }
        }
        FieldType::Integer => {
            if value.is_i64() || value.is_u64() {
                check_range(field, value.as_f64().unwrap_or_default(), out);
            } else {
                out.push(mismatch(field, value));
            }
        }
        FieldType::Float => match value.as_f64() {
            Some(n) => check_range(field, n, out),
            None => out.push(mismatch(field, value)),
        },
        string_type => {
            let Some(s) = value.as_str() else {
                out.push(mismatch(field, value));
                return;
            };
            check_length(field, s, out);

            match string_type {
                FieldType::Email if !format::is_email(s) => {
                    out.push(Violation::invalid_format(name, "email"));
                }
                FieldType::DateTime if !format::is_date_time(s) => {
                    out.push(Violation::invalid_format(name, "date_time"));
                }
                FieldType::Enum { values } if !values.iter().any(|v| v == s) => {
                    out.push(Violation::InvalidEnumValue {
                        field: name.clone(),
                        allowed: values.clone(),
                    });
                }
                _ => {}
            }
        }
    }
}

fn check_length(field: &FieldDef, s: &str, out: &mut Vec<Violation>) {
    let len = s.chars().count();
    let c = &field.constraints;

    if let Some(min) = c.min_length.filter(|min| len < *min) {
        out.push(Violation::LengthConstraint {
            field: field.name.clone(),
            bound: LengthBound::Min(min),
        });
    }
    if let Some(max) = c.max_length.filter(|max| len > *max) {
        out.push(Violation::LengthConstraint {
            field: field.name.clone(),
            bound: LengthBound::Max(max),
        });
    }
}

fn check_range(field: &FieldDef, n: f64, out: &mut Vec<Violation>) {
    let c = &field.constraints;

    if let Some(min) = c.minimum.filter(|min| n < *min) {
        out.push(Violation::RangeConstraint {
            field: field.name.clone(),
            bound: RangeBound::Min(min),
        });
    }
    if let Some(max) = c.maximum.filter(|max| n > *max) {
        out.push(Violation::RangeConstraint {
            field: field.name.clone(),
            bound: RangeBound::Max(max),
        });
    }
}

fn mismatch(field: &FieldDef, actual: &Value) -> Violation {
    Violation::type_mismatch(&field.name, field.field_type.type_name(), json_type_name(actual))
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setup_registry() -> ModelRegistry {
        let registry = ModelRegistry::new();
        registry
            .register(ModelSpec::new(
                "Users",
                vec![
                    FieldDef::required("name", FieldType::String).min_length(2).max_length(10),
                    FieldDef::optional("age", FieldType::Integer)
                        .nullable()
                        .minimum(0.0)
                        .maximum(120.0),
                    FieldDef::optional("active", FieldType::Boolean).with_default(true),
                    FieldDef::optional("score", FieldType::Float),
                    FieldDef::optional("role", FieldType::one_of(["admin", "member"])),
                    FieldDef::optional("joined", FieldType::DateTime),
                ],
            ))
            .unwrap();
        registry
    }

    fn violations(result: SchemaResult<Document>) -> Vec<Violation> {
        result.unwrap_err().into_violations()
    }

    #[test]
    fn test_valid_document_passes_with_defaults() {
        let registry = setup_registry();
        let validator = SchemaValidator::new(&registry);

        let doc = validator.validate("users", &json!({ "name": "Alice" })).unwrap();
        assert_eq!(doc["name"], "Alice");
        assert_eq!(doc["active"], true);
        assert!(!doc.contains_key("age"));
    }

    #[test]
    fn test_model_lookup_is_case_insensitive() {
        let registry = setup_registry();
        let validator = SchemaValidator::new(&registry);
        assert!(validator.validate("USERS", &json!({ "name": "Alice" })).is_ok());
    }

    #[test]
    fn test_unknown_model_rejected() {
        let registry = setup_registry();
        let validator = SchemaValidator::new(&registry);

        let err = validator.validate("nonexistent", &json!({})).unwrap_err();
        assert_eq!(err.code().code(), "FLAMES_UNKNOWN_MODEL");
        assert!(err.violations().is_empty());
    }

    #[test]
    fn test_type_mismatch_reported() {
        let registry = setup_registry();
        let validator = SchemaValidator::new(&registry);

        let v = violations(validator.validate("users", &json!({ "name": 123 })));
        assert_eq!(v, vec![Violation::type_mismatch("name", "string", "integer")]);
    }

    #[test]
    fn test_integer_rejects_float() {
        let registry = setup_registry();
        let validator = SchemaValidator::new(&registry);

        let v = violations(validator.validate("users", &json!({ "name": "Al", "age": 3.5 })));
        assert_eq!(v, vec![Violation::type_mismatch("age", "integer", "float")]);
    }

    #[test]
    fn test_float_accepts_integers() {
        let registry = setup_registry();
        let validator = SchemaValidator::new(&registry);

        assert!(validator.validate("users", &json!({ "name": "Al", "score": 100 })).is_ok());
        assert!(validator.validate("users", &json!({ "name": "Al", "score": 99.5 })).is_ok());
    }

    #[test]
    fn test_range_is_inclusive() {
        let registry = setup_registry();
        let validator = SchemaValidator::new(&registry);

        assert!(validator.validate("users", &json!({ "name": "Al", "age": 0 })).is_ok());
        assert!(validator.validate("users", &json!({ "name": "Al", "age": 120 })).is_ok());

        let v = violations(validator.validate("users", &json!({ "name": "Al", "age": 121 })));
        assert_eq!(
            v,
            vec![Violation::RangeConstraint {
                field: "age".into(),
                bound: RangeBound::Max(120.0),
            }]
        );

        let v = violations(validator.validate("users", &json!({ "name": "Al", "age": -1 })));
        assert_eq!(v[0].code(), "RANGE_CONSTRAINT");
    }

    #[test]
    fn test_length_counts_characters() {
        let registry = setup_registry();
        let validator = SchemaValidator::new(&registry);

        // 10 characters, more than 10 bytes
        assert!(validator.validate("users", &json!({ "name": "éééééééééé" })).is_ok());

        let v = violations(validator.validate("users", &json!({ "name": "abcdefghijk" })));
        assert_eq!(
            v,
            vec![Violation::LengthConstraint {
                field: "name".into(),
                bound: LengthBound::Max(10),
            }]
        );
    }

    #[test]
    fn test_null_accepted_for_nullable_only() {
        let registry = setup_registry();
        let validator = SchemaValidator::new(&registry);

        let doc = validator
            .validate("users", &json!({ "name": "Al", "age": null }))
            .unwrap();
        assert!(doc["age"].is_null());

        let v = violations(validator.validate("users", &json!({ "name": null })));
        assert_eq!(v, vec![Violation::type_mismatch("name", "string", "null")]);

        // optional with a default is still not nullable
        let v = violations(validator.validate("users", &json!({ "name": "Al", "active": null })));
        assert_eq!(v, vec![Violation::type_mismatch("active", "boolean", "null")]);
    }

    #[test]
    fn test_enum_membership() {
        let registry = setup_registry();
        let validator = SchemaValidator::new(&registry);

        assert!(validator.validate("users", &json!({ "name": "Al", "role": "admin" })).is_ok());

        let v = violations(validator.validate("users", &json!({ "name": "Al", "role": "root" })));
        assert_eq!(
            v,
            vec![Violation::InvalidEnumValue {
                field: "role".into(),
                allowed: vec!["admin".into(), "member".into()],
            }]
        );

        let v = violations(validator.validate("users", &json!({ "name": "Al", "role": 1 })));
        assert_eq!(v[0].code(), "TYPE_MISMATCH");
    }

    #[test]
    fn test_date_time_format() {
        let registry = setup_registry();
        let validator = SchemaValidator::new(&registry);

        let ok = json!({ "name": "Al", "joined": "2024-01-01T10:00:00Z" });
        assert!(validator.validate("users", &ok).is_ok());

        let v = violations(validator.validate("users", &json!({ "name": "Al", "joined": "soon" })));
        assert_eq!(v, vec![Violation::invalid_format("joined", "date_time")]);
    }

    #[test]
    fn test_all_violations_collected_in_declaration_order() {
        let registry = setup_registry();
        let validator = SchemaValidator::new(&registry);

        let doc = json!({ "role": "root", "age": "old" });
        let v = violations(validator.validate("users", &doc));
        let fields: Vec<&str> = v.iter().map(Violation::field).collect();
        assert_eq!(fields, vec!["name", "age", "role"]);
    }

    #[test]
    fn test_root_must_be_object() {
        let registry = setup_registry();
        let validator = SchemaValidator::new(&registry);

        let v = violations(validator.validate("users", &json!(["name"])));
        assert_eq!(v, vec![Violation::type_mismatch("$root", "object", "array")]);
    }

    #[test]
    fn test_extra_fields_pass_through_by_default() {
        let registry = setup_registry();
        let validator = SchemaValidator::new(&registry);

        let doc = validator
            .validate("users", &json!({ "name": "Al", "nickname": "al" }))
            .unwrap();
        assert_eq!(doc["nickname"], "al");
    }

    #[test]
    fn test_extra_fields_rejected_under_reject_policy() {
        let registry = ModelRegistry::with_extra_fields(ExtraFields::Reject);
        registry
            .register(ModelSpec::new("m", vec![FieldDef::required("a", FieldType::String)]))
            .unwrap();
        let validator = SchemaValidator::new(&registry);

        let v = violations(validator.validate("m", &json!({ "a": "x", "z": 1, "b": 2 })));
        assert_eq!(
            v,
            vec![
                Violation::UndeclaredField { field: "b".into() },
                Violation::UndeclaredField { field: "z".into() },
            ]
        );
    }

    /// Struct narrower than its descriptor table
    #[derive(Debug, serde::Deserialize)]
    struct Counter {
        #[allow(dead_code)]
        count: u8,
    }

    impl Model for Counter {
        const NAME: &'static str = "counter";

        fn spec() -> ModelSpec {
            ModelSpec::new(Self::NAME, vec![FieldDef::required("count", FieldType::Integer)])
        }
    }

    #[test]
    fn test_validate_as_reports_struct_drift() {
        let registry = ModelRegistry::new();
        registry.register(Counter::spec()).unwrap();
        let validator = SchemaValidator::new(&registry);

        assert!(validator.validate_as::<Counter>(&json!({ "count": 7 })).is_ok());

        let err = validator.validate_as::<Counter>(&json!({ "count": 1000 })).unwrap_err();
        assert_eq!(err.code().code(), "FLAMES_MODEL_MISMATCH");
        assert!(err.violations().is_empty());
    }

    #[test]
    fn test_input_not_mutated() {
        let registry = setup_registry();
        let validator = SchemaValidator::new(&registry);

        let input = json!({ "name": "Alice" });
        let before = input.clone();
        validator.validate("users", &input).unwrap();
        assert_eq!(input, before);
    }
}
