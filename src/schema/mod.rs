//! Model registry and document validator
//!
//! Each model describes one collection: field names, types, optionality,
//! defaults and simple constraints. Documents are validated against a named
//! model before the viewer stores them.
//!
//! # Design Principles
//!
//! - Models are registered once at startup, read-only afterwards
//! - Model names are explicit and lower-cased
//! - Validation is pure and deterministic
//! - Every violation is reported in one pass, in declaration order
//! - Undeclared fields pass through unless the registry rejects them

mod errors;
mod format;
mod loader;
mod registry;
mod types;
mod validator;

pub use errors::{LengthBound, RangeBound, SchemaError, SchemaErrorCode, SchemaResult, Severity, Violation};
pub use format::{is_date_time, is_email, parse_date_time};
pub use loader::ModelLoader;
pub use registry::{ExtraFields, ModelRegistry};
pub use types::{Constraints, Document, FieldDef, FieldType, ModelSpec};
pub use validator::{validate_against, Model, SchemaValidator};
