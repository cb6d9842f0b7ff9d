//! flames-schemas - collection models and document validation for the Flames viewer
//!
//! The viewer reads model definitions through the registry's introspection
//! calls and validates documents with [`schema::ModelRegistry::validate`]
//! before storing them.

pub mod cli;
pub mod models;
pub mod observability;
pub mod schema;

pub use models::{register_builtin_models, Booking, BookingStatus, LessonInstrument, Product, User};
pub use schema::{
    Document, ExtraFields, FieldDef, FieldType, Model, ModelRegistry, ModelSpec, SchemaError,
    SchemaResult, Violation,
};
