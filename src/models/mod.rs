//! Built-in collection models
//!
//! Each model is a native struct plus an explicit descriptor table. The
//! descriptor drives validation; the struct is what callers get back from
//! [`ModelRegistry::validate_as`].

mod booking;
mod product;
mod user;

pub use booking::{Booking, BookingStatus, LessonInstrument};
pub use product::Product;
pub use user::User;

use crate::observability::{log_event_with_fields, Event};
use crate::schema::{Model, ModelRegistry, ModelSpec, SchemaResult};

/// Descriptor tables of every built-in model
pub fn builtin_models() -> Vec<ModelSpec> {
    vec![User::spec(), Product::spec(), Booking::spec()]
}

/// Registers every built-in model.
pub fn register_builtin_models(registry: &ModelRegistry) -> SchemaResult<()> {
    for spec in builtin_models() {
        let name = spec.name.clone();
        let fields = spec.fields.len().to_string();
        registry.register(spec)?;
        log_event_with_fields(Event::ModelRegistered, &[("fields", fields.as_str()), ("model", name.as_str())]);
    }
    Ok(())
}
