use serde::{Deserialize, Serialize};

use crate::schema::{FieldDef, FieldType, Model, ModelSpec};

/// Users collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Model for User {
    const NAME: &'static str = "user";

    fn spec() -> ModelSpec {
        ModelSpec::new(
            Self::NAME,
            vec![
                FieldDef::required("name", FieldType::String).describe("Full name"),
                FieldDef::required("email", FieldType::String).describe("Email address"),
                FieldDef::required("address", FieldType::String).describe("Address"),
                FieldDef::optional("age", FieldType::Integer)
                    .nullable()
                    .minimum(0.0)
                    .maximum(120.0)
                    .describe("Age in years"),
                FieldDef::optional("is_active", FieldType::Boolean)
                    .with_default(true)
                    .describe("Whether user is active"),
            ],
        )
        .describe("Users collection")
    }
}
