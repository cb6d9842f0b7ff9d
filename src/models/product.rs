use serde::{Deserialize, Serialize};

use crate::schema::{FieldDef, FieldType, Model, ModelSpec};

/// Products collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Price in dollars
    pub price: f64,
    pub category: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl Model for Product {
    const NAME: &'static str = "product";

    fn spec() -> ModelSpec {
        ModelSpec::new(
            Self::NAME,
            vec![
                FieldDef::required("title", FieldType::String).describe("Product title"),
                FieldDef::optional("description", FieldType::String)
                    .nullable()
                    .describe("Product description"),
                FieldDef::required("price", FieldType::Float)
                    .minimum(0.0)
                    .describe("Price in dollars"),
                FieldDef::required("category", FieldType::String).describe("Product category"),
                FieldDef::optional("in_stock", FieldType::Boolean)
                    .with_default(true)
                    .describe("Whether product is in stock"),
            ],
        )
        .describe("Products collection")
    }
}
