//! Product (merchandise catalog) model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Entity;

/// A product in the shop catalog. Deletion is soft: `is_active` is
/// cleared and the record stays in the backing file.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub product_id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unique stock-keeping unit, compared case-insensitively
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub quantity_in_stock: i32,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub dimensions: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Entity for Product {
    const COLLECTION: &'static str = "Products";

    fn id(&self) -> i32 {
        self.product_id
    }

    fn set_id(&mut self, id: i32) {
        self.product_id = id;
    }
}
