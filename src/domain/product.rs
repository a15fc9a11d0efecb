use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::TypedUuid;

pub type ProductId = TypedUuid<Product>;

/// Categories are administered outside the core; products only carry the reference.
#[derive(Debug)]
pub enum Category {}

pub type CategoryId = TypedUuid<Category>;

/// A catalog entry.
///
/// Price changes never reach order lines that were already committed; those
/// hold their own frozen copy of the unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub category_id: Option<CategoryId>,
    pub image_url: Option<String>,
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    pub category_id: Option<CategoryId>,
}

/// Field changes for an existing product. `None` leaves a field as it is.
///
/// The optional references take `Some(None)` to clear them. In JSON an
/// explicit `null` clears, an absent key keeps.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "present")]
    pub category_id: Option<Option<CategoryId>>,
    #[serde(default, deserialize_with = "present")]
    pub image_url: Option<Option<String>>,
}

/// Only runs for keys that are present, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Product {
    /// Checks the catalog rules a product must satisfy before it is stored.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("product name must not be empty".to_string());
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(format!("product price must not be negative: {}", self.price));
        }
        Ok(())
    }
}
