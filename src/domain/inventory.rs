use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::domain::ProductId;
use crate::ids::TypedUuid;

pub type InventoryItemId = TypedUuid<InventoryItem>;

/// Stock held for a product at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub location: String,
    /// Stamped by the store on create and on every successful update.
    pub last_updated: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryCreate {
    pub product_id: ProductId,
    pub quantity: u32,
    pub location: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryUpdate {
    pub quantity: Option<u32>,
    pub location: Option<String>,
}
