use std::convert::Infallible;

use jiff::Timestamp;

use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{InventoryCreate, InventoryItem, InventoryItemId, InventoryUpdate};

impl Entity for InventoryItem {
    type Id = InventoryItemId;
    type CreateParams = InventoryCreate;
    type Update = InventoryUpdate;
    type Action = Infallible;

    fn id(&self) -> InventoryItemId {
        self.id
    }

    fn from_create_params(
        id: InventoryItemId,
        params: InventoryCreate,
    ) -> Result<Self, FrameworkError> {
        Ok(Self {
            id,
            product_id: params.product_id,
            quantity: params.quantity,
            location: params.location,
            last_updated: Timestamp::now(),
        })
    }

    fn on_update(&mut self, update: InventoryUpdate) -> Result<(), FrameworkError> {
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        self.last_updated = Timestamp::now();
        Ok(())
    }

    fn handle_action(&mut self, action: Infallible) -> Result<(), FrameworkError> {
        match action {}
    }
}
