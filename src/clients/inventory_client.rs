use tracing::{debug, instrument};

use crate::actor_framework::{ResourceClient, Versioned};
use crate::domain::{InventoryCreate, InventoryItem};
use crate::error::CatalogError;

/// Client for the inventory record store.
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<InventoryItem>,
}

impl_versioned_client!(InventoryClient, InventoryItem, CatalogError, inventory_item);

impl InventoryClient {
    #[instrument(skip(self))]
    pub async fn create_inventory_item(
        &self,
        params: InventoryCreate,
    ) -> Result<Versioned<InventoryItem>, CatalogError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(CatalogError::from)
    }
}
