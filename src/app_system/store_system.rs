use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::app_system::AppConfig;
use crate::clients::{
    CartClient, InventoryClient, LedgerClient, OrderClient, PricingSnapshotResolver, ProductClient,
};
use crate::domain::{InventoryItem, InventoryItemId, Product, ProductId};
use crate::ledger::LedgerActor;

/// Starts the store actors, wires the clients together, and shuts everything
/// down again.
pub struct StoreSystem {
    pub product_client: ProductClient,
    pub inventory_client: InventoryClient,
    pub ledger_client: LedgerClient,
    pub cart_client: CartClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    pub fn new(config: &AppConfig) -> Self {
        let capacity = config.channel_capacity.max(1);

        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(capacity, ProductId::now_v7);
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        let (inventory_actor, inventory_resource_client) =
            ResourceActor::<InventoryItem>::new(capacity, InventoryItemId::now_v7);
        let inventory_client = InventoryClient::new(inventory_resource_client);
        let inventory_handle = tokio::spawn(inventory_actor.run());

        let (ledger_actor, ledger_client) = LedgerActor::new(capacity);
        let ledger_handle = tokio::spawn(ledger_actor.run());

        let cart_client = CartClient::new(ledger_client.clone());
        let pricing = PricingSnapshotResolver::new(product_client.clone());
        let order_client = OrderClient::new(ledger_client.clone(), cart_client.clone(), pricing);

        info!(capacity, "Store system started");

        Self {
            product_client,
            inventory_client,
            ledger_client,
            cart_client,
            order_client,
            handles: vec![product_handle, inventory_handle, ledger_handle],
        }
    }

    /// Drops the clients so the actor mailboxes close, then waits for the
    /// actors to drain and stop. Clones of the clients held elsewhere keep
    /// their actor alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.cart_client);
        drop(self.ledger_client);
        drop(self.inventory_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
