use tracing::{debug, info, instrument, warn};

use crate::clients::LedgerClient;
use crate::domain::{CallerId, CartRow, ProductId};
use crate::error::CartError;

/// The cart aggregator: every operation is scoped to one caller's rows.
#[derive(Clone)]
pub struct CartClient {
    ledger: LedgerClient,
}

impl CartClient {
    pub fn new(ledger: LedgerClient) -> Self {
        Self { ledger }
    }

    /// The caller's rows in the order they were added. May be empty.
    #[instrument(fields(caller = %caller), skip(self, caller))]
    pub async fn load_cart(&self, caller: &CallerId) -> Result<Vec<CartRow>, CartError> {
        debug!("Loading cart");
        Ok(self.ledger.load_cart(caller.clone()).await?)
    }

    /// Like [`load_cart`](Self::load_cart), but an empty cart is an error.
    #[instrument(fields(caller = %caller), skip(self, caller))]
    pub async fn load_checkout_cart(&self, caller: &CallerId) -> Result<Vec<CartRow>, CartError> {
        let rows = self.ledger.load_cart(caller.clone()).await?;
        if rows.is_empty() {
            warn!("Cart is empty");
            return Err(CartError::EmptyCart(caller.clone()));
        }
        debug!(rows = rows.len(), "Cart aggregated");
        Ok(rows)
    }

    /// Adds `quantity` to the existing row for the product, or creates it.
    #[instrument(fields(caller = %caller), skip(self, caller))]
    pub async fn add_to_cart(
        &self,
        caller: &CallerId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartRow, CartError> {
        let row = self
            .ledger
            .upsert_cart_row(caller.clone(), product_id, quantity)
            .await?;
        info!(quantity = row.quantity.get(), "Added to cart");
        Ok(row)
    }

    #[instrument(fields(caller = %caller), skip(self, caller))]
    pub async fn update_quantity(
        &self,
        caller: &CallerId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartRow, CartError> {
        let row = self
            .ledger
            .set_cart_quantity(caller.clone(), product_id, quantity)
            .await?;
        info!(quantity = row.quantity.get(), "Cart quantity updated");
        Ok(row)
    }

    #[instrument(fields(caller = %caller), skip(self, caller))]
    pub async fn remove_from_cart(&self, caller: &CallerId, product_id: ProductId) -> Result<(), CartError> {
        self.ledger.remove_cart_row(caller.clone(), product_id).await?;
        info!("Removed from cart");
        Ok(())
    }
}
