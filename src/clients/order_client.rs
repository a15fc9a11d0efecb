use jiff::Timestamp;
use tracing::{error, info, instrument, warn, Level};

use crate::clients::checkout::CheckoutProgress;
use crate::clients::{CartClient, CheckoutPhase, LedgerClient, PricingSnapshotResolver};
use crate::domain::{CallerId, Order, OrderId, OrderLine};
use crate::error::{CheckoutError, ErrorKind, OrderError};
use crate::ledger::CommitBatch;

/// Checkout engine and order history.
///
/// Aggregation and pricing run here, outside the ledger. The only write is the
/// final [`CommitBatch`], which the ledger applies all-or-nothing.
#[derive(Clone)]
pub struct OrderClient {
    ledger: LedgerClient,
    cart: CartClient,
    pricing: PricingSnapshotResolver,
}

impl OrderClient {
    pub fn new(ledger: LedgerClient, cart: CartClient, pricing: PricingSnapshotResolver) -> Self {
        Self {
            ledger,
            cart,
            pricing,
        }
    }

    /// Converts the caller's cart into an order.
    ///
    /// On success the order is stored and every cart row read for it is gone.
    /// On any error nothing was written. Never retries.
    #[instrument(fields(caller = %caller), skip(self, caller))]
    pub async fn checkout(&self, caller: &CallerId) -> Result<Order, CheckoutError> {
        let mut progress = CheckoutProgress::start();
        let result = self.run_checkout(caller, &mut progress).await;

        match &result {
            Ok(order) => {
                progress.advance(CheckoutPhase::Committed);
                info!(
                    order_id = %order.id,
                    total = %order.total,
                    lines = order.lines.len(),
                    "Checkout committed"
                );
            }
            Err(e) => {
                let failed_in = progress.phase();
                progress.advance(CheckoutPhase::Aborted);
                if abort_level(e) == Level::ERROR {
                    error!(error = %e, phase = %failed_in, "Checkout aborted");
                } else {
                    warn!(error = %e, phase = %failed_in, "Checkout aborted");
                }
            }
        }
        result
    }

    async fn run_checkout(
        &self,
        caller: &CallerId,
        progress: &mut CheckoutProgress,
    ) -> Result<Order, CheckoutError> {
        progress.advance(CheckoutPhase::Aggregating);
        let rows = self.cart.load_checkout_cart(caller).await?;

        progress.advance(CheckoutPhase::Pricing);
        let mut lines = Vec::with_capacity(rows.len());
        for row in &rows {
            match self.pricing.resolve_price(row.product_id).await? {
                Some(unit_price) => lines.push(OrderLine {
                    product_id: row.product_id,
                    quantity: row.quantity,
                    unit_price,
                }),
                None => warn!(product_id = %row.product_id, "Product vanished, line skipped"),
            }
        }

        progress.advance(CheckoutPhase::Committing);
        let order = Order::from_lines(OrderId::now_v7(), caller.clone(), Timestamp::now(), lines)?;
        let batch = CommitBatch::new()
            .insert_order(order.clone())
            .delete_cart_rows(&rows);
        self.ledger.commit(batch).await?;

        Ok(order)
    }

    /// The caller's orders, oldest first.
    #[instrument(fields(caller = %caller), skip(self, caller))]
    pub async fn order_history(&self, caller: &CallerId) -> Result<Vec<Order>, OrderError> {
        Ok(self.ledger.list_orders(caller.clone()).await?)
    }

    /// One of the caller's orders. Orders of other callers are reported as
    /// not found.
    #[instrument(fields(caller = %caller), skip(self, caller))]
    pub async fn order_details(&self, caller: &CallerId, id: OrderId) -> Result<Order, OrderError> {
        self.ledger
            .get_order(caller.clone(), id)
            .await?
            .ok_or(OrderError::NotFound(id))
    }
}

/// Caller-correctable outcomes are not server faults.
fn abort_level(e: &CheckoutError) -> Level {
    match e.kind() {
        ErrorKind::Internal => Level::ERROR,
        _ => Level::WARN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AmountOverflow;

    #[test]
    fn only_internal_failures_log_as_errors() {
        let caller = CallerId::new("U1");

        assert_eq!(abort_level(&CheckoutError::EmptyCart(caller)), Level::WARN);
        assert_eq!(abort_level(&CheckoutError::CartChanged("row".into())), Level::WARN);
        assert_eq!(abort_level(&CheckoutError::AmountOverflow(AmountOverflow)), Level::WARN);
        assert_eq!(abort_level(&CheckoutError::Persistence("down".into())), Level::ERROR);
    }
}
