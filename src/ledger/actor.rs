use jiff::Timestamp;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::clients::LedgerClient;
use crate::domain::{CallerId, CartRow, Order, OrderId, ProductId};
use crate::ledger::tables::LedgerTables;
use crate::ledger::{CommitBatch, LedgerRequest, ServiceResponse};

/// Owns the cart and order tables. Each request is handled to completion
/// before the next is read, which makes a [`CommitBatch`] atomic with respect
/// to every other cart or order operation.
pub struct LedgerActor {
    receiver: mpsc::Receiver<LedgerRequest>,
    tables: LedgerTables,
}

impl LedgerActor {
    pub fn new(buffer_size: usize) -> (Self, LedgerClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            tables: LedgerTables::default(),
        };
        (actor, LedgerClient::new(sender))
    }

    #[instrument(name = "ledger_actor", skip(self))]
    pub async fn run(mut self) {
        info!("LedgerActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                LedgerRequest::LoadCart { caller, respond_to } => {
                    self.handle_load_cart(caller, respond_to);
                }
                LedgerRequest::UpsertCartRow {
                    caller,
                    product_id,
                    quantity,
                    respond_to,
                } => {
                    self.handle_upsert_cart_row(caller, product_id, quantity, respond_to);
                }
                LedgerRequest::SetCartQuantity {
                    caller,
                    product_id,
                    quantity,
                    respond_to,
                } => {
                    self.handle_set_cart_quantity(caller, product_id, quantity, respond_to);
                }
                LedgerRequest::RemoveCartRow {
                    caller,
                    product_id,
                    respond_to,
                } => {
                    self.handle_remove_cart_row(caller, product_id, respond_to);
                }
                LedgerRequest::Commit { batch, respond_to } => {
                    self.handle_commit(batch, respond_to);
                }
                LedgerRequest::GetOrder {
                    caller,
                    id,
                    respond_to,
                } => {
                    self.handle_get_order(caller, id, respond_to);
                }
                LedgerRequest::ListOrders { caller, respond_to } => {
                    self.handle_list_orders(caller, respond_to);
                }
            }
        }
        info!("LedgerActor stopped");
    }

    #[instrument(fields(caller = %caller), skip(self, caller, respond_to))]
    fn handle_load_cart(&self, caller: CallerId, respond_to: ServiceResponse<Vec<CartRow>>) {
        let rows = self.tables.cart_rows_for(&caller);
        debug!(rows = rows.len(), "Cart loaded");
        let _ = respond_to.send(Ok(rows));
    }

    #[instrument(fields(caller = %caller), skip(self, caller, respond_to))]
    fn handle_upsert_cart_row(
        &mut self,
        caller: CallerId,
        product_id: ProductId,
        quantity: i64,
        respond_to: ServiceResponse<CartRow>,
    ) {
        let result = self
            .tables
            .upsert_cart_row(&caller, product_id, quantity, Timestamp::now());
        match &result {
            Ok(row) => info!(row_id = %row.id, total = row.quantity.get(), "Cart row upserted"),
            Err(e) => warn!(error = %e, "Cart upsert rejected"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(caller = %caller), skip(self, caller, respond_to))]
    fn handle_set_cart_quantity(
        &mut self,
        caller: CallerId,
        product_id: ProductId,
        quantity: i64,
        respond_to: ServiceResponse<CartRow>,
    ) {
        let result = self.tables.set_cart_quantity(&caller, product_id, quantity);
        match &result {
            Ok(row) => info!(row_id = %row.id, version = %row.version, "Cart quantity set"),
            Err(e) => warn!(error = %e, "Cart quantity change rejected"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(caller = %caller), skip(self, caller, respond_to))]
    fn handle_remove_cart_row(
        &mut self,
        caller: CallerId,
        product_id: ProductId,
        respond_to: ServiceResponse<()>,
    ) {
        let result = self.tables.remove_cart_row(&caller, product_id);
        match &result {
            Ok(row) => info!(row_id = %row.id, "Cart row removed"),
            Err(e) => debug!(error = %e, "Cart row not removed"),
        }
        let _ = respond_to.send(result.map(|_| ()));
    }

    /// Runs even when the requester has gone away, so a cancelled checkout
    /// still either fully commits or fully rolls back.
    #[instrument(fields(ops = batch.len()), skip(self, batch, respond_to))]
    fn handle_commit(&mut self, batch: CommitBatch, respond_to: ServiceResponse<()>) {
        let result = self.tables.commit(batch);
        match &result {
            Ok(()) => info!("Batch committed"),
            Err(e) => warn!(error = %e, "Batch rolled back"),
        }
        if respond_to.send(result).is_err() {
            debug!("Commit requester went away before the reply");
        }
    }

    #[instrument(fields(caller = %caller, order_id = %id), skip(self, caller, respond_to))]
    fn handle_get_order(
        &self,
        caller: CallerId,
        id: OrderId,
        respond_to: ServiceResponse<Option<Order>>,
    ) {
        let order = self.tables.order_for(&caller, id);
        match &order {
            Some(order) => debug!(total = %order.total, "Order found"),
            None => debug!("Order not found"),
        }
        let _ = respond_to.send(Ok(order));
    }

    #[instrument(fields(caller = %caller), skip(self, caller, respond_to))]
    fn handle_list_orders(&self, caller: CallerId, respond_to: ServiceResponse<Vec<Order>>) {
        let orders = self.tables.orders_for(&caller);
        debug!(orders = orders.len(), "Orders listed");
        let _ = respond_to.send(Ok(orders));
    }
}
