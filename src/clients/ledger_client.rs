use tokio::sync::mpsc;

use crate::domain::{CallerId, CartRow, Order, OrderId, ProductId};
use crate::ledger::{CommitBatch, LedgerRequest};

/// Raw access to the ledger actor. Higher-level cart and checkout logic lives
/// in [`CartClient`](crate::clients::CartClient) and
/// [`OrderClient`](crate::clients::OrderClient).
#[derive(Clone)]
pub struct LedgerClient {
    sender: mpsc::Sender<LedgerRequest>,
}

impl LedgerClient {
    pub fn new(sender: mpsc::Sender<LedgerRequest>) -> Self {
        Self { sender }
    }
}

client_method!(LedgerClient => fn load_cart(caller: CallerId) -> Vec<CartRow> as LedgerRequest::LoadCart);
client_method!(LedgerClient => fn upsert_cart_row(caller: CallerId, product_id: ProductId, quantity: i64) -> CartRow as LedgerRequest::UpsertCartRow);
client_method!(LedgerClient => fn set_cart_quantity(caller: CallerId, product_id: ProductId, quantity: i64) -> CartRow as LedgerRequest::SetCartQuantity);
client_method!(LedgerClient => fn remove_cart_row(caller: CallerId, product_id: ProductId) -> () as LedgerRequest::RemoveCartRow);
client_method!(LedgerClient => fn commit(batch: CommitBatch) -> () as LedgerRequest::Commit);
client_method!(LedgerClient => fn get_order(caller: CallerId, id: OrderId) -> Option<Order> as LedgerRequest::GetOrder);
client_method!(LedgerClient => fn list_orders(caller: CallerId) -> Vec<Order> as LedgerRequest::ListOrders);
