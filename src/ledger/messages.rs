use tokio::sync::oneshot;

use crate::domain::{CallerId, CartRow, Order, OrderId, ProductId};
use crate::ledger::{CommitBatch, LedgerError};

pub type ServiceResponse<T> = oneshot::Sender<Result<T, LedgerError>>;

/// Typed requests for the ledger actor. Every cart and order request is
/// scoped to a caller; rows of other callers are never visible.
#[derive(Debug)]
pub enum LedgerRequest {
    LoadCart {
        caller: CallerId,
        respond_to: ServiceResponse<Vec<CartRow>>,
    },
    UpsertCartRow {
        caller: CallerId,
        product_id: ProductId,
        quantity: i64,
        respond_to: ServiceResponse<CartRow>,
    },
    SetCartQuantity {
        caller: CallerId,
        product_id: ProductId,
        quantity: i64,
        respond_to: ServiceResponse<CartRow>,
    },
    RemoveCartRow {
        caller: CallerId,
        product_id: ProductId,
        respond_to: ServiceResponse<()>,
    },
    Commit {
        batch: CommitBatch,
        respond_to: ServiceResponse<()>,
    },
    GetOrder {
        caller: CallerId,
        id: OrderId,
        respond_to: ServiceResponse<Option<Order>>,
    },
    ListOrders {
        caller: CallerId,
        respond_to: ServiceResponse<Vec<Order>>,
    },
}
