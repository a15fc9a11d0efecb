use thiserror::Error;

use crate::actor_framework::Version;
use crate::domain::{CartRowId, InvalidQuantity, OrderId, ProductId};

/// Errors raised by the ledger store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Cart row not found for product {0}")]
    CartRowNotFound(ProductId),
    #[error(transparent)]
    InvalidQuantity(#[from] InvalidQuantity),
    #[error("Cart row {0} no longer exists")]
    MissingCartRow(CartRowId),
    #[error("Cart row {row} changed since it was read: expected {expected}, current {current}")]
    StaleCartRow {
        row: CartRowId,
        expected: Version,
        current: Version,
    },
    #[error("Order already exists: {0}")]
    DuplicateOrder(OrderId),
    #[error("Ledger actor closed")]
    ActorClosed,
    #[error("Ledger actor dropped")]
    ActorDropped,
}
