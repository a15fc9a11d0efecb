use crate::actor_framework::Version;
use crate::domain::{CartRow, CartRowId, Order};

/// A single write inside a [`CommitBatch`].
#[derive(Debug, Clone)]
pub enum LedgerOp {
    InsertOrder(Order),
    /// Deletes a cart row, provided it is still at `expected`.
    DeleteCartRow { id: CartRowId, expected: Version },
}

/// An ordered group of writes that the ledger applies all-or-nothing.
#[derive(Debug, Clone, Default)]
pub struct CommitBatch {
    ops: Vec<LedgerOp>,
}

impl CommitBatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn insert_order(mut self, order: Order) -> Self {
        self.ops.push(LedgerOp::InsertOrder(order));
        self
    }

    #[must_use]
    pub fn delete_cart_row(mut self, id: CartRowId, expected: Version) -> Self {
        self.ops.push(LedgerOp::DeleteCartRow { id, expected });
        self
    }

    /// Queues deletion of every row, each guarded by the version it was read at.
    #[must_use]
    pub fn delete_cart_rows<'a>(self, rows: impl IntoIterator<Item = &'a CartRow>) -> Self {
        rows.into_iter()
            .fold(self, |batch, row| batch.delete_cart_row(row.id, row.version))
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub(crate) fn into_ops(self) -> Vec<LedgerOp> {
        self.ops
    }
}
