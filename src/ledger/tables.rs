use std::collections::{BTreeMap, HashMap};

use jiff::Timestamp;

use crate::actor_framework::Version;
use crate::domain::{CallerId, CartRow, CartRowId, Order, OrderId, ProductId, Quantity};
use crate::ledger::{CommitBatch, LedgerError, LedgerOp};

/// Inverse of an applied [`LedgerOp`], replayed in reverse to undo a batch.
enum Undo {
    RemoveOrder(OrderId),
    RestoreCartRow(CartRow),
}

/// The cart and order tables. Owned exclusively by the ledger actor, so every
/// method runs without interleaving.
#[derive(Debug, Default)]
pub(crate) struct LedgerTables {
    cart_rows: HashMap<CartRowId, CartRow>,
    cart_index: HashMap<(CallerId, ProductId), CartRowId>,
    orders: BTreeMap<OrderId, Order>,
}

impl LedgerTables {
    /// The caller's rows in the order they were added.
    pub fn cart_rows_for(&self, caller: &CallerId) -> Vec<CartRow> {
        let mut rows: Vec<CartRow> = self
            .cart_rows
            .values()
            .filter(|row| &row.caller == caller)
            .cloned()
            .collect();
        rows.sort_by_key(|row| (row.added_at, row.id));
        rows
    }

    /// Adds `quantity` to the caller's row for `product_id`, creating the row
    /// when none exists yet.
    pub fn upsert_cart_row(
        &mut self,
        caller: &CallerId,
        product_id: ProductId,
        quantity: i64,
        now: Timestamp,
    ) -> Result<CartRow, LedgerError> {
        if let Some(row) = self.row_mut(caller, product_id) {
            row.quantity = row.quantity.adjusted_by(quantity)?;
            row.version = row.version.next();
            return Ok(row.clone());
        }

        let row = CartRow {
            id: CartRowId::now_v7(),
            caller: caller.clone(),
            product_id,
            quantity: Quantity::try_from(quantity)?,
            added_at: now,
            version: Version::INITIAL,
        };
        self.insert_cart_row(row.clone());
        Ok(row)
    }

    pub fn set_cart_quantity(
        &mut self,
        caller: &CallerId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartRow, LedgerError> {
        let quantity = Quantity::try_from(quantity)?;
        let row = self
            .row_mut(caller, product_id)
            .ok_or(LedgerError::CartRowNotFound(product_id))?;
        row.quantity = quantity;
        row.version = row.version.next();
        Ok(row.clone())
    }

    pub fn remove_cart_row(
        &mut self,
        caller: &CallerId,
        product_id: ProductId,
    ) -> Result<CartRow, LedgerError> {
        let id = self
            .cart_index
            .remove(&(caller.clone(), product_id))
            .ok_or(LedgerError::CartRowNotFound(product_id))?;
        self.cart_rows
            .remove(&id)
            .ok_or(LedgerError::MissingCartRow(id))
    }

    pub fn order_for(&self, caller: &CallerId, id: OrderId) -> Option<Order> {
        self.orders
            .get(&id)
            .filter(|order| &order.caller == caller)
            .cloned()
    }

    /// The caller's orders, oldest first.
    pub fn orders_for(&self, caller: &CallerId) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .values()
            .filter(|order| &order.caller == caller)
            .cloned()
            .collect();
        orders.sort_by_key(|order| (order.created_at, order.id));
        orders
    }

    /// Applies every op of the batch or none of them.
    pub fn commit(&mut self, batch: CommitBatch) -> Result<(), LedgerError> {
        let mut journal = Vec::with_capacity(batch.len());
        for op in batch.into_ops() {
            match self.apply(op) {
                Ok(undo) => journal.push(undo),
                Err(e) => {
                    self.rollback(journal);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, op: LedgerOp) -> Result<Undo, LedgerError> {
        match op {
            LedgerOp::InsertOrder(order) => {
                if self.orders.contains_key(&order.id) {
                    return Err(LedgerError::DuplicateOrder(order.id));
                }
                let id = order.id;
                self.orders.insert(id, order);
                Ok(Undo::RemoveOrder(id))
            }
            LedgerOp::DeleteCartRow { id, expected } => {
                let current = self
                    .cart_rows
                    .get(&id)
                    .map(|row| row.version)
                    .ok_or(LedgerError::MissingCartRow(id))?;
                if current != expected {
                    return Err(LedgerError::StaleCartRow {
                        row: id,
                        expected,
                        current,
                    });
                }
                let row = self
                    .cart_rows
                    .remove(&id)
                    .ok_or(LedgerError::MissingCartRow(id))?;
                self.cart_index.remove(&(row.caller.clone(), row.product_id));
                Ok(Undo::RestoreCartRow(row))
            }
        }
    }

    fn rollback(&mut self, journal: Vec<Undo>) {
        for undo in journal.into_iter().rev() {
            match undo {
                Undo::RemoveOrder(id) => {
                    self.orders.remove(&id);
                }
                Undo::RestoreCartRow(row) => self.insert_cart_row(row),
            }
        }
    }

    fn insert_cart_row(&mut self, row: CartRow) {
        self.cart_index
            .insert((row.caller.clone(), row.product_id), row.id);
        self.cart_rows.insert(row.id, row);
    }

    fn row_mut(&mut self, caller: &CallerId, product_id: ProductId) -> Option<&mut CartRow> {
        let id = self.cart_index.get(&(caller.clone(), product_id))?;
        self.cart_rows.get_mut(id)
    }
}
