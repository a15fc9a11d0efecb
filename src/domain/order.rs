use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{CallerId, ProductId, Quantity};
use crate::ids::TypedUuid;

pub type OrderId = TypedUuid<Order>;

/// A line subtotal or the order total does not fit in a `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Order amount exceeds the representable range")]
pub struct AmountOverflow;

/// A priced order line. `unit_price` is a copy taken at commit time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub unit_price: Decimal,
}

impl OrderLine {
    pub fn subtotal(&self) -> Result<Decimal, AmountOverflow> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity.get()))
            .ok_or(AmountOverflow)
    }
}

/// A committed order. Never mutated after the checkout that created it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub caller: CallerId,
    pub created_at: Timestamp,
    pub total: Decimal,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Builds the order aggregate. The total is summed here, once, from the
    /// frozen line prices.
    pub fn from_lines(
        id: OrderId,
        caller: CallerId,
        created_at: Timestamp,
        lines: Vec<OrderLine>,
    ) -> Result<Self, AmountOverflow> {
        let total = lines.iter().try_fold(Decimal::ZERO, |total, line| {
            total.checked_add(line.subtotal()?).ok_or(AmountOverflow)
        })?;
        Ok(Self {
            id,
            caller,
            created_at,
            total,
            lines,
        })
    }
}
