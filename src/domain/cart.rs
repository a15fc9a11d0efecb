use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actor_framework::Version;
use crate::domain::{CallerId, ProductId};
use crate::ids::TypedUuid;

pub type CartRowId = TypedUuid<CartRow>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid quantity: {0}")]
pub struct InvalidQuantity(pub i64);

/// A cart quantity. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Self = Self(1);

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Applies a signed change, failing if the result would drop below one.
    pub fn adjusted_by(self, delta: i64) -> Result<Self, InvalidQuantity> {
        let adjusted = i64::from(self.0)
            .checked_add(delta)
            .ok_or(InvalidQuantity(delta))?;
        Self::try_from(adjusted).map_err(|_| InvalidQuantity(delta))
    }
}

impl TryFrom<i64> for Quantity {
    type Error = InvalidQuantity;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u32::try_from(value) {
            Ok(quantity) if quantity >= 1 => Ok(Self(quantity)),
            _ => Err(InvalidQuantity(value)),
        }
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

/// One product line in a caller's cart. At most one row exists per
/// (caller, product) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartRow {
    pub id: CartRowId,
    pub caller: CallerId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub added_at: Timestamp,
    pub version: Version,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn rejects_zero_and_negative_quantities() {
        assert_eq!(Quantity::try_from(0), Err(InvalidQuantity(0)));
        assert_eq!(Quantity::try_from(-3), Err(InvalidQuantity(-3)));
        assert_eq!(Quantity::try_from(2).map(Quantity::get), Ok(2));
    }

    #[test]
    fn rejects_values_beyond_u32() {
        let too_big = i64::from(u32::MAX) + 1;
        assert_eq!(Quantity::try_from(too_big), Err(InvalidQuantity(too_big)));
    }

    #[test]
    fn adjustment_must_stay_positive() -> TestResult {
        let three = Quantity::try_from(3)?;

        assert_eq!(three.adjusted_by(-2)?, Quantity::ONE);
        assert_eq!(three.adjusted_by(-3), Err(InvalidQuantity(-3)));
        assert_eq!(three.adjusted_by(i64::MAX), Err(InvalidQuantity(i64::MAX)));
        Ok(())
    }

    #[test]
    fn deserializing_enforces_the_minimum() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("4").ok().map(Quantity::get), Some(4));
    }
}
