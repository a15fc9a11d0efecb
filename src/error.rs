use thiserror::Error;

use crate::actor_framework::{FrameworkError, Version};
use crate::domain::{AmountOverflow, CallerId, InvalidQuantity, OrderId, ProductId};
use crate::ledger::LedgerError;

/// Coarse classification an entry point maps to a client-facing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    BadRequest,
    Internal,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("No cart row for product {0}")]
    NotFound(ProductId),
    #[error(transparent)]
    InvalidQuantity(#[from] InvalidQuantity),
    #[error("Cart of {0} is empty")]
    EmptyCart(CallerId),
    #[error("Cart storage error: {0}")]
    Persistence(String),
}

impl CartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidQuantity(_) | Self::EmptyCart(_) => ErrorKind::BadRequest,
            Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}

impl From<LedgerError> for CartError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::CartRowNotFound(product_id) => Self::NotFound(product_id),
            LedgerError::InvalidQuantity(e) => Self::InvalidQuantity(e),
            other => Self::Persistence(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Cart of {0} is empty")]
    EmptyCart(CallerId),
    /// A consumed cart row was edited or removed while the order was priced.
    #[error("Cart changed during checkout: {0}")]
    CartChanged(String),
    #[error(transparent)]
    AmountOverflow(#[from] AmountOverflow),
    #[error("Checkout storage error: {0}")]
    Persistence(String),
}

impl CheckoutError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyCart(_) | Self::AmountOverflow(_) => ErrorKind::BadRequest,
            Self::CartChanged(_) => ErrorKind::Conflict,
            Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}

impl From<LedgerError> for CheckoutError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::StaleCartRow { .. } | LedgerError::MissingCartRow(_) => {
                Self::CartChanged(e.to_string())
            }
            other => Self::Persistence(other.to_string()),
        }
    }
}

impl From<CartError> for CheckoutError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::EmptyCart(caller) => Self::EmptyCart(caller),
            other => Self::Persistence(other.to_string()),
        }
    }
}

impl From<CatalogError> for CheckoutError {
    fn from(e: CatalogError) -> Self {
        Self::Persistence(e.to_string())
    }
}

/// Outcomes of product and inventory operations, including the versioned
/// update guard.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Version conflict: expected {expected}, current {current}")]
    Conflict { expected: Version, current: Version },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Catalog storage error: {0}")]
    Persistence(String),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Validation(_) => ErrorKind::BadRequest,
            Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}

impl From<FrameworkError> for CatalogError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => Self::NotFound(id),
            FrameworkError::Conflict { expected, current } => Self::Conflict { expected, current },
            FrameworkError::Rejected(reason) => Self::Validation(reason),
            other => Self::Persistence(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(OrderId),
    #[error("Order storage error: {0}")]
    Persistence(String),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}

impl From<LedgerError> for OrderError {
    fn from(e: LedgerError) -> Self {
        Self::Persistence(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CartRowId;

    #[test]
    fn stale_rows_surface_as_checkout_conflicts() {
        let stale = LedgerError::StaleCartRow {
            row: CartRowId::now_v7(),
            expected: Version::INITIAL,
            current: Version::INITIAL.next(),
        };

        assert_eq!(CheckoutError::from(stale).kind(), ErrorKind::Conflict);
        assert_eq!(
            CheckoutError::from(LedgerError::ActorClosed).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn version_conflicts_keep_both_tokens() {
        let err = CatalogError::from(FrameworkError::Conflict {
            expected: Version::INITIAL,
            current: Version::INITIAL.next(),
        });

        assert_eq!(
            err,
            CatalogError::Conflict {
                expected: Version::INITIAL,
                current: Version::INITIAL.next(),
            }
        );
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn cart_errors_map_from_ledger() {
        let product = ProductId::now_v7();

        assert_eq!(
            CartError::from(LedgerError::CartRowNotFound(product)),
            CartError::NotFound(product)
        );
        assert_eq!(
            CartError::from(LedgerError::InvalidQuantity(InvalidQuantity(0))).kind(),
            ErrorKind::BadRequest
        );
    }
}
