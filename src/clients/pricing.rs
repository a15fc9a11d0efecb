use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::clients::ProductClient;
use crate::domain::ProductId;
use crate::error::CatalogError;

/// Looks up the unit price to freeze into an order line.
#[derive(Clone)]
pub struct PricingSnapshotResolver {
    products: ProductClient,
}

impl PricingSnapshotResolver {
    pub fn new(products: ProductClient) -> Self {
        Self { products }
    }

    /// The product's current price verbatim, or `None` if the product no
    /// longer exists.
    #[instrument(skip(self))]
    pub async fn resolve_price(&self, product_id: ProductId) -> Result<Option<Decimal>, CatalogError> {
        let price = self
            .products
            .get_product(product_id)
            .await?
            .map(|row| row.entity.price);
        debug!(?price, "Price resolved");
        Ok(price)
    }
}
