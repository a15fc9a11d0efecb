use tracing::{debug, instrument};

use crate::actor_framework::{ResourceClient, Versioned};
use crate::domain::{Product, ProductCreate, ProductId};
use crate::error::CatalogError;
use crate::product_actor::ProductAction;

/// Client for the product catalog store.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_versioned_client!(ProductClient, Product, CatalogError, product);

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Versioned<Product>, CatalogError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(CatalogError::from)
    }

    /// Sets the image reference without a version check; the version still
    /// advances so pending guarded updates see the change.
    #[instrument(skip(self))]
    pub async fn attach_image(
        &self,
        id: ProductId,
        image_url: String,
    ) -> Result<Versioned<Product>, CatalogError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, ProductAction::AttachImage(image_url))
            .await
            .map_err(CatalogError::from)
    }
}
