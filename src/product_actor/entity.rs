use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{Product, ProductCreate, ProductId, ProductUpdate};

use super::actions::ProductAction;

impl Entity for Product {
    type Id = ProductId;
    type CreateParams = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;

    fn id(&self) -> ProductId {
        self.id
    }

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, FrameworkError> {
        let product = Self {
            id,
            name: params.name,
            price: params.price,
            category_id: params.category_id,
            image_url: None,
        };
        product.validate().map_err(FrameworkError::Rejected)?;
        Ok(product)
    }

    /// Applies the provided fields, then re-checks the catalog rules on the
    /// result.
    fn on_update(&mut self, update: ProductUpdate) -> Result<(), FrameworkError> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = image_url;
        }
        self.validate().map_err(FrameworkError::Rejected)
    }

    fn handle_action(&mut self, action: ProductAction) -> Result<(), FrameworkError> {
        match action {
            ProductAction::AttachImage(url) => {
                if url.trim().is_empty() {
                    return Err(FrameworkError::Rejected("image reference must not be empty".into()));
                }
                self.image_url = Some(url);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn create(name: &str, price: rust_decimal::Decimal) -> Result<Product, FrameworkError> {
        Product::from_create_params(
            ProductId::now_v7(),
            ProductCreate {
                name: name.to_string(),
                price,
                category_id: None,
            },
        )
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(matches!(create("Mug", dec!(-0.01)), Err(FrameworkError::Rejected(_))));
    }

    #[test]
    fn zero_price_is_allowed() {
        assert!(create("Sticker", dec!(0)).is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(create("  ", dec!(1)), Err(FrameworkError::Rejected(_))));
    }

    #[test]
    fn update_keeps_unspecified_fields() -> Result<(), FrameworkError> {
        let mut product = create("Mug", dec!(8))?;

        product.on_update(ProductUpdate {
            price: Some(dec!(9.50)),
            ..ProductUpdate::default()
        })?;

        assert_eq!(product.name, "Mug");
        assert_eq!(product.price, dec!(9.50));
        Ok(())
    }

    #[test]
    fn update_can_clear_optional_references() -> Result<(), FrameworkError> {
        let mut product = create("Mug", dec!(8))?;
        product.handle_action(ProductAction::AttachImage("mug.png".to_string()))?;

        product.on_update(ProductUpdate {
            image_url: Some(None),
            ..ProductUpdate::default()
        })?;

        assert_eq!(product.image_url, None);
        Ok(())
    }
}
