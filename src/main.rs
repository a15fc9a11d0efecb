use rust_decimal::Decimal;
use tracing::{error, info, Instrument};

use storefront::app_system::{setup_tracing, AppConfig, StoreSystem};
use storefront::domain::{CallerId, InventoryCreate, ProductCreate};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = AppConfig::load().map_err(|e| e.to_string())?;
    setup_tracing(&config);

    info!("Starting storefront demo");

    let system = StoreSystem::new(&config);
    let caller = CallerId::new("U1");

    let span = tracing::info_span!("catalog_seeding");
    let (product_a, product_b) = async {
        info!("Seeding catalog");
        let a = system
            .product_client
            .create_product(ProductCreate {
                name: "Product A".to_string(),
                price: Decimal::new(1000, 2),
                category_id: None,
            })
            .await
            .map_err(|e| e.to_string())?;
        let b = system
            .product_client
            .create_product(ProductCreate {
                name: "Product B".to_string(),
                price: Decimal::new(500, 2),
                category_id: None,
            })
            .await
            .map_err(|e| e.to_string())?;
        system
            .inventory_client
            .create_inventory_item(InventoryCreate {
                product_id: a.entity.id,
                quantity: 100,
                location: "main-warehouse".to_string(),
            })
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>((a.entity.id, b.entity.id))
    }
    .instrument(span)
    .await?;

    info!(%product_a, %product_b, "Catalog seeded");

    let span = tracing::info_span!("cart_filling", caller = %caller);
    async {
        system
            .cart_client
            .add_to_cart(&caller, product_a, 2)
            .await
            .map_err(|e| e.to_string())?;
        system
            .cart_client
            .add_to_cart(&caller, product_b, 1)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("checkout", caller = %caller);
    let result = async {
        info!("Checking out");
        system.order_client.checkout(&caller).await
    }
    .instrument(span)
    .await;

    match result {
        Ok(order) => info!(order_id = %order.id, total = %order.total, lines = order.lines.len(), "Order placed"),
        Err(e) => error!(error = %e, kind = ?e.kind(), "Checkout failed"),
    }

    system.shutdown().await?;

    info!("Demo completed");
    Ok(())
}
