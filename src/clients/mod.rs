//! Typed clients over the store actors, plus the cart and checkout logic
//! built on top of them.

#[macro_use]
mod macros;

mod cart_client;
mod checkout;
mod inventory_client;
mod ledger_client;
mod order_client;
mod pricing;
mod product_client;

pub use cart_client::CartClient;
pub use checkout::CheckoutPhase;
pub use inventory_client::InventoryClient;
pub use ledger_client::LedgerClient;
pub use order_client::OrderClient;
pub use pricing::PricingSnapshotResolver;
pub use product_client::ProductClient;
