//! Storefront records, free of any store or actor concerns.

pub mod caller;
pub mod cart;
pub mod inventory;
pub mod order;
pub mod product;

pub use caller::*;
pub use cart::*;
pub use inventory::*;
pub use order::*;
pub use product::*;
