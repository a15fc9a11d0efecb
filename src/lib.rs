//! # Storefront core
//!
//! Cart-to-order checkout and optimistic catalog updates, built as a set of
//! tokio actors that each own their data:
//!
//! - [`ResourceActor`](actor_framework::ResourceActor) per catalog entity, the
//!   compare-and-set point for versioned updates
//! - [`LedgerActor`](ledger::LedgerActor) owning cart rows and orders, the
//!   atomic commit point for checkout
//!
//! [`StoreSystem`](app_system::StoreSystem) starts the actors and hands out
//! the clients.

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod error;
pub mod ids;
pub mod inventory_actor;
pub mod ledger;
pub mod product_actor;

#[cfg(test)]
mod mock_framework;
