//! # Cart & Order Ledger
//!
//! The store that owns cart rows and orders. Keeping both tables behind one
//! actor is what lets a checkout insert its order and delete the consumed cart
//! rows as a single atomic [`CommitBatch`].

mod actor;
mod batch;
pub mod error;
mod messages;
mod tables;

pub use actor::LedgerActor;
pub use batch::{CommitBatch, LedgerOp};
pub use error::LedgerError;
pub use messages::{LedgerRequest, ServiceResponse};
