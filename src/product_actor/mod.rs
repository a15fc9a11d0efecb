//! Product catalog rules, including image attachment.

mod actions;
pub mod entity;

pub use actions::*;
