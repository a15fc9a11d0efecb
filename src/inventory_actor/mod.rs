//! Inventory records.

pub mod entity;
