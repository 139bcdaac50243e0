//! Inventory domain module.
//!
//! Holds the products of one store keyed by name and owns every stock
//! mutation. Purely in-memory; no IO.

pub mod store;

pub use store::Inventory;
