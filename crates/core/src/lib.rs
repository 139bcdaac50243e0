//! `shopkeep-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the product,
//! inventory and sales crates.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::OrderId;
pub use value_object::ValueObject;
