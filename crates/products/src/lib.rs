//! Products domain module.
//!
//! A product is a priced stock record keyed by name. Stock only changes
//! through the inventory that owns the product.

pub mod product;

pub use product::Product;
