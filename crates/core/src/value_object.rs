//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Line items and order totals are value objects: two line items for the
/// same product and quantity are interchangeable. Products and orders are
/// entities (see [`crate::Entity`]).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
