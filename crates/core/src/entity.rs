//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Products are identified by name within an inventory; orders by `OrderId`.
pub trait Entity {
    /// Identifier type.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
