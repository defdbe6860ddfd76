//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Statements and transactions are entities: a transaction keeps its id while
/// its amounts are edited and its running balance is recomputed.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Position of the entity with the given id in an ordered slice.
pub fn position_of<E: Entity>(items: &[E], id: &E::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}
