//! Records that are looked up by a stable key.

/// A record whose identity survives changes to its other fields.
///
/// Stores key their tables by [`Entity::key`], so two versions of the same
/// record always land in the same slot.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Owned copy of the identity.
    fn key(&self) -> Self::Id {
        self.id().clone()
    }
}
