//! Entity: identities and categories of the world objects tags attach to.
//!
//! All world entities are referred to by stable integer ids handed out by
//! the host. Proxy entities (the client-side line stack) live in their own
//! id space, allocated by an [`EntityFactory`](crate::render::EntityFactory).

use bitflags::bitflags;
use std::fmt;

/// Stable identity of a world entity that can carry a tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TargetId(pub i32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a viewer.
///
/// Viewers are player entities, so the inner value is the player's entity
/// id. This lets the engine recognize a viewer looking at its own tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ViewerId(pub i32);

impl ViewerId {
    /// The entity this viewer is embodied by.
    #[inline]
    pub const fn entity(self) -> TargetId {
        TargetId(self.0)
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "viewer#{}", self.0)
    }
}

/// Handle of a client-side proxy entity (a line, or one of the two anchors).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ProxyId(pub i32);

bitflags! {
    /// Entity categories, used to pick the default providers of a new tag.
    ///
    /// A target has exactly one category; providers declare the set they
    /// auto-attach to, where [`Categories::all`] means every category.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Categories: u16 {
        /// Connected players.
        const PLAYER = 1 << 0;
        /// Hostile mobs.
        const HOSTILE = 1 << 1;
        /// Passive and neutral mobs.
        const PASSIVE = 1 << 2;
        /// Rideable and transport entities.
        const VEHICLE = 1 << 3;
        /// Dropped items and projectiles.
        const ITEM = 1 << 4;
        /// Decorative and display entities.
        const DISPLAY = 1 << 5;
        /// Anything else.
        const OTHER = 1 << 6;
    }
}

/// Descriptor of the entity a tag is attached to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Target {
    /// Entity id.
    pub id: TargetId,
    /// The entity's category.
    pub category: Categories,
}

impl Target {
    /// Create a new target descriptor.
    #[inline]
    pub const fn new(id: TargetId, category: Categories) -> Self {
        Self { id, category }
    }

    /// Whether this target is the given viewer's own entity.
    #[inline]
    pub fn is_viewer(&self, viewer: ViewerId) -> bool {
        viewer.entity() == self.id
    }
}
