//! Visibility: per-(tag, viewer) overrides and the spawned reverse index.
//!
//! An override is tri-state. [`Visibility::Inherit`] is never stored; it is
//! what a missing entry means. Independently, the index records which tags
//! are currently spawned for which viewer, in both directions, so that a
//! provider- or line-scoped broadcast only visits tags a viewer actually has.

use crate::entity::{TargetId, ViewerId};
use std::collections::{BTreeSet, HashMap};

/// Visibility override of one tag for one viewer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Visibility {
    /// Always shown, regardless of the tag's default.
    ForceVisible,
    /// Never shown, regardless of the tag's default.
    ForceHidden,
    /// Follow the tag's default.
    #[default]
    Inherit,
}

impl Visibility {
    /// Resolve against a tag's default into the effective show/hide decision.
    #[inline]
    pub const fn resolve(self, default_visible: bool) -> bool {
        match self {
            Self::ForceVisible => true,
            Self::ForceHidden => false,
            Self::Inherit => default_visible,
        }
    }

    /// The explicit override for a boolean.
    #[inline]
    pub const fn forced(visible: bool) -> Self {
        if visible {
            Self::ForceVisible
        } else {
            Self::ForceHidden
        }
    }
}

impl From<Option<bool>> for Visibility {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Inherit, Self::forced)
    }
}

/// Process-wide visibility registry.
#[derive(Debug, Default)]
pub struct VisibilityStates {
    overrides: HashMap<(TargetId, ViewerId), Visibility>,
    by_viewer: HashMap<ViewerId, BTreeSet<TargetId>>,
    by_target: HashMap<TargetId, BTreeSet<ViewerId>>,
}

impl VisibilityStates {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the override for (tag, viewer); `Inherit` clears it.
    pub fn set_visible(&mut self, target: TargetId, viewer: ViewerId, value: Visibility) {
        match value {
            Visibility::Inherit => {
                self.overrides.remove(&(target, viewer));
            }
            forced => {
                self.overrides.insert((target, viewer), forced);
            }
        }
    }

    /// Raw override lookup, independent of proximity and spawn state.
    pub fn is_visible(&self, target: TargetId, viewer: ViewerId) -> Visibility {
        self.overrides
            .get(&(target, viewer))
            .copied()
            .unwrap_or_default()
    }

    /// Tags currently spawned for `viewer`.
    pub fn get_visible(&self, viewer: ViewerId) -> impl Iterator<Item = TargetId> + '_ {
        self.by_viewer.get(&viewer).into_iter().flatten().copied()
    }

    /// Viewers that currently have `target` spawned.
    pub fn spawned_viewers(&self, target: TargetId) -> impl Iterator<Item = ViewerId> + '_ {
        self.by_target.get(&target).into_iter().flatten().copied()
    }

    /// Whether `target` is spawned for `viewer`.
    pub fn is_spawned(&self, target: TargetId, viewer: ViewerId) -> bool {
        self.by_viewer
            .get(&viewer)
            .is_some_and(|tags| tags.contains(&target))
    }

    /// Record that `target` was spawned for `viewer`.
    pub fn mark_spawned(&mut self, target: TargetId, viewer: ViewerId) {
        self.by_viewer.entry(viewer).or_default().insert(target);
        self.by_target.entry(target).or_default().insert(viewer);
    }

    /// Record that `target` was destroyed for `viewer`.
    pub fn mark_destroyed(&mut self, target: TargetId, viewer: ViewerId) {
        if let Some(tags) = self.by_viewer.get_mut(&viewer) {
            tags.remove(&target);
            if tags.is_empty() {
                self.by_viewer.remove(&viewer);
            }
        }
        if let Some(viewers) = self.by_target.get_mut(&target) {
            viewers.remove(&viewer);
            if viewers.is_empty() {
                self.by_target.remove(&target);
            }
        }
    }

    /// Forget everything about a tag.
    pub fn purge_target(&mut self, target: TargetId) {
        self.overrides.retain(|(t, _), _| *t != target);
        if let Some(viewers) = self.by_target.remove(&target) {
            for viewer in viewers {
                self.mark_destroyed(target, viewer);
            }
        }
    }

    /// Forget everything about a viewer.
    pub fn purge_viewer(&mut self, viewer: ViewerId) {
        self.overrides.retain(|(_, v), _| *v != viewer);
        if let Some(tags) = self.by_viewer.remove(&viewer) {
            for target in tags {
                self.mark_destroyed(target, viewer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: TargetId = TargetId(1);
    const U: TargetId = TargetId(2);
    const V: ViewerId = ViewerId(10);

    #[test]
    fn test_resolve_tri_state() {
        assert!(Visibility::ForceVisible.resolve(false));
        assert!(!Visibility::ForceHidden.resolve(true));
        assert!(Visibility::Inherit.resolve(true));
        assert!(!Visibility::Inherit.resolve(false));
        assert_eq!(Visibility::from(None), Visibility::Inherit);
        assert_eq!(Visibility::from(Some(false)), Visibility::ForceHidden);
    }

    #[test]
    fn test_set_and_clear_override() {
        let mut states = VisibilityStates::new();
        assert_eq!(states.is_visible(T, V), Visibility::Inherit);

        states.set_visible(T, V, Visibility::ForceVisible);
        assert_eq!(states.is_visible(T, V), Visibility::ForceVisible);
        assert_eq!(states.is_visible(U, V), Visibility::Inherit);

        states.set_visible(T, V, Visibility::Inherit);
        assert_eq!(states.is_visible(T, V), Visibility::Inherit);
    }

    #[test]
    fn test_reverse_index() {
        let mut states = VisibilityStates::new();
        states.mark_spawned(T, V);
        states.mark_spawned(U, V);
        assert_eq!(states.get_visible(V).collect::<Vec<_>>(), vec![T, U]);
        assert!(states.is_spawned(T, V));

        states.mark_destroyed(T, V);
        assert_eq!(states.get_visible(V).collect::<Vec<_>>(), vec![U]);
        assert_eq!(states.spawned_viewers(T).count(), 0);
        assert_eq!(states.spawned_viewers(U).collect::<Vec<_>>(), vec![V]);
    }

    #[test]
    fn test_purge_target_and_viewer() {
        let mut states = VisibilityStates::new();
        states.mark_spawned(T, V);
        states.mark_spawned(U, V);
        states.set_visible(T, V, Visibility::ForceHidden);

        states.purge_target(T);
        assert!(!states.is_spawned(T, V));
        assert_eq!(states.is_visible(T, V), Visibility::Inherit);
        assert!(states.is_spawned(U, V));

        states.set_visible(U, V, Visibility::ForceVisible);
        states.purge_viewer(V);
        assert_eq!(states.get_visible(V).count(), 0);
        assert_eq!(states.is_visible(U, V), Visibility::Inherit);
    }
}
