//! Host-side collaborators: the world query and the proxy entity factory.

use super::Anchors;
use crate::entity::{ProxyId, TargetId, ViewerId};

/// Read access to the host world.
pub trait World {
    /// Viewers within `radius` of `target`.
    fn nearby(&self, target: TargetId, radius: f64) -> Vec<ViewerId>;

    /// Every connected viewer.
    fn online_viewers(&self) -> Vec<ViewerId>;

    /// Number of real passengers riding `target`.
    fn passenger_count(&self, target: TargetId) -> usize;

    /// Whether `viewer` is in a non-participating observation mode.
    fn is_spectating(&self, viewer: ViewerId) -> bool;

    /// Name of `target` before any provider transforms it.
    fn base_name(&self, target: TargetId) -> String;
}

/// Allocator of client-side proxy entities.
pub trait EntityFactory {
    /// Create the bottom and top anchors of a new tag.
    fn create_anchors(&mut self, target: TargetId) -> Anchors;

    /// Create the proxy entity of one line.
    fn create_line(&mut self, target: TargetId) -> ProxyId;

    /// Release proxy entities.
    fn destroy(&mut self, entities: &[ProxyId]);
}

/// Factory handing out ids downward from a base, away from real entity ids.
#[derive(Debug, Clone)]
pub struct SequentialFactory {
    next: i32,
    live: usize,
    released: Vec<ProxyId>,
}

impl SequentialFactory {
    /// Create a factory whose first id is `base`.
    pub const fn new(base: i32) -> Self {
        Self {
            next: base,
            live: 0,
            released: Vec::new(),
        }
    }

    /// Number of allocated entities not yet released.
    pub const fn live(&self) -> usize {
        self.live
    }

    /// Every released entity, in release order.
    pub fn released(&self) -> &[ProxyId] {
        &self.released
    }

    fn allocate(&mut self) -> ProxyId {
        let id = ProxyId(self.next);
        self.next = self.next.wrapping_sub(1);
        self.live += 1;
        id
    }
}

impl Default for SequentialFactory {
    fn default() -> Self {
        Self::new(-1)
    }
}

impl EntityFactory for SequentialFactory {
    fn create_anchors(&mut self, _target: TargetId) -> Anchors {
        Anchors {
            bottom: self.allocate(),
            top: self.allocate(),
        }
    }

    fn create_line(&mut self, _target: TargetId) -> ProxyId {
        self.allocate()
    }

    fn destroy(&mut self, entities: &[ProxyId]) {
        self.live = self.live.saturating_sub(entities.len());
        self.released.extend_from_slice(entities);
    }
}
