//! Renderer: proximity policy, spawn bookkeeping and command submission.
//!
//! The renderer owns the host collaborators and the visibility index. It
//! decides nothing about lines; tags hand it finished snapshots and
//! transactions, and it records what each viewer has spawned.

use super::{Anchors, EntityFactory, RenderCommand, TransactionSink, World};
use crate::config::TagConfig;
use crate::entity::{ProxyId, Target, TargetId, ViewerId};
use crate::structure::{LineSnapshot, Transaction};
use crate::visibility::{Visibility, VisibilityStates};

/// Proximity band a viewer must fall in.
///
/// Anything that adds visibility qualifies viewers with the tight
/// [`Spawn`](Self::Spawn) radius; anything that keeps or removes it uses the
/// looser [`Keep`](Self::Keep) radius. A viewer between the two keeps a tag
/// it already has but never gains a new one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Band {
    /// Radius factor 1.0 by default.
    Spawn,
    /// Radius factor 1.1 by default.
    Keep,
}

impl Band {
    /// Radius of this band under `config`.
    pub fn radius(self, config: &TagConfig) -> f64 {
        match self {
            Self::Spawn => config.spawn_radius(),
            Self::Keep => config.keep_radius(),
        }
    }
}

/// Counters of submitted commands, for debugging and profiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Full spawns submitted.
    pub spawns: u64,
    /// Full destroys submitted.
    pub destroys: u64,
    /// Incremental transactions submitted.
    pub transactions: u64,
}

/// Boundary component between tags and the host.
pub struct Renderer {
    config: TagConfig,
    world: Box<dyn World>,
    factory: Box<dyn EntityFactory>,
    sink: Box<dyn TransactionSink>,
    states: VisibilityStates,
    stats: RenderStats,
}

impl Renderer {
    /// Create a renderer over the host collaborators.
    pub fn new(
        config: TagConfig,
        world: Box<dyn World>,
        factory: Box<dyn EntityFactory>,
        sink: Box<dyn TransactionSink>,
    ) -> Self {
        Self {
            config,
            world,
            factory,
            sink,
            states: VisibilityStates::new(),
            stats: RenderStats::default(),
        }
    }

    /// The active configuration.
    pub const fn config(&self) -> &TagConfig {
        &self.config
    }

    /// The host world.
    pub fn world(&self) -> &dyn World {
        self.world.as_ref()
    }

    /// The proxy entity factory.
    pub fn factory_mut(&mut self) -> &mut dyn EntityFactory {
        self.factory.as_mut()
    }

    /// The visibility index.
    pub const fn states(&self) -> &VisibilityStates {
        &self.states
    }

    /// The visibility index, mutably.
    pub fn states_mut(&mut self) -> &mut VisibilityStates {
        &mut self.states
    }

    /// Submission counters.
    pub const fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Viewers within `band` of `target`, never including the target itself.
    pub fn nearby(&self, target: &Target, band: Band) -> Vec<ViewerId> {
        let mut viewers = self.world.nearby(target.id, band.radius(&self.config));
        viewers.retain(|&v| !target.is_viewer(v));
        viewers
    }

    /// Whether `viewer` is within `band` of `target`.
    pub fn is_within(&self, target: &Target, viewer: ViewerId, band: Band) -> bool {
        !target.is_viewer(viewer)
            && self
                .world
                .nearby(target.id, band.radius(&self.config))
                .contains(&viewer)
    }

    /// Whether `target` is spawned for `viewer`.
    pub fn is_spawned(&self, target: TargetId, viewer: ViewerId) -> bool {
        self.states.is_spawned(target, viewer)
    }

    /// Raw visibility override for (tag, viewer).
    pub fn is_visible(&self, target: TargetId, viewer: ViewerId) -> Visibility {
        self.states.is_visible(target, viewer)
    }

    /// Effective visibility for (tag, viewer) given the tag's default.
    pub fn is_effectively_visible(&self, target: TargetId, viewer: ViewerId, default_visible: bool) -> bool {
        self.states.is_visible(target, viewer).resolve(default_visible)
    }

    /// Set or clear the visibility override for (tag, viewer).
    pub fn set_visible(&mut self, target: TargetId, viewer: ViewerId, value: Visibility) {
        self.states.set_visible(target, viewer, value);
    }

    /// Submit a full spawn and record it.
    pub fn spawn(
        &mut self,
        target: TargetId,
        viewer: ViewerId,
        anchors: Anchors,
        lines: Vec<LineSnapshot>,
        name: String,
    ) {
        tracing::debug!(tag = %target, %viewer, lines = lines.len(), "spawning tag");
        self.sink.submit(
            viewer,
            RenderCommand::Spawn {
                target,
                anchors,
                lines,
                name,
            },
        );
        self.states.mark_spawned(target, viewer);
        self.stats.spawns += 1;
    }

    /// Submit a full destroy and record it.
    ///
    /// `entities` are the viewer's line entities; the anchors are appended.
    pub fn destroy(&mut self, target: TargetId, viewer: ViewerId, anchors: Anchors, mut entities: Vec<ProxyId>) {
        tracing::debug!(tag = %target, %viewer, "destroying tag");
        entities.extend(anchors.entities());
        self.sink
            .submit(viewer, RenderCommand::Destroy { target, entities });
        self.states.mark_destroyed(target, viewer);
        self.stats.destroys += 1;
    }

    /// Submit one transaction to its viewer.
    pub fn process(&mut self, transaction: Transaction) {
        tracing::trace!(
            tag = %transaction.target,
            viewer = %transaction.viewer,
            change = ?transaction.change,
            "applying transaction"
        );
        self.stats.transactions += 1;
        self.sink
            .submit(transaction.viewer, RenderCommand::Apply(transaction));
    }

    /// Submit transactions in order.
    pub fn process_all(&mut self, transactions: Vec<Transaction>) {
        for transaction in transactions {
            self.process(transaction);
        }
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("config", &self.config)
            .field("states", &self.states)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
