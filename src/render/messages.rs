//! Message types delivered to the transaction sink.
//!
//! These enums define the protocol between the engine and the transport
//! that materializes proxy entities on clients.

use crate::entity::{ProxyId, TargetId, ViewerId};
use crate::structure::{LineSnapshot, Transaction};

/// The two proxy entities bounding a tag's stack.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Anchors {
    /// Rides the target; the lowest line mounts on it.
    pub bottom: ProxyId,
    /// Rides the topmost line; carries the composed display name.
    pub top: ProxyId,
}

impl Anchors {
    /// Both anchors, bottom first.
    pub const fn entities(&self) -> [ProxyId; 2] {
        [self.bottom, self.top]
    }
}

/// Commands for one viewer's copy of a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    /// Create the whole stack for a viewer that has none.
    Spawn {
        /// Tag being spawned.
        target: TargetId,
        /// Stack anchors.
        anchors: Anchors,
        /// Visible lines, topmost first.
        lines: Vec<LineSnapshot>,
        /// Composed display name.
        name: String,
    },

    /// Tear the viewer's copy down entirely.
    Destroy {
        /// Tag being destroyed.
        target: TargetId,
        /// Every proxy entity the viewer holds for this tag, anchors included.
        entities: Vec<ProxyId>,
    },

    /// Apply one incremental change.
    Apply(Transaction),
}

impl RenderCommand {
    /// Tag this command concerns.
    pub const fn target(&self) -> TargetId {
        match self {
            Self::Spawn { target, .. } | Self::Destroy { target, .. } => *target,
            Self::Apply(transaction) => transaction.target,
        }
    }
}

/// A command addressed to a viewer, as carried over a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Recipient.
    pub viewer: ViewerId,
    /// The command.
    pub command: RenderCommand,
}
