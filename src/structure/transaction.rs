//! Transactions: atomic, ordered changes to one viewer's copy of a tag.

use crate::entity::{ProxyId, TargetId, ViewerId};

/// One change to a viewer's rendering of a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Mount a new line entity at `position`; slots at and below it move down.
    Insert {
        /// Viewer-relative stack position (0 = topmost).
        position: usize,
        /// The line's proxy entity.
        entity: ProxyId,
        /// Text to show.
        text: String,
    },
    /// Unmount the line at `position`; slots below it move up.
    Remove {
        /// Viewer-relative stack position.
        position: usize,
        /// The line's proxy entity.
        entity: ProxyId,
    },
    /// Replace the text of the line at `position`.
    Update {
        /// Viewer-relative stack position.
        position: usize,
        /// The line's proxy entity.
        entity: ProxyId,
        /// New text.
        text: String,
    },
    /// Replace the composed display name.
    Name {
        /// New display name.
        text: String,
    },
}

/// A [`Change`] addressed to one viewer's copy of one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Tag the change applies to.
    pub target: TargetId,
    /// Viewer whose copy changes.
    pub viewer: ViewerId,
    /// The change itself.
    pub change: Change,
}

impl Transaction {
    /// Create a new transaction.
    #[inline]
    pub const fn new(target: TargetId, viewer: ViewerId, change: Change) -> Self {
        Self { target, viewer, change }
    }

    /// Position this transaction touches, if it addresses a line.
    pub const fn position(&self) -> Option<usize> {
        match &self.change {
            Change::Insert { position, .. }
            | Change::Remove { position, .. }
            | Change::Update { position, .. } => Some(*position),
            Change::Name { .. } => None,
        }
    }
}

/// A line as it appears in a full spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSnapshot {
    /// The line's proxy entity.
    pub entity: ProxyId,
    /// Text shown to the viewer (blank for kept empty slots).
    pub text: String,
}
