//! World events the registry reacts to.

use crate::entity::{Target, TargetId, ViewerId};

/// Notifications from the host world.
///
/// The host delivers these serially from its event thread; each maps onto
/// one registry operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A tag-capable entity appeared.
    TargetCreated(Target),

    /// An entity went away for good.
    TargetRemoved(TargetId),

    /// An entity moved enough to warrant a proximity recheck.
    TargetMoved(TargetId),

    /// A viewer joined.
    ViewerConnected(ViewerId),

    /// A viewer left.
    ViewerDisconnected(ViewerId),

    /// A viewer moved or teleported.
    ViewerMoved(ViewerId),
}
