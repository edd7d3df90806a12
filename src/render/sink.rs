//! Transaction sinks: ordered per-viewer command delivery.

use super::{Envelope, RenderCommand};
use crate::entity::ViewerId;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

/// Receives render commands for viewers.
///
/// Implementations must deliver commands to each viewer in submission
/// order: transaction positions assume every earlier command of the same
/// viewer has been applied.
pub trait TransactionSink {
    /// Submit one command for `viewer`.
    fn submit(&mut self, viewer: ViewerId, command: RenderCommand);
}

/// Sink forwarding commands over a crossbeam channel.
///
/// The receiving end typically lives on a transport thread that encodes
/// commands into packets. A single channel preserves submission order for
/// every viewer.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<Envelope>,
}

impl ChannelSink {
    /// Create a sink over an unbounded channel.
    pub fn unbounded() -> (Self, Receiver<Envelope>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }

    /// Create a sink over a bounded channel.
    ///
    /// Submitting blocks while the channel is full.
    pub fn bounded(capacity: usize) -> (Self, Receiver<Envelope>) {
        let (sender, receiver) = bounded(capacity);
        (Self { sender }, receiver)
    }

    /// Wrap an existing sender.
    pub const fn from_sender(sender: Sender<Envelope>) -> Self {
        Self { sender }
    }
}

impl TransactionSink for ChannelSink {
    fn submit(&mut self, viewer: ViewerId, command: RenderCommand) {
        if self.sender.send(Envelope { viewer, command }).is_err() {
            tracing::warn!(%viewer, "transport channel disconnected, dropping render command");
        }
    }
}
