//! RenderedLine: one slot of a tag's stack.

use crate::entity::{ProxyId, ViewerId};
use crate::provider::{LineId, LineRef, ProviderId};
use std::collections::HashMap;

/// One slot in a tag's line stack.
///
/// The slot records, per viewer, the text that viewer currently sees. A
/// viewer missing from that record does not have the slot in its stack
/// (the line's text was null and the line does not keep its space, or the
/// viewer never received it).
#[derive(Debug, Clone)]
pub struct RenderedLine {
    provider: ProviderId,
    line: LineId,
    entity: ProxyId,
    /// Stack order key: (provider priority, provider attach sequence).
    pub(super) order: (i32, u64),
    shown: HashMap<ViewerId, String>,
}

impl RenderedLine {
    pub(super) fn new(
        provider: ProviderId,
        line: LineId,
        entity: ProxyId,
        order: (i32, u64),
    ) -> Self {
        Self {
            provider,
            line,
            entity,
            order,
            shown: HashMap::new(),
        }
    }

    /// Provider that owns this line.
    pub const fn provider(&self) -> ProviderId {
        self.provider
    }

    /// Provider-local line id.
    pub const fn line(&self) -> LineId {
        self.line
    }

    /// Whether this slot is rendered by the given line.
    pub fn is_rendered_by(&self, line: LineRef) -> bool {
        self.provider == line.provider && self.line == line.line
    }

    /// The line's proxy entity.
    pub const fn entity(&self) -> ProxyId {
        self.entity
    }

    /// Text currently shown to `viewer`, or `None` if the slot is absent
    /// from that viewer's stack.
    pub fn text_for(&self, viewer: ViewerId) -> Option<&str> {
        self.shown.get(&viewer).map(String::as_str)
    }

    /// Whether the slot is present in `viewer`'s stack.
    pub fn is_shown_to(&self, viewer: ViewerId) -> bool {
        self.shown.contains_key(&viewer)
    }

    /// Viewers whose stack holds this slot.
    pub fn viewers(&self) -> impl Iterator<Item = ViewerId> + '_ {
        self.shown.keys().copied()
    }

    pub(super) fn show(&mut self, viewer: ViewerId, text: String) {
        self.shown.insert(viewer, text);
    }

    pub(super) fn hide(&mut self, viewer: ViewerId) -> bool {
        self.shown.remove(&viewer).is_some()
    }
}
